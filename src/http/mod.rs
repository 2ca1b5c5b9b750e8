pub mod client;
pub mod method;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::contract::ResponseSnapshot;
use crate::error::NetworkError;

pub use client::{parse_base_url, HttpTransport};
pub use method::HttpMethod;

/// A descriptor resolved against a base URL, ready for the transport
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<Value>,
}

/// Sends one request and captures the response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> Result<ResponseSnapshot, NetworkError>;
}
