use async_trait::async_trait;
use std::time::{Duration, Instant};
use url::Url;

use super::{PreparedRequest, Transport};
use crate::config::HttpConfig;
use crate::contract::ResponseSnapshot;
use crate::error::{ContractError, NetworkError};

/// Parse and sanity-check a base URL
pub fn parse_base_url(raw: &str) -> Result<Url, ContractError> {
    let invalid = |reason: String| ContractError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }

    Ok(url)
}

/// reqwest-backed transport with a per-request timeout; redirects are reported, not followed
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ContractError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ContractError::ClientError(e.to_string()))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client; its timeout and redirect policy apply per request
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, ContractError> {
        Self::new(config.timeout(), &config.user_agent)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<ResponseSnapshot, NetworkError> {
        let url = request.url.as_str();
        let mut builder = self.client.request(request.method.into(), request.url.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, url, "sending request");
        let started = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, &e))?;
        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, &e))?;

        let elapsed = started.elapsed();
        tracing::debug!(url, status, elapsed_ms = elapsed.as_millis() as u64, "response received");

        Ok(ResponseSnapshot::new(status, raw, elapsed))
    }
}
