use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised before any request goes out: loading suites, building URLs
#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Failed to read suite file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid descriptor for case '{case}': {reason}")]
    InvalidDescriptor { case: String, reason: String },

    #[error("Duplicate case name: {0}")]
    DuplicateCase(String),

    #[error("HTTP client error: {0}")]
    ClientError(String),
}

impl ContractError {
    pub fn invalid_descriptor(case: impl Into<String>, reason: impl Into<String>) -> Self {
        ContractError::InvalidDescriptor {
            case: case.into(),
            reason: reason.into(),
        }
    }
}

/// What went wrong on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkErrorKind {
    /// Per-request timeout elapsed
    Timeout,
    /// DNS failure or connection refused
    Connect,
    /// Anything else raised by the client
    Request,
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NetworkErrorKind::Timeout => "timeout",
            NetworkErrorKind::Connect => "connect",
            NetworkErrorKind::Request => "request",
        };
        write!(f, "{label}")
    }
}

/// Environment failure, kept apart from contract mismatches
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} error on {url}: {message}")]
pub struct NetworkError {
    pub kind: NetworkErrorKind,
    pub url: String,
    pub message: String,
}

impl NetworkError {
    pub fn new(kind: NetworkErrorKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }

    /// Classify a reqwest failure
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            NetworkErrorKind::Timeout
        } else if err.is_connect() {
            NetworkErrorKind::Connect
        } else {
            NetworkErrorKind::Request
        };
        Self::new(kind, url, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_display_names_kind_and_url() {
        let err = NetworkError::new(NetworkErrorKind::Connect, "http://127.0.0.1:1/x", "refused");
        assert_eq!(err.to_string(), "connect error on http://127.0.0.1:1/x: refused");
    }

    #[test]
    fn network_error_kind_serializes_lowercase() {
        let value = serde_json::to_value(NetworkErrorKind::Timeout).unwrap();
        assert_eq!(value, serde_json::json!("timeout"));
    }
}
