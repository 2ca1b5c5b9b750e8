use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::expectation::FieldType;
use crate::error::NetworkError;
use crate::http::HttpMethod;

/// First contract violation found in a response
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    #[error("status: expected {expected}, got {actual}")]
    Status { expected: u16, actual: u16 },

    #[error("field '{path}': missing")]
    MissingField { path: String },

    #[error("field '{path}': expected {expected}, got {actual}")]
    WrongType {
        path: String,
        expected: FieldType,
        actual: String,
    },

    #[error("field '{path}': expected a non-empty array")]
    EmptyArray { path: String },

    #[error("field '{path}': expected length {expected}, got {actual}")]
    Length {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("field '{path}': expected {expected}, got {actual}")]
    Value {
        path: String,
        expected: Value,
        actual: Value,
    },

    #[error("{array}.{index}: no field of [{}] contains '{term}'", .fields.join(", "))]
    Predicate {
        array: String,
        index: usize,
        fields: Vec<String>,
        term: String,
    },

    #[error("search predicate on '{array}' has no term and the request has no search query")]
    MissingSearchTerm { array: String },

    #[error("repeated request differs: {detail}")]
    NotIdempotent { detail: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail { mismatch: Mismatch },
    Error { error: NetworkError },
}

/// Pass/fail result for a single case with diagnostic detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub case: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Pass)
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match &self.outcome {
            Outcome::Fail { mismatch } => Some(mismatch),
            _ => None,
        }
    }

    /// One human-readable line
    pub fn summary(&self) -> String {
        match &self.outcome {
            Outcome::Pass => format!("✓ {} ({} {}, {}ms)", self.case, self.method, self.url, self.elapsed_ms),
            Outcome::Fail { mismatch } => {
                format!("✗ {} ({} {}): {}", self.case, self.method, self.url, mismatch)
            }
            Outcome::Error { error } => format!("! {}: {}", self.case, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn predicate_message_lists_fields() {
        let mismatch = Mismatch::Predicate {
            array: "results".into(),
            index: 2,
            fields: vec!["name".into(), "model".into()],
            term: "wing".into(),
        };
        assert_eq!(
            mismatch.to_string(),
            "results.2: no field of [name, model] contains 'wing'"
        );
    }

    #[test]
    fn value_message_shows_expected_and_actual() {
        let mismatch = Mismatch::Value {
            path: "name".into(),
            expected: json!("Luke Skywalker"),
            actual: json!("Darth Vader"),
        };
        assert_eq!(
            mismatch.to_string(),
            "field 'name': expected \"Luke Skywalker\", got \"Darth Vader\""
        );
    }

    #[test]
    fn outcome_serializes_with_tags() {
        let outcome = Outcome::Fail {
            mismatch: Mismatch::Status { expected: 200, actual: 404 },
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["result"], "fail");
        assert_eq!(value["mismatch"]["kind"], "status");
        assert_eq!(value["mismatch"]["actual"], 404);
    }
}
