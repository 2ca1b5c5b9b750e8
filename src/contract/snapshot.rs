use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Status and body of one exchange, captured once and read-only afterward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status: u16,
    /// Parsed body; `null` when empty or not JSON
    pub body: Value,
    #[serde(skip)]
    pub raw: String,
    pub elapsed_ms: u64,
}

impl ResponseSnapshot {
    pub fn new(status: u16, raw: String, elapsed: Duration) -> Self {
        let body = serde_json::from_str(&raw).unwrap_or(Value::Null);
        Self {
            status,
            body,
            raw,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn from_json(status: u16, body: Value) -> Self {
        Self {
            status,
            raw: body.to_string(),
            body,
            elapsed_ms: 0,
        }
    }

    pub fn is_json(&self) -> bool {
        !self.body.is_null() || self.raw.trim() == "null"
    }

    /// Same status and same body; non-JSON bodies compare as text
    pub fn same_content(&self, other: &ResponseSnapshot) -> bool {
        if self.status != other.status {
            return false;
        }
        if self.is_json() && other.is_json() {
            self.body == other.body
        } else {
            self.raw == other.raw
        }
    }
}
