pub mod builtin;
pub mod report;
pub mod runner;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::contract::ContractCase;
use crate::error::ContractError;

pub use report::RunReport;
pub use runner::SuiteRunner;

/// Named, ordered set of contract cases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Suite {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub cases: Vec<ContractCase>,
}

impl Suite {
    pub fn new(name: impl Into<String>, cases: Vec<ContractCase>) -> Self {
        Self {
            name: name.into(),
            base_url: None,
            cases,
        }
    }

    /// Load from `.json`, otherwise YAML
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let content = fs::read_to_string(path).map_err(|source| ContractError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ContractError> {
        let suite: Suite = serde_yaml::from_str(content)?;
        suite.validate()?;
        Ok(suite)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ContractError> {
        let suite: Suite = serde_json::from_str(content)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Names must be present and unique; paths must resolve
    pub fn validate(&self) -> Result<(), ContractError> {
        let mut seen = HashSet::new();
        for case in &self.cases {
            if case.name.trim().is_empty() {
                return Err(ContractError::invalid_descriptor("<unnamed>", "case name is empty"));
            }
            if !seen.insert(case.name.as_str()) {
                return Err(ContractError::DuplicateCase(case.name.clone()));
            }
            case.request
                .resolve_path()
                .map_err(|reason| ContractError::invalid_descriptor(&case.name, reason))?;
        }
        Ok(())
    }

    /// Keep only cases whose name contains `pattern` (case-insensitive)
    pub fn filtered(mut self, pattern: Option<&str>) -> Self {
        if let Some(pattern) = pattern {
            let pattern = pattern.to_lowercase();
            self.cases.retain(|case| case.name.to_lowercase().contains(&pattern));
        }
        self
    }

    pub fn to_yaml(&self) -> Result<String, ContractError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
