use super::Suite;
use crate::error::ContractError;

/// The Star Wars API suite shipped with the binary
pub const SWAPI_SUITE_YAML: &str = include_str!("../../suites/swapi.yaml");

pub fn swapi_suite() -> Result<Suite, ContractError> {
    Suite::from_yaml_str(SWAPI_SUITE_YAML)
}
