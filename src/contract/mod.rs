pub mod check;
pub mod descriptor;
pub mod expectation;
pub mod snapshot;
pub mod verdict;

use serde::{Deserialize, Serialize};

pub use check::{check, evaluate, execute, lookup, prepare};
pub use descriptor::EndpointDescriptor;
pub use expectation::{Expectation, FieldType, SearchPredicate};
pub use snapshot::ResponseSnapshot;
pub use verdict::{Mismatch, Outcome, Verdict};

/// A named request paired with the response contract it must satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractCase {
    pub name: String,
    pub request: EndpointDescriptor,
    pub expect: Expectation,
    /// Send the request twice and require identical status and body
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub idempotent: bool,
}

impl ContractCase {
    pub fn new(name: impl Into<String>, request: EndpointDescriptor, expect: Expectation) -> Self {
        Self {
            name: name.into(),
            request,
            expect,
            idempotent: false,
        }
    }

    pub fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }
}
