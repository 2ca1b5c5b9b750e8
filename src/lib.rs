pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod http;
pub mod suite;

pub use contract::{check, ContractCase, EndpointDescriptor, Expectation, FieldType, Mismatch, Outcome, Verdict};
pub use error::{ContractError, NetworkError, NetworkErrorKind};
pub use http::{HttpMethod, HttpTransport, Transport};
pub use suite::{RunReport, Suite, SuiteRunner};
