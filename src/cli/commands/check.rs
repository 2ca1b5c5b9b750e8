use clap::Args;

use crate::cli::utils::{build_transport, ensure_success, output_report, resolve_base_url};
use crate::cli::OutputFormat;
use crate::contract::{self, ContractCase, EndpointDescriptor, Expectation};
use crate::http::HttpMethod;
use crate::suite::RunReport;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[arg(long, help = "Request path relative to the base URL")]
    pub path: String,

    #[arg(long, short = 'X', default_value = "GET", help = "HTTP method")]
    pub method: HttpMethod,

    #[arg(long = "query", short = 'q', value_parser = parse_pair, help = "Query parameter as key=value (repeatable)")]
    pub query: Vec<(String, String)>,

    #[arg(long, default_value_t = 200, help = "Expected status code")]
    pub status: u16,

    #[arg(long = "require", short = 'r', help = "Field that must be present (repeatable, dot paths allowed)")]
    pub require: Vec<String>,

    #[arg(long = "equals", short = 'e', value_parser = parse_pair, help = "Expected field value as path=value (repeatable)")]
    pub equals: Vec<(String, String)>,

    #[arg(long, help = "Send twice and require identical responses")]
    pub idempotent: bool,

    #[arg(long, help = "Base URL override")]
    pub base_url: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u64).range(1..), help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("key cannot be empty: `{raw}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Values that parse as JSON compare as JSON, anything else as a string
fn parse_expected(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

impl CheckArgs {
    pub fn to_case(&self) -> ContractCase {
        let mut request = EndpointDescriptor::new(self.method, self.path.clone());
        for (key, value) in &self.query {
            request = request.query(key.clone(), value.clone());
        }

        let mut expect = Expectation::status(self.status);
        for path in &self.require {
            expect = expect.require(path.clone());
        }
        for (path, value) in &self.equals {
            expect = expect.equals(path.clone(), parse_expected(value));
        }

        let case = ContractCase::new(format!("{} {}", self.method, self.path), request, expect);
        if self.idempotent {
            case.idempotent()
        } else {
            case
        }
    }
}

pub async fn handle(args: CheckArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let base_url = resolve_base_url(args.base_url.as_deref(), None)?;
    let transport = build_transport(args.timeout_secs)?;
    let case = args.to_case();

    let started_at = chrono::Utc::now();
    let verdict = contract::check(&transport, &base_url, &case).await?;
    let report = RunReport::new("check", base_url.as_str(), started_at, vec![verdict]);

    output_report(&output_format, &report)?;
    ensure_success(&report)
}
