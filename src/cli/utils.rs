use std::time::Duration;
use url::Url;

use crate::cli::OutputFormat;
use crate::config::config;
use crate::http::{parse_base_url, HttpTransport};
use crate::suite::{RunReport, Suite};

/// Print a run report; text mode shows one line per case then the summary
pub fn output_report(output_format: &OutputFormat, report: &RunReport) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            println!("Running {} against {}", report.suite, report.base_url);
            for verdict in &report.verdicts {
                println!("  {}", verdict.summary());
            }

            let failures: Vec<_> = report.failures().collect();
            if !failures.is_empty() {
                println!();
                println!("Failures:");
                for verdict in failures {
                    println!("  {}", verdict.summary());
                }
            }

            println!();
            println!("{}", report.summary_line());
        }
    }
    Ok(())
}

/// Turn an unsuccessful report into the command's error
pub fn ensure_success(report: &RunReport) -> anyhow::Result<()> {
    if report.success() {
        return Ok(());
    }
    Err(anyhow::anyhow!(
        "{} of {} cases did not pass ({} failed, {} network errors)",
        report.failed + report.errored,
        report.total(),
        report.failed,
        report.errored
    ))
}

pub fn output_suite(output_format: &OutputFormat, suite: &Suite) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(suite)?),
        OutputFormat::Text => print!("{}", suite.to_yaml()?),
    }
    Ok(())
}

/// Flag first, then the suite file, then configuration
pub fn resolve_base_url(flag: Option<&str>, suite_base: Option<&str>) -> anyhow::Result<Url> {
    let raw = flag
        .or(suite_base)
        .unwrap_or(config().http.base_url.as_str());
    Ok(parse_base_url(raw)?)
}

/// Zero seconds falls back to the configured timeout
pub fn build_transport(timeout_secs: Option<u64>) -> anyhow::Result<HttpTransport> {
    let http = &config().http;
    let timeout = timeout_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| http.timeout());
    Ok(HttpTransport::new(timeout, &http.user_agent)?)
}
