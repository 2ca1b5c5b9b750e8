use clap::Args;
use std::path::PathBuf;

use crate::cli::utils::{build_transport, ensure_success, output_report, resolve_base_url};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::suite::builtin::swapi_suite;
use crate::suite::{Suite, SuiteRunner};

#[derive(Args, Debug, Clone)]
pub struct RunOptions {
    #[arg(long, help = "Base URL override (defaults to the suite's, then CONTRACT_BASE_URL)")]
    pub base_url: Option<String>,

    #[arg(long, help = "Only run cases whose name contains this text")]
    pub filter: Option<String>,

    #[arg(long, value_parser = parse_concurrency, help = "Maximum cases in flight at once")]
    pub concurrency: Option<usize>,

    #[arg(long, value_parser = clap::value_parser!(u64).range(1..), help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(help = "Suite file (.yaml, .yml or .json)")]
    pub file: PathBuf,

    #[command(flatten)]
    pub options: RunOptions,
}

fn parse_concurrency(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn handle_file(args: RunArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let suite = Suite::from_path(&args.file)?;
    run_suite(suite, args.options, output_format).await
}

pub async fn handle_builtin(options: RunOptions, output_format: OutputFormat) -> anyhow::Result<()> {
    run_suite(swapi_suite()?, options, output_format).await
}

async fn run_suite(suite: Suite, options: RunOptions, output_format: OutputFormat) -> anyhow::Result<()> {
    let base_url = resolve_base_url(options.base_url.as_deref(), suite.base_url.as_deref())?;
    let suite = suite.filtered(options.filter.as_deref());
    if suite.cases.is_empty() {
        anyhow::bail!("no cases selected in suite '{}'", suite.name);
    }

    let concurrency = options.concurrency.unwrap_or(config().runner.concurrency);
    let runner = SuiteRunner::new(build_transport(options.timeout_secs)?, concurrency);
    let report = runner.run(&suite, &base_url).await?;

    output_report(&output_format, &report)?;
    ensure_success(&report)
}
