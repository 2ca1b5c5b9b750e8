use clap::Args;
use std::path::PathBuf;

use crate::cli::utils::output_suite;
use crate::cli::OutputFormat;
use crate::suite::builtin::swapi_suite;
use crate::suite::Suite;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(help = "Suite file to print")]
    pub file: Option<PathBuf>,
}

pub fn handle(args: ShowArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let suite = match args.file {
        Some(path) => Suite::from_path(&path)?,
        None => swapi_suite()?,
    };
    output_suite(&output_format, &suite)
}
