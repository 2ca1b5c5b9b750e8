pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "contract")]
#[command(about = "Contract checker - verify HTTP API responses against declarative expectations")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run a suite file (YAML or JSON)")]
    Run(commands::run::RunArgs),

    #[command(about = "Run the built-in Star Wars API suite")]
    Swapi(commands::run::RunOptions),

    #[command(about = "Check a single ad hoc request")]
    Check(commands::check::CheckArgs),

    #[command(about = "Print a suite (the built-in one when no file is given)")]
    Show(commands::show::ShowArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Run(args) => commands::run::handle_file(args, output_format).await,
        Commands::Swapi(options) => commands::run::handle_builtin(options, output_format).await,
        Commands::Check(args) => commands::check::handle(args, output_format).await,
        Commands::Show(args) => commands::show::handle(args, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_flag_is_rejected() {
        assert!(Cli::try_parse_from(["contract", "swapi", "--timeout-secs", "0"]).is_err());
        assert!(Cli::try_parse_from(["contract", "check", "--path", "/films/1", "--timeout-secs", "0"]).is_err());
        assert!(Cli::try_parse_from(["contract", "swapi", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn run_options_parse() {
        let cli = Cli::try_parse_from(["contract", "--json", "swapi", "--timeout-secs", "5", "--filter", "film"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Swapi(options) => {
                assert_eq!(options.timeout_secs, Some(5));
                assert_eq!(options.filter.as_deref(), Some("film"));
            }
            _ => panic!("expected the swapi command"),
        }
    }
}
