use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use club_cli::commands::{check, replay};
use club_cli::{Cli, Commands, Config, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never mix with the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Replay { file, json }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let format = if *json {
                OutputFormat::Json
            } else {
                config.format
            };
            replay::run(&mut stdout, file, format)?;
        }
        Some(Commands::Check { file }) => {
            check::run(&mut stdout, file)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
