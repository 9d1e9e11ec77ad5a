//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Table club day replay.
///
/// Reads a day of client events, applies the club's rules in time order and
/// reports the event log together with revenue and usage per table.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a day and print the event log and table summary.
    Replay {
        /// Input file with the club parameters and events.
        file: PathBuf,

        /// Output as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Validate an input file without replaying it.
    Check {
        /// Input file with the club parameters and events.
        file: PathBuf,
    },
}
