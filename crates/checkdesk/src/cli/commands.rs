//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Run command arguments.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Override the display cooldown in seconds
    #[arg(long, value_name = "SECS")]
    pub cooldown_secs: Option<u64>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Log listing command arguments.
#[derive(Debug, Args)]
pub struct LogCommand {
    /// Show the last N check-ins
    #[arg(short, long, default_value = "20")]
    pub last: usize,

    /// Only show check-ins for this identifier
    #[arg(short, long)]
    pub dni: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file for the CSV export
    #[arg(default_value = "checkin_log.csv")]
    pub output: PathBuf,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
