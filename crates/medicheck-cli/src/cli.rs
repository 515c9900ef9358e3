//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// MediCheck CLI - Check drug combinations for adverse interactions.
#[derive(Debug, Parser)]
#[command(name = "medicheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MEDICHECK_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per record)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check two or more drugs for interactions
    Check(CheckArgs),

    /// Search the drug catalog
    Search(SearchArgs),

    /// Show a single-drug monograph
    Info(InfoArgs),

    /// List recent checks
    History,

    /// Re-run a recent check
    Rerun(RerunArgs),

    /// Forget all recent checks
    ClearHistory,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Drug names (at least two)
    #[arg(required = true, num_args = 1..)]
    pub drugs: Vec<String>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Partial drug name
    pub term: String,
}

/// Arguments for the info command.
#[derive(Debug, Parser)]
pub struct InfoArgs {
    /// Drug name
    pub drug: String,
}

/// Arguments for the rerun command.
#[derive(Debug, Parser)]
pub struct RerunArgs {
    /// Position in the history list, 1 = most recent
    pub index: usize,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
