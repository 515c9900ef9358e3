//! MediCheck CLI library.
//!
//! Configuration, recent-check history, command execution and output
//! formatting for the `medicheck` command-line interface. Commands run the
//! interaction pipeline in-process.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use history::{HistoryEntry, HistoryLog};
pub use output::Formatter;
