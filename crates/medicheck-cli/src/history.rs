//! Recent-check history persisted as JSON.
//!
//! The log holds drug lists only, never results: re-running an entry always
//! goes back through the pipeline.

use crate::error::{CliError, Result};
use medicheck_domain::normalize_name;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;
use uuid::Uuid;

/// Maximum number of entries kept
pub const MAX_ENTRIES: usize = 10;

/// One recent check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Time-ordered identifier
    pub id: String,
    /// Unix timestamp in milliseconds
    pub timestamp: u64,
    /// Drug names as entered
    pub drugs: Vec<String>,
}

impl HistoryEntry {
    fn new(drugs: Vec<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            timestamp: current_millis(),
            drugs,
        }
    }

    /// Order- and case-insensitive identity of the drug set
    fn set_key(&self) -> Vec<String> {
        set_key(&self.drugs)
    }
}

/// Capped, most-recent-first list of checks backed by a file
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Default location, next to the config file
    pub fn default_path() -> Result<PathBuf> {
        Ok(crate::config::Config::dir()?.join("history.json"))
    }

    /// Open the log at `path`
    ///
    /// A missing file is an empty log. An unreadable or corrupt file is
    /// logged and treated as empty; it is replaced on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<HistoryEntry>>(&contents) {
                Ok(mut entries) => {
                    entries.truncate(MAX_ENTRIES);
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring corrupt history file");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read history file");
                Vec::new()
            }
        };
        Self { path, entries }
    }

    /// File backing this log
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry by 1-based position
    pub fn get(&self, position: usize) -> Result<&HistoryEntry> {
        position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "No history entry {} ({} recorded)",
                    position,
                    self.entries.len()
                ))
            })
    }

    /// Put a drug set at the top, replacing an earlier entry for the same set
    pub fn record(&mut self, drugs: &[String]) -> &HistoryEntry {
        let entry = HistoryEntry::new(drugs.to_vec());
        let key = entry.set_key();
        self.entries.retain(|existing| existing.set_key() != key);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
        &self.entries[0]
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write the log to its file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

fn set_key(drugs: &[String]) -> Vec<String> {
    let mut key: Vec<String> = drugs.iter().map(|drug| normalize_name(drug)).collect();
    key.sort();
    key.dedup();
    key
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
