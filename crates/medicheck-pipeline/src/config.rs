//! Service configuration loaded from TOML

use medicheck_llm::GatewayConfig;
use medicheck_rxnav::RxNavConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A client could not be built from the configuration
    #[error("Failed to initialize {service}: {message}")]
    Client {
        /// Which client
        service: &'static str,
        /// Rendered cause
        message: String,
    },
}

/// Orchestrator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// End-to-end budget for one analysis (seconds)
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    /// Budget shared by term resolution and the registry query (seconds)
    ///
    /// Capped at half of `deadline_secs`, so the narrative always keeps at
    /// least half of the request budget.
    #[serde(default = "default_source_budget_secs")]
    pub source_budget_secs: u64,

    /// Append knowledge-base and registry records for pairs the narrative omits
    #[serde(default = "default_include_uncovered_evidence")]
    pub include_uncovered_evidence: bool,

    /// Candidates returned by catalog search
    #[serde(default = "default_search_max_entries")]
    pub search_max_entries: usize,
}

fn default_deadline_secs() -> u64 {
    30
}

fn default_source_budget_secs() -> u64 {
    12
}

fn default_include_uncovered_evidence() -> bool {
    true
}

fn default_search_max_entries() -> usize {
    10
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline_secs(),
            source_budget_secs: default_source_budget_secs(),
            include_uncovered_evidence: default_include_uncovered_evidence(),
            search_max_entries: default_search_max_entries(),
        }
    }
}

impl PipelineConfig {
    /// Get the deadline as a Duration
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    /// Time allowed for resolution and the registry before the narrative starts
    pub fn source_budget(&self) -> Duration {
        Duration::from_secs(self.source_budget_secs).min(self.deadline() / 2)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.deadline_secs == 0 {
            return Err("pipeline.deadline_secs must be greater than 0".to_string());
        }
        if self.source_budget_secs == 0 {
            return Err("pipeline.source_budget_secs must be greater than 0".to_string());
        }
        if self.search_max_entries == 0 {
            return Err("pipeline.search_max_entries must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Settings for every external collaborator plus the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Terminology and registry service
    #[serde(default)]
    pub rxnav: RxNavConfig,

    /// Generative model gateway
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Orchestrator policy
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rxnav.validate().map_err(ConfigError::Invalid)?;
        self.gateway.validate().map_err(ConfigError::Invalid)?;
        self.pipeline.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
