//! Configuration for the RxNav client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default public RxNav endpoint
pub const DEFAULT_BASE_URL: &str = "https://rxnav.nlm.nih.gov";

/// RxNav client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RxNavConfig {
    /// Base URL, without the `/REST` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per request, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each further retry (milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for RxNavConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl RxNavConfig {
    /// Configuration pointing at another base URL (tests, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Backoff before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(2u64.saturating_pow(retry.saturating_sub(1))))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("rxnav.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("rxnav.timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("rxnav.max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}
