//! Gateway configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat-completion gateway
pub const DEFAULT_ENDPOINT: &str = "https://ai.gateway.lovable.dev";

/// Default model
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "MEDICHECK_API_KEY";

/// Settings for the chat-completion gateway
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL; requests go to `{endpoint}/v1/chat/completions`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token; falls back to `MEDICHECK_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per request, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, doubled on each further retry (milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl GatewayConfig {
    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Backoff before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(2u64.saturating_pow(retry.saturating_sub(1))))
    }

    /// Fill `api_key` from the environment when it is not set
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            self.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("gateway.endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("gateway.model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("gateway.timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("gateway.max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}
