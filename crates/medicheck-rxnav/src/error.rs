//! Error types for RxNav access

use thiserror::Error;

/// Errors that can occur talking to RxNav
#[derive(Error, Debug)]
pub enum RxNavError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Body did not decode into the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be built from the configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RxNavError {
    /// Whether another attempt may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            RxNavError::Request(_) => true,
            RxNavError::Http { status, .. } => *status == 429 || *status >= 500,
            RxNavError::InvalidResponse(_) | RxNavError::Config(_) => false,
        }
    }
}

impl From<serde_json::Error> for RxNavError {
    fn from(e: serde_json::Error) -> Self {
        RxNavError::InvalidResponse(e.to_string())
    }
}
