//! MediCheck LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `medicheck-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GatewayProvider`: OpenAI-compatible chat-completion gateway
//!
//! # Examples
//!
//! ```
//! use medicheck_llm::MockProvider;
//! use medicheck_domain::traits::LlmProvider;
//! use medicheck_domain::ChatMessage;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new(r#"{"interactions": []}"#);
//! let reply = provider.complete(&[ChatMessage::user("hi")]).await.unwrap();
//! assert_eq!(reply, r#"{"interactions": []}"#);
//! # });
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod gateway;

use async_trait::async_trait;
use medicheck_domain::traits::{ChatRole, LlmProvider};
use medicheck_domain::ChatMessage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use config::GatewayConfig;
pub use gateway::GatewayProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether another attempt may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimitExceeded)
    }
}

const ERROR_MARKER: &str = "ERROR";

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses are keyed by the content of the last user message.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
    last_messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that fails every call
    pub fn failing() -> Self {
        Self::new(ERROR_MARKER)
    }

    /// Add a specific response for a given user prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific user prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.add_response(prompt, ERROR_MARKER);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// Messages sent on the most recent call
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }

    /// System prompt sent on the most recent call
    pub fn last_system_prompt(&self) -> Option<String> {
        self.last_messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_messages.lock().unwrap() = messages.to_vec();

        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        if response == ERROR_MARKER {
            return Err(LlmError::Communication("Mock error".to_string()));
        }
        Ok(response)
    }
}
