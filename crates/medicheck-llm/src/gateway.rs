//! Chat-completion gateway provider
//!
//! Talks to an OpenAI-compatible `/v1/chat/completions` endpoint.
//!
//! # Features
//!
//! - Bearer-token authentication
//! - Retry with exponential backoff on transport errors, 5xx and 429
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use medicheck_llm::{GatewayConfig, GatewayProvider};
//!
//! let provider = GatewayProvider::new(GatewayConfig::default().with_env_api_key())
//!     .expect("client builds");
//! ```

use crate::config::GatewayConfig;
use crate::LlmError;
use async_trait::async_trait;
use medicheck_domain::traits::LlmProvider;
use medicheck_domain::ChatMessage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Provider backed by a chat-completion gateway
pub struct GatewayProvider {
    config: GatewayConfig,
    client: reqwest::Client,
}

/// Request body for the chat-completion API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Response from the chat-completion API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GatewayProvider {
    /// Create a provider from configuration
    ///
    /// A missing API key is reported on the first call, not here.
    pub fn new(config: GatewayConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Other)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Model used for completions
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    async fn complete_once(&self, api_key: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                429 => LlmError::RateLimitExceeded,
                401 | 403 => LlmError::Authentication(format!("HTTP {}", status)),
                404 => LlmError::ModelNotAvailable(self.config.model.clone()),
                402 => LlmError::Other("Service temporarily unavailable".to_string()),
                s if s >= 500 => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
                _ => LlmError::InvalidResponse(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("Empty AI response".to_string()))
    }
}

#[async_trait]
impl LlmProvider for GatewayProvider {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::Authentication("Missing API key configuration".to_string()))?;

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.complete_once(api_key, messages).await {
                Ok(content) => {
                    debug!(model = %self.config.model, chars = content.len(), "Chat completion received");
                    return Ok(content);
                }
                Err(e) if e.is_transient() && attempts < self.config.max_attempts => {
                    let delay = self.config.backoff(attempts);
                    warn!(attempt = attempts, error = %e, "Chat completion failed, retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
