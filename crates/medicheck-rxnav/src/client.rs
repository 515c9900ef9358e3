//! HTTP plumbing shared by the terminology and registry endpoints

use crate::config::RxNavConfig;
use crate::error::RxNavError;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Client for the NLM RxNav REST API
#[derive(Debug, Clone)]
pub struct RxNavClient {
    config: RxNavConfig,
    client: reqwest::Client,
}

impl RxNavClient {
    /// Create a client from configuration
    pub fn new(config: RxNavConfig) -> Result<Self, RxNavError> {
        config.validate().map_err(RxNavError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RxNavError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The active configuration
    pub fn config(&self) -> &RxNavConfig {
        &self.config
    }

    /// Absolute URL for a path under `/REST`
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/REST/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET a JSON document, retrying transient failures with exponential backoff
    ///
    /// Every attempt decodes a fresh body, so a retry never accumulates
    /// results from an earlier attempt.
    pub(crate) async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, RxNavError>
    where
        T: DeserializeOwned,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.get_once(url, query).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempts < self.config.max_attempts => {
                    let delay = self.config.backoff(attempts);
                    warn!(url, attempt = attempts, error = %e, "RxNav request failed, retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, RxNavError>
    where
        T: DeserializeOwned,
    {
        debug!(url, "RxNav GET");
        let mut request = self.client.get(url);
        // Leave a pre-built query string untouched; the registry needs a literal '+'
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request
            .send()
            .await
            .map_err(|e| RxNavError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RxNavError::Request(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body
            };
            return Err(RxNavError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
