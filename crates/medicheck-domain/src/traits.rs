//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the outside
//! world. Implementations live in other crates (medicheck-rxnav,
//! medicheck-llm); tests substitute deterministic stubs.

use crate::drug::DrugCandidate;
use crate::interaction::InteractionRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Approximate-match lookup against a clinical terminology service
///
/// Implemented by the infrastructure layer (medicheck-rxnav)
#[async_trait]
pub trait TerminologyService: Send + Sync {
    /// Error type for lookup operations
    type Error: Display + Send;

    /// Candidates for a free-text term, best match first
    async fn approximate_term(
        &self,
        term: &str,
        max_entries: usize,
    ) -> Result<Vec<DrugCandidate>, Self::Error>;
}

/// Live interaction registry keyed by concept identifiers
///
/// Implemented by the infrastructure layer (medicheck-rxnav)
#[async_trait]
pub trait InteractionRegistry: Send + Sync {
    /// Error type for registry operations
    type Error: Display + Send;

    /// One batched query over all identifiers, flattened to one record per pair
    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionRecord>, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (medicheck-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: Display + Send;

    /// Run a chat completion and return the assistant message content
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error>;
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions and context
    System,
    /// The question
    User,
    /// Model output
    Assistant,
}

/// One message in a chat-completion exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// A user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}
