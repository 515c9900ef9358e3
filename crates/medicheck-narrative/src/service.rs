//! Narrative augmentation service

use crate::error::NarrativeError;
use crate::parser::{parse_drug_info, parse_interactions};
use crate::prompt::{drug_info_messages, NarrativePromptBuilder};
use medicheck_domain::traits::LlmProvider;
use medicheck_domain::{ChatMessage, DrugInfo, InteractionRecord, RegistryOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Default budget for one model call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Asks a generative model for interaction narratives and drug monographs
pub struct NarrativeService<L: LlmProvider> {
    llm_provider: Arc<L>,
    call_timeout: Duration,
}

impl<L: LlmProvider> Clone for NarrativeService<L> {
    fn clone(&self) -> Self {
        Self {
            llm_provider: Arc::clone(&self.llm_provider),
            call_timeout: self.call_timeout,
        }
    }
}

impl<L: LlmProvider> NarrativeService<L> {
    /// Create a service around a provider
    pub fn new(llm_provider: L) -> Self {
        Self::from_arc(Arc::new(llm_provider))
    }

    /// Create a service around a shared provider
    pub fn from_arc(llm_provider: Arc<L>) -> Self {
        Self {
            llm_provider,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the per-call timeout
    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// The underlying provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Analyze interactions between `drugs`, given what the registry and the
    /// curated knowledge base found
    pub async fn analyze(
        &self,
        drugs: &[String],
        registry: &RegistryOutcome,
        knowledge: &[InteractionRecord],
    ) -> Result<Vec<InteractionRecord>, NarrativeError> {
        let messages = NarrativePromptBuilder::new(drugs, registry)
            .with_knowledge(knowledge)
            .messages();
        debug!(
            drugs = drugs.len(),
            registry = ?registry.status(),
            knowledge = knowledge.len(),
            "Requesting narrative analysis"
        );

        let response = self.call_llm(&messages).await?;
        let records = parse_interactions(&response)?;

        info!(records = records.len(), "Narrative analysis parsed");
        Ok(records)
    }

    /// Monograph for a single drug
    pub async fn drug_info(&self, drug_name: &str) -> Result<DrugInfo, NarrativeError> {
        let drug_name = drug_name.trim();
        if drug_name.is_empty() {
            return Err(NarrativeError::EmptyDrugName);
        }

        info!(drug = drug_name, "Fetching drug info");
        let response = self.call_llm(&drug_info_messages(drug_name)).await?;
        parse_drug_info(&response, drug_name)
    }

    async fn call_llm(&self, messages: &[ChatMessage]) -> Result<String, NarrativeError> {
        let response = timeout(self.call_timeout, self.llm_provider.complete(messages))
            .await
            .map_err(|_| NarrativeError::Timeout)?
            .map_err(|e| NarrativeError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());
        Ok(response)
    }
}
