//! Orchestrator wired to the real RxNav and gateway clients

use crate::config::{ConfigError, ServiceConfig};
use crate::orchestrator::Orchestrator;
use crate::registry::RegistryClient;
use crate::resolver::TerminologyResolver;
use medicheck_knowledge::KnowledgeBase;
use medicheck_llm::GatewayProvider;
use medicheck_narrative::NarrativeService;
use medicheck_rxnav::RxNavClient;
use std::sync::Arc;
use tracing::info;

/// Orchestrator backed by RxNav and the chat-completion gateway
pub type LiveOrchestrator = Orchestrator<RxNavClient, RxNavClient, GatewayProvider>;

/// Build a [`LiveOrchestrator`] from configuration
///
/// One RxNav client serves both terminology lookups and registry queries.
/// A missing gateway API key is picked up from the environment here and
/// reported on the first analysis if still absent.
pub fn build_orchestrator(
    config: &ServiceConfig,
    knowledge: Arc<KnowledgeBase>,
) -> Result<LiveOrchestrator, ConfigError> {
    config.validate()?;

    let rxnav = Arc::new(RxNavClient::new(config.rxnav.clone()).map_err(|e| {
        ConfigError::Client {
            service: "RxNav client",
            message: e.to_string(),
        }
    })?);

    let gateway_config = config.gateway.clone().with_env_api_key();
    let has_key = gateway_config.api_key.is_some();
    let gateway = GatewayProvider::new(gateway_config).map_err(|e| ConfigError::Client {
        service: "model gateway",
        message: e.to_string(),
    })?;

    info!(
        rxnav = %config.rxnav.base_url,
        model = gateway.model(),
        api_key_configured = has_key,
        knowledge_entries = knowledge.len(),
        "Interaction pipeline ready"
    );

    Ok(Orchestrator::new(
        TerminologyResolver::new(Arc::clone(&rxnav)),
        RegistryClient::new(rxnav),
        NarrativeService::new(gateway).with_timeout(config.gateway.timeout()),
        knowledge,
        config.pipeline.clone(),
    ))
}
