//! Registry client: degrade wrapper around the interaction registry

use medicheck_domain::traits::InteractionRegistry;
use medicheck_domain::RegistryOutcome;
use std::sync::Arc;
use tracing::{info, warn};

/// Queries the interaction registry and never fails
///
/// Fewer than two identifiers is a coverage gap ([`RegistryOutcome::NotAttempted`]);
/// transport and decode failures become [`RegistryOutcome::Failed`].
pub struct RegistryClient<R: InteractionRegistry> {
    registry: Arc<R>,
}

impl<R: InteractionRegistry> Clone for RegistryClient<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R: InteractionRegistry> RegistryClient<R> {
    /// Create a client over a shared registry
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// The underlying registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// One batched query over all resolved identifiers
    pub async fn query(&self, rxcuis: &[String]) -> RegistryOutcome {
        if rxcuis.len() < 2 {
            info!(resolved = rxcuis.len(), "Too few resolved drugs; skipping registry");
            return RegistryOutcome::NotAttempted {
                resolved: rxcuis.len(),
            };
        }

        match self.registry.interactions(rxcuis).await {
            Ok(records) => RegistryOutcome::Completed(records),
            Err(e) => {
                warn!(error = %e, "Registry query failed; continuing without registry evidence");
                RegistryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
