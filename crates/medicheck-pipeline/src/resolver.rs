//! Terminology resolver: free-text names to concept identifiers

use futures::future::join_all;
use medicheck_domain::traits::TerminologyService;
use medicheck_domain::{DrugCandidate, DrugReference, Resolution};
use medicheck_rxnav::MIN_TERM_LENGTH;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Candidates requested when resolving a single name
const RESOLVE_MAX_ENTRIES: usize = 1;

/// Resolves drug names through a terminology service
///
/// Lookups never fail: errors and empty candidate sets become
/// [`Resolution::Unresolved`].
pub struct TerminologyResolver<T: TerminologyService> {
    service: Arc<T>,
}

impl<T: TerminologyService> Clone for TerminologyResolver<T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<T: TerminologyService> TerminologyResolver<T> {
    /// Create a resolver over a shared service
    pub fn new(service: Arc<T>) -> Self {
        Self { service }
    }

    /// The underlying service
    pub fn service(&self) -> &T {
        &self.service
    }

    /// Resolve one reference; an identifier known at selection time is reused
    pub async fn resolve(&self, drug: &DrugReference) -> Resolution {
        if let Some(rxcui) = drug.resolved_id() {
            return Resolution::Resolved {
                rxcui: rxcui.to_string(),
                synonym: None,
            };
        }
        self.resolve_name(drug.display_name()).await
    }

    /// Resolve a free-text name to its best candidate
    pub async fn resolve_name(&self, name: &str) -> Resolution {
        let term = name.trim();
        if term.chars().count() < MIN_TERM_LENGTH {
            debug!(term, "Name too short to resolve");
            return Resolution::Unresolved;
        }

        match self.service.approximate_term(term, RESOLVE_MAX_ENTRIES).await {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(best) => {
                    debug!(term, rxcui = %best.rxcui, "Resolved");
                    Resolution::Resolved {
                        rxcui: best.rxcui,
                        synonym: best.synonym,
                    }
                }
                None => {
                    debug!(term, "No terminology candidates");
                    Resolution::Unresolved
                }
            },
            Err(e) => {
                warn!(term, error = %e, "Terminology lookup failed; continuing unresolved");
                Resolution::Unresolved
            }
        }
    }

    /// Resolve every reference concurrently; output order matches input order
    pub async fn resolve_all(&self, drugs: &[DrugReference]) -> Vec<Resolution> {
        join_all(drugs.iter().map(|drug| self.resolve(drug))).await
    }

    /// Catalog search: up to `limit` candidates, one per concept
    ///
    /// Failures are logged and yield an empty list.
    pub async fn search(&self, term: &str, limit: usize) -> Vec<DrugCandidate> {
        let term = term.trim();
        if term.chars().count() < MIN_TERM_LENGTH {
            return Vec::new();
        }

        match self.service.approximate_term(term, limit).await {
            Ok(candidates) => {
                let mut seen = HashSet::new();
                candidates
                    .into_iter()
                    .filter(|candidate| seen.insert(candidate.rxcui.clone()))
                    .collect()
            }
            Err(e) => {
                warn!(term, error = %e, "Catalog search failed");
                Vec::new()
            }
        }
    }
}
