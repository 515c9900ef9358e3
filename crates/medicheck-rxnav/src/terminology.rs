//! Approximate-term lookup

use crate::client::RxNavClient;
use crate::error::RxNavError;
use async_trait::async_trait;
use medicheck_domain::traits::TerminologyService;
use medicheck_domain::DrugCandidate;
use serde::Deserialize;
use tracing::debug;

/// Shortest term worth sending to the service
pub const MIN_TERM_LENGTH: usize = 2;

/// Response from `approximateTerm.json`
#[derive(Debug, Default, Deserialize)]
pub struct ApproximateTermResponse {
    /// Candidate group; absent when nothing matched
    #[serde(rename = "approximateGroup", default)]
    pub approximate_group: Option<ApproximateGroup>,
}

/// Group of ranked candidates
#[derive(Debug, Default, Deserialize)]
pub struct ApproximateGroup {
    /// Candidates, best first
    #[serde(default)]
    pub candidate: Vec<Candidate>,
}

/// One approximate match
#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    /// Concept identifier
    #[serde(default)]
    pub rxcui: Option<String>,
    /// Matched synonym
    #[serde(default)]
    pub synonym: Option<String>,
    /// Concept name (newer API versions)
    #[serde(default)]
    pub name: Option<String>,
}

impl ApproximateTermResponse {
    /// Candidates with a non-empty identifier, in service order
    pub fn into_candidates(self, term: &str) -> Vec<DrugCandidate> {
        self.approximate_group
            .map(|group| group.candidate)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|candidate| {
                let rxcui = candidate.rxcui.filter(|id| !id.trim().is_empty())?;
                let synonym = candidate.synonym.or(candidate.name).filter(|s| !s.is_empty());
                Some(DrugCandidate {
                    name: synonym.clone().unwrap_or_else(|| term.to_string()),
                    rxcui,
                    synonym,
                })
            })
            .collect()
    }
}

#[async_trait]
impl TerminologyService for RxNavClient {
    type Error = RxNavError;

    async fn approximate_term(
        &self,
        term: &str,
        max_entries: usize,
    ) -> Result<Vec<DrugCandidate>, RxNavError> {
        let term = term.trim();
        if term.chars().count() < MIN_TERM_LENGTH {
            return Ok(Vec::new());
        }

        let url = self.endpoint("approximateTerm.json");
        let response: ApproximateTermResponse = self
            .get_json(
                &url,
                &[("term", term.to_string()), ("maxEntries", max_entries.to_string())],
            )
            .await?;

        let candidates = response.into_candidates(term);
        debug!(term, candidates = candidates.len(), "Approximate term lookup");
        Ok(candidates)
    }
}
