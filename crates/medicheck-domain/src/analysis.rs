//! Analysis requests, results, and provenance

use crate::drug::DrugReference;
use crate::interaction::InteractionRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Minimum number of distinct drugs an analysis needs
pub const MIN_DRUGS: usize = 2;

/// Input rejected before the pipeline starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Fewer than two distinct, non-blank drug names
    #[error("Please provide at least two drugs to analyze")]
    TooFewDrugs {
        /// Distinct usable names that were supplied
        distinct: usize,
    },
}

/// A validated analysis request: an ordered set of distinct drugs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    drugs: Vec<DrugReference>,
}

impl AnalysisRequest {
    /// Validate a list of references
    ///
    /// Blank names are dropped and duplicates (case-insensitive) collapse
    /// to their first occurrence. At least [`MIN_DRUGS`] must remain.
    pub fn new(drugs: Vec<DrugReference>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        let drugs: Vec<DrugReference> = drugs
            .into_iter()
            .filter(|drug| !drug.display_name().trim().is_empty())
            .filter(|drug| seen.insert(drug.normalized_name()))
            .collect();

        if drugs.len() < MIN_DRUGS {
            return Err(ValidationError::TooFewDrugs {
                distinct: drugs.len(),
            });
        }

        Ok(Self { drugs })
    }

    /// Validate a list of free-text names
    pub fn from_names<I, S>(names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| DrugReference::typed(name.as_ref().trim()))
                .collect(),
        )
    }

    /// The drugs, in input order
    pub fn drugs(&self) -> &[DrugReference] {
        &self.drugs
    }

    /// Display names, in input order
    pub fn display_names(&self) -> Vec<String> {
        self.drugs
            .iter()
            .map(|drug| drug.display_name().to_string())
            .collect()
    }
}

/// What the registry stage produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryOutcome {
    /// Fewer than two references resolved, so the registry was not queried
    NotAttempted {
        /// Number of references that resolved
        resolved: usize,
    },
    /// The registry answered; the list may be empty
    Completed(Vec<InteractionRecord>),
    /// Network, HTTP, or decode failure; evidence is empty
    Failed {
        /// Rendered failure
        reason: String,
    },
}

impl RegistryOutcome {
    /// Evidence records, empty unless the query completed with findings
    pub fn records(&self) -> &[InteractionRecord] {
        match self {
            RegistryOutcome::Completed(records) => records,
            _ => &[],
        }
    }

    /// Whether the query was attempted and failed
    pub fn is_failure(&self) -> bool {
        matches!(self, RegistryOutcome::Failed { .. })
    }

    /// Summary suitable for provenance
    pub fn status(&self) -> RegistryStatus {
        match self {
            RegistryOutcome::NotAttempted { .. } => RegistryStatus::NotAttempted,
            RegistryOutcome::Completed(records) if records.is_empty() => RegistryStatus::Empty,
            RegistryOutcome::Completed(records) => RegistryStatus::Found {
                count: records.len(),
            },
            RegistryOutcome::Failed { reason } => RegistryStatus::Failed {
                reason: reason.clone(),
            },
        }
    }
}

/// Registry outcome without the records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RegistryStatus {
    /// Not queried
    NotAttempted,
    /// Queried, nothing found
    Empty,
    /// Queried, interactions found
    Found {
        /// Number of flattened pair records
        count: usize,
    },
    /// Query failed
    Failed {
        /// Rendered failure
        reason: String,
    },
}

/// A source of interaction evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvidenceSource {
    /// Curated static table
    KnowledgeBase,
    /// Live government interaction registry
    Registry,
    /// Generative model analysis
    Narrative,
}

/// Which sources ran and what each contributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Distinct drugs in the request
    pub references_total: usize,
    /// Drugs that resolved to a concept identifier
    pub references_resolved: usize,
    /// Records matched in the knowledge base
    pub knowledge_base_matches: usize,
    /// Registry stage summary
    pub registry: RegistryStatus,
    /// Records returned by the narrative service
    pub narrative_records: usize,
    /// Sources with at least one record in the final set, merge order
    pub contributing_sources: Vec<EvidenceSource>,
}

/// Final, severity-ranked result of one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Records, most dangerous first
    pub interactions: Vec<InteractionRecord>,
    /// Source report
    pub provenance: Provenance,
}
