//! Drug references, catalog candidates, and terminology resolutions

use serde::{Deserialize, Serialize};

/// How a drug reference entered the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceHint {
    /// Free text typed by the user
    UserTyped,
    /// Picked from a catalog search result (usually already resolved)
    CatalogSelected,
}

/// A drug selected for analysis
///
/// Immutable once created; owned by the orchestrator for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugReference {
    display_name: String,
    resolved_id: Option<String>,
    source_hint: SourceHint,
}

impl DrugReference {
    /// A free-text reference typed by the user
    pub fn typed(name: impl Into<String>) -> Self {
        Self {
            display_name: name.into(),
            resolved_id: None,
            source_hint: SourceHint::UserTyped,
        }
    }

    /// A reference picked from the catalog, carrying its concept identifier
    pub fn from_candidate(candidate: &DrugCandidate) -> Self {
        Self {
            display_name: candidate.name.clone(),
            resolved_id: Some(candidate.rxcui.clone()).filter(|id| !id.is_empty()),
            source_hint: SourceHint::CatalogSelected,
        }
    }

    /// Name shown to the user and embedded in prompts
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Concept identifier known at selection time, if any
    pub fn resolved_id(&self) -> Option<&str> {
        self.resolved_id.as_deref()
    }

    /// How the reference entered the request
    pub fn source_hint(&self) -> SourceHint {
        self.source_hint
    }

    /// Case-normalized name used for pair matching
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.display_name)
    }
}

/// Case-normalize a drug name for comparisons and table lookups
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// One hit from the terminology catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugCandidate {
    /// Display name (the matched synonym, or the query when none)
    pub name: String,
    /// RxNorm concept identifier
    pub rxcui: String,
    /// Canonical synonym reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
}

/// Outcome of resolving one free-text name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The name matched a concept
    Resolved {
        /// RxNorm concept identifier
        rxcui: String,
        /// Best-matching canonical synonym, if the service reported one
        synonym: Option<String>,
    },
    /// No candidate, input too short, or the lookup failed
    Unresolved,
}

impl Resolution {
    /// Concept identifier when resolved
    pub fn rxcui(&self) -> Option<&str> {
        match self {
            Resolution::Resolved { rxcui, .. } => Some(rxcui),
            Resolution::Unresolved => None,
        }
    }

    /// Whether the name resolved
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Single-drug monograph produced by the generative model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugInfo {
    /// Drug name
    pub name: String,
    /// Uses and mechanism of action
    #[serde(default)]
    pub overview: String,
    /// Pharmacological class
    #[serde(default)]
    pub drug_class: String,
    /// Common side effects
    #[serde(default)]
    pub side_effects: Vec<String>,
    /// Contraindications
    #[serde(default)]
    pub contraindications: Vec<String>,
    /// General adult dosing guidance
    #[serde(default)]
    pub dosing_guidelines: String,
    /// Warnings
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Commonly interacting drugs
    #[serde(default)]
    pub interactions: Vec<String>,
}
