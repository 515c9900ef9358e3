//! Interaction records - the canonical output unit of an analysis

use crate::confidence::Confidence;
use crate::drug::normalize_name;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A potential adverse interaction between two drugs
///
/// Records are built once per analysis request and never persisted.
/// The wire names (`drug1`, `drug2`, `clinicalEffects`) match the schema
/// the generative model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    /// First drug, kept in input order for display
    #[serde(rename = "drug1", alias = "drugA")]
    pub drug_a: String,

    /// Second drug
    #[serde(rename = "drug2", alias = "drugB")]
    pub drug_b: String,

    /// How dangerous the combination is
    pub severity: Severity,

    /// How certain the evidence is
    pub confidence: Confidence,

    /// Executive summary
    pub description: String,

    /// Pharmacokinetic / pharmacodynamic mechanism
    pub mechanism: String,

    /// Symptoms and markers to watch for
    pub clinical_effects: String,

    /// Clinical management
    pub recommendations: String,

    /// Supporting references, in source order
    #[serde(default)]
    pub citations: Vec<Citation>,

    /// Safer alternatives, when the source suggests any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<Alternative>>,
}

impl InteractionRecord {
    /// Create a record with empty text fields and default severity/confidence
    pub fn new(drug_a: impl Into<String>, drug_b: impl Into<String>) -> Self {
        Self {
            drug_a: drug_a.into(),
            drug_b: drug_b.into(),
            severity: Severity::default(),
            confidence: Confidence::default(),
            description: String::new(),
            mechanism: String::new(),
            clinical_effects: String::new(),
            recommendations: String::new(),
            citations: Vec::new(),
            alternatives: None,
        }
    }

    /// Unordered, case-normalized identity of the drug pair
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.drug_a, &self.drug_b)
    }
}

/// Order-independent key for a pair of drug names
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String, String);

impl PairKey {
    /// Build a key; `("A", "B")` and `("b", "a")` produce the same key
    pub fn new(a: &str, b: &str) -> Self {
        let a = normalize_name(a);
        let b = normalize_name(b);
        if a <= b {
            PairKey(a, b)
        } else {
            PairKey(b, a)
        }
    }
}

/// A reference backing an interaction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Title of the referenced work or entry
    pub title: String,
    /// Publisher or database
    pub source: String,
    /// Link, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A suggested replacement for one of the interacting drugs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    /// Alternative drug name
    pub name: String,
    /// Why it avoids the interaction
    pub reason: String,
    /// Caveats for the alternative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub considerations: Option<String>,
}

/// Stable sort by severity, most dangerous first
///
/// Records of equal severity keep their relative (merge) order.
pub fn sort_by_severity(records: &mut [InteractionRecord]) {
    records.sort_by_key(|record| record.severity);
}
