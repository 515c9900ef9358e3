//! Interaction-list registry: nested group/type/pair decoding and flattening

use crate::client::RxNavClient;
use crate::error::RxNavError;
use async_trait::async_trait;
use medicheck_domain::traits::InteractionRegistry;
use medicheck_domain::{Citation, Confidence, InteractionRecord, Severity};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

const REGISTRY_SOURCE: &str = "NLM RxNav";
const DEFAULT_CITATION_TITLE: &str = "Drug Interaction Registry";
const DEFAULT_DESCRIPTION: &str = "Interaction detected.";
const MECHANISM_PLACEHOLDER: &str = "See full clinical details.";
const RECOMMENDATION_PLACEHOLDER: &str = "Consult healthcare provider.";
const EFFECTS_PLACEHOLDER: &str = "Potential adverse interaction.";

/// Response from `interaction/list.json`
#[derive(Debug, Default, Deserialize)]
pub struct InteractionListResponse {
    /// Interaction-type groups, one per contributing source
    #[serde(rename = "fullInteractionTypeGroup", default)]
    pub groups: Vec<InteractionTypeGroup>,
}

/// Interactions reported by one source
#[derive(Debug, Default, Deserialize)]
pub struct InteractionTypeGroup {
    /// Source name, e.g. "DrugBank" or "ONCHigh"
    #[serde(rename = "sourceName", default)]
    pub source_name: Option<String>,
    /// Interaction types (one per interacting concept pair)
    #[serde(rename = "fullInteractionType", default)]
    pub types: Vec<InteractionType>,
}

/// One interacting concept pair; drug names live here, not on the pairs
#[derive(Debug, Default, Deserialize)]
pub struct InteractionType {
    /// The two interacting concepts
    #[serde(rename = "minConcept", default)]
    pub min_concept: Vec<MinConcept>,
    /// Evidence entries for the pair
    #[serde(rename = "interactionPair", default)]
    pub pairs: Vec<InteractionPair>,
}

/// A concept label
#[derive(Debug, Default, Deserialize)]
pub struct MinConcept {
    /// Concept identifier
    #[serde(default)]
    pub rxcui: Option<String>,
    /// Concept name
    #[serde(default)]
    pub name: Option<String>,
}

/// One evidence entry
#[derive(Debug, Default, Deserialize)]
pub struct InteractionPair {
    /// Coarse severity token ("high", "N/A", ...)
    #[serde(default, deserialize_with = "lenient_token")]
    pub severity: Option<String>,
    /// Free-text description
    #[serde(default, deserialize_with = "lenient_token")]
    pub description: Option<String>,
}

/// Accept any JSON value; keep it only when it is a string
fn lenient_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// Registry severity vocabulary → closed severity enum
///
/// | registry token        | severity   |
/// |-----------------------|------------|
/// | `high` (any case)     | `major`    |
/// | anything else, absent | `moderate` |
pub fn registry_severity(token: Option<&str>) -> Severity {
    match token.map(|t| t.trim().to_lowercase()) {
        Some(t) if t == "high" => Severity::Major,
        _ => Severity::Moderate,
    }
}

fn concept_name(concepts: &[MinConcept], index: usize, fallback: &str) -> String {
    concepts
        .get(index)
        .and_then(|concept| concept.name.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Flatten groups → types → pairs into one record per pair
///
/// Names come from the enclosing type; every pair is kept whatever its
/// severity token.
pub fn flatten_interactions(response: &InteractionListResponse) -> Vec<InteractionRecord> {
    let mut records = Vec::new();
    for group in &response.groups {
        let title = group
            .source_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CITATION_TITLE.to_string());

        for interaction_type in &group.types {
            let drug_a = concept_name(&interaction_type.min_concept, 0, "Drug A");
            let drug_b = concept_name(&interaction_type.min_concept, 1, "Drug B");

            for pair in &interaction_type.pairs {
                records.push(InteractionRecord {
                    drug_a: drug_a.clone(),
                    drug_b: drug_b.clone(),
                    severity: registry_severity(pair.severity.as_deref()),
                    confidence: Confidence::High,
                    description: pair
                        .description
                        .clone()
                        .filter(|d| !d.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                    mechanism: MECHANISM_PLACEHOLDER.to_string(),
                    clinical_effects: EFFECTS_PLACEHOLDER.to_string(),
                    recommendations: RECOMMENDATION_PLACEHOLDER.to_string(),
                    citations: vec![Citation {
                        title: title.clone(),
                        source: REGISTRY_SOURCE.to_string(),
                        url: None,
                    }],
                    alternatives: None,
                });
            }
        }
    }
    records
}

#[async_trait]
impl InteractionRegistry for RxNavClient {
    type Error = RxNavError;

    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionRecord>, RxNavError> {
        let ids: Vec<&str> = rxcuis
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect();
        if ids.len() < 2 {
            return Ok(Vec::new());
        }

        // The service expects a literal '+' separator, so the query is built by hand
        let url = format!("{}?rxcuis={}", self.endpoint("interaction/list.json"), ids.join("+"));
        debug!(%url, "Querying interaction registry");

        let response: InteractionListResponse = self.get_json(&url, &[]).await?;
        let records = flatten_interactions(&response);
        info!(concepts = ids.len(), records = records.len(), "Registry query complete");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "nlmDisclaimer": "It is not the intention of NLM to provide specific medical advice.",
        "fullInteractionTypeGroup": [
            {
                "sourceName": "ONCHigh",
                "fullInteractionType": [
                    {
                        "minConcept": [
                            {"rxcui": "1191", "name": "aspirin", "tty": "IN"},
                            {"rxcui": "11289", "name": "warfarin", "tty": "IN"}
                        ],
                        "interactionPair": [
                            {"severity": "high", "description": "Increased bleeding risk."}
                        ]
                    }
                ]
            },
            {
                "sourceName": "DrugBank",
                "fullInteractionType": [
                    {
                        "minConcept": [
                            {"rxcui": "1191", "name": "aspirin"},
                            {"rxcui": "11289", "name": "warfarin"}
                        ],
                        "interactionPair": [
                            {"severity": "N/A", "description": "Aspirin may increase the anticoagulant activities of Warfarin."},
                            {"severity": "bogus", "description": "Second entry."}
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_registry_severity_table() {
        assert_eq!(registry_severity(Some("high")), Severity::Major);
        assert_eq!(registry_severity(Some("HIGH")), Severity::Major);
        assert_eq!(registry_severity(Some("N/A")), Severity::Moderate);
        assert_eq!(registry_severity(Some("low")), Severity::Moderate);
        assert_eq!(registry_severity(Some("")), Severity::Moderate);
        assert_eq!(registry_severity(None), Severity::Moderate);
    }

    #[test]
    fn test_flatten_one_record_per_pair() {
        let response: InteractionListResponse = serde_json::from_str(FIXTURE).unwrap();
        let records = flatten_interactions(&response);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].severity, Severity::Major);
        assert_eq!(records[1].severity, Severity::Moderate);
        // unrecognized token is coerced, not dropped
        assert_eq!(records[2].severity, Severity::Moderate);
        assert_eq!(records[2].description, "Second entry.");
    }

    #[test]
    fn test_names_come_from_enclosing_type() {
        let response: InteractionListResponse = serde_json::from_str(FIXTURE).unwrap();
        let records = flatten_interactions(&response);
        for record in &records {
            assert_eq!(record.drug_a, "aspirin");
            assert_eq!(record.drug_b, "warfarin");
            assert_eq!(record.confidence, Confidence::High);
        }
        assert_eq!(records[0].citations[0].title, "ONCHigh");
        assert_eq!(records[1].citations[0].title, "DrugBank");
        assert_eq!(records[1].citations[0].source, "NLM RxNav");
    }

    #[test]
    fn test_missing_names_fall_back() {
        let json = r#"{"fullInteractionTypeGroup": [{"fullInteractionType": [
            {"minConcept": [{"rxcui": "1"}], "interactionPair": [{"description": "x"}]}
        ]}]}"#;
        let response: InteractionListResponse = serde_json::from_str(json).unwrap();
        let records = flatten_interactions(&response);

        assert_eq!(records[0].drug_a, "Drug A");
        assert_eq!(records[0].drug_b, "Drug B");
        assert_eq!(records[0].citations[0].title, "Drug Interaction Registry");
    }

    #[test]
    fn test_non_string_severity_is_coerced() {
        let json = r#"{"fullInteractionTypeGroup": [{"fullInteractionType": [
            {"minConcept": [], "interactionPair": [{"severity": 3, "description": null}]}
        ]}]}"#;
        let response: InteractionListResponse = serde_json::from_str(json).unwrap();
        let records = flatten_interactions(&response);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Moderate);
        assert_eq!(records[0].description, "Interaction detected.");
    }

    #[test]
    fn test_no_groups_is_empty() {
        let response: InteractionListResponse =
            serde_json::from_str(r#"{"nlmDisclaimer": "..."}"#).unwrap();
        assert!(flatten_interactions(&response).is_empty());
    }

    #[test]
    fn test_wrong_shape_fails_closed() {
        let result: Result<InteractionListResponse, _> =
            serde_json::from_str(r#"{"fullInteractionTypeGroup": "oops"}"#);
        assert!(result.is_err());
    }
}
