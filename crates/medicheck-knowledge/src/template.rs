//! Partial interaction records stored in the table

use medicheck_domain::{Alternative, Citation, Confidence, InteractionRecord, Severity};

/// A partial interaction record; missing fields take defaults on instantiation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionTemplate {
    /// Severity, `moderate` when absent
    pub severity: Option<Severity>,
    /// Confidence, `medium` when absent
    pub confidence: Option<Confidence>,
    /// Summary, "Interaction detected." when absent
    pub description: Option<String>,
    /// Mechanism text
    pub mechanism: Option<String>,
    /// Clinical effects text
    pub clinical_effects: Option<String>,
    /// Management text
    pub recommendations: Option<String>,
    /// Supporting references
    pub citations: Vec<Citation>,
    /// Suggested alternatives
    pub alternatives: Vec<Alternative>,
}

const DEFAULT_DESCRIPTION: &str = "Interaction detected.";

impl InteractionTemplate {
    /// Template with the given severity and every other field absent
    pub fn with_severity(severity: Severity) -> Self {
        Self {
            severity: Some(severity),
            ..Self::default()
        }
    }

    /// Curated entry: high confidence, all text fields present
    pub(crate) fn curated(
        severity: Severity,
        description: &str,
        mechanism: &str,
        clinical_effects: &str,
        recommendations: &str,
    ) -> Self {
        Self {
            severity: Some(severity),
            confidence: Some(Confidence::High),
            description: Some(description.to_string()),
            mechanism: Some(mechanism.to_string()),
            clinical_effects: Some(clinical_effects.to_string()),
            recommendations: Some(recommendations.to_string()),
            citations: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    /// Build a full record for the given display names
    pub fn instantiate(&self, drug_a: &str, drug_b: &str) -> InteractionRecord {
        InteractionRecord {
            drug_a: drug_a.to_string(),
            drug_b: drug_b.to_string(),
            severity: self.severity.unwrap_or_default(),
            confidence: self.confidence.unwrap_or_default(),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            mechanism: self.mechanism.clone().unwrap_or_default(),
            clinical_effects: self.clinical_effects.clone().unwrap_or_default(),
            recommendations: self.recommendations.clone().unwrap_or_default(),
            citations: self.citations.clone(),
            alternatives: Some(self.alternatives.clone()).filter(|alts| !alts.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_template_uses_defaults() {
        let record = InteractionTemplate::default().instantiate("A", "B");
        assert_eq!(record.severity, Severity::Moderate);
        assert_eq!(record.confidence, Confidence::Medium);
        assert_eq!(record.description, "Interaction detected.");
        assert_eq!(record.mechanism, "");
        assert!(record.citations.is_empty());
        assert!(record.alternatives.is_none());
    }

    #[test]
    fn test_instantiate_keeps_display_names() {
        let record = InteractionTemplate::with_severity(Severity::Critical).instantiate("Sildenafil", "nitroglycerin");
        assert_eq!(record.drug_a, "Sildenafil");
        assert_eq!(record.drug_b, "nitroglycerin");
        assert_eq!(record.severity, Severity::Critical);
    }

    #[test]
    fn test_alternatives_carried_when_present() {
        let template = InteractionTemplate {
            alternatives: vec![Alternative {
                name: "Acetaminophen".to_string(),
                reason: "No antiplatelet effect".to_string(),
                considerations: None,
            }],
            ..InteractionTemplate::default()
        };
        let record = template.instantiate("Ibuprofen", "Warfarin");
        assert_eq!(record.alternatives.map(|alts| alts.len()), Some(1));
    }
}
