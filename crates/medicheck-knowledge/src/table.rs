//! Pair-keyed lookup table

use crate::curated;
use crate::template::InteractionTemplate;
use medicheck_domain::{normalize_name, DrugReference, InteractionRecord};
use std::collections::HashMap;
use tracing::debug;

/// Immutable table of known interactions keyed by drug-name pair
///
/// Built once at startup and shared by reference; never mutated while a
/// request is running.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: HashMap<String, Vec<InteractionTemplate>>,
}

fn key(a: &str, b: &str) -> String {
    format!("{}+{}", normalize_name(a), normalize_name(b))
}

impl KnowledgeBase {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// The curated table of well-established interactions
    pub fn curated() -> Self {
        let mut kb = Self::empty();
        for (a, b, template) in curated::entries() {
            kb.insert(a, b, template);
        }
        kb
    }

    /// Add a template under the ordered key `A+B` (names are case-normalized)
    pub fn insert(&mut self, drug_a: &str, drug_b: &str, template: InteractionTemplate) {
        self.entries.entry(key(drug_a, drug_b)).or_default().push(template);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_entry(mut self, drug_a: &str, drug_b: &str, template: InteractionTemplate) -> Self {
        self.insert(drug_a, drug_b, template);
        self
    }

    /// Number of keyed pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Templates for a pair, probing both `A+B` and `B+A`
    pub fn lookup(&self, drug_a: &str, drug_b: &str) -> Vec<&InteractionTemplate> {
        let forward = key(drug_a, drug_b);
        let reverse = key(drug_b, drug_a);

        let mut found: Vec<&InteractionTemplate> = self
            .entries
            .get(&forward)
            .map(|templates| templates.iter().collect())
            .unwrap_or_default();
        if reverse != forward {
            if let Some(templates) = self.entries.get(&reverse) {
                found.extend(templates.iter());
            }
        }
        found
    }

    /// Pairwise scan over every unordered pair of the given drugs
    ///
    /// Records carry the caller's display names in input order.
    pub fn scan(&self, drugs: &[DrugReference]) -> Vec<InteractionRecord> {
        let names: Vec<&str> = drugs.iter().map(|drug| drug.display_name()).collect();
        self.scan_names(&names)
    }

    /// [`scan`](Self::scan) over plain names
    pub fn scan_names(&self, names: &[&str]) -> Vec<InteractionRecord> {
        let mut records = Vec::new();
        for (i, first) in names.iter().enumerate() {
            for second in &names[i + 1..] {
                for template in self.lookup(first, second) {
                    records.push(template.instantiate(first, second));
                }
            }
        }
        debug!(drugs = names.len(), matches = records.len(), "Knowledge base scan complete");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medicheck_domain::Severity;

    #[test]
    fn test_curated_table_size() {
        assert_eq!(KnowledgeBase::curated().len(), 19);
    }

    #[test]
    fn test_lookup_is_order_independent() {
        let kb = KnowledgeBase::curated();
        assert_eq!(kb.lookup("Aspirin", "Warfarin").len(), 1);
        assert_eq!(kb.lookup("Warfarin", "Aspirin").len(), 1);
        assert_eq!(kb.lookup("warfarin", "ASPIRIN").len(), 1);
    }

    #[test]
    fn test_lookup_miss_is_empty() {
        let kb = KnowledgeBase::curated();
        assert!(kb.lookup("Aspirin", "Coffee").is_empty());
    }

    #[test]
    fn test_multi_word_names() {
        let kb = KnowledgeBase::curated();
        assert_eq!(kb.lookup("St. John's Wort", "Sertraline").len(), 1);
        assert_eq!(kb.lookup("vitamin k", "warfarin").len(), 1);
    }

    #[test]
    fn test_scan_both_argument_orders() {
        let kb = KnowledgeBase::curated();
        let forward = kb.scan_names(&["Aspirin", "Warfarin"]);
        let reverse = kb.scan_names(&["Warfarin", "Aspirin"]);

        assert_eq!(forward.len(), 1);
        assert_eq!(reverse.len(), 1);
        assert_eq!(forward[0].severity, Severity::Major);
        assert_eq!(forward[0].description, reverse[0].description);
        assert_eq!(reverse[0].drug_a, "Warfarin");
    }

    #[test]
    fn test_scan_every_pair() {
        let kb = KnowledgeBase::curated();
        let records = kb.scan_names(&["Ibuprofen", "Aspirin", "Warfarin", "Lisinopril"]);
        // ibuprofen+aspirin, ibuprofen+lisinopril, aspirin+warfarin
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_both_orderings_stored_are_both_returned() {
        let kb = KnowledgeBase::empty()
            .with_entry("A", "B", InteractionTemplate::with_severity(Severity::Minor))
            .with_entry("B", "A", InteractionTemplate::with_severity(Severity::Major));
        let records = kb.scan_names(&["a", "b"]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_scan_single_drug_is_empty() {
        let kb = KnowledgeBase::curated();
        assert!(kb.scan_names(&["Aspirin"]).is_empty());
        assert!(kb.scan(&[]).is_empty());
    }
}
