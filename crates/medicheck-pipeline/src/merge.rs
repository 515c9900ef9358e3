//! Merge evidence from the three sources into one record set

use medicheck_domain::{normalize_name, EvidenceSource, InteractionRecord, PairKey};
use std::collections::HashSet;

/// Merged records plus the sources that contributed to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    /// Records in merge order: narrative, knowledge base, registry
    pub records: Vec<InteractionRecord>,
    /// Sources with at least one record in `records`
    pub sources: Vec<EvidenceSource>,
}

/// Combine narrative records with knowledge-base and registry evidence
///
/// Narrative records are always kept. With `include_uncovered` set, evidence
/// for pairs the narrative did not mention is appended: knowledge-base
/// records first, then registry records for pairs the knowledge base does
/// not cover either. Registry records for one pair are deduplicated by
/// description. Pair matching ignores order and case.
pub fn merge(
    narrative: Vec<InteractionRecord>,
    knowledge: Vec<InteractionRecord>,
    registry: &[InteractionRecord],
    include_uncovered: bool,
) -> Merged {
    let mut sources = Vec::new();
    if !narrative.is_empty() {
        sources.push(EvidenceSource::Narrative);
    }

    let mut records = narrative;
    if !include_uncovered {
        return Merged { records, sources };
    }

    let mut covered: HashSet<PairKey> = records.iter().map(InteractionRecord::pair_key).collect();

    let knowledge: Vec<InteractionRecord> = knowledge
        .into_iter()
        .filter(|record| !covered.contains(&record.pair_key()))
        .collect();
    if !knowledge.is_empty() {
        sources.push(EvidenceSource::KnowledgeBase);
    }
    covered.extend(knowledge.iter().map(InteractionRecord::pair_key));
    records.extend(knowledge);

    let mut seen = HashSet::new();
    let mut added_registry = false;
    for record in registry {
        let key = record.pair_key();
        if covered.contains(&key) {
            continue;
        }
        if seen.insert((key, normalize_name(&record.description))) {
            records.push(record.clone());
            added_registry = true;
        }
    }
    if added_registry {
        sources.push(EvidenceSource::Registry);
    }

    Merged { records, sources }
}
