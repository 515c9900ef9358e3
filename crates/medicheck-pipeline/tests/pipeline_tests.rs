//! End-to-end orchestrator tests against deterministic stub sources

use async_trait::async_trait;
use medicheck_domain::traits::{InteractionRegistry, LlmProvider, TerminologyService};
use medicheck_domain::{
    AnalysisRequest, ChatMessage, Confidence, DrugCandidate, DrugReference, EvidenceSource,
    InteractionRecord, RegistryStatus, Severity,
};
use medicheck_knowledge::{InteractionTemplate, KnowledgeBase};
use medicheck_llm::MockProvider;
use medicheck_narrative::NarrativeService;
use medicheck_pipeline::{
    AnalysisError, Orchestrator, PipelineConfig, RegistryClient, TerminologyResolver,
    ANALYSIS_FAILED_MESSAGE,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const EMPTY_NARRATIVE: &str = r#"{"interactions": []}"#;

#[derive(Default)]
struct StubTerminology {
    ids: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubTerminology {
    fn with(pairs: &[(&str, &str)]) -> Self {
        Self {
            ids: pairs
                .iter()
                .map(|(name, id)| (name.to_uppercase(), id.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TerminologyService for StubTerminology {
    type Error = String;

    async fn approximate_term(&self, term: &str, _max: usize) -> Result<Vec<DrugCandidate>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .ids
            .get(&term.to_uppercase())
            .map(|id| {
                vec![DrugCandidate {
                    name: term.to_lowercase(),
                    rxcui: id.clone(),
                    synonym: Some(term.to_lowercase()),
                }]
            })
            .unwrap_or_default())
    }
}

enum RegistryBehavior {
    Records(Vec<InteractionRecord>),
    HttpError,
    Hang,
}

struct StubRegistry {
    behavior: RegistryBehavior,
    calls: AtomicUsize,
    last_ids: Mutex<Vec<String>>,
}

impl StubRegistry {
    fn new(behavior: RegistryBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_ids: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InteractionRegistry for StubRegistry {
    type Error = String;

    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionRecord>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ids.lock().unwrap() = rxcuis.to_vec();
        match &self.behavior {
            RegistryBehavior::Records(records) => Ok(records.clone()),
            RegistryBehavior::HttpError => Err("HTTP 500: Internal Server Error".to_string()),
            RegistryBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(Vec::new())
            }
        }
    }
}

/// Catalog that never answers
struct HangingTerminology;

#[async_trait]
impl TerminologyService for HangingTerminology {
    type Error = String;

    async fn approximate_term(&self, _term: &str, _max: usize) -> Result<Vec<DrugCandidate>, String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }
}

/// Provider that takes a while to answer, like a real endpoint
struct AwaitingProvider {
    reply: String,
    delay: Duration,
}

impl AwaitingProvider {
    fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            delay: Duration::from_millis(10),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LlmProvider for AwaitingProvider {
    type Error = String;

    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, String> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

fn one_second() -> PipelineConfig {
    PipelineConfig {
        deadline_secs: 1,
        ..PipelineConfig::default()
    }
}

struct Harness {
    orchestrator: Orchestrator<StubTerminology, StubRegistry, MockProvider>,
    terminology: Arc<StubTerminology>,
    registry: Arc<StubRegistry>,
    llm: MockProvider,
}

fn harness_with(
    terminology: StubTerminology,
    registry: StubRegistry,
    llm: MockProvider,
    knowledge: KnowledgeBase,
    config: PipelineConfig,
) -> Harness {
    let terminology = Arc::new(terminology);
    let registry = Arc::new(registry);
    let orchestrator = Orchestrator::new(
        TerminologyResolver::new(Arc::clone(&terminology)),
        RegistryClient::new(Arc::clone(&registry)),
        NarrativeService::new(llm.clone()),
        Arc::new(knowledge),
        config,
    );
    Harness {
        orchestrator,
        terminology,
        registry,
        llm,
    }
}

fn harness(registry: RegistryBehavior, narrative: &str, knowledge: KnowledgeBase) -> Harness {
    harness_with(
        StubTerminology::with(&[("aspirin", "1191"), ("warfarin", "11289"), ("coffee", "2101")]),
        StubRegistry::new(registry),
        MockProvider::new(narrative),
        knowledge,
        PipelineConfig::default(),
    )
}

fn aspirin_warfarin_kb() -> KnowledgeBase {
    KnowledgeBase::empty().with_entry(
        "Aspirin",
        "Warfarin",
        InteractionTemplate::with_severity(Severity::Major),
    )
}

fn narrative_json(entries: &[(&str, &str, &str)]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|(a, b, severity)| {
            format!(
                r#"{{"drug1": "{a}", "drug2": "{b}", "severity": "{severity}", "confidence": "high", "description": "{a}/{b} {severity}"}}"#
            )
        })
        .collect();
    format!(r#"{{"interactions": [{}]}}"#, items.join(","))
}

#[tokio::test]
async fn test_fewer_than_two_drugs_rejected_before_any_call() {
    let h = harness(RegistryBehavior::Records(vec![]), EMPTY_NARRATIVE, KnowledgeBase::curated());

    for input in [vec![], vec!["Aspirin"], vec!["Aspirin", " aspirin", "ASPIRIN "], vec!["", "Aspirin"]] {
        let result = h.orchestrator.analyze_names(input).await;
        let err = result.unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
        assert_eq!(err.user_message(), "Please provide at least two drugs to analyze");
    }

    assert_eq!(h.terminology.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.registry.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.llm.call_count(), 0);
}

#[tokio::test]
async fn test_aspirin_warfarin_surfaces_major() {
    let h = harness(RegistryBehavior::Records(vec![]), EMPTY_NARRATIVE, aspirin_warfarin_kb());

    let result = h.orchestrator.analyze_names(["Aspirin", "Warfarin"]).await.unwrap();

    assert!(!result.interactions.is_empty());
    assert!(result.interactions.iter().any(|r| r.severity == Severity::Major));
    assert_eq!(result.provenance.knowledge_base_matches, 1);
    assert_eq!(
        result.provenance.contributing_sources,
        vec![EvidenceSource::KnowledgeBase]
    );
}

#[tokio::test]
async fn test_knowledge_base_found_in_either_order() {
    for input in [["Aspirin", "Warfarin"], ["warfarin", "ASPIRIN"]] {
        let h = harness(RegistryBehavior::Records(vec![]), EMPTY_NARRATIVE, aspirin_warfarin_kb());
        let result = h.orchestrator.analyze_names(input).await.unwrap();
        assert_eq!(result.provenance.knowledge_base_matches, 1);
        assert_eq!(result.interactions[0].drug_a, input[0]);
    }
}

#[tokio::test]
async fn test_aspirin_coffee_is_empty_success() {
    let h = harness(RegistryBehavior::Records(vec![]), EMPTY_NARRATIVE, KnowledgeBase::curated());

    let result = h.orchestrator.analyze_names(["Aspirin", "Coffee"]).await.unwrap();

    assert!(result.interactions.is_empty());
    assert_eq!(result.provenance.registry, RegistryStatus::Empty);
    assert_eq!(result.provenance.references_resolved, 2);
    assert!(result.provenance.contributing_sources.is_empty());
    assert_eq!(h.registry.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*h.registry.last_ids.lock().unwrap(), vec!["1191", "2101"]);
}

#[tokio::test]
async fn test_prose_wrapped_narrative_is_parsed() {
    let reply = format!(
        "Here is the analysis:\n```json\n{}\n```",
        narrative_json(&[("Aspirin", "Coffee", "minor")])
    );
    let h = harness(RegistryBehavior::Records(vec![]), &reply, KnowledgeBase::empty());

    let result = h.orchestrator.analyze_names(["Aspirin", "Coffee"]).await.unwrap();

    assert_eq!(result.interactions.len(), 1);
    assert_eq!(result.interactions[0].severity, Severity::Minor);
    assert_eq!(result.provenance.contributing_sources, vec![EvidenceSource::Narrative]);
}

#[tokio::test]
async fn test_registry_error_degrades() {
    let reply = narrative_json(&[("Aspirin", "Warfarin", "major")]);
    let h = harness(RegistryBehavior::HttpError, &reply, KnowledgeBase::empty());

    let result = h.orchestrator.analyze_names(["Aspirin", "Warfarin"]).await.unwrap();

    assert!(matches!(result.provenance.registry, RegistryStatus::Failed { .. }));
    assert_eq!(result.interactions.len(), 1);
    assert_eq!(h.llm.call_count(), 1);
    let system = h.llm.last_system_prompt().unwrap();
    assert!(system.contains("Official database check failed"));
}

#[tokio::test]
async fn test_registry_skipped_when_too_few_resolve() {
    let h = harness(RegistryBehavior::Records(vec![]), EMPTY_NARRATIVE, KnowledgeBase::empty());

    let result = h.orchestrator.analyze_names(["Aspirin", "Unobtainium"]).await.unwrap();

    assert_eq!(result.provenance.registry, RegistryStatus::NotAttempted);
    assert_eq!(result.provenance.references_resolved, 1);
    assert_eq!(h.registry.calls.load(Ordering::SeqCst), 0);
    assert!(h
        .llm
        .last_system_prompt()
        .unwrap()
        .contains("Could not resolve enough drugs"));
}

#[tokio::test]
async fn test_registry_findings_reach_the_prompt() {
    let mut finding = InteractionRecord::new("aspirin", "warfarin");
    finding.description = "Increased risk of bleeding.".to_string();
    let h = harness(
        RegistryBehavior::Records(vec![finding]),
        &narrative_json(&[("Aspirin", "Warfarin", "major")]),
        KnowledgeBase::empty(),
    );

    let result = h.orchestrator.analyze_names(["Aspirin", "Warfarin"]).await.unwrap();

    let system = h.llm.last_system_prompt().unwrap();
    assert!(system.contains("OFFICIAL NLM DATABASE MATCHES:\n- Increased risk of bleeding."));
    // narrative covered the pair, so the registry record is not repeated
    assert_eq!(result.interactions.len(), 1);
    assert_eq!(result.provenance.registry, RegistryStatus::Found { count: 1 });
}

#[tokio::test]
async fn test_uncovered_registry_records_are_included() {
    let mut finding = InteractionRecord::new("warfarin", "coffee");
    finding.severity = Severity::Moderate;
    finding.description = "Caffeine interaction.".to_string();
    let h = harness(
        RegistryBehavior::Records(vec![finding]),
        &narrative_json(&[("Aspirin", "Warfarin", "major")]),
        KnowledgeBase::empty(),
    );

    let result = h
        .orchestrator
        .analyze_names(["Aspirin", "Warfarin", "Coffee"])
        .await
        .unwrap();

    assert_eq!(result.interactions.len(), 2);
    assert_eq!(result.interactions[1].description, "Caffeine interaction.");
    assert_eq!(
        result.provenance.contributing_sources,
        vec![EvidenceSource::Narrative, EvidenceSource::Registry]
    );
}

#[tokio::test]
async fn test_narrative_only_policy() {
    let config = PipelineConfig {
        include_uncovered_evidence: false,
        ..PipelineConfig::default()
    };
    let h = harness_with(
        StubTerminology::with(&[("aspirin", "1191"), ("warfarin", "11289")]),
        StubRegistry::new(RegistryBehavior::Records(vec![])),
        MockProvider::new(EMPTY_NARRATIVE),
        aspirin_warfarin_kb(),
        config,
    );

    let result = h.orchestrator.analyze_names(["Aspirin", "Warfarin"]).await.unwrap();

    assert!(result.interactions.is_empty());
    // the scan still ran
    assert_eq!(result.provenance.knowledge_base_matches, 1);
}

#[tokio::test]
async fn test_out_of_enum_tokens_are_coerced() {
    let reply = r#"{"interactions": [
        {"drug1": "Aspirin", "drug2": "Coffee", "severity": "SEVERE!!", "confidence": "certain"}
    ]}"#;
    let h = harness(RegistryBehavior::Records(vec![]), reply, KnowledgeBase::empty());

    let result = h.orchestrator.analyze_names(["Aspirin", "Coffee"]).await.unwrap();

    assert_eq!(result.interactions.len(), 1);
    assert_eq!(result.interactions[0].severity, Severity::Moderate);
    assert_eq!(result.interactions[0].confidence, Confidence::Medium);
}

#[tokio::test]
async fn test_severity_sort_is_stable() {
    let reply = narrative_json(&[
        ("A1", "B", "minor"),
        ("A2", "B", "critical"),
        ("A3", "B", "minor"),
        ("A4", "B", "major"),
        ("A5", "B", "critical"),
    ]);
    let h = harness(RegistryBehavior::Records(vec![]), &reply, KnowledgeBase::empty());

    let result = h.orchestrator.analyze_names(["Aspirin", "Coffee"]).await.unwrap();

    let order: Vec<&str> = result.interactions.iter().map(|r| r.drug_a.as_str()).collect();
    assert_eq!(order, vec!["A2", "A5", "A4", "A1", "A3"]);
}

#[tokio::test]
async fn test_repeated_runs_are_idempotent() {
    let reply = narrative_json(&[("Aspirin", "Warfarin", "major"), ("Aspirin", "Coffee", "minor")]);
    let mut finding = InteractionRecord::new("warfarin", "coffee");
    finding.description = "Registry finding.".to_string();
    let h = harness(
        RegistryBehavior::Records(vec![finding]),
        &reply,
        KnowledgeBase::curated(),
    );

    let first = h
        .orchestrator
        .analyze_names(["Aspirin", "Warfarin", "Coffee"])
        .await
        .unwrap();
    let second = h
        .orchestrator
        .analyze_names(["Aspirin", "Warfarin", "Coffee"])
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(h.registry.calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.llm.call_count(), 2);
}

#[tokio::test]
async fn test_narrative_failure_is_fatal() {
    let h = harness_with(
        StubTerminology::with(&[]),
        StubRegistry::new(RegistryBehavior::Records(vec![])),
        MockProvider::failing(),
        aspirin_warfarin_kb(),
        PipelineConfig::default(),
    );

    let err = h
        .orchestrator
        .analyze_names(["Aspirin", "Warfarin"])
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::NarrativeUnavailable(_)));
    assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_unparseable_narrative_is_fatal() {
    let h = harness(RegistryBehavior::Records(vec![]), "I am not sure.", KnowledgeBase::empty());
    let err = h
        .orchestrator
        .analyze_names(["Aspirin", "Coffee"])
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::NarrativeUnavailable(_)));
}

#[tokio::test]
async fn test_registry_deadline_degrades() {
    let orchestrator = Orchestrator::new(
        TerminologyResolver::new(Arc::new(StubTerminology::with(&[
            ("aspirin", "1191"),
            ("warfarin", "11289"),
        ]))),
        RegistryClient::new(Arc::new(StubRegistry::new(RegistryBehavior::Hang))),
        NarrativeService::new(AwaitingProvider::new(narrative_json(&[(
            "Aspirin", "Warfarin", "major",
        )]))),
        Arc::new(KnowledgeBase::empty()),
        one_second(),
    );

    let result = orchestrator.analyze_names(["Aspirin", "Warfarin"]).await.unwrap();

    assert!(matches!(result.provenance.registry, RegistryStatus::Failed { .. }));
    assert_eq!(result.provenance.references_resolved, 2);
    assert_eq!(result.interactions.len(), 1);
    assert_eq!(result.interactions[0].severity, Severity::Major);
}

#[tokio::test]
async fn test_resolver_deadline_degrades() {
    let registry = Arc::new(StubRegistry::new(RegistryBehavior::Records(vec![])));
    let orchestrator = Orchestrator::new(
        TerminologyResolver::new(Arc::new(HangingTerminology)),
        RegistryClient::new(Arc::clone(&registry)),
        NarrativeService::new(AwaitingProvider::new(EMPTY_NARRATIVE)),
        Arc::new(aspirin_warfarin_kb()),
        one_second(),
    );

    let result = orchestrator.analyze_names(["Aspirin", "Warfarin"]).await.unwrap();

    assert_eq!(result.provenance.references_resolved, 0);
    assert_eq!(result.provenance.registry, RegistryStatus::NotAttempted);
    assert_eq!(registry.calls.load(Ordering::SeqCst), 0);
    // knowledge base needs no catalog lookups
    assert_eq!(result.interactions.len(), 1);
    assert_eq!(
        result.provenance.contributing_sources,
        vec![EvidenceSource::KnowledgeBase]
    );
}

#[tokio::test]
async fn test_narrative_overrunning_deadline_is_fatal() {
    let orchestrator = Orchestrator::new(
        TerminologyResolver::new(Arc::new(StubTerminology::default())),
        RegistryClient::new(Arc::new(StubRegistry::new(RegistryBehavior::Records(vec![])))),
        NarrativeService::new(
            AwaitingProvider::new(EMPTY_NARRATIVE).with_delay(Duration::from_secs(5)),
        )
        .with_timeout(Duration::from_secs(30)),
        Arc::new(KnowledgeBase::empty()),
        one_second(),
    );

    let err = orchestrator
        .analyze_names(["Aspirin", "Warfarin"])
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::DeadlineExceeded(1)));
    assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_knowledge_matches_reach_the_prompt() {
    let h = harness(RegistryBehavior::Records(vec![]), EMPTY_NARRATIVE, KnowledgeBase::curated());

    h.orchestrator.analyze_names(["Aspirin", "Warfarin"]).await.unwrap();

    let system = h.llm.last_system_prompt().unwrap();
    assert!(system.contains("CURATED KNOWLEDGE BASE MATCHES"));
    assert!(system.contains("[major]: Increases risk of bleeding."));
}

#[tokio::test]
async fn test_catalog_selected_reference_skips_lookup() {
    let h = harness(RegistryBehavior::Records(vec![]), EMPTY_NARRATIVE, KnowledgeBase::empty());
    let request = AnalysisRequest::new(vec![
        DrugReference::from_candidate(&DrugCandidate {
            name: "warfarin".to_string(),
            rxcui: "11289".to_string(),
            synonym: None,
        }),
        DrugReference::typed("Aspirin"),
    ])
    .unwrap();

    let result = h.orchestrator.analyze(&request).await.unwrap();

    assert_eq!(result.provenance.references_resolved, 2);
    assert_eq!(h.terminology.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*h.registry.last_ids.lock().unwrap(), vec!["11289", "1191"]);
}

#[tokio::test]
async fn test_search_and_drug_info() {
    let h = harness(
        RegistryBehavior::Records(vec![]),
        r#"{"name": "Warfarin", "drugClass": "Anticoagulant"}"#,
        KnowledgeBase::empty(),
    );

    let candidates = h.orchestrator.search("warfarin").await;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].rxcui, "11289");
    assert!(h.orchestrator.search("w").await.is_empty());

    let info = h.orchestrator.drug_info("Warfarin").await.unwrap();
    assert_eq!(info.drug_class, "Anticoagulant");
}
