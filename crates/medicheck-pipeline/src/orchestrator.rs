//! Interaction orchestrator: sequences every source and ranks the result

use crate::config::PipelineConfig;
use crate::error::AnalysisError;
use crate::merge::merge;
use crate::registry::RegistryClient;
use crate::resolver::TerminologyResolver;
use crate::stage::PipelineStage;
use medicheck_domain::traits::{InteractionRegistry, LlmProvider, TerminologyService};
use medicheck_domain::{
    sort_by_severity, AnalysisRequest, AnalysisResult, DrugCandidate, DrugInfo, Provenance,
    RegistryOutcome, Resolution,
};
use medicheck_knowledge::KnowledgeBase;
use medicheck_narrative::NarrativeService;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

/// Runs one analysis request through every evidence source
///
/// Holds only shared, read-only collaborators; each call to
/// [`Orchestrator::analyze`] owns all of its intermediate state.
pub struct Orchestrator<T, R, L>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    resolver: TerminologyResolver<T>,
    registry: RegistryClient<R>,
    narrative: NarrativeService<L>,
    knowledge: Arc<KnowledgeBase>,
    config: PipelineConfig,
}

impl<T, R, L> Orchestrator<T, R, L>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    /// Create an orchestrator
    pub fn new(
        resolver: TerminologyResolver<T>,
        registry: RegistryClient<R>,
        narrative: NarrativeService<L>,
        knowledge: Arc<KnowledgeBase>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            resolver,
            registry,
            narrative,
            knowledge,
            config,
        }
    }

    /// Orchestrator policy
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The knowledge base
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Validate free-text names and analyze them
    pub async fn analyze_names<I, S>(&self, names: I) -> Result<AnalysisResult, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let request = AnalysisRequest::from_names(names)?;
        self.analyze(&request).await
    }

    /// Analyze a validated request
    ///
    /// Resolution and the registry query share the source budget; a stage
    /// that overruns it degrades like a failure. The narrative gets whatever
    /// is left of the request deadline.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let deadline = started + self.config.deadline();
        let source_deadline = started + self.config.source_budget();
        let names = request.display_names();
        let mut stage = PipelineStage::CollectingInput;
        info!(drugs = names.len(), "Starting interaction analysis");

        stage = advance(stage);
        let resolutions =
            match timeout_at(source_deadline, self.resolver.resolve_all(request.drugs())).await {
                Ok(resolutions) => resolutions,
                Err(_) => {
                    warn!("Source budget spent while resolving terms; continuing unresolved");
                    vec![Resolution::Unresolved; request.drugs().len()]
                }
            };
        let rxcuis = distinct_ids(&resolutions);

        let knowledge = self.knowledge.scan(request.drugs());
        let knowledge_base_matches = knowledge.len();

        stage = advance(stage);
        let registry = match timeout_at(source_deadline, self.registry.query(&rxcuis)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("Source budget spent while querying registry");
                RegistryOutcome::Failed {
                    reason: "deadline exceeded".to_string(),
                }
            }
        };

        stage = advance(stage);
        let narrative = timeout_at(deadline, self.narrative.analyze(&names, &registry, &knowledge))
            .await
            .map_err(|_| AnalysisError::DeadlineExceeded(self.config.deadline_secs))??;
        let narrative_records = narrative.len();

        stage = advance(stage);
        let merged = merge(
            narrative,
            knowledge,
            registry.records(),
            self.config.include_uncovered_evidence,
        );
        let mut interactions = merged.records;
        sort_by_severity(&mut interactions);

        advance(stage);
        let provenance = Provenance {
            references_total: request.drugs().len(),
            references_resolved: resolutions.iter().filter(|r| r.is_resolved()).count(),
            knowledge_base_matches,
            registry: registry.status(),
            narrative_records,
            contributing_sources: merged.sources,
        };
        info!(
            interactions = interactions.len(),
            resolved = provenance.references_resolved,
            "Interaction analysis complete"
        );

        Ok(AnalysisResult {
            interactions,
            provenance,
        })
    }

    /// Catalog search for drug pickers
    pub async fn search(&self, term: &str) -> Vec<DrugCandidate> {
        self.resolver.search(term, self.config.search_max_entries).await
    }

    /// Single-drug monograph
    pub async fn drug_info(&self, drug_name: &str) -> Result<DrugInfo, AnalysisError> {
        let deadline = Instant::now() + self.config.deadline();
        timeout_at(deadline, self.narrative.drug_info(drug_name))
            .await
            .map_err(|_| AnalysisError::DeadlineExceeded(self.config.deadline_secs))?
            .map_err(AnalysisError::from)
    }
}

fn advance(stage: PipelineStage) -> PipelineStage {
    let next = stage.next();
    debug!(from = %stage, to = %next, "Pipeline stage");
    next
}

/// Resolved identifiers, first occurrence wins
fn distinct_ids(resolutions: &[Resolution]) -> Vec<String> {
    let mut seen = HashSet::new();
    resolutions
        .iter()
        .filter_map(Resolution::rxcui)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}
