//! Search command implementation.

use crate::error::Result;
use crate::output::Formatter;
use medicheck_domain::traits::{InteractionRegistry, LlmProvider, TerminologyService};
use medicheck_pipeline::Orchestrator;

/// Execute the search command.
pub async fn execute_search<T, R, L>(
    term: &str,
    orchestrator: &Orchestrator<T, R, L>,
    formatter: &Formatter,
) -> Result<String>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    let candidates = orchestrator.search(term).await;
    formatter.format_candidates(&candidates)
}
