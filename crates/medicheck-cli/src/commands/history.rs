//! History, rerun and clear-history command implementations.

use crate::error::Result;
use crate::history::HistoryLog;
use crate::output::Formatter;
use medicheck_domain::traits::{InteractionRegistry, LlmProvider, TerminologyService};
use medicheck_pipeline::Orchestrator;

/// List recent checks.
pub fn execute_history(history: &HistoryLog, formatter: &Formatter) -> Result<String> {
    formatter.format_history(history.entries())
}

/// Re-run the check at `position` (1 = most recent).
pub async fn execute_rerun<T, R, L>(
    position: usize,
    orchestrator: &Orchestrator<T, R, L>,
    history: &mut HistoryLog,
    formatter: &Formatter,
) -> Result<String>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    let drugs = history.get(position)?.drugs.clone();
    super::execute_check(&drugs, orchestrator, history, formatter).await
}

/// Forget every recent check.
pub fn execute_clear_history(history: &mut HistoryLog, formatter: &Formatter) -> Result<String> {
    let count = history.entries().len();
    history.clear();
    history.save()?;
    Ok(formatter.success(&format!("Cleared {} recent check(s)", count)))
}
