//! Check command implementation.

use crate::error::Result;
use crate::history::HistoryLog;
use crate::output::Formatter;
use medicheck_domain::traits::{InteractionRegistry, LlmProvider, TerminologyService};
use medicheck_domain::AnalysisRequest;
use medicheck_pipeline::{AnalysisError, Orchestrator};
use tracing::warn;

/// Execute the check command.
///
/// The validated drug list (blanks dropped, duplicates collapsed) is recorded
/// in history only after the analysis succeeds. Failing to save history does
/// not fail the check.
pub async fn execute_check<T, R, L>(
    drugs: &[String],
    orchestrator: &Orchestrator<T, R, L>,
    history: &mut HistoryLog,
    formatter: &Formatter,
) -> Result<String>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    let request = AnalysisRequest::from_names(drugs).map_err(AnalysisError::from)?;
    let result = orchestrator.analyze(&request).await?;

    history.record(&request.display_names());
    if let Err(e) = history.save() {
        warn!(path = %history.path().display(), error = %e, "Could not save history");
    }

    formatter.format_analysis(&result)
}
