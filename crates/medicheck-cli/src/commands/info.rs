//! Info command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use medicheck_domain::traits::{InteractionRegistry, LlmProvider, TerminologyService};
use medicheck_pipeline::Orchestrator;

/// Execute the info command.
pub async fn execute_info<T, R, L>(
    drug: &str,
    orchestrator: &Orchestrator<T, R, L>,
    formatter: &Formatter,
) -> Result<String>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    if drug.trim().is_empty() {
        return Err(CliError::InvalidInput("Drug name is required".to_string()));
    }

    let info = orchestrator.drug_info(drug.trim()).await?;
    formatter.format_drug_info(&info)
}
