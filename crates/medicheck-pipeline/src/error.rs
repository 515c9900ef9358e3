//! Errors that end an analysis

use medicheck_domain::ValidationError;
use medicheck_narrative::NarrativeError;
use thiserror::Error;

/// Message shown when the primary source fails
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Analysis failed. Check your connection and try again.";

/// Fatal analysis outcomes
///
/// Resolver and registry failures never appear here; they degrade coverage
/// and are reported through provenance instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Input rejected before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The narrative service failed or returned unusable content
    #[error("Narrative analysis unavailable: {0}")]
    NarrativeUnavailable(#[from] NarrativeError),

    /// The end-to-end deadline expired before the narrative stage finished
    #[error("Analysis deadline of {0}s exceeded")]
    DeadlineExceeded(u64),
}

impl AnalysisError {
    /// Text safe to show an end user
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(e) => e.to_string(),
            AnalysisError::NarrativeUnavailable(_) | AnalysisError::DeadlineExceeded(_) => {
                ANALYSIS_FAILED_MESSAGE.to_string()
            }
        }
    }

    /// Whether the caller may retry the same input
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AnalysisError::Validation(_))
    }
}
