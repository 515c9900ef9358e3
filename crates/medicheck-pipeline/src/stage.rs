//! Orchestrator states

use std::fmt;

/// Where one analysis request currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    /// Validating input
    CollectingInput,
    /// Terminology lookups in flight
    ResolvingTerms,
    /// Registry query in flight
    QueryingRegistry,
    /// Generative model call in flight
    AugmentingNarrative,
    /// Combining and ranking evidence
    Merging,
    /// Result produced
    Done,
}

impl PipelineStage {
    /// All stages, in execution order
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::CollectingInput,
        PipelineStage::ResolvingTerms,
        PipelineStage::QueryingRegistry,
        PipelineStage::AugmentingNarrative,
        PipelineStage::Merging,
        PipelineStage::Done,
    ];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::CollectingInput => "collecting-input",
            PipelineStage::ResolvingTerms => "resolving-terms",
            PipelineStage::QueryingRegistry => "querying-registry",
            PipelineStage::AugmentingNarrative => "augmenting-narrative",
            PipelineStage::Merging => "merging",
            PipelineStage::Done => "done",
        }
    }

    /// The stage that follows; `Done` is terminal
    pub fn next(self) -> Self {
        match self {
            PipelineStage::CollectingInput => PipelineStage::ResolvingTerms,
            PipelineStage::ResolvingTerms => PipelineStage::QueryingRegistry,
            PipelineStage::QueryingRegistry => PipelineStage::AugmentingNarrative,
            PipelineStage::AugmentingNarrative => PipelineStage::Merging,
            PipelineStage::Merging | PipelineStage::Done => PipelineStage::Done,
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(self) -> bool {
        self == PipelineStage::Done
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
