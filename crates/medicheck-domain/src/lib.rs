//! MediCheck Domain Layer
//!
//! This crate contains the data model shared by every stage of the
//! interaction resolution pipeline. It performs no I/O: infrastructure
//! crates implement the traits in [`traits`] and the pipeline crate wires
//! them together.
//!
//! ## Key Concepts
//!
//! - **DrugReference**: A drug the user selected, optionally already resolved
//! - **InteractionRecord**: The canonical, severity-ranked output unit
//! - **Severity / Confidence**: Closed enums; unknown tokens coerce to safe defaults
//! - **AnalysisRequest**: A validated set of at least two distinct drugs
//! - **Provenance**: Which evidence sources contributed to a result
//!
//! The system is advisory, not diagnostic.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod confidence;
pub mod drug;
pub mod interaction;
pub mod severity;
pub mod traits;

// Re-exports for convenience
pub use analysis::{
    AnalysisRequest, AnalysisResult, EvidenceSource, Provenance, RegistryOutcome,
    RegistryStatus, ValidationError, MIN_DRUGS,
};
pub use confidence::Confidence;
pub use drug::{normalize_name, DrugCandidate, DrugInfo, DrugReference, Resolution, SourceHint};
pub use interaction::{sort_by_severity, Alternative, Citation, InteractionRecord, PairKey};
pub use severity::Severity;
pub use traits::{ChatMessage, ChatRole};
