//! MediCheck Interaction Pipeline
//!
//! The orchestrator that turns a list of drug names into one
//! severity-ranked set of interaction records.
//!
//! # Architecture
//!
//! ```text
//! names ─▶ TerminologyResolver (concurrent) ─▶ RegistryClient ─┐
//!   │                                                          ▼
//!   ├────▶ KnowledgeBase scan ─────────────▶ merge ◀── NarrativeService
//!   ▼
//! AnalysisResult { interactions (sorted by severity), provenance }
//! ```
//!
//! Stages: `collecting-input → resolving-terms → querying-registry →
//! augmenting-narrative → merging → done`. Only invalid input and narrative
//! failure end a request early; resolver and registry failures reduce
//! coverage and show up in [`medicheck_domain::Provenance`].
//!
//! # Example Usage
//!
//! ```no_run
//! use medicheck_knowledge::KnowledgeBase;
//! use medicheck_pipeline::{build_orchestrator, ServiceConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = build_orchestrator(&ServiceConfig::default(), Arc::new(KnowledgeBase::curated()))?;
//! let result = orchestrator.analyze_names(["Aspirin", "Warfarin"]).await?;
//! for record in &result.interactions {
//!     println!("{} + {}: {}", record.drug_a, record.drug_b, record.severity);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod live;
mod merge;
mod orchestrator;
mod registry;
mod resolver;
mod stage;

pub use config::{ConfigError, PipelineConfig, ServiceConfig};
pub use error::{AnalysisError, ANALYSIS_FAILED_MESSAGE};
pub use live::{build_orchestrator, LiveOrchestrator};
pub use merge::{merge, Merged};
pub use orchestrator::Orchestrator;
pub use registry::RegistryClient;
pub use resolver::TerminologyResolver;
pub use stage::PipelineStage;
