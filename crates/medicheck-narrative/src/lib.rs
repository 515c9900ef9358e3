//! MediCheck Narrative Augmentation
//!
//! Turns a drug list plus registry findings into a prompt, calls a
//! generative model, and parses its JSON reply into interaction records.
//!
//! # Architecture
//!
//! ```text
//! drug names + RegistryOutcome → NarrativePromptBuilder → LlmProvider → parser → InteractionRecord[]
//! ```
//!
//! The parser tolerates prose and code fences around the reply but fails
//! the whole call when no JSON object with an `interactions` array is
//! present. Unknown severity/confidence tokens are coerced, not rejected.
//!
//! # Example Usage
//!
//! ```
//! use medicheck_narrative::NarrativeService;
//! use medicheck_llm::MockProvider;
//! use medicheck_domain::RegistryOutcome;
//!
//! # tokio_test::block_on(async {
//! let service = NarrativeService::new(MockProvider::new(r#"{"interactions": []}"#));
//! let drugs = vec!["Aspirin".to_string(), "Coffee".to_string()];
//! let records = service
//!     .analyze(&drugs, &RegistryOutcome::Completed(vec![]), &[])
//!     .await
//!     .unwrap();
//! assert!(records.is_empty());
//! # });
//! ```

#![warn(missing_docs)]

mod error;
mod parser;
mod prompt;
mod service;

pub use error::NarrativeError;
pub use parser::{extract_json_object, parse_drug_info, parse_interactions};
pub use prompt::{drug_info_messages, NarrativePromptBuilder};
pub use service::{NarrativeService, DEFAULT_CALL_TIMEOUT};
