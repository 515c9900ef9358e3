//! MediCheck RxNav Client
//!
//! HTTP access to the NLM RxNav REST API: approximate-term lookup and the
//! interaction-list registry.
//!
//! # Architecture
//!
//! [`RxNavClient`] implements both `TerminologyService` and
//! `InteractionRegistry` from `medicheck-domain`. Degrade policy (treating a
//! failed lookup as "unresolved", a failed registry query as a coverage gap)
//! belongs to the pipeline; this crate reports failures as [`RxNavError`].
//!
//! # Examples
//!
//! ```no_run
//! use medicheck_domain::traits::TerminologyService;
//! use medicheck_rxnav::{RxNavClient, RxNavConfig};
//!
//! # async fn example() -> Result<(), medicheck_rxnav::RxNavError> {
//! let client = RxNavClient::new(RxNavConfig::default())?;
//! let candidates = client.approximate_term("warfa", 10).await?;
//! for candidate in candidates {
//!     println!("{} ({})", candidate.name, candidate.rxcui);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
pub mod registry;
pub mod terminology;

pub use client::RxNavClient;
pub use config::RxNavConfig;
pub use error::RxNavError;
pub use registry::{flatten_interactions, registry_severity, InteractionListResponse};
pub use terminology::MIN_TERM_LENGTH;
