//! MediCheck Local Knowledge Base
//!
//! A curated, static table of well-established, high-stakes drug
//! interactions. Lookups are pure: no I/O, no failure mode, a miss yields
//! nothing. The table gives deterministic, zero-latency coverage that does
//! not depend on any external service being reachable.
//!
//! # Example
//!
//! ```
//! use medicheck_knowledge::KnowledgeBase;
//! use medicheck_domain::{DrugReference, Severity};
//!
//! let kb = KnowledgeBase::curated();
//! let drugs = vec![DrugReference::typed("Warfarin"), DrugReference::typed("Aspirin")];
//! let records = kb.scan(&drugs);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].severity, Severity::Major);
//! ```

#![warn(missing_docs)]

mod curated;
mod table;
mod template;

pub use table::KnowledgeBase;
pub use template::InteractionTemplate;
