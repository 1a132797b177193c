//! # lci-relink
//!
//! A library for relinking unlinked life-cycle-inventory exchanges to the
//! activities of a reference inventory.
//!
//! Inventories imported from another tool often arrive with exchanges that
//! could not be linked automatically. Their names usually follow the source
//! tool's convention, `ReferenceProduct {Location}| Qualifier | Code`, while
//! the reference inventory stores activity name, reference product and
//! location as separate fields, often with the words in a different order.
//!
//! `lci-relink` bridges the two by parsing composite names, comparing text in
//! an order-independent canonical form, and accepting a match only when it is
//! unique.
//!
//! ## Features
//!
//! - **Canonical names**: case, word order, commas and repeated words are ignored
//! - **Fallback lookup**: product + qualifier, then product, then qualifier
//! - **Location equivalence**: `GLO` and `RoW` are interchangeable
//! - **Structured diagnostics**: ambiguous and missing cases carry every candidate
//! - **Migration output**: matches become rename rules keyed on exchange name
//!
//! ## Example
//!
//! ```
//! use lci_relink::{ExchangeRecord, MatchingEngine, ReferenceActivity, ReferenceIndex};
//!
//! let reference = vec![
//!     ReferenceActivity::new("market for steel", "steel", "RoW", "kg"),
//!     ReferenceActivity::new("market for steel", "steel", "DE", "kg"),
//! ];
//! let index = ReferenceIndex::build(&reference);
//!
//! let exchanges = vec![ExchangeRecord::technosphere(
//!     "Steel {GLO}| market for steel | Cutoff, U",
//!     "kg",
//! )];
//!
//! let engine = MatchingEngine::new(&index);
//! let report = engine.match_all(&exchanges);
//!
//! for (source, entry) in &report.matches {
//!     println!("{source} -> {} [{}]", entry.matched.name, entry.matched.location);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Inventory storage and the canonical-name index
//! - [`core`]: Core data types for exchanges and activities
//! - [`matching`]: Canonicalization, name parsing, selection and orchestration
//! - [`migration`]: Migration entries and documents
//! - [`parsing`]: JSON and TSV readers for the inventories
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod migration;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::index::ReferenceIndex;
pub use crate::core::activity::ReferenceActivity;
pub use crate::core::exchange::ExchangeRecord;
pub use crate::core::types::*;
pub use matching::canonical::{canonical, CanonicalKey};
pub use matching::engine::{match_all, MatchReport, MatchingConfig, MatchingEngine};
pub use matching::name::parse_source_name;
pub use migration::MigrationEntry;
