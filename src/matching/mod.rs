//! Exchange-to-activity matching.
//!
//! This module provides the core matching functionality:
//!
//! - [`canonical`](canonical::canonical): order-independent comparison keys
//! - [`parse_source_name`](name::parse_source_name): composite name decomposition
//! - [`CandidateSelector`](selector::CandidateSelector): unique-candidate selection
//! - [`MatchingEngine`](engine::MatchingEngine): drives a whole batch of exchanges
//! - [`Diagnostic`](diagnosis::Diagnostic): structured records for manual review
//!
//! ## Matching Algorithm
//!
//! For every technosphere exchange with a composite name
//! `ReferenceProduct {Location}| Qualifier | Code`:
//!
//! 1. **Parse** the name; names that break the convention are *irregular*
//! 2. **Look up** the reference index with three canonical keys, in order:
//!    reference product + qualifier, reference product, qualifier. The first
//!    key that finds a bucket is final.
//! 3. **Select** among the bucket: compatible location (`GLO` and `RoW` are
//!    interchangeable) and name-equivalent reference product. Exactly one
//!    survivor is a match; zero or several are reported and dropped.
//!
//! ## Example
//!
//! ```
//! use lci_relink::{match_all, ExchangeRecord, ReferenceActivity};
//!
//! let exchanges = vec![ExchangeRecord::technosphere(
//!     "Steel {GLO}| market for steel | Cutoff, U",
//!     "kg",
//! )];
//! let reference = vec![ReferenceActivity::new("market for steel", "steel", "RoW", "kg")];
//!
//! let report = match_all(&exchanges, &reference);
//! let entry = &report.matches["Steel {GLO}| market for steel | Cutoff, U"];
//! assert_eq!(entry.matched.location, "RoW");
//! ```

pub mod canonical;
pub mod diagnosis;
pub mod engine;
pub mod name;
pub mod selector;

pub use diagnosis::{Diagnostic, DiagnosticKind};
