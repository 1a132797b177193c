//! Inventory storage and indexing.
//!
//! The reference inventory is the set of canonical activities exchanges are
//! relinked to; the source inventory holds the unlinked exchanges. Both are
//! loaded from JSON or TSV files (see [`crate::parsing`]).
//!
//! The [`ReferenceIndex`](index::ReferenceIndex) groups reference activities by
//! the canonical form of their name. It is built once per run and read-only
//! afterwards.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lci_relink::catalog::store::ReferenceInventory;
//! use lci_relink::matching::canonical::canonical;
//! use std::path::Path;
//!
//! let inventory = ReferenceInventory::load_from_file(Path::new("reference.json")).unwrap();
//! let index = inventory.index();
//!
//! if let Some(bucket) = index.get(&canonical("market for steel")) {
//!     for activity in bucket {
//!         println!("{activity}");
//!     }
//! }
//! ```

pub mod index;
pub mod store;
