//! Core data types for relinking inventory exchanges.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`ExchangeRecord`]: An unlinked exchange from the source inventory
//! - [`ReferenceActivity`]: A canonical activity from the reference inventory
//! - [`ExchangeType`]: Technosphere/biosphere classification of an exchange
//!
//! ## Source Naming Convention
//!
//! Exchanges exported by the source tool carry composite names:
//!
//! | Part | Example |
//! |------|---------|
//! | Reference product + location | `Steel, low-alloyed {GLO}` |
//! | Activity qualifier | `market for steel, low-alloyed` |
//! | Trailing system-model code | `Cutoff, U` |
//!
//! joined with `|`. Records are read-only here; they are owned by whatever
//! inventory framework supplied them.

pub mod activity;
pub mod exchange;
pub mod types;
