//! Centralized validation for records crossing the inventory boundary.
//!
//! The matching core assumes every record has its required fields; readers
//! call these helpers before handing records over.

use crate::core::activity::ReferenceActivity;
use crate::core::exchange::ExchangeRecord;

/// Maximum number of records accepted from a single input file
pub const MAX_RECORDS: usize = 1_000_000;

/// Record validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field '{field}' is empty")]
    EmptyField { field: &'static str },
    #[error("Unknown exchange type '{0}'")]
    UnknownExchangeType(String),
}

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

/// Validate an exchange from the source inventory
///
/// Values are checked, never rewritten: names keep their exact whitespace
/// because the composite-name parser relies on it.
///
/// # Errors
///
/// Returns `ValidationError::EmptyField` if the name or unit is blank.
pub fn validate_exchange(exchange: &ExchangeRecord) -> Result<(), ValidationError> {
    require("name", &exchange.name)?;
    require("unit", &exchange.unit)
}

/// Validate an activity from the reference inventory
///
/// # Errors
///
/// Returns `ValidationError::EmptyField` if any of name, reference product,
/// location or unit is blank.
pub fn validate_activity(activity: &ReferenceActivity) -> Result<(), ValidationError> {
    require("name", &activity.name)?;
    require("reference product", &activity.reference_product)?;
    require("location", &activity.location)?;
    require("unit", &activity.unit)
}
