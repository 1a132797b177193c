use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::catalog::index::ReferenceIndex;
use crate::core::activity::ReferenceActivity;
use crate::core::exchange::ExchangeRecord;
use crate::core::types::ExchangeType;
use crate::parsing::{self, ParseError};

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed to load inventory from {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to parse inventory: {0}")]
    Parse(#[from] ParseError),
}

/// The reference inventory: canonical activities to link against
#[derive(Debug, Clone, Default)]
pub struct ReferenceInventory {
    /// All activities, in input order
    pub activities: Vec<ReferenceActivity>,
}

impl ReferenceInventory {
    /// Create an empty inventory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load activities from a JSON or TSV file (optionally gzipped)
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Load` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, InventoryError> {
        let activities =
            parsing::read_activities(path).map_err(|source| InventoryError::Load {
                path: path.display().to_string(),
                source,
            })?;
        if activities.is_empty() {
            warn!("No reference activities found in {}", path.display());
        }
        Ok(Self { activities })
    }

    /// Parse an inventory from a JSON array
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Parse` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        Ok(Self {
            activities: parsing::json::parse_activities(json)?,
        })
    }

    pub fn add_activity(&mut self, activity: ReferenceActivity) {
        self.activities.push(activity);
    }

    /// Build a fresh reference index over all activities
    #[must_use]
    pub fn index(&self) -> ReferenceIndex {
        ReferenceIndex::build(&self.activities)
    }

    /// Distinct location codes, sorted
    #[must_use]
    pub fn locations(&self) -> BTreeSet<&str> {
        self.activities.iter().map(|a| a.location.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// The source inventory: exchanges waiting to be linked
#[derive(Debug, Clone, Default)]
pub struct SourceInventory {
    pub exchanges: Vec<ExchangeRecord>,
}

impl SourceInventory {
    /// Load exchanges from a JSON or TSV file (optionally gzipped)
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Load` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, InventoryError> {
        let exchanges =
            parsing::read_exchanges(path).map_err(|source| InventoryError::Load {
                path: path.display().to_string(),
                source,
            })?;
        if exchanges.is_empty() {
            warn!("No exchanges found in {}", path.display());
        }
        Ok(Self { exchanges })
    }

    /// Parse an inventory from a JSON array
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Parse` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        Ok(Self {
            exchanges: parsing::json::parse_exchanges(json)?,
        })
    }

    /// Number of technosphere exchanges
    #[must_use]
    pub fn technosphere_count(&self) -> usize {
        self.exchanges
            .iter()
            .filter(|e| e.exchange_type == ExchangeType::Technosphere)
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_JSON: &str = r#"[
        {"name": "market for steel", "reference product": "steel", "location": "RoW", "unit": "kg"},
        {"name": "market for steel", "reference product": "steel", "location": "DE", "unit": "kg"},
        {"name": "market for cement", "reference product": "cement", "location": "CH", "unit": "kg"}
    ]"#;

    #[test]
    fn test_reference_from_json() {
        let inventory = ReferenceInventory::from_json(REFERENCE_JSON).unwrap();
        assert_eq!(inventory.len(), 3);
        assert_eq!(
            inventory.locations().into_iter().collect::<Vec<_>>(),
            vec!["CH", "DE", "RoW"]
        );

        let index = inventory.index();
        assert_eq!(index.len(), 2);
        assert_eq!(index.activity_count(), 3);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = ReferenceInventory::load_from_file(Path::new("/nonexistent/reference.json"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/reference.json"));
    }

    #[test]
    fn test_source_counts() {
        let json = r#"[
            {"name": "Steel {GLO}| market for steel | Cutoff, U", "unit": "kg", "type": "technosphere"},
            {"name": "Water", "unit": "m3", "type": "biosphere"}
        ]"#;
        let inventory = SourceInventory::from_json(json).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.technosphere_count(), 1);
    }
}
