//! Migration rules produced from a matching run.
//!
//! A [`MigrationEntry`] maps one source exchange name to the fields of the
//! reference activity it should be relinked to. A [`MigrationDocument`] bundles
//! the entries of a run in the shape inventory frameworks accept as a named
//! migration keyed on `name`:
//!
//! ```text
//! {
//!   "name": "...",
//!   "fields": ["name"],
//!   "data": [
//!     [["Steel {GLO}| market for steel | Cutoff, U"],
//!      {"name": "market for steel", "reference product": "steel", "location": "RoW", "unit": "kg"}]
//!   ]
//! }
//! ```
//!
//! Applying the migration is left to the framework.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::core::activity::ReferenceActivity;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Failed to write migration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize migration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to move migration into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Replacement field values for a relinked exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedFields {
    pub name: String,
    #[serde(rename = "reference product")]
    pub reference_product: String,
    pub location: String,
    pub unit: String,
}

impl From<&ReferenceActivity> for MatchedFields {
    fn from(activity: &ReferenceActivity) -> Self {
        Self {
            name: activity.name.clone(),
            reference_product: activity.reference_product.clone(),
            location: activity.location.clone(),
            unit: activity.unit.clone(),
        }
    }
}

/// One renaming rule: source exchange name to matched activity fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationEntry {
    pub source_name: String,
    pub matched: MatchedFields,
}

impl MigrationEntry {
    pub fn new(source_name: impl Into<String>, activity: &ReferenceActivity) -> Self {
        Self {
            source_name: source_name.into(),
            matched: MatchedFields::from(activity),
        }
    }
}

/// Serialized migration: `[[source_name], fields]` rows keyed on `name`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationDocument {
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub fields: Vec<String>,
    pub data: Vec<(Vec<String>, MatchedFields)>,
}

impl MigrationDocument {
    /// Build a document from entries; rows are ordered by source name
    pub fn new<'a, I>(name: impl Into<String>, description: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a MigrationEntry>,
    {
        let mut data: Vec<(Vec<String>, MatchedFields)> = entries
            .into_iter()
            .map(|entry| (vec![entry.source_name.clone()], entry.matched.clone()))
            .collect();
        data.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            name: name.into(),
            description: description.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            fields: vec!["name".to_string()],
            data,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, MigrationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document to `path` atomically
    ///
    /// The JSON is written to a temporary file in the destination directory
    /// and renamed over `path`, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError` if serialization, writing, or the final rename fails.
    pub fn write_to(&self, path: &Path) -> Result<(), MigrationError> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(path)?;
        Ok(())
    }
}
