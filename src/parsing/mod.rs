//! Readers for the source and reference inventories.
//!
//! This module provides parsers for:
//!
//! - **JSON**: an array of record objects
//! - **TSV**: tab-separated text with a header row naming the columns
//!
//! Either may be gzip-compressed (`.json.gz`, `.tsv.gz`). Every record is
//! validated before it is returned.
//!
//! ## Columns / Keys
//!
//! | Record | Required fields |
//! |--------|-----------------|
//! | Exchange | `name`, `unit`, `type` |
//! | Activity | `name`, `reference product` (or `reference_product`), `location`, `unit` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use lci_relink::parsing::{read_activities, read_exchanges};
//! use std::path::Path;
//!
//! let exchanges = read_exchanges(Path::new("unlinked.tsv")).unwrap();
//! let activities = read_activities(Path::new("reference.json.gz")).unwrap();
//! ```

use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::core::activity::ReferenceActivity;
use crate::core::exchange::ExchangeRecord;
use crate::utils::validation::ValidationError;

pub mod json;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed (1000000)")]
    TooManyRecords(usize),

    #[error("Invalid record on line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid record at entry {index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Supported inventory file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Tsv,
}

impl InputFormat {
    /// Detect the format from the file name, looking through a `.gz` suffix.
    /// Returns the format and whether the file is gzip-compressed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` for unknown extensions.
    pub fn detect(path: &Path) -> Result<(Self, bool), ParseError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let (stem, gzipped) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (name.as_str(), false),
        };

        let format = match stem.rsplit_once('.').map(|(_, ext)| ext) {
            Some("json") => Self::Json,
            Some("tsv" | "txt") => Self::Tsv,
            Some(ext) => return Err(ParseError::UnsupportedFormat(ext.to_string())),
            None => return Err(ParseError::UnsupportedFormat(name.clone())),
        };

        Ok((format, gzipped))
    }
}

/// Read a whole file as text, decompressing gzip when asked to
fn read_text(path: &Path, gzipped: bool) -> Result<String, ParseError> {
    if gzipped {
        let file = std::fs::File::open(path)?;
        let mut text = String::new();
        GzDecoder::new(file).read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Read exchanges from a JSON or TSV file (optionally gzipped)
///
/// # Errors
///
/// Returns `ParseError` if the file cannot be read, has an unsupported
/// extension, or contains invalid records.
pub fn read_exchanges(path: &Path) -> Result<Vec<ExchangeRecord>, ParseError> {
    let (format, gzipped) = InputFormat::detect(path)?;
    let text = read_text(path, gzipped)?;
    match format {
        InputFormat::Json => json::parse_exchanges(&text),
        InputFormat::Tsv => tsv::parse_exchanges(&text),
    }
}

/// Read reference activities from a JSON or TSV file (optionally gzipped)
///
/// # Errors
///
/// Returns `ParseError` if the file cannot be read, has an unsupported
/// extension, or contains invalid records.
pub fn read_activities(path: &Path) -> Result<Vec<ReferenceActivity>, ParseError> {
    let (format, gzipped) = InputFormat::detect(path)?;
    let text = read_text(path, gzipped)?;
    match format {
        InputFormat::Json => json::parse_activities(&text),
        InputFormat::Tsv => tsv::parse_activities(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            InputFormat::detect(Path::new("a/unlinked.json")).unwrap(),
            (InputFormat::Json, false)
        );
        assert_eq!(
            InputFormat::detect(Path::new("reference.TSV.gz")).unwrap(),
            (InputFormat::Tsv, true)
        );
        assert!(matches!(
            InputFormat::detect(Path::new("reference.xlsx")),
            Err(ParseError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
        assert!(InputFormat::detect(Path::new("reference")).is_err());
    }

    #[test]
    fn test_read_gzipped_activities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.tsv.gz");

        let tsv = "name\treference product\tlocation\tunit\nmarket for steel\tsteel\tRoW\tkg\n";
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(tsv.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let activities = read_activities(&path).unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].location, "RoW");
    }

    #[test]
    fn test_read_json_exchanges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unlinked.json");
        std::fs::write(
            &path,
            r#"[{"name": "Steel {GLO}| market for steel | Cutoff, U", "unit": "kg", "type": "technosphere"}]"#,
        )
        .unwrap();

        let exchanges = read_exchanges(&path).unwrap();
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].unit, "kg");
    }
}
