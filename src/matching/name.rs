//! Decomposition of composite source names.
//!
//! Source exchanges are named `ReferenceProduct {Location}| Qualifier | Code`.
//! The parser splits such names into their parts and reports, rather than
//! panics on, names that break the convention.

use serde::Serialize;
use thiserror::Error;

use crate::matching::canonical::{canonical, CanonicalKey};

/// Separator between the parts of a composite name
pub const SEGMENT_SEPARATOR: char = '|';

/// Reasons a name does not follow the composite convention
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name contains no '|' separator")]
    NoSeparator,

    #[error("expected 3 '|'-separated segments, found {0}")]
    SegmentCount(usize),

    #[error("reference product segment has no '{{' location marker")]
    MissingLocation,
}

/// The parts of a composite source name
///
/// Substrings are kept exactly as they appear in the source, including
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    /// Reference product, e.g. `"Steel "`
    pub ref_name: String,

    /// Text after the first `{`, e.g. `"DE"`
    pub location: String,

    /// Activity qualifier, e.g. `" market for steel "`
    pub suffix: String,
}

impl ParsedName {
    /// Location with surrounding whitespace and one trailing `}` removed
    #[must_use]
    pub fn location_code(&self) -> &str {
        let trimmed = self.location.trim();
        trimmed.strip_suffix('}').unwrap_or(trimmed).trim()
    }

    /// The index lookup keys, in the order they are tried
    #[must_use]
    pub fn lookup_keys(&self) -> [(LookupKeyKind, CanonicalKey); 3] {
        [
            (
                LookupKeyKind::RefNameAndSuffix,
                canonical(&format!("{} {}", self.ref_name, self.suffix)),
            ),
            (LookupKeyKind::RefName, canonical(&self.ref_name)),
            (LookupKeyKind::Suffix, canonical(&self.suffix)),
        ]
    }
}

/// Which composition of the name produced a lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKeyKind {
    /// Reference product followed by the qualifier
    RefNameAndSuffix,
    /// Reference product alone
    RefName,
    /// Qualifier alone
    Suffix,
}

impl std::fmt::Display for LookupKeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RefNameAndSuffix => write!(f, "ref_name + suffix"),
            Self::RefName => write!(f, "ref_name"),
            Self::Suffix => write!(f, "suffix"),
        }
    }
}

/// Parse a composite source name
///
/// # Errors
///
/// Returns `NameError::NoSeparator` if there is no `|` at all,
/// `NameError::SegmentCount` if splitting on `|` does not give exactly three
/// segments, or `NameError::MissingLocation` if the first segment has no `{`.
///
/// # Examples
///
/// ```
/// use lci_relink::matching::name::parse_source_name;
///
/// let parsed = parse_source_name("Steel {DE}| market for steel | Cutoff, U").unwrap();
/// assert_eq!(parsed.ref_name, "Steel ");
/// assert_eq!(parsed.location, "DE");
/// assert_eq!(parsed.suffix, " market for steel ");
/// ```
pub fn parse_source_name(name: &str) -> Result<ParsedName, NameError> {
    if !name.contains(SEGMENT_SEPARATOR) {
        return Err(NameError::NoSeparator);
    }

    let segments: Vec<&str> = name.split(SEGMENT_SEPARATOR).collect();
    let [name_loc, suffix, _trailing] = segments.as_slice() else {
        return Err(NameError::SegmentCount(segments.len()));
    };

    // Some exports leave a stray closing brace at the end of the first segment
    let name_loc = name_loc.strip_suffix('}').unwrap_or(*name_loc);

    let (ref_name, location) = name_loc
        .split_once('{')
        .ok_or(NameError::MissingLocation)?;

    Ok(ParsedName {
        ref_name: ref_name.to_string(),
        location: location.to_string(),
        suffix: (*suffix).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_raw_substrings() {
        let parsed = parse_source_name("Steel {DE}| market for steel | Cutoff, U").unwrap();
        assert_eq!(parsed.ref_name, "Steel ");
        assert_eq!(parsed.location, "DE");
        assert_eq!(parsed.suffix, " market for steel ");
        assert_eq!(parsed.location_code(), "DE");
    }

    #[test]
    fn test_parse_rejects_plain_name() {
        assert_eq!(
            parse_source_name("no pipes here"),
            Err(NameError::NoSeparator)
        );
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        assert_eq!(
            parse_source_name("Steel {DE}| market for steel"),
            Err(NameError::SegmentCount(2))
        );
        assert_eq!(
            parse_source_name("Steel {DE}| a | b | c"),
            Err(NameError::SegmentCount(4))
        );
    }

    #[test]
    fn test_parse_rejects_missing_brace() {
        assert_eq!(
            parse_source_name("Steel DE| market for steel | Cutoff, U"),
            Err(NameError::MissingLocation)
        );
    }

    #[test]
    fn test_location_keeps_brace_when_followed_by_space() {
        // Only a brace at the very end of the segment is stripped
        let parsed = parse_source_name("Steel {DE} | market for steel | Cutoff, U").unwrap();
        assert_eq!(parsed.location, "DE} ");
        assert_eq!(parsed.location_code(), "DE");
    }

    #[test]
    fn test_split_on_first_brace_only() {
        let parsed = parse_source_name("Gravel {crushed} {CH}| market for gravel | Cutoff, U")
            .unwrap();
        assert_eq!(parsed.ref_name, "Gravel ");
        assert_eq!(parsed.location, "crushed} {CH");
    }

    #[test]
    fn test_lookup_keys_in_trial_order() {
        let parsed = parse_source_name("Steel {GLO}| market for steel | Cutoff, U").unwrap();
        let keys = parsed.lookup_keys();

        assert_eq!(keys[0].0, LookupKeyKind::RefNameAndSuffix);
        assert_eq!(keys[0].1.as_str(), "for market steel");
        assert_eq!(keys[1].0, LookupKeyKind::RefName);
        assert_eq!(keys[1].1.as_str(), "steel");
        assert_eq!(keys[2].0, LookupKeyKind::Suffix);
        assert_eq!(keys[2].1.as_str(), "for market steel");
    }
}
