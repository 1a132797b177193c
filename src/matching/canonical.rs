//! Order-independent comparison keys for free-text names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A normalized, order- and duplicate-insensitive form of a text field
///
/// Built by [`canonical`]: the distinct lowercase tokens of the input, sorted
/// and joined with single spaces. Two strings are name-equivalent iff their
/// keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tokens of the key, already sorted and unique
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    /// True when the source text had no tokens at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a string: lowercase, commas become spaces, split on single
/// spaces, drop empty tokens, deduplicate, sort, join with one space.
///
/// Only the space character separates tokens; tabs and other whitespace stay
/// inside their token.
///
/// # Examples
///
/// ```
/// use lci_relink::matching::canonical::canonical;
///
/// assert_eq!(canonical("Steel, low-alloyed"), canonical("low-alloyed steel"));
/// assert_eq!(canonical("Steel Steel").as_str(), "steel");
/// ```
#[must_use]
pub fn canonical(text: &str) -> CanonicalKey {
    let lowered = text.to_lowercase().replace(',', " ");
    let words: BTreeSet<&str> = lowered.split(' ').filter(|w| !w.is_empty()).collect();
    let joined = words.into_iter().collect::<Vec<_>>().join(" ");
    CanonicalKey(joined)
}
