use std::collections::{BTreeSet, HashMap};

use crate::core::activity::ReferenceActivity;
use crate::matching::canonical::CanonicalKey;
use crate::matching::name::{LookupKeyKind, ParsedName};

/// Reference activities grouped by the canonical form of their name
///
/// Built once per run from the full reference inventory and read-only
/// afterwards. Every activity sits in exactly the bucket keyed by
/// `canonical(activity.name)`; identical activities collapse into one entry.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    buckets: HashMap<CanonicalKey, BTreeSet<ReferenceActivity>>,
}

/// The first lookup key that hit a bucket
#[derive(Debug, Clone)]
pub struct LookupHit<'a> {
    pub kind: LookupKeyKind,
    pub key: CanonicalKey,
    pub candidates: &'a BTreeSet<ReferenceActivity>,
}

impl ReferenceIndex {
    /// Build the index from a reference inventory
    pub fn build<'a, I>(activities: I) -> Self
    where
        I: IntoIterator<Item = &'a ReferenceActivity>,
    {
        let mut buckets: HashMap<CanonicalKey, BTreeSet<ReferenceActivity>> = HashMap::new();
        for activity in activities {
            buckets
                .entry(activity.canonical_name())
                .or_default()
                .insert(activity.clone());
        }
        Self { buckets }
    }

    /// Candidates sharing a canonical name, if any
    #[must_use]
    pub fn get(&self, key: &CanonicalKey) -> Option<&BTreeSet<ReferenceActivity>> {
        self.buckets.get(key).filter(|bucket| !bucket.is_empty())
    }

    /// Try the lookup keys of a parsed name in order and return the first hit.
    ///
    /// Later keys are not consulted once one key finds a bucket.
    #[must_use]
    pub fn lookup(&self, parsed: &ParsedName) -> Option<LookupHit<'_>> {
        parsed.lookup_keys().into_iter().find_map(|(kind, key)| {
            self.get(&key).map(|candidates| LookupHit {
                kind,
                key,
                candidates,
            })
        })
    }

    /// Number of distinct canonical names
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of distinct activities across all buckets
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    /// All buckets sorted by canonical key
    #[must_use]
    pub fn buckets(&self) -> Vec<(&CanonicalKey, &BTreeSet<ReferenceActivity>)> {
        let mut buckets: Vec<_> = self.buckets.iter().collect();
        buckets.sort_by(|a, b| a.0.cmp(b.0));
        buckets
    }

    /// Buckets holding more than one activity, sorted by canonical key
    #[must_use]
    pub fn homonyms(&self) -> Vec<(&CanonicalKey, &BTreeSet<ReferenceActivity>)> {
        self.buckets()
            .into_iter()
            .filter(|(_, bucket)| bucket.len() > 1)
            .collect()
    }
}
