//! Choosing the unique reference activity among a bucket of candidates.

use serde::{Deserialize, Serialize};

use crate::core::activity::ReferenceActivity;
use crate::matching::canonical::canonical;

/// Locations that stand in for "everywhere else" and match one another
pub const DEFAULT_GLOBAL_LOCATIONS: [&str; 2] = ["GLO", "RoW"];

/// Location compatibility rule: equal codes, or both in the global class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEquivalence {
    global: Vec<String>,
}

impl Default for LocationEquivalence {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL_LOCATIONS)
    }
}

impl LocationEquivalence {
    pub fn new<I, S>(global: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            global: global.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn global_locations(&self) -> &[String] {
        &self.global
    }

    fn is_global(&self, location: &str) -> bool {
        self.global.iter().any(|g| g == location)
    }

    /// Whether an exchange at `a` may be supplied by an activity at `b`
    #[must_use]
    pub fn compatible(&self, a: &str, b: &str) -> bool {
        a == b || (self.is_global(a) && self.is_global(b))
    }
}

/// Location compatibility with the default `GLO`/`RoW` class
#[must_use]
pub fn same_location(a: &str, b: &str) -> bool {
    a == b || (DEFAULT_GLOBAL_LOCATIONS.contains(&a) && DEFAULT_GLOBAL_LOCATIONS.contains(&b))
}

/// Outcome of selecting among the candidates of one index bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Exactly one candidate survived the filters
    Matched {
        activity: &'a ReferenceActivity,
        /// Set when the activity's unit differs from the exchange unit.
        /// The match stands regardless.
        unit_mismatch: bool,
    },

    /// No candidate survived; carries the whole bucket for review
    NoMatch { candidates: Vec<&'a ReferenceActivity> },

    /// Several candidates survived; carries the survivors
    Ambiguous { candidates: Vec<&'a ReferenceActivity> },
}

impl<'a> Selection<'a> {
    #[must_use]
    pub fn activity(&self) -> Option<&'a ReferenceActivity> {
        match self {
            Self::Matched { activity, .. } => Some(*activity),
            _ => None,
        }
    }
}

/// Filters candidates by location and canonical reference product
#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    locations: LocationEquivalence,
}

impl CandidateSelector {
    #[must_use]
    pub fn new(locations: LocationEquivalence) -> Self {
        Self { locations }
    }

    /// Select the single candidate at a compatible location whose reference
    /// product is name-equivalent to `ref_name`.
    ///
    /// Uniqueness is decided on the number of survivors, so the iteration
    /// order of `candidates` never changes which activity is returned.
    pub fn select<'a, I>(
        &self,
        candidates: I,
        exchange_unit: &str,
        location: &str,
        ref_name: &str,
    ) -> Selection<'a>
    where
        I: IntoIterator<Item = &'a ReferenceActivity>,
    {
        let canon_ref = canonical(ref_name);
        let candidates: Vec<&'a ReferenceActivity> = candidates.into_iter().collect();

        let mut matches: Vec<&'a ReferenceActivity> = candidates
            .iter()
            .copied()
            .filter(|act| {
                self.locations.compatible(location, &act.location)
                    && act.canonical_product() == canon_ref
            })
            .collect();

        match matches.len() {
            0 => Selection::NoMatch { candidates },
            1 => {
                let activity = matches.remove(0);
                Selection::Matched {
                    activity,
                    unit_mismatch: activity.unit != exchange_unit,
                }
            }
            _ => Selection::Ambiguous {
                candidates: matches,
            },
        }
    }
}

/// Select with the default location rule
pub fn select_activity<'a, I>(
    candidates: I,
    exchange_unit: &str,
    location: &str,
    ref_name: &str,
) -> Selection<'a>
where
    I: IntoIterator<Item = &'a ReferenceActivity>,
{
    CandidateSelector::default().select(candidates, exchange_unit, location, ref_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel(location: &str, unit: &str) -> ReferenceActivity {
        ReferenceActivity::new("market for steel", "steel", location, unit)
    }

    #[test]
    fn test_same_location() {
        assert!(same_location("GLO", "RoW"));
        assert!(same_location("RoW", "GLO"));
        assert!(same_location("GLO", "GLO"));
        assert!(same_location("RoW", "RoW"));
        assert!(!same_location("DE", "GLO"));
        assert!(same_location("DE", "DE"));
        assert!(!same_location("DE", "FR"));
    }

    #[test]
    fn test_custom_global_class() {
        let locations = LocationEquivalence::new(["GLO", "RoW", "RER"]);
        assert!(locations.compatible("RER", "GLO"));
        assert!(!LocationEquivalence::default().compatible("RER", "GLO"));
    }

    #[test]
    fn test_select_by_location() {
        let candidates = [steel("DE", "kg"), steel("FR", "kg")];
        let selection = select_activity(&candidates, "kg", "DE", "steel");

        assert_eq!(
            selection,
            Selection::Matched {
                activity: &candidates[0],
                unit_mismatch: false,
            }
        );
    }

    #[test]
    fn test_select_global_equivalence() {
        let candidates = [steel("RoW", "kg"), steel("FR", "kg")];
        let selection = select_activity(&candidates, "kg", "GLO", "Steel ");
        assert_eq!(selection.activity(), Some(&candidates[0]));
    }

    #[test]
    fn test_select_ambiguous() {
        let candidates = [
            ReferenceActivity::new("market for steel", "steel", "DE", "kg"),
            ReferenceActivity::new("steel production", "Steel", "DE", "kg"),
        ];
        match select_activity(&candidates, "kg", "DE", "steel") {
            Selection::Ambiguous { candidates: survivors } => assert_eq!(survivors.len(), 2),
            other => panic!("expected ambiguous selection, got {other:?}"),
        }
    }

    #[test]
    fn test_select_ambiguous_between_glo_and_row() {
        let candidates = [steel("GLO", "kg"), steel("RoW", "kg")];
        assert!(matches!(
            select_activity(&candidates, "kg", "GLO", "steel"),
            Selection::Ambiguous { .. }
        ));
    }

    #[test]
    fn test_select_no_match_keeps_all_candidates() {
        let candidates = [steel("DE", "kg"), steel("FR", "kg")];
        match select_activity(&candidates, "kg", "DE", "aluminium") {
            Selection::NoMatch { candidates: all } => assert_eq!(all.len(), 2),
            other => panic!("expected no match, got {other:?}"),
        }
    }

    #[test]
    fn test_unit_mismatch_still_matches() {
        let candidates = [steel("DE", "ton")];
        let selection = select_activity(&candidates, "kg", "DE", "steel");
        assert_eq!(
            selection,
            Selection::Matched {
                activity: &candidates[0],
                unit_mismatch: true,
            }
        );
    }

    #[test]
    fn test_reference_product_compared_canonically() {
        let candidates = [ReferenceActivity::new(
            "market for steel, low-alloyed",
            "steel, low-alloyed",
            "DE",
            "kg",
        )];
        let selection = select_activity(&candidates, "kg", "DE", "Low-alloyed Steel ");
        assert!(selection.activity().is_some());
    }

    #[test]
    fn test_order_does_not_change_result() {
        let forward = [steel("DE", "kg"), steel("FR", "kg"), steel("RoW", "kg")];
        let reversed = [steel("RoW", "kg"), steel("FR", "kg"), steel("DE", "kg")];

        let a = select_activity(&forward, "kg", "FR", "steel").activity().cloned();
        let b = select_activity(&reversed, "kg", "FR", "steel").activity().cloned();
        assert_eq!(a, b);
        assert_eq!(a.map(|act| act.location), Some("FR".to_string()));
    }
}
