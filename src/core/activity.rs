use serde::{Deserialize, Serialize};

use crate::matching::canonical::{canonical, CanonicalKey};

/// A canonical activity from the reference inventory
///
/// Ordering is derived so that candidate sets iterate deterministically;
/// it carries no matching semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceActivity {
    /// Activity name, e.g. `market for steel, low-alloyed`
    pub name: String,

    /// Product the activity delivers
    #[serde(rename = "reference product", alias = "reference_product")]
    pub reference_product: String,

    /// Geography code (`DE`, `GLO`, `RoW`, ...)
    pub location: String,

    /// Unit of the reference product
    pub unit: String,
}

impl ReferenceActivity {
    pub fn new(
        name: impl Into<String>,
        reference_product: impl Into<String>,
        location: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reference_product: reference_product.into(),
            location: location.into(),
            unit: unit.into(),
        }
    }

    /// Canonical key of the activity name (its index bucket)
    #[must_use]
    pub fn canonical_name(&self) -> CanonicalKey {
        canonical(&self.name)
    }

    /// Canonical key of the reference product
    #[must_use]
    pub fn canonical_product(&self) -> CanonicalKey {
        canonical(&self.reference_product)
    }
}

impl std::fmt::Display for ReferenceActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "name: '{}', unit: {}, loc: {}, ref: '{}' ({})",
            self.name,
            self.unit,
            self.location,
            self.reference_product,
            self.canonical_product()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_reference_product_spellings() {
        let spaced = r#"{"name": "market for steel", "reference product": "steel", "location": "RoW", "unit": "kg"}"#;
        let snake = r#"{"name": "market for steel", "reference_product": "steel", "location": "RoW", "unit": "kg"}"#;

        let a: ReferenceActivity = serde_json::from_str(spaced).unwrap();
        let b: ReferenceActivity = serde_json::from_str(snake).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.reference_product, "steel");
    }

    #[test]
    fn test_display_includes_canonical_product() {
        let activity = ReferenceActivity::new("market for steel", "Steel, low-alloyed", "DE", "kg");
        let shown = activity.to_string();
        assert!(shown.contains("market for steel"));
        assert!(shown.contains("loc: DE"));
        assert!(shown.contains("(low-alloyed steel)"));
    }
}
