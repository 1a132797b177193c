use serde::{Deserialize, Serialize};

use crate::core::types::ExchangeType;

/// An exchange from the source inventory that is not yet linked
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Raw composite name, e.g. `Steel {DE}| market for steel | Cutoff, U`
    pub name: String,

    /// Unit of the exchanged amount
    pub unit: String,

    /// Flow kind
    #[serde(rename = "type")]
    pub exchange_type: ExchangeType,
}

impl ExchangeRecord {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        exchange_type: ExchangeType,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            exchange_type,
        }
    }

    /// Shorthand for a technosphere exchange
    pub fn technosphere(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::new(name, unit, ExchangeType::Technosphere)
    }

    /// Whether the name uses the `|`-separated composite convention at all
    #[must_use]
    pub fn has_composite_name(&self) -> bool {
        self.name.contains('|')
    }
}
