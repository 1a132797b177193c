use serde::{Deserialize, Serialize};

use crate::utils::validation::ValidationError;

/// Kind of flow an exchange represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeType {
    /// Flow from or to the engineered economy
    Technosphere,
    /// Flow from or to the environment
    Biosphere,
    /// Reference output of the owning activity
    Production,
    /// Avoided product credited to the owning activity
    Substitution,
}

impl ExchangeType {
    /// Parse an exchange type from its textual form (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownExchangeType` for unrecognised kinds.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "technosphere" => Ok(Self::Technosphere),
            "biosphere" => Ok(Self::Biosphere),
            "production" => Ok(Self::Production),
            "substitution" => Ok(Self::Substitution),
            _ => Err(ValidationError::UnknownExchangeType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Technosphere => write!(f, "technosphere"),
            Self::Biosphere => write!(f, "biosphere"),
            Self::Production => write!(f, "production"),
            Self::Substitution => write!(f, "substitution"),
        }
    }
}

/// Severity of a diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exchange_type() {
        assert_eq!(
            ExchangeType::parse("technosphere").unwrap(),
            ExchangeType::Technosphere
        );
        assert_eq!(
            ExchangeType::parse(" Biosphere ").unwrap(),
            ExchangeType::Biosphere
        );
        assert!(matches!(
            ExchangeType::parse("emission"),
            Err(ValidationError::UnknownExchangeType(_))
        ));
    }

    #[test]
    fn test_exchange_type_serde_name() {
        let json = serde_json::to_string(&ExchangeType::Technosphere).unwrap();
        assert_eq!(json, "\"technosphere\"");
        let parsed: ExchangeType = serde_json::from_str("\"substitution\"").unwrap();
        assert_eq!(parsed, ExchangeType::Substitution);
    }
}
