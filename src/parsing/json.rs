use serde::de::DeserializeOwned;

use crate::core::activity::ReferenceActivity;
use crate::core::exchange::ExchangeRecord;
use crate::parsing::ParseError;
use crate::utils::validation::{
    validate_activity, validate_exchange, ValidationError, MAX_RECORDS,
};

fn parse_records<T, F>(text: &str, validate: F) -> Result<Vec<T>, ParseError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<(), ValidationError>,
{
    let records: Vec<T> = serde_json::from_str(text)?;

    if records.len() > MAX_RECORDS {
        return Err(ParseError::TooManyRecords(records.len()));
    }

    for (i, record) in records.iter().enumerate() {
        validate(record).map_err(|source| ParseError::InvalidEntry {
            index: i + 1,
            source,
        })?;
    }

    Ok(records)
}

/// Parse a JSON array of `{"name", "unit", "type"}` objects
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON or unknown exchange types,
/// `ParseError::InvalidEntry` for records with blank required fields, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_exchanges(text: &str) -> Result<Vec<ExchangeRecord>, ParseError> {
    parse_records(text, validate_exchange)
}

/// Parse a JSON array of `{"name", "reference product", "location", "unit"}` objects
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON or missing keys,
/// `ParseError::InvalidEntry` for records with blank required fields, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_activities(text: &str) -> Result<Vec<ReferenceActivity>, ParseError> {
    parse_records(text, validate_activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ExchangeType;

    #[test]
    fn test_parse_exchanges() {
        let json = r#"[
            {"name": "Steel {GLO}| market for steel | Cutoff, U", "unit": "kg", "type": "technosphere"},
            {"name": "Carbon dioxide, fossil", "unit": "kg", "type": "biosphere"}
        ]"#;
        let exchanges = parse_exchanges(json).unwrap();
        assert_eq!(exchanges.len(), 2);
        assert_eq!(exchanges[1].exchange_type, ExchangeType::Biosphere);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"[{"name": "x", "unit": "kg", "type": "emission"}]"#;
        assert!(matches!(parse_exchanges(json), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_blank_field_reports_entry() {
        let json = r#"[
            {"name": "market for steel", "reference product": "steel", "location": "DE", "unit": "kg"},
            {"name": "market for steel", "reference product": "", "location": "FR", "unit": "kg"}
        ]"#;
        match parse_activities(json) {
            Err(ParseError::InvalidEntry { index, source }) => {
                assert_eq!(index, 2);
                assert_eq!(
                    source,
                    ValidationError::EmptyField {
                        field: "reference product"
                    }
                );
            }
            other => panic!("expected invalid entry, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_rejected() {
        let json = r#"[{"name": "market for steel", "location": "DE", "unit": "kg"}]"#;
        assert!(parse_activities(json).is_err());
    }
}
