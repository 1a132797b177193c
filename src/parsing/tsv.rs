use std::collections::HashMap;

use crate::core::activity::ReferenceActivity;
use crate::core::exchange::ExchangeRecord;
use crate::core::types::ExchangeType;
use crate::parsing::ParseError;
use crate::utils::validation::{check_record_limit, validate_activity, validate_exchange};

/// A data row: 1-based line number and its raw fields
type Row<'a> = (usize, Vec<&'a str>);

/// Split TSV text into a column lookup and data rows.
///
/// Blank lines and `#` comments are skipped; the first remaining line is the
/// header. Column names are matched case-insensitively. Field values are not
/// trimmed.
fn split_table(text: &str) -> Result<(HashMap<String, usize>, Vec<Row<'_>>), ParseError> {
    let mut columns: Option<HashMap<String, usize>> = None;
    let mut rows = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();

        if columns.is_none() {
            columns = Some(
                fields
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| (name.trim().to_lowercase(), idx))
                    .collect(),
            );
            continue;
        }

        // Check record limit for DOS protection
        if check_record_limit(rows.len()).is_some() {
            return Err(ParseError::TooManyRecords(rows.len()));
        }

        // Line numbers in errors are 1-based for user friendliness
        rows.push((i + 1, fields));
    }

    let columns =
        columns.ok_or_else(|| ParseError::InvalidFormat("No header row found".to_string()))?;
    Ok((columns, rows))
}

fn column(columns: &HashMap<String, usize>, names: &[&str]) -> Result<usize, ParseError> {
    names
        .iter()
        .find_map(|name| columns.get(*name).copied())
        .ok_or_else(|| ParseError::MissingColumn(names[0].to_string()))
}

fn field<'a>(row: &Row<'a>, idx: usize) -> Result<&'a str, ParseError> {
    row.1.get(idx).copied().ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "Line {} has {} fields, expected at least {}",
            row.0,
            row.1.len(),
            idx + 1
        ))
    })
}

/// Parse exchanges from TSV text with `name`, `unit` and `type` columns
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent,
/// `ParseError::InvalidFormat` for short rows, `ParseError::InvalidLine` for
/// blank fields or unknown exchange types, or `ParseError::TooManyRecords`.
pub fn parse_exchanges(text: &str) -> Result<Vec<ExchangeRecord>, ParseError> {
    let (columns, rows) = split_table(text)?;
    let name_col = column(&columns, &["name"])?;
    let unit_col = column(&columns, &["unit"])?;
    let type_col = column(&columns, &["type"])?;

    let mut exchanges = Vec::with_capacity(rows.len());
    for row in &rows {
        let invalid = |source| ParseError::InvalidLine {
            line: row.0,
            source,
        };

        let exchange_type = ExchangeType::parse(field(row, type_col)?).map_err(invalid)?;
        let exchange = ExchangeRecord::new(field(row, name_col)?, field(row, unit_col)?, exchange_type);
        validate_exchange(&exchange).map_err(invalid)?;
        exchanges.push(exchange);
    }

    Ok(exchanges)
}

/// Parse reference activities from TSV text with `name`, `reference product`
/// (or `reference_product`), `location` and `unit` columns
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent,
/// `ParseError::InvalidFormat` for short rows, `ParseError::InvalidLine` for
/// blank fields, or `ParseError::TooManyRecords`.
pub fn parse_activities(text: &str) -> Result<Vec<ReferenceActivity>, ParseError> {
    let (columns, rows) = split_table(text)?;
    let name_col = column(&columns, &["name"])?;
    let product_col = column(&columns, &["reference product", "reference_product"])?;
    let location_col = column(&columns, &["location"])?;
    let unit_col = column(&columns, &["unit"])?;

    let mut activities = Vec::with_capacity(rows.len());
    for row in &rows {
        let activity = ReferenceActivity::new(
            field(row, name_col)?,
            field(row, product_col)?,
            field(row, location_col)?,
            field(row, unit_col)?,
        );
        validate_activity(&activity).map_err(|source| ParseError::InvalidLine {
            line: row.0,
            source,
        })?;
        activities.push(activity);
    }

    Ok(activities)
}
