//! Narrowest-type inference for text columns.
//!
//! Shared by the CSV source adapter (which types columns on ingest, the way
//! a dataframe reader would) and the type-coercion transform stage.

use crate::dataset::{CellValue, Column, ColumnType};

/// Parses a finite f64. Tokens that read as NaN or infinity are rejected so
/// non-finite values can never enter a numeric column.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Coerce a text column to its narrowest consistent type.
///
/// Checks the non-missing values in order of narrowness: all-boolean, then
/// all-numeric. Returns `None` when the column is ambiguous (stays text),
/// all-missing, or not a text column to begin with.
pub fn coerce_narrowest(column: &Column) -> Option<Column> {
    if column.column_type() != ColumnType::Text {
        return None;
    }
    let texts: Vec<&str> = column
        .values()
        .iter()
        .filter_map(CellValue::as_str)
        .collect();
    if texts.is_empty() {
        return None;
    }

    if texts.iter().all(|s| parse_bool(s).is_some()) {
        let values = column
            .values()
            .iter()
            .map(|v| match v.as_str().and_then(parse_bool) {
                Some(b) => CellValue::Bool(b),
                None => CellValue::Missing,
            })
            .collect();
        return Column::new(column.name().to_string(), ColumnType::Boolean, values).ok();
    }

    if texts.iter().all(|s| parse_f64(s).is_some()) {
        let values = column
            .values()
            .iter()
            .map(|v| match v.as_str().and_then(parse_f64) {
                Some(n) => CellValue::Number(n),
                None => CellValue::Missing,
            })
            .collect();
        return Column::new(column.name().to_string(), ColumnType::Numeric, values).ok();
    }

    None
}
