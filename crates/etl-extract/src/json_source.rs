use serde_json::Value;

use etl_model::{CellValue, Column, Dataset};

use crate::{ExtractError, Result};

/// Read a JSON byte stream into a dataset.
///
/// Accepts an array of flat objects (one row each) or a single flat object
/// (one row). Keys become columns in first-seen order; a key absent from a
/// row, or a JSON `null`, becomes the missing marker.
pub fn extract_json(bytes: &[u8]) -> Result<Dataset> {
    let value: Value = serde_json::from_slice(bytes)?;
    dataset_from_json(value)
}

/// Build a dataset from an already-parsed JSON value.
pub(crate) fn dataset_from_json(value: Value) -> Result<Dataset> {
    let rows: Vec<Value> = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        Value::Null => return Err(ExtractError::JsonShape("null")),
        Value::Bool(_) => return Err(ExtractError::JsonShape("boolean")),
        Value::Number(_) => return Err(ExtractError::JsonShape("number")),
        Value::String(_) => return Err(ExtractError::JsonShape("string")),
    };

    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<CellValue>> = Vec::new();
    for (row_idx, row) in rows.into_iter().enumerate() {
        let Value::Object(fields) = row else {
            return Err(ExtractError::JsonShape("non-object array element"));
        };
        // Register any columns first seen in this row, backfilling missing
        // markers for earlier rows.
        for key in fields.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
                columns.push(vec![CellValue::Missing; row_idx]);
            }
        }
        for (idx, name) in names.iter().enumerate() {
            let cell = match fields.get(name) {
                None | Some(Value::Null) => CellValue::Missing,
                Some(Value::Bool(b)) => CellValue::Bool(*b),
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(v) => CellValue::Number(v),
                    None => CellValue::Text(n.to_string()),
                },
                Some(Value::String(s)) => CellValue::Text(s.clone()),
                Some(Value::Array(_) | Value::Object(_)) => {
                    return Err(ExtractError::JsonNested { field: name.clone() });
                }
            };
            columns[idx].push(cell);
        }
    }

    tracing::debug!(
        rows = columns.first().map_or(0, Vec::len),
        columns = names.len(),
        "extracted JSON source"
    );

    let columns = names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::from_values(name, values))
        .collect();
    Ok(Dataset::from_columns(columns)?)
}
