use std::io::Read;

use etl_model::{infer::coerce_narrowest, CellValue, Column, ColumnType, Dataset};

use crate::Result;

/// Field tokens that read as "no value", the way a dataframe reader treats
/// them (case-insensitive).
const NA_TOKENS: &[&str] = &["na", "n/a", "null", "nan"];

fn is_na_token(value: &str) -> bool {
    NA_TOKENS.iter().any(|t| value.eq_ignore_ascii_case(t))
}

/// Read comma-delimited bytes with a header row into a dataset.
///
/// Cells are ingested as trimmed text, then each column is coerced to its
/// narrowest consistent type (boolean, numeric, or text), the way a
/// dataframe reader types its input. An empty field or an NA token becomes
/// the missing marker, so missing-value spellings never surface as text or
/// as non-finite numbers. Column order follows the header. Ragged records
/// are a parse failure.
pub fn extract_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (idx, field) in record.iter().enumerate() {
            let value = field.trim();
            let cell = if value.is_empty() || is_na_token(value) {
                CellValue::Missing
            } else {
                CellValue::Text(value.to_string())
            };
            columns[idx].push(cell);
        }
    }

    let row_count = columns.first().map_or(0, Vec::len);
    tracing::debug!(rows = row_count, columns = headers.len(), "extracted CSV source");

    let columns = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| {
            let column = Column::new(name, ColumnType::Text, values)?;
            Ok(coerce_narrowest(&column).unwrap_or(column))
        })
        .collect::<std::result::Result<Vec<_>, etl_model::DatasetError>>()?;
    Ok(Dataset::from_columns(columns)?)
}
