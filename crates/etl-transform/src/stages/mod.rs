//! The individual transform stage implementations.

mod clean;
mod coerce;
mod dates;
mod derive;
mod encode;
mod missing;
mod outliers;
mod scale;

pub use clean::CleanNames;
pub use coerce::ConvertTypes;
pub use dates::ParseDates;
pub use derive::DeriveFeatures;
pub use encode::EncodeCategoricals;
pub use missing::DropMissing;
pub use outliers::RemoveOutliers;
pub use scale::ScaleFeatures;

use etl_model::{CellValue, Dataset};

use crate::TransformError;

/// Wrap a dataset invariant error with the failing stage's name.
fn stage_err(stage: &'static str) -> impl Fn(etl_model::DatasetError) -> TransformError {
    move |source| TransformError::Stage { stage, source }
}

/// Canonical text encoding of one row, used for exact-duplicate detection.
///
/// Numbers are keyed by their bit pattern so that equality is exact rather
/// than formatted.
fn row_key(dataset: &Dataset, row: usize) -> String {
    let mut key = String::new();
    for column in dataset.columns() {
        match &column.values()[row] {
            CellValue::Number(v) => {
                key.push('n');
                key.push_str(&format!("{:016x}", v.to_bits()));
            }
            CellValue::Text(s) => {
                key.push('t');
                key.push_str(s);
            }
            CellValue::Bool(b) => key.push(if *b { 'B' } else { 'b' }),
            CellValue::DateTime(dt) => {
                key.push('d');
                key.push_str(&dt.and_utc().timestamp_micros().to_string());
            }
            CellValue::Missing => key.push('m'),
        }
        key.push('\u{1f}');
    }
    key
}

/// Pick `candidate` if unused, otherwise the first `candidate_N` that is.
fn unique_name(used: &[String], candidate: String) -> String {
    if !used.iter().any(|n| *n == candidate) {
        return candidate;
    }
    let mut suffix = 2;
    loop {
        let name = format!("{candidate}_{suffix}");
        if !used.iter().any(|n| *n == name) {
            return name;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_model::Column;

    #[test]
    fn row_key_matches_equal_rows_only() {
        let ds = Dataset::from_columns(vec![
            Column::from_values(
                "a",
                vec![CellValue::Number(1.0), CellValue::Missing, CellValue::Number(1.0)],
            ),
            Column::from_values(
                "b",
                vec![CellValue::Text("x".into()), CellValue::Text("x".into()), CellValue::Text("x".into())],
            ),
        ])
        .unwrap();
        assert_eq!(row_key(&ds, 0), row_key(&ds, 2));
        assert_ne!(row_key(&ds, 0), row_key(&ds, 1));
    }

    #[test]
    fn unique_name_appends_counter() {
        let used = vec!["a".to_string(), "a_2".to_string()];
        assert_eq!(unique_name(&used, "b".to_string()), "b");
        assert_eq!(unique_name(&used, "a".to_string()), "a_3");
    }
}
