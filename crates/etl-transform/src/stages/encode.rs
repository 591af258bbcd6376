use etl_model::{CellValue, Column, ColumnType, Dataset};

use crate::stage::TransformStage;
use crate::stages::{stage_err, unique_name};
use crate::Result;

const STAGE: &str = "encode_categoricals";

/// Replaces text columns with drop-first boolean indicator columns.
///
/// For a column with `k` distinct observed values, the values are ordered
/// lexicographically and the first is dropped, leaving `k - 1` indicators
/// named `{column}_{value}`. Missing cells get all-false indicators. The
/// pass-through columns keep their relative order and the indicator groups
/// are appended after them, in the source columns' order. Numeric, boolean,
/// and datetime columns pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeCategoricals;

fn distinct_sorted(column: &Column) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for value in column.values() {
        if let Some(s) = value.as_str() {
            if !categories.iter().any(|c| c == s) {
                categories.push(s.to_string());
            }
        }
    }
    categories.sort();
    categories
}

impl TransformStage for EncodeCategoricals {
    fn apply(&self, dataset: Dataset) -> Result<Dataset> {
        let columns = dataset.into_columns();
        let mut passthrough: Vec<Column> = Vec::new();
        let mut categorical: Vec<Column> = Vec::new();
        for column in columns {
            if column.column_type() == ColumnType::Text {
                categorical.push(column);
            } else {
                passthrough.push(column);
            }
        }

        let mut used: Vec<String> = passthrough.iter().map(|c| c.name().to_string()).collect();
        let mut result = Dataset::from_columns(passthrough).map_err(stage_err(STAGE))?;

        for column in categorical {
            let categories = distinct_sorted(&column);
            tracing::debug!(
                column = column.name(),
                distinct = categories.len(),
                "encoding categorical column"
            );
            // Drop-first: the lexicographically smallest category is implied
            // by all indicators being false.
            for category in categories.iter().skip(1) {
                let values: Vec<CellValue> = column
                    .values()
                    .iter()
                    .map(|v| CellValue::Bool(v.as_str() == Some(category.as_str())))
                    .collect();
                let name = unique_name(&used, format!("{}_{category}", column.name()));
                used.push(name.clone());
                let indicator =
                    Column::new(name, ColumnType::Boolean, values).map_err(stage_err(STAGE))?;
                result.add_column(indicator).map_err(stage_err(STAGE))?;
            }
        }
        Ok(result)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
