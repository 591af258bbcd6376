use etl_model::{CellValue, ColumnType, Dataset};

use crate::stage::TransformStage;
use crate::stages::stage_err;
use crate::stats::{mean, population_std};
use crate::Result;

const STAGE: &str = "scale_features";

/// Standardizes every numeric column to zero mean, unit variance.
///
/// The fit uses the columns as they exist at this point in the pipeline, so
/// the result depends on which stages ran before it. The scaler uses the
/// population standard deviation (n denominator). A zero-variance column is
/// left unchanged rather than producing non-finite values; missing cells
/// stay missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleFeatures;

impl TransformStage for ScaleFeatures {
    fn apply(&self, mut dataset: Dataset) -> Result<Dataset> {
        let mut scaled_columns: Vec<(String, Vec<CellValue>)> = Vec::new();
        for column in dataset.columns() {
            if column.column_type() != ColumnType::Numeric {
                continue;
            }
            let values: Vec<f64> = column.numeric_values().collect();
            let (Some(mu), Some(sigma)) = (mean(&values), population_std(&values)) else {
                continue;
            };
            if sigma == 0.0 {
                tracing::debug!(column = column.name(), "zero variance, column left unscaled");
                continue;
            }
            let scaled: Vec<CellValue> = column
                .values()
                .iter()
                .map(|v| match v.as_f64() {
                    Some(x) => CellValue::Number((x - mu) / sigma),
                    None => CellValue::Missing,
                })
                .collect();
            scaled_columns.push((column.name().to_string(), scaled));
        }

        for (name, values) in scaled_columns {
            dataset
                .replace_column_values(&name, values)
                .map_err(stage_err(STAGE))?;
        }
        Ok(dataset)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
