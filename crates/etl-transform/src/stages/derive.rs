use etl_model::{CellValue, Column, ColumnType, Dataset};

use crate::stage::TransformStage;
use crate::stages::stage_err;
use crate::Result;

const STAGE: &str = "derive_features";

/// Adds a `total_value` column as the element-wise product of `price` and
/// `quantity`.
///
/// Column name matching is exact (post-normalization). A row where either
/// operand is missing or non-numeric yields a missing cell rather than a
/// non-finite number. When both inputs are absent the dataset is unchanged;
/// an existing `total_value` column is replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveFeatures;

const PRICE: &str = "price";
const QUANTITY: &str = "quantity";
const TOTAL_VALUE: &str = "total_value";

impl TransformStage for DeriveFeatures {
    fn apply(&self, mut dataset: Dataset) -> Result<Dataset> {
        let (Some(price), Some(quantity)) = (dataset.column(PRICE), dataset.column(QUANTITY))
        else {
            return Ok(dataset);
        };

        let values: Vec<CellValue> = price
            .values()
            .iter()
            .zip(quantity.values())
            .map(|(p, q)| match (p.as_f64(), q.as_f64()) {
                (Some(p), Some(q)) => CellValue::Number(p * q),
                _ => CellValue::Missing,
            })
            .collect();

        if dataset.column(TOTAL_VALUE).is_some() {
            dataset.remove_column(TOTAL_VALUE).map_err(stage_err(STAGE))?;
        }
        let column =
            Column::new(TOTAL_VALUE, ColumnType::Numeric, values).map_err(stage_err(STAGE))?;
        dataset.add_column(column).map_err(stage_err(STAGE))?;
        tracing::debug!("derived total_value from price and quantity");
        Ok(dataset)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
