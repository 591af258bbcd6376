use etl_model::{infer::coerce_narrowest, Dataset};

use crate::stage::TransformStage;
use crate::stages::stage_err;
use crate::Result;

const STAGE: &str = "convert_types";

/// Infers the narrowest consistent semantic type per text column.
///
/// A text column whose non-missing values all read as booleans becomes
/// boolean; failing that, all-numeric becomes numeric; anything ambiguous
/// stays text. Already-typed columns are untouched. This stage never fails
/// on data content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertTypes;

impl TransformStage for ConvertTypes {
    fn apply(&self, dataset: Dataset) -> Result<Dataset> {
        let mut columns = dataset.into_columns();
        for column in &mut columns {
            if let Some(coerced) = coerce_narrowest(column) {
                tracing::debug!(
                    column = column.name(),
                    to = coerced.column_type().as_str(),
                    "coerced column type"
                );
                *column = coerced;
            }
        }
        Ok(Dataset::from_columns(columns).map_err(stage_err(STAGE))?)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
