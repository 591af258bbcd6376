use etl_model::Dataset;

use crate::stage::TransformStage;
use crate::stages::stage_err;
use crate::Result;

const STAGE: &str = "drop_missing";

/// Drops every row that has a missing marker in any column.
///
/// Pure row filter: the column set is unchanged and an empty result is a
/// valid zero-row dataset, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropMissing;

impl TransformStage for DropMissing {
    fn apply(&self, mut dataset: Dataset) -> Result<Dataset> {
        let mask: Vec<bool> = (0..dataset.row_count())
            .map(|row| dataset.row(row).iter().all(|cell| !cell.is_missing()))
            .collect();
        let dropped = mask.iter().filter(|keep| !**keep).count();
        if dropped > 0 {
            tracing::debug!(dropped, "dropping rows with missing values");
        }
        dataset.retain_rows(&mask).map_err(stage_err(STAGE))?;
        Ok(dataset)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
