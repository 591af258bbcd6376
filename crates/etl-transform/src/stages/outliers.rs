use etl_model::{ColumnType, Dataset};

use crate::stage::TransformStage;
use crate::stages::stage_err;
use crate::stats::{mean, sample_std};
use crate::Result;

const STAGE: &str = "remove_outliers";

/// Drops rows whose z-score exceeds the threshold in any numeric column.
///
/// Mean and sample standard deviation are computed over each numeric
/// column's current values; a row survives only if `|x - mu| / sigma` is
/// below the threshold for every tested column (a conjunction across
/// columns). Zero-variance columns, and columns with fewer than two values,
/// are excluded from the test so no row can fail on them. Missing cells do
/// not fail the test.
#[derive(Debug, Clone, Copy)]
pub struct RemoveOutliers {
    z_thresh: f64,
}

impl RemoveOutliers {
    pub const DEFAULT_Z_THRESH: f64 = 3.0;

    pub fn new(z_thresh: f64) -> Self {
        Self { z_thresh }
    }
}

impl Default for RemoveOutliers {
    fn default() -> Self {
        Self::new(Self::DEFAULT_Z_THRESH)
    }
}

impl TransformStage for RemoveOutliers {
    fn apply(&self, mut dataset: Dataset) -> Result<Dataset> {
        // (column index, mu, sigma) per testable numeric column.
        let mut tests: Vec<(usize, f64, f64)> = Vec::new();
        for (idx, column) in dataset.columns().iter().enumerate() {
            if column.column_type() != ColumnType::Numeric {
                continue;
            }
            let values: Vec<f64> = column.numeric_values().collect();
            let (Some(mu), Some(sigma)) = (mean(&values), sample_std(&values)) else {
                continue;
            };
            if sigma == 0.0 {
                tracing::debug!(column = column.name(), "zero variance, excluded from test");
                continue;
            }
            tests.push((idx, mu, sigma));
        }

        let mask: Vec<bool> = (0..dataset.row_count())
            .map(|row| {
                tests.iter().all(|&(idx, mu, sigma)| {
                    match dataset.columns()[idx].values()[row].as_f64() {
                        Some(x) => ((x - mu) / sigma).abs() < self.z_thresh,
                        None => true,
                    }
                })
            })
            .collect();
        let dropped = mask.iter().filter(|keep| !**keep).count();
        if dropped > 0 {
            tracing::debug!(dropped, z_thresh = self.z_thresh, "dropping outlier rows");
        }
        dataset.retain_rows(&mask).map_err(stage_err(STAGE))?;
        Ok(dataset)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
