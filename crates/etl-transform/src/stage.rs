use serde::{Deserialize, Serialize};

use etl_model::Dataset;

use crate::Result;

/// Identifier for one transform stage.
///
/// The declaration order here is incidental; execution order is always
/// [`Stage::CANONICAL_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Normalize column names and drop exact-duplicate rows.
    CleanNames,
    /// Reinterpret date/time-named columns as datetimes.
    ParseDates,
    /// Infer the narrowest consistent semantic type per column.
    ConvertTypes,
    /// Drop every row containing a missing marker.
    DropMissing,
    /// Drop rows outside the z-score threshold on any numeric column.
    RemoveOutliers,
    /// Replace text columns with drop-first indicator columns.
    EncodeCategoricals,
    /// Standardize numeric columns to zero mean, unit variance.
    ScaleFeatures,
    /// Compute `total_value` from `price` and `quantity`.
    DeriveFeatures,
}

impl Stage {
    /// The fixed sequence in which enabled stages are applied, independent
    /// of caller toggle order.
    pub const CANONICAL_ORDER: [Stage; 8] = [
        Stage::CleanNames,
        Stage::ParseDates,
        Stage::ConvertTypes,
        Stage::DropMissing,
        Stage::RemoveOutliers,
        Stage::EncodeCategoricals,
        Stage::ScaleFeatures,
        Stage::DeriveFeatures,
    ];

    /// Human-readable display name for logging and summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            Stage::CleanNames => "Clean Names",
            Stage::ParseDates => "Parse Dates",
            Stage::ConvertTypes => "Convert Types",
            Stage::DropMissing => "Drop Missing",
            Stage::RemoveOutliers => "Remove Outliers",
            Stage::EncodeCategoricals => "Encode Categoricals",
            Stage::ScaleFeatures => "Scale Features",
            Stage::DeriveFeatures => "Derive Features",
        }
    }
}

/// A single transformation unit: consumes one dataset, produces one dataset.
///
/// Implementations must be pure with respect to the dataset value: the input
/// is taken by value and the caller must not assume the pre-stage value
/// survives a call.
pub trait TransformStage {
    /// Apply this stage to the dataset.
    fn apply(&self, dataset: Dataset) -> Result<Dataset>;

    /// Stage name for logging.
    fn stage_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_covers_every_stage_once() {
        for stage in Stage::CANONICAL_ORDER {
            let count = Stage::CANONICAL_ORDER
                .iter()
                .filter(|s| **s == stage)
                .count();
            assert_eq!(count, 1, "{} appears {count} times", stage.display_name());
        }
    }

    #[test]
    fn stage_id_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::RemoveOutliers).unwrap();
        assert_eq!(json, "\"remove_outliers\"");
    }
}
