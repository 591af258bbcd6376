use std::collections::HashSet;

use etl_model::Dataset;

use crate::stage::TransformStage;
use crate::stages::{row_key, stage_err, unique_name};
use crate::Result;

/// Normalizes column names and removes exact-duplicate rows.
///
/// Names are lower-cased, trimmed of surrounding whitespace, and internal
/// spaces become underscores. If two names collide after normalization the
/// later column gets a `_N` suffix so the unique-name invariant holds.
/// Duplicate rows keep their first occurrence; remaining row order is
/// preserved. The stage is idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanNames;

const STAGE: &str = "clean_names";

impl CleanNames {
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase().replace(' ', "_")
    }
}

impl TransformStage for CleanNames {
    fn apply(&self, dataset: Dataset) -> Result<Dataset> {
        let mut renamed: Vec<String> = Vec::with_capacity(dataset.column_count());
        let mut columns = dataset.into_columns();
        for column in &mut columns {
            let name = unique_name(&renamed, Self::normalize_name(column.name()));
            column.set_name(name.clone());
            renamed.push(name);
        }
        let mut dataset = Dataset::from_columns(columns).map_err(stage_err(STAGE))?;

        let mut seen = HashSet::with_capacity(dataset.row_count());
        let mask: Vec<bool> = (0..dataset.row_count())
            .map(|row| seen.insert(row_key(&dataset, row)))
            .collect();
        let duplicates = mask.iter().filter(|keep| !**keep).count();
        if duplicates > 0 {
            tracing::debug!(duplicates, "removing exact-duplicate rows");
        }
        dataset
            .retain_rows(&mask)
            .map_err(stage_err(STAGE))?;
        Ok(dataset)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
