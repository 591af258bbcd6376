use serde::{Deserialize, Serialize};

use etl_model::Dataset;

use crate::stage::{Stage, TransformStage};
use crate::stages::{
    CleanNames, ConvertTypes, DeriveFeatures, DropMissing, EncodeCategoricals, ParseDates,
    RemoveOutliers, ScaleFeatures,
};
use crate::Result;

fn default_z_thresh() -> f64 {
    RemoveOutliers::DEFAULT_Z_THRESH
}

/// Declarative pipeline configuration: one enabled flag per stage plus the
/// outlier threshold.
///
/// The flags select *which* stages run; *when* they run is fixed by
/// [`Stage::CANONICAL_ORDER`]. The config serializes so a stage selection
/// can be saved and replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub clean_names: bool,
    #[serde(default)]
    pub parse_dates: bool,
    #[serde(default)]
    pub convert_types: bool,
    #[serde(default)]
    pub drop_missing: bool,
    #[serde(default)]
    pub remove_outliers: bool,
    #[serde(default)]
    pub encode_categoricals: bool,
    #[serde(default)]
    pub scale_features: bool,
    #[serde(default)]
    pub derive_features: bool,
    /// Z-score threshold for the outlier stage.
    #[serde(default = "default_z_thresh")]
    pub z_thresh: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clean_names: false,
            parse_dates: false,
            convert_types: false,
            drop_missing: false,
            remove_outliers: false,
            encode_categoricals: false,
            scale_features: false,
            derive_features: false,
            z_thresh: default_z_thresh(),
        }
    }
}

impl PipelineConfig {
    /// Configuration with every stage enabled.
    pub fn all_enabled() -> Self {
        let mut config = Self::default();
        for stage in Stage::CANONICAL_ORDER {
            config.set_enabled(stage, true);
        }
        config
    }

    pub fn enable(&mut self, stage: Stage) -> &mut Self {
        self.set_enabled(stage, true);
        self
    }

    pub fn disable(&mut self, stage: Stage) -> &mut Self {
        self.set_enabled(stage, false);
        self
    }

    pub fn set_enabled(&mut self, stage: Stage, enabled: bool) {
        let flag = match stage {
            Stage::CleanNames => &mut self.clean_names,
            Stage::ParseDates => &mut self.parse_dates,
            Stage::ConvertTypes => &mut self.convert_types,
            Stage::DropMissing => &mut self.drop_missing,
            Stage::RemoveOutliers => &mut self.remove_outliers,
            Stage::EncodeCategoricals => &mut self.encode_categoricals,
            Stage::ScaleFeatures => &mut self.scale_features,
            Stage::DeriveFeatures => &mut self.derive_features,
        };
        *flag = enabled;
    }

    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::CleanNames => self.clean_names,
            Stage::ParseDates => self.parse_dates,
            Stage::ConvertTypes => self.convert_types,
            Stage::DropMissing => self.drop_missing,
            Stage::RemoveOutliers => self.remove_outliers,
            Stage::EncodeCategoricals => self.encode_categoricals,
            Stage::ScaleFeatures => self.scale_features,
            Stage::DeriveFeatures => self.derive_features,
        }
    }

    /// The stages that will run, in canonical order.
    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::CANONICAL_ORDER
            .into_iter()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }
}

/// The pipeline orchestrator.
///
/// Threads one dataset through the enabled stages in canonical order,
/// aborting at the first stage failure so a partially-applied dataset is
/// never exposed downstream.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    fn build_stage(&self, stage: Stage) -> Box<dyn TransformStage> {
        match stage {
            Stage::CleanNames => Box::new(CleanNames),
            Stage::ParseDates => Box::new(ParseDates),
            Stage::ConvertTypes => Box::new(ConvertTypes),
            Stage::DropMissing => Box::new(DropMissing),
            Stage::RemoveOutliers => Box::new(RemoveOutliers::new(self.config.z_thresh)),
            Stage::EncodeCategoricals => Box::new(EncodeCategoricals),
            Stage::ScaleFeatures => Box::new(ScaleFeatures),
            Stage::DeriveFeatures => Box::new(DeriveFeatures),
        }
    }

    /// Run the enabled stages over the dataset.
    pub fn run(&self, mut dataset: Dataset) -> Result<Dataset> {
        for stage in Stage::CANONICAL_ORDER {
            if !self.config.is_enabled(stage) {
                tracing::trace!(stage = stage.display_name(), "stage disabled, skipping");
                continue;
            }
            let unit = self.build_stage(stage);
            dataset = unit.apply(dataset)?;
            tracing::info!(
                stage = stage.display_name(),
                rows = dataset.row_count(),
                columns = dataset.column_count(),
                "applied stage"
            );
        }
        Ok(dataset)
    }
}
