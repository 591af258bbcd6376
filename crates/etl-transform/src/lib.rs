//! Transformation stages and the pipeline orchestrator.
//!
//! Each cleaning/transformation concern is a named, independently testable
//! unit implementing the [`TransformStage`] trait (`Dataset` in, `Dataset`
//! out). The orchestrator walks a fixed canonical stage order and applies
//! the subset the caller has enabled; the caller's toggle order never
//! changes execution order.
//!
//! # Example
//!
//! ```ignore
//! use etl_transform::{Pipeline, PipelineConfig, Stage};
//!
//! let mut config = PipelineConfig::default();
//! config.enable(Stage::CleanNames);
//! config.enable(Stage::DeriveFeatures);
//!
//! let transformed = Pipeline::new(config).run(dataset)?;
//! ```

#![deny(unsafe_code)]

mod error;
mod pipeline;
mod stage;
mod stages;
mod stats;

pub use error::TransformError;
pub use pipeline::{Pipeline, PipelineConfig};
pub use stage::{Stage, TransformStage};
pub use stages::{
    CleanNames, ConvertTypes, DeriveFeatures, DropMissing, EncodeCategoricals, ParseDates,
    RemoveOutliers, ScaleFeatures,
};

pub type Result<T> = std::result::Result<T, TransformError>;
