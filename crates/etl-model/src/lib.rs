//! Core data model for the ETL pipeline.
//!
//! A [`Dataset`] is an ordered collection of uniquely named, equal-length
//! [`Column`]s. Every cell is a [`CellValue`]: a scalar of the column's
//! semantic type or the distinguished `Missing` marker. Datasets are moved
//! by value from stage to stage; ownership is single and never aliased.

#![deny(unsafe_code)]

mod dataset;
mod error;
pub mod infer;

pub use dataset::{CellValue, Column, ColumnType, Dataset};
pub use error::{DatasetError, Result};
