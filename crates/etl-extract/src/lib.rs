//! Source adapters.
//!
//! Each adapter converts raw bytes (or an HTTP response) into a [`Dataset`],
//! or reports that no data is available. CSV columns are coerced to their
//! narrowest consistent type at ingest (boolean, numeric, or text); JSON
//! sources carry scalar types through directly.

#![deny(unsafe_code)]

mod api;
mod csv_source;
mod error;
mod json_source;

pub use api::extract_api;
pub use csv_source::extract_csv;
pub use error::ExtractError;
pub use json_source::extract_json;

use etl_model::Dataset;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Outcome of an extraction attempt against a source that may legitimately
/// have nothing to offer (a non-200 HTTP response).
pub type MaybeDataset = Option<Dataset>;
