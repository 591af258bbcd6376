use crate::json_source::dataset_from_json;
use crate::{MaybeDataset, Result};

/// Fetch rows from an HTTP endpoint with a single blocking GET.
///
/// Only a 200 response with a JSON array/object body yields a dataset; any
/// other status is reported as "absent" rather than an error. Transport
/// failures and unparseable bodies are errors.
pub fn extract_api(url: &str) -> Result<MaybeDataset> {
    let response = reqwest::blocking::get(url)?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        tracing::debug!(%url, status = status.as_u16(), "non-200 response, no dataset");
        return Ok(None);
    }
    let body: serde_json::Value = response.json()?;
    dataset_from_json(body).map(Some)
}
