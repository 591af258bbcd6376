use thiserror::Error;

/// Errors raised while turning source bytes into a dataset.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON body must be an array of flat objects or a single object, got {0}")]
    JsonShape(&'static str),

    #[error("nested JSON value in field {field}")]
    JsonNested { field: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Dataset(#[from] etl_model::DatasetError),
}
