use thiserror::Error;

/// Errors raised while applying transform stages.
///
/// Stages are defined not to fail under well-formed input; the variants here
/// surface internal invariant violations rather than data-quality problems
/// (those resolve to documented fallbacks instead of errors).
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("stage {stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: etl_model::DatasetError,
    },
}
