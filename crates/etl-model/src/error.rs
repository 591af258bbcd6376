use thiserror::Error;

/// Errors raised by dataset construction and mutation.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("column length mismatch: {name} has {actual} values, dataset has {expected} rows")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("no such column: {0}")]
    UnknownColumn(String),

    #[error("row mask length {mask_len} does not match row count {rows}")]
    MaskLengthMismatch { mask_len: usize, rows: usize },

    #[error("value of type {found} in column {column} (expected {expected})")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
