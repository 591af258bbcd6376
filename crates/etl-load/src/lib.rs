//! Sink adapter: persists a dataset into a relational store.
//!
//! Uses replace-table semantics: an existing destination table is dropped
//! and recreated from the dataset's current schema, then the rows are
//! inserted in one transaction. The connection descriptor (a SQLite
//! database path) is injected at call time; there is no ambient
//! configuration. Failures always surface with a readable reason.

#![deny(unsafe_code)]

use std::path::Path;

use rusqlite::{params_from_iter, Connection};
use thiserror::Error;

use etl_model::{CellValue, ColumnType, Dataset};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("dataset has no columns, nothing to create")]
    EmptySchema,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// SQL storage class for a semantic column type.
fn sql_type(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Numeric => "REAL",
        ColumnType::Boolean => "INTEGER",
        ColumnType::Text | ColumnType::DateTime => "TEXT",
    }
}

/// Valid table names: ASCII identifier characters only, no leading digit.
///
/// Identifiers are still quoted in the generated SQL; the check exists so a
/// bad name fails with a clear reason instead of a driver error.
fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(LoadError::InvalidTableName(name.to_string()))
    }
}

fn to_sql_value(cell: &CellValue) -> rusqlite::types::Value {
    use rusqlite::types::Value;
    match cell {
        CellValue::Number(v) => Value::Real(*v),
        CellValue::Text(s) => Value::Text(s.clone()),
        CellValue::Bool(b) => Value::Integer(i64::from(*b)),
        CellValue::DateTime(dt) => Value::Text(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        CellValue::Missing => Value::Null,
    }
}

/// Write the dataset to `table_name` in the SQLite database at `db_path`,
/// replacing any existing table. No row index is persisted.
pub fn load_dataset(dataset: &Dataset, db_path: &Path, table_name: &str) -> Result<()> {
    let mut connection = Connection::open(db_path)?;
    load_into(dataset, &mut connection, table_name)
}

/// Replace-table write over an already-open connection.
pub fn load_into(dataset: &Dataset, connection: &mut Connection, table_name: &str) -> Result<()> {
    validate_table_name(table_name)?;
    if dataset.column_count() == 0 {
        return Err(LoadError::EmptySchema);
    }

    let column_defs: Vec<String> = dataset
        .columns()
        .iter()
        .map(|c| format!("\"{}\" {}", c.name().replace('"', "\"\""), sql_type(c.column_type())))
        .collect();
    let placeholders: Vec<&str> = dataset.columns().iter().map(|_| "?").collect();

    let tx = connection.transaction()?;
    tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{table_name}\";"))?;
    tx.execute_batch(&format!(
        "CREATE TABLE \"{table_name}\" ({});",
        column_defs.join(", ")
    ))?;
    {
        let mut insert = tx.prepare(&format!(
            "INSERT INTO \"{table_name}\" VALUES ({})",
            placeholders.join(", ")
        ))?;
        for row in 0..dataset.row_count() {
            let values = dataset.row(row).into_iter().map(to_sql_value);
            insert.execute(params_from_iter(values))?;
        }
    }
    tx.commit()?;

    tracing::info!(
        table = table_name,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "dataset loaded"
    );
    Ok(())
}
