use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// A single cell: a scalar of the column's semantic type, or the
/// distinguished missing marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Bool(_) => "bool",
            CellValue::DateTime(_) => "datetime",
            CellValue::Missing => "missing",
        }
    }

    fn column_type(&self) -> Option<ColumnType> {
        match self {
            CellValue::Number(_) => Some(ColumnType::Numeric),
            CellValue::Text(_) => Some(ColumnType::Text),
            CellValue::Bool(_) => Some(ColumnType::Boolean),
            CellValue::DateTime(_) => Some(ColumnType::DateTime),
            CellValue::Missing => None,
        }
    }

    /// Render the cell as display text. Missing renders as the empty string.
    pub fn render(&self) -> String {
        match self {
            CellValue::Number(v) => format!("{v}"),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

/// Inferred semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Text,
    Boolean,
    DateTime,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::DateTime => "datetime",
        }
    }
}

/// A named column with equal-length values of one semantic type.
///
/// Invariant: every non-missing value matches `ty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    ty: ColumnType,
    values: Vec<CellValue>,
}

impl Column {
    /// Build a column with an explicit type, checking every value against it.
    pub fn new(name: impl Into<String>, ty: ColumnType, values: Vec<CellValue>) -> Result<Self> {
        let name = name.into();
        for value in &values {
            if let Some(found) = value.column_type() {
                if found != ty {
                    return Err(DatasetError::TypeMismatch {
                        column: name,
                        expected: ty.as_str(),
                        found: value.type_name(),
                    });
                }
            }
        }
        Ok(Self { name, ty, values })
    }

    /// Build a column by inferring the type from the values.
    ///
    /// If all non-missing values share one variant, that variant's type is
    /// used. Mixed-variant values are demoted to text (numbers and booleans
    /// are rendered); an all-missing column defaults to text.
    pub fn from_values(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let mut inferred: Option<ColumnType> = None;
        let mut mixed = false;
        for value in &values {
            if let Some(ty) = value.column_type() {
                match inferred {
                    None => inferred = Some(ty),
                    Some(seen) if seen != ty => {
                        mixed = true;
                        break;
                    }
                    Some(_) => {}
                }
            }
        }

        let name = name.into();
        if mixed {
            let values = values
                .into_iter()
                .map(|v| match v {
                    CellValue::Missing => CellValue::Missing,
                    other => CellValue::Text(other.render()),
                })
                .collect();
            return Self {
                name,
                ty: ColumnType::Text,
                values,
            };
        }

        Self {
            name,
            ty: inferred.unwrap_or(ColumnType::Text),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the numeric values of the column, skipping missing cells.
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(CellValue::as_f64)
    }

    /// Replace the column's values, re-checking them against its type.
    pub fn replace_values(&mut self, values: Vec<CellValue>) -> Result<()> {
        let replacement = Column::new(self.name.clone(), self.ty, values)?;
        self.values = replacement.values;
        Ok(())
    }
}

/// An in-memory tabular value: ordered, uniquely named, equal-length columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a dataset from columns, validating name uniqueness and
    /// equal lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut dataset = Self::new();
        for column in columns {
            dataset.add_column(column)?;
        }
        Ok(dataset)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Append a column, enforcing the unique-name and equal-length invariants.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        self.check_new_column(&column)?;
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column by name, returning it.
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        match self.column_index(name) {
            Some(idx) => Ok(self.columns.remove(idx)),
            None => Err(DatasetError::UnknownColumn(name.to_string())),
        }
    }

    /// Replace an existing column's values in place.
    pub fn replace_column_values(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        let rows = self.row_count();
        if values.len() != rows {
            return Err(DatasetError::LengthMismatch {
                name: name.to_string(),
                expected: rows,
                actual: values.len(),
            });
        }
        let idx = self
            .column_index(name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))?;
        self.columns[idx].replace_values(values)
    }

    /// Keep only the rows where the mask is true, across every column.
    pub fn retain_rows(&mut self, mask: &[bool]) -> Result<()> {
        let rows = self.row_count();
        if mask.len() != rows {
            return Err(DatasetError::MaskLengthMismatch {
                mask_len: mask.len(),
                rows,
            });
        }
        for column in &mut self.columns {
            let mut keep = mask.iter();
            column.values.retain(|_| *keep.next().unwrap_or(&false));
        }
        Ok(())
    }

    /// Borrow one row as a cell slice in column order.
    pub fn row(&self, index: usize) -> Vec<&CellValue> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    fn check_new_column(&self, column: &Column) -> Result<()> {
        if self.column(column.name()).is_some() {
            return Err(DatasetError::DuplicateColumn(column.name().to_string()));
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(DatasetError::LengthMismatch {
                name: column.name().to_string(),
                expected: self.row_count(),
                actual: column.len(),
            });
        }
        Ok(())
    }
}
