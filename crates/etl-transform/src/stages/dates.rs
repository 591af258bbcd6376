use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use etl_model::{CellValue, Column, ColumnType, Dataset};

use crate::stage::TransformStage;
use crate::stages::stage_err;
use crate::Result;

const STAGE: &str = "parse_dates";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Reinterprets date/time-named text columns as datetimes.
///
/// A column qualifies when its name contains `date` or `time`
/// (case-insensitive). If every non-missing value parses with one of the
/// supported formats the column becomes a datetime column; a single
/// unparseable value leaves the whole column unchanged. The per-column skip
/// is an intentional fallback, logged at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseDates;

impl ParseDates {
    fn name_matches(name: &str) -> bool {
        let lower = name.to_lowercase();
        lower.contains("date") || lower.contains("time")
    }
}

/// Parse a single value with the supported datetime and date formats.
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

impl TransformStage for ParseDates {
    fn apply(&self, dataset: Dataset) -> Result<Dataset> {
        let mut columns = dataset.into_columns();
        for column in &mut columns {
            if !Self::name_matches(column.name()) || column.column_type() != ColumnType::Text {
                continue;
            }
            let mut parsed = Vec::with_capacity(column.len());
            let mut all_parse = true;
            for value in column.values() {
                match value {
                    CellValue::Missing => parsed.push(CellValue::Missing),
                    CellValue::Text(s) => match parse_datetime(s) {
                        Some(dt) => parsed.push(CellValue::DateTime(dt)),
                        None => {
                            all_parse = false;
                            break;
                        }
                    },
                    // Text columns only hold text and missing cells.
                    _ => {
                        all_parse = false;
                        break;
                    }
                }
            }
            if !all_parse {
                tracing::debug!(column = column.name(), "unparseable value, column left as-is");
                continue;
            }
            *column = Column::new(column.name().to_string(), ColumnType::DateTime, parsed)
                .map_err(stage_err(STAGE))?;
        }
        Ok(Dataset::from_columns(columns).map_err(stage_err(STAGE))?)
    }

    fn stage_name(&self) -> &'static str {
        STAGE
    }
}
