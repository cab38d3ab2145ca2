// ============================================================
// ROW CONVERSION
// ============================================================
// Converts driver rows into schema-free `Record`s, keeping the
// storage class of every column.

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;

pub fn record_from_row(row: &SqliteRow) -> Result<Record> {
    let mut record = Record::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.name())?;
        record.insert(column.name(), value);
    }
    Ok(record)
}

fn decode_column(row: &SqliteRow, ordinal: usize, name: &str) -> Result<Value> {
    let raw = row
        .try_get_raw(ordinal)
        .map_err(|e| ImportError::DataAccess(format!("Failed to read column '{name}': {e}")))?;

    if raw.is_null() {
        return Ok(Value::Null);
    }

    let type_info = raw.type_info();
    let type_name = type_info.name();

    match type_name {
        "INTEGER" | "BOOLEAN" => {
            let value: i64 = row.try_get(ordinal).map_err(|e| {
                ImportError::DataAccess(format!("Failed to decode column '{name}': {e}"))
            })?;
            Ok(Value::from(value))
        }
        "REAL" | "NUMERIC" => {
            let value: f64 = row.try_get(ordinal).map_err(|e| {
                ImportError::DataAccess(format!("Failed to decode column '{name}': {e}"))
            })?;
            Ok(serde_json::Number::from_f64(value)
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        "BLOB" => {
            let value: Vec<u8> = row.try_get(ordinal).map_err(|e| {
                ImportError::DataAccess(format!("Failed to decode column '{name}': {e}"))
            })?;
            Ok(Value::from(String::from_utf8_lossy(&value).into_owned()))
        }
        _ => {
            let value: String = row.try_get(ordinal).map_err(|e| {
                ImportError::DataAccess(format!("Failed to decode column '{name}': {e}"))
            })?;
            Ok(Value::from(value))
        }
    }
}
