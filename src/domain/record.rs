// ============================================================
// REFERENCE RECORD
// ============================================================
// Schema-free row as returned by the reference gateway. Columns
// are kept verbatim so consumers can read members the catalog
// defines without this crate enumerating them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::{ImportError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builder-style insert, mainly for assembling records in code.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// True when the member exists and is not SQL NULL.
    pub fn has(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(value) if !value.is_null())
    }

    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Reads a member that must be present and textual.
    pub fn str_field(&self, name: &str) -> Result<&str> {
        match self.fields.get(name) {
            Some(Value::String(text)) => Ok(text),
            Some(_) => Err(ImportError::DataIntegrity(format!(
                "Reference record member '{}' is not text",
                name
            ))),
            None => Err(ImportError::DataIntegrity(format!(
                "Reference record is missing member '{}'",
                name
            ))),
        }
    }

    /// Reads a member that must be present and integral. Textual
    /// digits are accepted since some drivers surface ids as text.
    pub fn int_field(&self, name: &str) -> Result<i64> {
        match self.fields.get(name) {
            Some(Value::Number(number)) => number.as_i64().ok_or_else(|| {
                ImportError::DataIntegrity(format!(
                    "Reference record member '{}' is not an integer",
                    name
                ))
            }),
            Some(Value::String(text)) => text.parse::<i64>().map_err(|_| {
                ImportError::DataIntegrity(format!(
                    "Reference record member '{}' is not an integer",
                    name
                ))
            }),
            Some(_) => Err(ImportError::DataIntegrity(format!(
                "Reference record member '{}' is not an integer",
                name
            ))),
            None => Err(ImportError::DataIntegrity(format!(
                "Reference record is missing member '{}'",
                name
            ))),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
