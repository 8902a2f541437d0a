//! Normalization of records for flat columnar stores.
//!
//! Relational destinations only take scalar column values. [`flatten_record`]
//! maps every field through [`flatten_value`] in a single pass over the
//! record, so the column list and the value list of a [`FlatRow`] are built
//! from the same (key, value) pair and cannot drift apart.

use crate::value::{Record, Value, ValueKind};
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Errors that can occur while flattening a record.
#[derive(Error, Debug)]
pub enum FlattenError {
    /// The value shape has no flat representation.
    #[error("Column '{column}' holds an array of arrays, which has no flat representation")]
    UnsupportedNesting {
        /// Offending column
        column: String,
    },

    /// Structured text has no representation for NaN or infinity.
    #[error("Column '{column}' holds a non-finite float inside a nested value")]
    NonFiniteFloat {
        /// Offending column
        column: String,
    },

    /// Structured-text serialization failed.
    #[error("Failed to serialize column '{column}': {source}")]
    Serialize {
        /// Offending column
        column: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A scalar value ready to be bound as a column parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Text(String),
    LocalDateTime(NaiveDateTime),
    ZonedDateTime(DateTime<Utc>),
    /// Structured-text serialization of an array or object
    Structured(String),
}

impl FlatValue {
    /// Kind of the value this flat value was produced from.
    pub fn source_kind(&self) -> &'static str {
        match self {
            Self::Null => ValueKind::Null.name(),
            Self::Bool(_) => ValueKind::Bool.name(),
            Self::Int(_) => ValueKind::Int.name(),
            Self::UInt(_) => ValueKind::UInt.name(),
            Self::Float32(_) => ValueKind::Float32.name(),
            Self::Float64(_) => ValueKind::Float64.name(),
            Self::Text(_) => ValueKind::Text.name(),
            Self::LocalDateTime(_) => ValueKind::LocalDateTime.name(),
            Self::ZonedDateTime(_) => ValueKind::ZonedDateTime.name(),
            Self::Structured(_) => "structured",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// A record normalized into aligned column and value lists.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    columns: Vec<String>,
    values: Vec<FlatValue>,
}

impl FlatRow {
    /// Column names in record order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values, positionally aligned with [`FlatRow::columns`].
    pub fn values(&self) -> &[FlatValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// (column, value) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Consume the row, returning only the values.
    pub fn into_values(self) -> Vec<FlatValue> {
        self.values
    }
}

/// Flatten a record: nested objects and arrays become structured text,
/// scalars pass through.
pub fn flatten_record(record: &Record) -> Result<FlatRow, FlattenError> {
    let mut columns = Vec::with_capacity(record.len());
    let mut values = Vec::with_capacity(record.len());

    for (column, value) in record {
        values.push(flatten_value(column, value)?);
        columns.push(column.clone());
    }

    Ok(FlatRow { columns, values })
}

/// Flatten one field value.
pub fn flatten_value(column: &str, value: &Value) -> Result<FlatValue, FlattenError> {
    let flat = match value {
        Value::Null => FlatValue::Null,
        Value::Bool(b) => FlatValue::Bool(*b),
        Value::Int(i) => FlatValue::Int(*i),
        Value::UInt(u) => FlatValue::UInt(*u),
        Value::Float32(f) => FlatValue::Float32(*f),
        Value::Float64(f) => FlatValue::Float64(*f),
        Value::Text(s) => FlatValue::Text(s.clone()),
        Value::LocalDateTime(dt) => FlatValue::LocalDateTime(*dt),
        Value::ZonedDateTime(dt) => FlatValue::ZonedDateTime(*dt),
        Value::Array(items) => {
            if items.iter().any(|item| matches!(item, Value::Array(_))) {
                return Err(FlattenError::UnsupportedNesting {
                    column: column.to_string(),
                });
            }
            FlatValue::Structured(to_structured_text(column, value)?)
        }
        Value::Object(_) => FlatValue::Structured(to_structured_text(column, value)?),
    };
    Ok(flat)
}

fn to_structured_text(column: &str, value: &Value) -> Result<String, FlattenError> {
    if has_non_finite(value) {
        return Err(FlattenError::NonFiniteFloat {
            column: column.to_string(),
        });
    }
    serde_json::to_string(value).map_err(|source| FlattenError::Serialize {
        column: column.to_string(),
        source,
    })
}

fn has_non_finite(value: &Value) -> bool {
    match value {
        Value::Float32(f) => !f.is_finite(),
        Value::Float64(f) => !f.is_finite(),
        Value::Array(items) => items.iter().any(has_non_finite),
        Value::Object(record) => record.iter().any(|(_, v)| has_non_finite(v)),
        _ => false,
    }
}
