//! Forward conversion: Record → BSON document.

use bson::{Bson, DateTime as BsonDateTime, Document};
use seed_core::{Record, Value};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BsonConversionError {
    /// BSON has no unsigned 64-bit integer.
    #[error("Field '{field}' holds unsigned value {value}, which exceeds the BSON Int64 range")]
    UnsignedOutOfRange { field: String, value: u64 },
}

/// Convert a record into a BSON document, keeping field order and shape.
pub fn record_to_document(record: &Record) -> Result<Document, BsonConversionError> {
    let mut doc = Document::new();
    for (field, value) in record {
        doc.insert(field.clone(), value_to_bson(field, value)?);
    }
    Ok(doc)
}

/// Convert one value. `field` names the top-level field in errors.
pub fn value_to_bson(field: &str, value: &Value) -> Result<Bson, BsonConversionError> {
    let bson = match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),

        // MongoDB uses Int32 where the value fits
        Value::Int(i) => match i32::try_from(*i) {
            Ok(small) => Bson::Int32(small),
            Err(_) => Bson::Int64(*i),
        },
        Value::UInt(u) => {
            let signed = i64::try_from(*u).map_err(|_| BsonConversionError::UnsignedOutOfRange {
                field: field.to_string(),
                value: *u,
            })?;
            match i32::try_from(signed) {
                Ok(small) => Bson::Int32(small),
                Err(_) => Bson::Int64(signed),
            }
        }

        Value::Float32(f) => Bson::Double(f64::from(*f)),
        Value::Float64(f) => Bson::Double(*f),
        Value::Text(s) => Bson::String(s.clone()),

        // BSON DateTime is UTC with millisecond precision
        Value::LocalDateTime(dt) => Bson::DateTime(BsonDateTime::from_chrono(dt.and_utc())),
        Value::ZonedDateTime(dt) => Bson::DateTime(BsonDateTime::from_chrono(*dt)),

        Value::Array(elements) => Bson::Array(
            elements
                .iter()
                .map(|element| value_to_bson(field, element))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(record) => Bson::Document(record_to_document(record)?),
    };
    Ok(bson)
}
