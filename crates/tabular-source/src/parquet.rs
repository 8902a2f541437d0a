//! Parquet files, read with the row-oriented record API.

use crate::error::TabularError;
use ::parquet::file::reader::{FileReader, SerializedFileReader};
use ::parquet::record::reader::RowIter;
use ::parquet::record::{Field, Row};
use chrono::{DateTime, Utc};
use seed_core::{Record, Value};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Open a Parquet file and iterate its rows.
pub fn parquet_rows(
    path: &Path,
) -> Result<impl Iterator<Item = Result<Record, TabularError>>, TabularError> {
    let file = File::open(path).map_err(|source| TabularError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = SerializedFileReader::new(file).map_err(|source| TabularError::Parquet {
        path: path.to_path_buf(),
        source,
    })?;
    let reader: Box<dyn FileReader> = Box::new(reader);

    let path: PathBuf = path.to_path_buf();
    Ok(RowIter::from_file_into(reader).map(move |row| {
        row.map(|row| row_to_record(&row))
            .map_err(|source| TabularError::Parquet {
                path: path.clone(),
                source,
            })
    }))
}

/// Convert a Parquet row, keeping schema column order.
pub fn row_to_record(row: &Row) -> Record {
    row.get_column_iter()
        .map(|(name, field)| (name.clone(), field_to_value(field)))
        .collect()
}

/// Convert one Parquet field.
///
/// Timestamps are UTC; logical types without a counterpart in the value model
/// (decimals, dates, times, binary, maps) are rendered as text.
pub fn field_to_value(field: &Field) -> Value {
    match field {
        Field::Null => Value::Null,
        Field::Bool(b) => Value::Bool(*b),
        Field::Byte(i) => Value::Int(i64::from(*i)),
        Field::Short(i) => Value::Int(i64::from(*i)),
        Field::Int(i) => Value::Int(i64::from(*i)),
        Field::Long(i) => Value::Int(*i),
        Field::UByte(u) => Value::UInt(u64::from(*u)),
        Field::UShort(u) => Value::UInt(u64::from(*u)),
        Field::UInt(u) => Value::UInt(u64::from(*u)),
        Field::ULong(u) => Value::UInt(*u),
        Field::Float(f) => Value::Float32(*f),
        Field::Double(f) => Value::Float64(*f),
        Field::Str(s) => Value::Text(s.clone()),
        Field::TimestampMillis(ms) => timestamp(DateTime::from_timestamp_millis(*ms), field),
        Field::TimestampMicros(us) => timestamp(DateTime::from_timestamp_micros(*us), field),
        Field::Group(row) => Value::Object(row_to_record(row)),
        Field::ListInternal(list) => Value::Array(list.elements().iter().map(field_to_value).collect()),
        other => Value::Text(other.to_string()),
    }
}

fn timestamp(dt: Option<DateTime<Utc>>, field: &Field) -> Value {
    match dt {
        Some(dt) => Value::ZonedDateTime(dt),
        None => Value::Text(field.to_string()),
    }
}
