//! Forward conversion: FlatValue → MySQLValue
//!
//! MySQL parameters are untyped on the client side; the server converts each
//! positional value to the column type and rejects what it cannot store.

use chrono::{Datelike, NaiveDateTime, Timelike};
use mysql_async::Value;
use seed_core::FlatValue;

/// MySQL value wrapper for type-safe conversions.
#[derive(Debug, Clone, PartialEq)]
pub struct MySQLValue(pub Value);

impl MySQLValue {
    /// Get the inner mysql_async::Value.
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Get a reference to the inner value.
    pub fn as_inner(&self) -> &Value {
        &self.0
    }
}

impl From<&FlatValue> for MySQLValue {
    fn from(value: &FlatValue) -> Self {
        match value {
            FlatValue::Null => MySQLValue(Value::NULL),

            // Boolean - MySQL uses TINYINT(1)
            FlatValue::Bool(b) => MySQLValue(Value::Int(i64::from(*b))),

            FlatValue::Int(i) => MySQLValue(Value::Int(*i)),
            FlatValue::UInt(u) => MySQLValue(Value::UInt(*u)),

            FlatValue::Float32(f) => MySQLValue(Value::Float(*f)),
            FlatValue::Float64(f) => MySQLValue(Value::Double(*f)),

            FlatValue::Text(s) | FlatValue::Structured(s) => {
                MySQLValue(Value::Bytes(s.as_bytes().to_vec()))
            }

            // DATETIME(6) / TIMESTAMP(6); the session time zone is not applied
            FlatValue::LocalDateTime(dt) => MySQLValue(date_value(dt)),
            FlatValue::ZonedDateTime(dt) => MySQLValue(date_value(&dt.naive_utc())),
        }
    }
}

/// Years MySQL's binary date format can carry.
const MAX_DATE_YEAR: u16 = 9999;

fn date_value(dt: &NaiveDateTime) -> Value {
    let year = match u16::try_from(dt.year()) {
        Ok(year) if year <= MAX_DATE_YEAR => year,
        // Sent as text so the server rejects it instead of storing another date
        _ => return Value::Bytes(dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string().into_bytes()),
    };
    Value::Date(
        year,
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        // MySQL uses microseconds; a leap second carries nanoseconds past 1e9
        (dt.nanosecond() / 1000).min(999_999),
    )
}
