//! Forward conversion: FlatValue → PostgreSQL parameter.
//!
//! tokio-postgres checks every parameter against the type the server declared
//! for its placeholder, so values are converted with the target [`Type`] in
//! hand. Nulls are typed per column for the same reason.
//!
//! Beyond exact matches, two relaxations apply:
//!
//! - text bound to a numeric, boolean, uuid, inet or timestamp column is
//!   parsed client side (implicit coercion);
//! - any value bound to a `json`/`jsonb` column becomes a JSON value, with
//!   structured text parsed back into its document (variant storage).
//!
//! Every other combination is a [`BindError::TypeMismatch`].

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use seed_core::FlatValue;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;
use tokio_postgres::types::{ToSql, Type};
use uuid::Uuid;

/// Errors raised while binding a value to a PostgreSQL parameter.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("Column '{column}': cannot bind a {kind} value to a {pg_type} column")]
    TypeMismatch {
        column: String,
        kind: &'static str,
        pg_type: String,
    },

    #[error("Column '{column}': value {value} is out of range for {pg_type}")]
    OutOfRange {
        column: String,
        value: String,
        pg_type: String,
    },

    #[error("Column '{column}': cannot parse '{value}' as {pg_type}")]
    Parse {
        column: String,
        value: String,
        pg_type: String,
    },

    #[error("Column '{column}': invalid structured text: {source}")]
    InvalidJson {
        column: String,
        #[source]
        source: serde_json::Error,
    },
}

/// PostgreSQL parameter value. `None` is a null of the column's type.
#[derive(Debug, Clone, PartialEq)]
pub enum PostgreSQLValue {
    Bool(Option<bool>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Text(Option<String>),
    Uuid(Option<Uuid>),
    Inet(Option<IpAddr>),
    Timestamp(Option<NaiveDateTime>),
    TimestampTz(Option<DateTime<Utc>>),
    Json(Option<serde_json::Value>),
}

impl PostgreSQLValue {
    /// Box the value for use in a parameter slice.
    pub fn into_boxed(self) -> Box<dyn ToSql + Sync + Send> {
        match self {
            Self::Bool(v) => Box::new(v),
            Self::Int16(v) => Box::new(v),
            Self::Int32(v) => Box::new(v),
            Self::Int64(v) => Box::new(v),
            Self::Float32(v) => Box::new(v),
            Self::Float64(v) => Box::new(v),
            Self::Decimal(v) => Box::new(v),
            Self::Text(v) => Box::new(v),
            Self::Uuid(v) => Box::new(v),
            Self::Inet(v) => Box::new(v),
            Self::Timestamp(v) => Box::new(v),
            Self::TimestampTz(v) => Box::new(v),
            Self::Json(v) => Box::new(v),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Self::Bool(v) => v.is_none(),
            Self::Int16(v) => v.is_none(),
            Self::Int32(v) => v.is_none(),
            Self::Int64(v) => v.is_none(),
            Self::Float32(v) => v.is_none(),
            Self::Float64(v) => v.is_none(),
            Self::Decimal(v) => v.is_none(),
            Self::Text(v) => v.is_none(),
            Self::Uuid(v) => v.is_none(),
            Self::Inet(v) => v.is_none(),
            Self::Timestamp(v) => v.is_none(),
            Self::TimestampTz(v) => v.is_none(),
            Self::Json(v) => v.is_none(),
        }
    }
}

/// Convert `value` for a parameter whose declared type is `target`.
pub fn bind_value(
    column: &str,
    value: &FlatValue,
    target: &Type,
) -> Result<PostgreSQLValue, BindError> {
    let binder = Binder { column, target };

    match target {
        t if *t == Type::BOOL => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Bool(None)),
            FlatValue::Bool(b) => Ok(PostgreSQLValue::Bool(Some(*b))),
            FlatValue::Text(s) => parse_bool(s)
                .map(|b| PostgreSQLValue::Bool(Some(b)))
                .ok_or_else(|| binder.parse_error(s)),
            other => Err(binder.mismatch(other)),
        },

        t if *t == Type::INT2 => binder
            .integer(value)?
            .map(|i| i16::try_from(i).map_err(|_| binder.out_of_range(i)))
            .transpose()
            .map(PostgreSQLValue::Int16),
        t if *t == Type::INT4 => binder
            .integer(value)?
            .map(|i| i32::try_from(i).map_err(|_| binder.out_of_range(i)))
            .transpose()
            .map(PostgreSQLValue::Int32),
        t if *t == Type::INT8 => binder
            .integer(value)?
            .map(|i| i64::try_from(i).map_err(|_| binder.out_of_range(i)))
            .transpose()
            .map(PostgreSQLValue::Int64),

        t if *t == Type::FLOAT4 => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Float32(None)),
            FlatValue::Float32(f) => Ok(PostgreSQLValue::Float32(Some(*f))),
            FlatValue::Float64(f) => Ok(PostgreSQLValue::Float32(Some(*f as f32))),
            FlatValue::Int(i) => Ok(PostgreSQLValue::Float32(Some(*i as f32))),
            FlatValue::UInt(u) => Ok(PostgreSQLValue::Float32(Some(*u as f32))),
            FlatValue::Text(s) => binder.parse(s).map(|f| PostgreSQLValue::Float32(Some(f))),
            other => Err(binder.mismatch(other)),
        },
        t if *t == Type::FLOAT8 => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Float64(None)),
            FlatValue::Float32(f) => Ok(PostgreSQLValue::Float64(Some(f64::from(*f)))),
            FlatValue::Float64(f) => Ok(PostgreSQLValue::Float64(Some(*f))),
            FlatValue::Int(i) => Ok(PostgreSQLValue::Float64(Some(*i as f64))),
            FlatValue::UInt(u) => Ok(PostgreSQLValue::Float64(Some(*u as f64))),
            FlatValue::Text(s) => binder.parse(s).map(|f| PostgreSQLValue::Float64(Some(f))),
            other => Err(binder.mismatch(other)),
        },

        t if *t == Type::NUMERIC => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Decimal(None)),
            FlatValue::Int(i) => Ok(PostgreSQLValue::Decimal(Some(Decimal::from(*i)))),
            FlatValue::UInt(u) => Ok(PostgreSQLValue::Decimal(Some(Decimal::from(*u)))),
            FlatValue::Float32(f) => Decimal::try_from(*f)
                .map(|d| PostgreSQLValue::Decimal(Some(d)))
                .map_err(|_| binder.out_of_range(f)),
            FlatValue::Float64(f) => Decimal::try_from(*f)
                .map(|d| PostgreSQLValue::Decimal(Some(d)))
                .map_err(|_| binder.out_of_range(f)),
            FlatValue::Text(s) => binder.parse(s).map(|d| PostgreSQLValue::Decimal(Some(d))),
            other => Err(binder.mismatch(other)),
        },

        t if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(t) => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Text(None)),
            FlatValue::Text(s) | FlatValue::Structured(s) => {
                Ok(PostgreSQLValue::Text(Some(s.clone())))
            }
            other => Err(binder.mismatch(other)),
        },

        t if *t == Type::UUID => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Uuid(None)),
            FlatValue::Text(s) => binder.parse(s).map(|u| PostgreSQLValue::Uuid(Some(u))),
            other => Err(binder.mismatch(other)),
        },

        t if *t == Type::INET => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Inet(None)),
            FlatValue::Text(s) => binder.parse(s).map(|ip| PostgreSQLValue::Inet(Some(ip))),
            other => Err(binder.mismatch(other)),
        },

        t if *t == Type::TIMESTAMP => match value {
            FlatValue::Null => Ok(PostgreSQLValue::Timestamp(None)),
            FlatValue::LocalDateTime(dt) => Ok(PostgreSQLValue::Timestamp(Some(*dt))),
            FlatValue::ZonedDateTime(dt) => Ok(PostgreSQLValue::Timestamp(Some(dt.naive_utc()))),
            FlatValue::Text(s) => parse_naive_datetime(s)
                .map(|dt| PostgreSQLValue::Timestamp(Some(dt)))
                .ok_or_else(|| binder.parse_error(s)),
            other => Err(binder.mismatch(other)),
        },
        t if *t == Type::TIMESTAMPTZ => match value {
            FlatValue::Null => Ok(PostgreSQLValue::TimestampTz(None)),
            FlatValue::ZonedDateTime(dt) => Ok(PostgreSQLValue::TimestampTz(Some(*dt))),
            FlatValue::LocalDateTime(dt) => Ok(PostgreSQLValue::TimestampTz(Some(dt.and_utc()))),
            FlatValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| PostgreSQLValue::TimestampTz(Some(dt.with_timezone(&Utc))))
                .map_err(|_| binder.parse_error(s)),
            other => Err(binder.mismatch(other)),
        },

        t if *t == Type::JSON || *t == Type::JSONB => binder.json(value).map(PostgreSQLValue::Json),

        _ => Err(binder.mismatch(value)),
    }
}

struct Binder<'a> {
    column: &'a str,
    target: &'a Type,
}

impl Binder<'_> {
    fn mismatch(&self, value: &FlatValue) -> BindError {
        BindError::TypeMismatch {
            column: self.column.to_string(),
            kind: value.source_kind(),
            pg_type: self.target.name().to_string(),
        }
    }

    fn out_of_range(&self, value: impl ToString) -> BindError {
        BindError::OutOfRange {
            column: self.column.to_string(),
            value: value.to_string(),
            pg_type: self.target.name().to_string(),
        }
    }

    fn parse_error(&self, value: &str) -> BindError {
        BindError::Parse {
            column: self.column.to_string(),
            value: value.to_string(),
            pg_type: self.target.name().to_string(),
        }
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, BindError> {
        value.trim().parse().map_err(|_| self.parse_error(value))
    }

    /// Widen an integer-shaped value to i128 so each column width can range
    /// check it once.
    fn integer(&self, value: &FlatValue) -> Result<Option<i128>, BindError> {
        match value {
            FlatValue::Null => Ok(None),
            FlatValue::Int(i) => Ok(Some(i128::from(*i))),
            FlatValue::UInt(u) => Ok(Some(i128::from(*u))),
            FlatValue::Text(s) => self.parse(s).map(Some),
            other => Err(self.mismatch(other)),
        }
    }

    fn json(&self, value: &FlatValue) -> Result<Option<serde_json::Value>, BindError> {
        let json = match value {
            FlatValue::Null => return Ok(None),
            FlatValue::Bool(b) => serde_json::Value::Bool(*b),
            FlatValue::Int(i) => serde_json::Value::from(*i),
            FlatValue::UInt(u) => serde_json::Value::from(*u),
            FlatValue::Float32(f) => serde_json::Number::from_f64(f64::from(*f))
                .map(serde_json::Value::Number)
                .ok_or_else(|| self.out_of_range(f))?,
            FlatValue::Float64(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| self.out_of_range(f))?,
            FlatValue::Text(s) => serde_json::Value::String(s.clone()),
            FlatValue::LocalDateTime(dt) => {
                serde_json::Value::String(dt.format(seed_core::LOCAL_DATETIME_FORMAT).to_string())
            }
            FlatValue::ZonedDateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            FlatValue::Structured(s) => {
                serde_json::from_str(s).map_err(|source| BindError::InvalidJson {
                    column: self.column.to_string(),
                    source,
                })?
            }
        };
        Ok(Some(json))
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn bind(value: FlatValue, target: Type) -> Result<PostgreSQLValue, BindError> {
        bind_value("col", &value, &target)
    }

    #[test]
    fn test_exact_matches() {
        assert_eq!(
            bind(FlatValue::Bool(true), Type::BOOL).unwrap(),
            PostgreSQLValue::Bool(Some(true))
        );
        assert_eq!(
            bind(FlatValue::Int(-32768), Type::INT2).unwrap(),
            PostgreSQLValue::Int16(Some(i16::MIN))
        );
        assert_eq!(
            bind(FlatValue::Int(i32::MIN as i64), Type::INT4).unwrap(),
            PostgreSQLValue::Int32(Some(i32::MIN))
        );
        assert_eq!(
            bind(FlatValue::Float64(0.5), Type::FLOAT8).unwrap(),
            PostgreSQLValue::Float64(Some(0.5))
        );
        assert_eq!(
            bind(FlatValue::Text("x".into()), Type::TEXT).unwrap(),
            PostgreSQLValue::Text(Some("x".into()))
        );
    }

    #[test]
    fn test_unsigned_fits_signed_column() {
        assert_eq!(
            bind(FlatValue::UInt(i32::MAX as u64), Type::INT4).unwrap(),
            PostgreSQLValue::Int32(Some(i32::MAX))
        );
        assert_eq!(
            bind(FlatValue::UInt(i16::MAX as u64), Type::INT2).unwrap(),
            PostgreSQLValue::Int16(Some(i16::MAX))
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = bind(FlatValue::UInt(u32::MAX as u64), Type::INT4).unwrap_err();
        assert!(matches!(err, BindError::OutOfRange { .. }));
        let err = bind(FlatValue::UInt(u64::MAX), Type::INT8).unwrap_err();
        assert!(matches!(err, BindError::OutOfRange { .. }));
    }

    #[test]
    fn test_text_coerced_into_integer() {
        assert_eq!(
            bind(FlatValue::Text("-2147483648".into()), Type::INT4).unwrap(),
            PostgreSQLValue::Int32(Some(i32::MIN))
        );
        let err = bind(FlatValue::Text("abc".into()), Type::INT4).unwrap_err();
        assert!(matches!(err, BindError::Parse { .. }));
    }

    #[test]
    fn test_text_coerced_into_uuid_and_inet() {
        let id = Uuid::new_v4();
        assert_eq!(
            bind(FlatValue::Text(id.to_string()), Type::UUID).unwrap(),
            PostgreSQLValue::Uuid(Some(id))
        );
        assert_eq!(
            bind(FlatValue::Text("192.168.1.1".into()), Type::INET).unwrap(),
            PostgreSQLValue::Inet(Some("192.168.1.1".parse().unwrap()))
        );
    }

    #[test]
    fn test_structured_into_jsonb() {
        let value = FlatValue::Structured(r#"{"key":"six"}"#.into());
        assert_eq!(
            bind(value, Type::JSONB).unwrap(),
            PostgreSQLValue::Json(Some(serde_json::json!({"key": "six"})))
        );
    }

    #[test]
    fn test_scalars_into_jsonb_are_variant() {
        assert_eq!(
            bind(FlatValue::Text("one".into()), Type::JSONB).unwrap(),
            PostgreSQLValue::Json(Some(serde_json::json!("one")))
        );
        assert_eq!(
            bind(FlatValue::Int(3), Type::JSON).unwrap(),
            PostgreSQLValue::Json(Some(serde_json::json!(3)))
        );
    }

    #[test]
    fn test_structured_into_text() {
        let value = FlatValue::Structured("[1,2]".into());
        assert_eq!(
            bind(value, Type::TEXT).unwrap(),
            PostgreSQLValue::Text(Some("[1,2]".into()))
        );
    }

    #[test]
    fn test_mismatch_names_column_and_kind() {
        let err = bind(FlatValue::Structured("{}".into()), Type::INT4).unwrap_err();
        match err {
            BindError::TypeMismatch {
                column,
                kind,
                pg_type,
            } => {
                assert_eq!(column, "col");
                assert_eq!(kind, "structured");
                assert_eq!(pg_type, "int4");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            bind(FlatValue::Int(3), Type::TEXT),
            Err(BindError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_typed_nulls() {
        assert_eq!(bind(FlatValue::Null, Type::INT4).unwrap(), PostgreSQLValue::Int32(None));
        assert_eq!(bind(FlatValue::Null, Type::JSONB).unwrap(), PostgreSQLValue::Json(None));
        assert!(bind(FlatValue::Null, Type::TEXT).unwrap().is_null());
    }

    #[test]
    fn test_timestamps() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(
            bind(FlatValue::LocalDateTime(naive), Type::TIMESTAMP).unwrap(),
            PostgreSQLValue::Timestamp(Some(naive))
        );
        assert_eq!(
            bind(FlatValue::Text("2024-05-06 07:08:09".into()), Type::TIMESTAMP).unwrap(),
            PostgreSQLValue::Timestamp(Some(naive))
        );
        let zoned = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(
            bind(FlatValue::ZonedDateTime(zoned), Type::TIMESTAMPTZ).unwrap(),
            PostgreSQLValue::TimestampTz(Some(zoned))
        );
    }

    #[test]
    fn test_numeric() {
        assert_eq!(
            bind(FlatValue::Text("12.50".into()), Type::NUMERIC).unwrap(),
            PostgreSQLValue::Decimal(Some(Decimal::new(1250, 2)))
        );
    }
}
