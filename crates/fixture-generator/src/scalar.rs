//! The scalar fixture: one record covering the value-kind matrix.

use chrono::{Local, Utc};
use seed_core::{Record, Value};
use uuid::Uuid;

/// Length of the synthetic embedding vector.
pub const VECTOR_DIMENSIONS: usize = 2048;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor \
     incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
     exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute \
     irure dolor";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Build a record holding one instance of each supported value kind.
///
/// The 32-bit fields sit on the `i32` boundaries because a relational
/// `INTEGER` column is 32 bits wide. Values beyond 64 bits are left out:
/// document stores cap integers at 8 bytes.
pub fn build_scalar_fixture() -> Record {
    Record::new()
        .with("id", Uuid::new_v4().to_string())
        .with("txt", LOREM)
        .with("ip", "127.198.0.1")
        .with("i16", Value::Int(i16::MIN as i64))
        .with("u16", Value::UInt(i16::MAX as u64))
        .with("i32", Value::Int(i32::MIN as i64))
        .with("u32", Value::UInt(i32::MAX as u64))
        .with("i32_from_text", i32::MIN.to_string())
        .with("f32", Value::Float32(-0.214_748_12))
        .with("f64", Value::Float64(0.184_467_440_737_095_5))
        .with("bool", true)
        .with("null_", Value::Null)
        .with("datetime", Value::LocalDateTime(Local::now().naive_local()))
        .with("datetime_2", Value::ZonedDateTime(Utc::now()))
        .with(
            "obj",
            Record::new()
                .with("one", "two")
                .with("three", 4)
                .with("five", vec![Value::Int(6)])
                .with("seven", Record::new().with("eight", 9)),
        )
        .with("empty_array", Value::Array(vec![]))
        .with("vector_float_simple", vec![Value::Float64(0.1)])
        .with(
            "vector_float",
            vec![Value::Float64(0.234_234_23); VECTOR_DIMENSIONS],
        )
        .with("array_i32", vec![Value::Int(-123_456), Value::Int(-654_321)])
        .with("array_u32", vec![Value::UInt(123_456), Value::UInt(654_321)])
        .with(
            "array_text",
            MONTHS.iter().map(|m| Value::from(*m)).collect::<Vec<_>>(),
        )
}
