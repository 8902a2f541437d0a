//! Column type inference for relational destinations.
//!
//! The loaders can create their destination table from the records they are
//! about to insert. Types come from the first non-null value seen for each
//! column and are never widened afterwards: a record that later puts a
//! different kind into the same column is left for the store to reject.

use crate::value::{Record, Value};
use indexmap::IndexMap;

/// Store-neutral column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Bool,
    SmallInt,
    Int,
    BigInt,
    Real,
    Double,
    Text,
    Timestamp,
    TimestampTz,
    /// Structured text holding a serialized array or object
    Structured,
}

/// A named, nullable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Infer the column type for a single non-null value.
///
/// Returns `None` for null, which carries no type information.
pub fn column_type_for(value: &Value) -> Option<ColumnType> {
    let column_type = match value {
        Value::Null => return None,
        Value::Bool(_) => ColumnType::Bool,
        Value::Int(i) => integer_type(*i),
        Value::UInt(u) => match i64::try_from(*u) {
            Ok(i) => integer_type(i),
            // No signed column can hold it; keep the digits
            Err(_) => ColumnType::Text,
        },
        Value::Float32(_) => ColumnType::Real,
        Value::Float64(_) => ColumnType::Double,
        Value::Text(_) => ColumnType::Text,
        Value::LocalDateTime(_) => ColumnType::Timestamp,
        Value::ZonedDateTime(_) => ColumnType::TimestampTz,
        Value::Array(_) | Value::Object(_) => ColumnType::Structured,
    };
    Some(column_type)
}

fn integer_type(i: i64) -> ColumnType {
    if i16::try_from(i).is_ok() {
        ColumnType::SmallInt
    } else if i32::try_from(i).is_ok() {
        ColumnType::Int
    } else {
        ColumnType::BigInt
    }
}

/// Infer columns across records, in order of first appearance.
///
/// Columns that are null everywhere default to [`ColumnType::Text`].
pub fn infer_columns(records: &[Record]) -> Vec<ColumnSpec> {
    let mut columns: IndexMap<&str, Option<ColumnType>> = IndexMap::new();

    for record in records {
        for (name, value) in record {
            let slot = columns.entry(name.as_str()).or_insert(None);
            if slot.is_none() {
                *slot = column_type_for(value);
            }
        }
    }

    columns
        .into_iter()
        .map(|(name, column_type)| {
            ColumnSpec::new(name, column_type.unwrap_or(ColumnType::Text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths() {
        assert_eq!(column_type_for(&Value::Int(-32768)), Some(ColumnType::SmallInt));
        assert_eq!(column_type_for(&Value::Int(-32769)), Some(ColumnType::Int));
        assert_eq!(
            column_type_for(&Value::Int(i32::MIN as i64)),
            Some(ColumnType::Int)
        );
        assert_eq!(
            column_type_for(&Value::Int(i32::MAX as i64 + 1)),
            Some(ColumnType::BigInt)
        );
        assert_eq!(column_type_for(&Value::UInt(u64::MAX)), Some(ColumnType::Text));
        assert_eq!(column_type_for(&Value::Null), None);
    }

    #[test]
    fn test_first_non_null_type_wins() {
        let records = vec![
            Record::new().with("id", 1).with("name", Value::Null),
            Record::new().with("id", 2).with("name", "two").with("extra", true),
            Record::new().with("id", 3).with("name", Record::new().with("k", 1)),
        ];

        let columns = infer_columns(&records);
        assert_eq!(
            columns,
            vec![
                ColumnSpec::new("id", ColumnType::SmallInt),
                ColumnSpec::new("name", ColumnType::Text),
                ColumnSpec::new("extra", ColumnType::Bool),
            ]
        );
    }

    #[test]
    fn test_all_null_column_defaults_to_text() {
        let records = vec![Record::new().with("null_", Value::Null)];
        assert_eq!(
            infer_columns(&records),
            vec![ColumnSpec::new("null_", ColumnType::Text)]
        );
    }

    #[test]
    fn test_nested_values_are_structured() {
        let records = vec![Record::new()
            .with("obj", Record::new())
            .with("list", Value::Array(vec![]))];

        let columns = infer_columns(&records);
        assert!(columns
            .iter()
            .all(|c| c.column_type == ColumnType::Structured));
    }
}
