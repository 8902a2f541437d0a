//! Schema drift: inspecting and resolving a field whose kind varies
//! across records.
//!
//! The drift fixture set deliberately stores different shapes under the same
//! field name. Variant-capable stores keep that heterogeneity as-is; for
//! fixed-type stores a [`DriftSchema`] states the expected kind per field and
//! a [`CollisionStrategy`] for values that do not match it.
//!
//! # YAML Format
//!
//! ```yaml
//! name:
//!   kind: text
//!   strategy: new_column
//! sub_id:
//!   kind: int
//!   strategy: cast
//! ```

use crate::value::{Record, Value, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a drift schema.
#[derive(Error, Debug)]
pub enum DriftSchemaError {
    #[error("Failed to read drift schema {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse drift schema: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors raised while applying a drift schema to records.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DriftResolveError {
    #[error("Cannot move field '{field}' to column '{column}': the record already has that field")]
    ColumnClash { field: String, column: String },
}

/// What to do with a value whose kind differs from the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionStrategy {
    /// Move the value to a sibling column named `<field>_<kind>`
    NewColumn,
    /// Convert the value when a conversion exists, else keep it
    Cast,
    /// Drop the value
    Remove,
    /// Keep the value unchanged
    Ignore,
}

/// Expected kind and collision strategy for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldExpectation {
    pub kind: ValueKind,
    pub strategy: CollisionStrategy,
}

/// Per-field expectations, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriftSchema {
    fields: IndexMap<String, FieldExpectation>,
}

impl DriftSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expectation, builder style.
    pub fn expect(
        mut self,
        field: impl Into<String>,
        kind: ValueKind,
        strategy: CollisionStrategy,
    ) -> Self {
        self.fields
            .insert(field.into(), FieldExpectation { kind, strategy });
        self
    }

    /// Parse a drift schema from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, DriftSchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a drift schema from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, DriftSchemaError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| DriftSchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn get(&self, field: &str) -> Option<&FieldExpectation> {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Kind of `field` in each record, `None` where the field is absent.
pub fn field_kinds(records: &[Record], field: &str) -> Vec<Option<ValueKind>> {
    records
        .iter()
        .map(|record| record.get(field).map(Value::kind))
        .collect()
}

/// Whether `field` holds more than one distinct kind across the records.
/// Absent fields do not count as a kind.
pub fn is_heterogeneous(records: &[Record], field: &str) -> bool {
    let kinds: HashSet<ValueKind> = field_kinds(records, field).into_iter().flatten().collect();
    kinds.len() > 1
}

/// Rewrite each record according to the schema's collision strategies.
///
/// Null and absent values never collide. Field order is preserved: a value
/// moved by [`CollisionStrategy::NewColumn`] keeps its position under the new
/// name. Fails when that new name is already a field of the record.
pub fn resolve_drift(
    records: &[Record],
    schema: &DriftSchema,
) -> Result<Vec<Record>, DriftResolveError> {
    records
        .iter()
        .map(|record| resolve_record(record, schema))
        .collect()
}

fn resolve_record(record: &Record, schema: &DriftSchema) -> Result<Record, DriftResolveError> {
    let mut resolved = Record::new();

    for (field, value) in record {
        let expectation = match schema.get(field) {
            Some(expectation) if !value.is_null() && value.kind() != expectation.kind => {
                expectation
            }
            _ => {
                resolved.insert(field.clone(), value.clone());
                continue;
            }
        };

        match expectation.strategy {
            CollisionStrategy::NewColumn => {
                let column = format!("{field}_{}", value.kind());
                if record.contains_key(&column) {
                    return Err(DriftResolveError::ColumnClash {
                        field: field.clone(),
                        column,
                    });
                }
                resolved.insert(column, value.clone());
            }
            CollisionStrategy::Cast => {
                let cast = cast_value(value, expectation.kind).unwrap_or_else(|| value.clone());
                resolved.insert(field.clone(), cast);
            }
            CollisionStrategy::Remove => {}
            CollisionStrategy::Ignore => {
                resolved.insert(field.clone(), value.clone());
            }
        }
    }

    Ok(resolved)
}

/// Convert a value to the given kind, when a conversion exists.
pub fn cast_value(value: &Value, to: ValueKind) -> Option<Value> {
    match (to, value) {
        (ValueKind::Text, Value::Array(items)) => {
            let parts: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            parts.map(|parts| Value::Text(parts.join(" ")))
        }
        (ValueKind::Text, Value::Int(i)) => Some(Value::Text(i.to_string())),
        (ValueKind::Text, Value::UInt(u)) => Some(Value::Text(u.to_string())),
        (ValueKind::Text, Value::Float32(f)) => Some(Value::Text(f.to_string())),
        (ValueKind::Text, Value::Float64(f)) => Some(Value::Text(f.to_string())),
        (ValueKind::Text, Value::Bool(b)) => Some(Value::Text(b.to_string())),

        (ValueKind::Int, Value::Text(s)) => s.trim().parse().ok().map(Value::Int),
        (ValueKind::Int, Value::UInt(u)) => i64::try_from(*u).ok().map(Value::Int),

        (ValueKind::UInt, Value::Text(s)) => s.trim().parse().ok().map(Value::UInt),
        (ValueKind::UInt, Value::Int(i)) => u64::try_from(*i).ok().map(Value::UInt),

        (ValueKind::Float64, Value::Text(s)) => s.trim().parse().ok().map(Value::Float64),
        (ValueKind::Float64, Value::Int(i)) => Some(Value::Float64(*i as f64)),
        (ValueKind::Float64, Value::UInt(u)) => Some(Value::Float64(*u as f64)),
        (ValueKind::Float64, Value::Float32(f)) => Some(Value::Float64(*f as f64)),

        (ValueKind::Float32, Value::Text(s)) => s.trim().parse().ok().map(Value::Float32),

        (ValueKind::Bool, Value::Text(s)) => match s.to_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drifting() -> Vec<Record> {
        vec![
            Record::new().with("id", 1).with("name", "one").with("sub_id", 1),
            Record::new().with("id", 2).with("sub_id", 2),
            Record::new().with("id", 3).with("name", 3).with("sub_id", 3),
            Record::new()
                .with("id", 4)
                .with("name", vec![Value::from("four"), Value::from("cuatro")])
                .with("sub_id", 4),
            Record::new()
                .with("id", 6)
                .with("name", Record::new().with("key", "six"))
                .with("sub_id", "6"),
        ]
    }

    #[test]
    fn test_field_kinds_marks_absent() {
        let kinds = field_kinds(&drifting(), "name");
        assert_eq!(
            kinds,
            vec![
                Some(ValueKind::Text),
                None,
                Some(ValueKind::Int),
                Some(ValueKind::Array),
                Some(ValueKind::Object),
            ]
        );
        assert!(is_heterogeneous(&drifting(), "name"));
        assert!(!is_heterogeneous(&drifting(), "id"));
    }

    #[test]
    fn test_new_column_keeps_position() {
        let schema = DriftSchema::new().expect("name", ValueKind::Text, CollisionStrategy::NewColumn);
        let resolved = resolve_drift(&drifting(), &schema).unwrap();

        let keys: Vec<&str> = resolved[2].keys().collect();
        assert_eq!(keys, vec!["id", "name_int", "sub_id"]);
        assert_eq!(resolved[2].get("name_int"), Some(&Value::Int(3)));

        let keys: Vec<&str> = resolved[4].keys().collect();
        assert_eq!(keys, vec!["id", "name_object", "sub_id"]);

        // Matching and absent values are untouched
        assert_eq!(resolved[0], drifting()[0]);
        assert_eq!(resolved[1], drifting()[1]);
    }

    #[test]
    fn test_new_column_clash_is_an_error() {
        let records = vec![Record::new().with("name", 3).with("name_int", 5)];
        let schema = DriftSchema::new().expect("name", ValueKind::Text, CollisionStrategy::NewColumn);

        let err = resolve_drift(&records, &schema).unwrap_err();
        assert_eq!(
            err,
            DriftResolveError::ColumnClash {
                field: "name".to_string(),
                column: "name_int".to_string(),
            }
        );
    }

    #[test]
    fn test_cast_strategy() {
        let schema = DriftSchema::new()
            .expect("name", ValueKind::Text, CollisionStrategy::Cast)
            .expect("sub_id", ValueKind::Int, CollisionStrategy::Cast);
        let resolved = resolve_drift(&drifting(), &schema).unwrap();

        assert_eq!(resolved[2].get("name"), Some(&Value::from("3")));
        assert_eq!(resolved[3].get("name"), Some(&Value::from("four cuatro")));
        assert_eq!(resolved[4].get("sub_id"), Some(&Value::Int(6)));
        // No cast exists from object to text: value kept
        assert_eq!(
            resolved[4].get("name"),
            Some(&Value::from(Record::new().with("key", "six")))
        );
    }

    #[test]
    fn test_remove_and_ignore() {
        let schema = DriftSchema::new()
            .expect("name", ValueKind::Text, CollisionStrategy::Remove)
            .expect("sub_id", ValueKind::Int, CollisionStrategy::Ignore);
        let resolved = resolve_drift(&drifting(), &schema).unwrap();

        assert!(resolved[0].contains_key("name"));
        assert!(!resolved[2].contains_key("name"));
        assert_eq!(resolved[4].get("sub_id"), Some(&Value::from("6")));
    }

    #[test]
    fn test_null_never_collides() {
        let records = vec![Record::new().with("name", Value::Null)];
        let schema = DriftSchema::new().expect("name", ValueKind::Text, CollisionStrategy::Remove);
        let resolved = resolve_drift(&records, &schema).unwrap();
        assert_eq!(resolved[0].get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_schema_from_yaml() {
        let yaml = r#"
name:
  kind: text
  strategy: new_column
sub_id:
  kind: int
  strategy: cast
"#;
        let schema = DriftSchema::from_yaml(yaml).unwrap();
        assert_eq!(
            schema.get("name"),
            Some(&FieldExpectation {
                kind: ValueKind::Text,
                strategy: CollisionStrategy::NewColumn,
            })
        );
        assert_eq!(schema.get("sub_id").unwrap().strategy, CollisionStrategy::Cast);
        assert!(schema.get("id").is_none());
    }

    #[test]
    fn test_schema_rejects_unknown_kind() {
        let yaml = "name:\n  kind: varchar\n  strategy: cast\n";
        assert!(matches!(
            DriftSchema::from_yaml(yaml),
            Err(DriftSchemaError::Parse(_))
        ));
    }
}
