//! Core types for the fixture-seed tooling.
//!
//! This crate provides the foundational types shared by the fixture
//! generator, the loaders and the store-specific type crates:
//!
//! - [`Value`] / [`ValueKind`] - The closed set of value shapes a record may hold
//! - [`Record`] - An insertion-ordered field map
//! - [`FlatRow`] / [`FlatValue`] - A record normalized for flat columnar stores
//! - [`Destination`] - A validated table or collection name
//! - [`ColumnSpec`] - Column types inferred from records, used for DDL
//! - [`DriftSchema`] - Expected kinds per field and how to resolve mismatches
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── fixture-generator  (builds Records)
//!    ├─── seed-load          (RecordSink seam + loader operations)
//!    │
//!    ├─── mongodb-types      (Record <-> BSON)
//!    ├─── postgresql-types   (FlatValue -> ToSql, DDL)
//!    ├─── mysql-types        (FlatValue -> mysql_async::Value, DDL)
//!    └─── tabular-source     (Parquet/CSV rows -> Record)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::{flatten_record, FlatValue, Record, Value};
//!
//! let record = Record::new()
//!     .with("id", Value::Int(1))
//!     .with("tags", Value::Array(vec![Value::from("a"), Value::from("b")]));
//!
//! let row = flatten_record(&record).unwrap();
//! assert_eq!(row.columns(), ["id", "tags"]);
//! assert_eq!(row.values()[1], FlatValue::Structured(r#"["a","b"]"#.to_string()));
//! ```

pub mod columns;
pub mod destination;
pub mod drift;
pub mod flatten;
pub mod value;

// Re-exports for convenience
pub use columns::{infer_columns, ColumnSpec, ColumnType};
pub use destination::{Destination, DestinationError};
pub use drift::{
    field_kinds, is_heterogeneous, resolve_drift, CollisionStrategy, DriftResolveError, DriftSchema,
    DriftSchemaError, FieldExpectation,
};
pub use flatten::{flatten_record, flatten_value, FlatRow, FlatValue, FlattenError};
pub use value::{Record, Value, ValueKind, LOCAL_DATETIME_FORMAT};
