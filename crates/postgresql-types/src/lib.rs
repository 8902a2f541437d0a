//! PostgreSQL type conversions for fixture-seed values.
//!
//! # Modules
//!
//! - [`forward`] - FlatValue → PostgreSQL parameter, bound by declared type
//! - [`ddl`] - PostgreSQL DDL and INSERT generation from inferred columns
//!
//! # Example
//!
//! ```ignore
//! use postgresql_types::{bind_value, PostgreSQLDdl, ToDdl};
//! use seed_core::{ColumnType, FlatValue};
//! use tokio_postgres::types::Type;
//!
//! let param = bind_value("id", &FlatValue::Int(1), &Type::INT4)?;
//! assert_eq!(PostgreSQLDdl.to_ddl(ColumnType::Int), "INTEGER");
//! ```

pub mod ddl;
pub mod forward;

pub use ddl::{PostgreSQLDdl, ToDdl};
pub use forward::{bind_value, BindError, PostgreSQLValue};
