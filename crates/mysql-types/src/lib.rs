//! MySQL type conversions for fixture-seed values.
//!
//! # Structure
//!
//! - `forward`: Convert `FlatValue` → `MySQLValue` (for INSERT operations)
//! - `ddl`: Generate MySQL DDL and INSERT statements from inferred columns
//!
//! # Example
//!
//! ```rust,ignore
//! use mysql_types::{MySQLDdl, MySQLValue, ToDdl};
//! use seed_core::{ColumnType, FlatValue};
//!
//! let mysql_value = MySQLValue::from(&FlatValue::Bool(true));
//! assert_eq!(MySQLDdl.to_ddl(ColumnType::Bool), "TINYINT(1)");
//! ```

pub mod ddl;
pub mod forward;

pub use ddl::{MySQLDdl, ToDdl};
pub use forward::MySQLValue;
