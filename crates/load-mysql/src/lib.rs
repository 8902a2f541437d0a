//! MySQL loader for fixture-seed.
//!
//! Records are flattened and bound positionally; the server enforces the
//! column types.

pub mod args;
pub mod error;
pub mod insert;
pub mod loader;

pub use args::{MySQLConnectionArgs, DEFAULT_MYSQL_CONNECTION_STRING};
pub use error::MySQLLoaderError;
pub use loader::MySQLLoader;
