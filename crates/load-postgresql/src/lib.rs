//! PostgreSQL loader for fixture-seed.
//!
//! Records are flattened before insertion: nested objects and arrays become
//! structured text. Each value is then bound by the type the server declares
//! for its placeholder (see [`postgresql_types::bind_value`]).
//!
//! CrateDB speaks the PostgreSQL wire protocol and can be targeted with this
//! loader.

pub mod args;
pub mod error;
pub mod insert;
pub mod loader;

pub use args::{PostgreSQLConnectionArgs, DEFAULT_POSTGRESQL_CONNECTION_STRING};
pub use error::PostgreSQLLoaderError;
pub use loader::PostgreSQLLoader;
