//! Error types for the MySQL loader.

use seed_core::FlattenError;
use thiserror::Error;

/// Errors that can occur while loading into MySQL.
#[derive(Error, Debug)]
pub enum MySQLLoaderError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// Malformed connection string.
    #[error("Invalid connection string: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// Record has a shape with no flat representation.
    #[error(transparent)]
    Flatten(#[from] FlattenError),

    /// A multi-row insert needs the same columns in every row.
    #[error("Row {row} has columns {found:?}, expected {expected:?}")]
    ColumnMismatch {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Records without fields have no column list.
    #[error("Cannot insert a record with no fields")]
    NoColumns,

    /// Prepared statements take at most 65535 placeholders.
    #[error("Insert needs {count} parameters, more than the limit of 65535")]
    TooManyParameters { count: usize },
}
