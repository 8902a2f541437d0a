//! Error types for the PostgreSQL loader.

use postgresql_types::BindError;
use seed_core::FlattenError;
use thiserror::Error;

/// Errors that can occur while loading into PostgreSQL.
#[derive(Error, Debug)]
pub enum PostgreSQLLoaderError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Record has a shape with no flat representation.
    #[error(transparent)]
    Flatten(#[from] FlattenError),

    /// Value incompatible with the destination column.
    #[error(transparent)]
    Bind(#[from] BindError),

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

    /// The wire protocol numbers parameters with a 16-bit counter.
    #[error("Insert needs {count} parameters, more than the limit of 65535")]
    TooManyParameters { count: usize },

    /// Server declared a different number of parameters than were built.
    #[error("Statement declares {declared} parameters but {bound} values were built")]
    ParameterCount { declared: usize, bound: usize },
}

/// Parameter limit of the PostgreSQL wire protocol.
pub const MAX_PARAMETERS: usize = u16::MAX as usize;
