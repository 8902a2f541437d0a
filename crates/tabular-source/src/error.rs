//! Error types for tabular sources.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabularError {
    #[error("Dataset path '{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read Parquet file '{path}': {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: ::parquet::errors::ParquetError,
    },

    #[error("Failed to read CSV file '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    #[error("CSV file '{path}' names column '{column}' more than once")]
    DuplicateHeader { path: PathBuf, column: String },
}
