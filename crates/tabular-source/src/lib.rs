//! Tabular datasets read from a directory of Parquet and CSV files.
//!
//! [`TabularDataset::open`] lists the files; [`TabularDataset::rows`] reads
//! them lazily, one file at a time, yielding each row as a [`Record`] named
//! by the file's schema or header.
//!
//! [`Record`]: seed_core::Record

pub mod csv;
pub mod dataset;
pub mod error;
pub mod parquet;

pub use dataset::{FileFormat, Rows, TabularDataset, TabularFile};
pub use error::TabularError;
