//! Common CLI argument definitions shared by all loaders.

use crate::load::DEFAULT_BATCH_SIZE;
use clap::{Args, ValueEnum};
use seed_core::Record;
use std::path::PathBuf;

/// Which fixture to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FixtureKind {
    /// One record covering every value kind
    Scalar,
    /// Records sharing an id whose `name` field drifts in shape
    Drift,
}

impl FixtureKind {
    /// Build the fixture's records.
    pub fn build(self) -> Vec<Record> {
        match self {
            Self::Scalar => vec![fixture_generator::build_scalar_fixture()],
            Self::Drift => fixture_generator::build_drift_fixture_set(),
        }
    }
}

/// Arguments for loading a fixture.
///
/// Used by every `load <store>` command so the CLI is the same across stores.
#[derive(Args, Clone, Debug)]
pub struct CommonLoadArgs {
    /// Destination table or collection (`name` or `schema.name`)
    #[arg(long)]
    pub table: String,

    /// Fixture to insert
    #[arg(long, value_enum, default_value = "scalar")]
    pub fixture: FixtureKind,

    /// Number of times the scalar fixture is inserted (one statement each)
    #[arg(long, default_value = "1")]
    pub repeat: u64,

    /// Create the destination table from the fixture before inserting (relational stores)
    #[arg(long)]
    pub create_table: bool,

    /// YAML file with expected kinds and collision strategies, applied before loading
    #[arg(long, value_name = "PATH")]
    pub drift_schema: Option<PathBuf>,

    /// Dry-run mode: build the fixture and validate arguments without touching the store
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for loading a tabular dataset directory.
#[derive(Args, Clone, Debug)]
pub struct DatasetLoadArgs {
    /// Directory holding .parquet and/or .csv files
    #[arg(long, value_name = "DIR")]
    pub path: PathBuf,

    /// Destination table or collection (`name` or `schema.name`)
    #[arg(long)]
    pub table: String,

    /// Number of rows per multi-record insert
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Also insert the trailing partial batch (by default it is dropped)
    #[arg(long)]
    pub flush_remainder: bool,

    /// Create the destination table from the first batch before inserting (relational stores)
    #[arg(long)]
    pub create_table: bool,

    /// Dry-run mode: open the dataset and validate arguments without touching the store
    #[arg(long)]
    pub dry_run: bool,
}
