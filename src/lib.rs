//! fixture-seed library
//!
//! Seeds MongoDB, PostgreSQL and MySQL with fixtures for data-type and
//! schema-drift testing, and loads tabular dataset directories in batches.
//!
//! # Crates
//!
//! - `fixture_generator` - the scalar fixture and the drift fixture set
//! - `seed_core` - value model, normalization, drift resolution
//! - `seed_load` - the `RecordSink` seam and the loader operations
//! - `load_mongodb`, `load_postgresql`, `load_mysql` - one sink per store
//! - `tabular_source` - Parquet/CSV directory reader
//!
//! # CLI Usage
//!
//! ```bash
//! # Insert the scalar fixture five times into PostgreSQL
//! fixture-seed load postgresql --table testdrive.scalars --create-table --repeat 5
//!
//! # Insert the drift set into MongoDB
//! fixture-seed load mongodb --fixture drift --table drift
//!
//! # Load a Parquet/CSV directory into MySQL, 1000 rows per statement
//! fixture-seed load-dataset mysql --path ./data/taxi --table taxi --create-table
//!
//! # Print a fixture
//! fixture-seed show drift
//! ```

use clap::Subcommand;
use load_mongodb::MongoDBConnectionArgs;
use load_mysql::MySQLConnectionArgs;
use load_postgresql::PostgreSQLConnectionArgs;
use seed_load::{CommonLoadArgs, DatasetLoadArgs};

pub mod logging;
pub mod plan;
pub mod run;

pub use logging::mask_connection_password;
pub use plan::{DatasetPlan, FixturePlan};

/// Store to load a fixture into
#[derive(Subcommand, Clone, Debug)]
pub enum LoadTarget {
    /// Load a fixture into a MongoDB collection
    #[command(name = "mongodb")]
    MongoDB {
        #[command(flatten)]
        connection: MongoDBConnectionArgs,
        #[command(flatten)]
        common: CommonLoadArgs,
    },
    /// Load a fixture into a PostgreSQL (or CrateDB) table
    #[command(name = "postgresql")]
    PostgreSQL {
        #[command(flatten)]
        connection: PostgreSQLConnectionArgs,
        #[command(flatten)]
        common: CommonLoadArgs,
    },
    /// Load a fixture into a MySQL table
    #[command(name = "mysql")]
    MySQL {
        #[command(flatten)]
        connection: MySQLConnectionArgs,
        #[command(flatten)]
        common: CommonLoadArgs,
    },
}

/// Store to load a tabular dataset into
#[derive(Subcommand, Clone, Debug)]
pub enum DatasetTarget {
    /// Load a dataset into a MongoDB collection
    #[command(name = "mongodb")]
    MongoDB {
        #[command(flatten)]
        connection: MongoDBConnectionArgs,
        #[command(flatten)]
        dataset: DatasetLoadArgs,
    },
    /// Load a dataset into a PostgreSQL (or CrateDB) table
    #[command(name = "postgresql")]
    PostgreSQL {
        #[command(flatten)]
        connection: PostgreSQLConnectionArgs,
        #[command(flatten)]
        dataset: DatasetLoadArgs,
    },
    /// Load a dataset into a MySQL table
    #[command(name = "mysql")]
    MySQL {
        #[command(flatten)]
        connection: MySQLConnectionArgs,
        #[command(flatten)]
        dataset: DatasetLoadArgs,
    },
}
