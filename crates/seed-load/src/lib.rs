//! Loader operations shared by all fixture-seed store loaders.
//!
//! Each store crate (`load-mongodb`, `load-postgresql`, `load-mysql`)
//! implements [`RecordSink`]; the functions in [`load`] drive any sink:
//!
//! - [`load_record`] - insert one record N times, one statement each
//! - [`load_records`] - insert a sequence of records once each, in order
//! - [`load_batches`] - buffer rows and flush them as multi-record inserts
//!
//! None of these retry. The first failure aborts the load and whatever was
//! inserted before it stays in the store.

pub mod args;
pub mod load;
pub mod memory;
pub mod metrics;
pub mod sink;

pub use args::{CommonLoadArgs, DatasetLoadArgs, FixtureKind};
pub use load::{load_batches, load_record, load_records, LoadError, RemainderPolicy, DEFAULT_BATCH_SIZE};
pub use memory::{MemorySink, MemorySinkError, StorageMode};
pub use metrics::LoadMetrics;
pub use sink::RecordSink;
