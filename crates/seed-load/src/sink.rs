//! RecordSink trait definition.

use anyhow::Result;
use seed_core::{Destination, Record};

/// Trait for writing records to a store.
///
/// Implementations own the store-specific conversion: document stores take
/// the record as-is, flat relational stores normalize it first.
///
/// # Usage Pattern
///
/// Loader functions use generics for static dispatch:
///
/// ```ignore
/// pub async fn load_record<S: RecordSink + ?Sized>(
///     sink: &S,
///     destination: &Destination,
///     record: &Record,
///     repetitions: u64,
/// ) -> Result<LoadMetrics> {
///     sink.insert_one(destination, record).await?;
/// }
/// ```
#[async_trait::async_trait]
pub trait RecordSink: Send + Sync {
    /// Insert a single record, returning the number of persisted rows.
    async fn insert_one(&self, destination: &Destination, record: &Record) -> Result<u64>;

    /// Insert several records with one multi-record statement, returning the
    /// number of persisted rows.
    async fn insert_many(&self, destination: &Destination, records: &[Record]) -> Result<u64>;
}
