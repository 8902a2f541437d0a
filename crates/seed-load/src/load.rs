//! Loader operations over any [`RecordSink`].

use crate::metrics::LoadMetrics;
use crate::sink::RecordSink;
use anyhow::{Context, Result};
use seed_core::{Destination, Record};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default number of rows per multi-record insert.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Argument errors rejected before any insert is attempted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoadError {
    #[error("Repetition count must be at least 1")]
    ZeroRepetitions,

    #[error("Batch size must be at least 1")]
    ZeroBatchSize,
}

/// What happens to rows left in the buffer when the source is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Discard a trailing partial batch, counting it in
    /// [`LoadMetrics::dropped_rows`].
    #[default]
    Drop,
    /// Insert the trailing partial batch.
    Flush,
}

/// Insert `record` into `destination` exactly `repetitions` times.
///
/// Every repetition is its own insert statement; no transaction spans them.
/// A failure aborts the remaining repetitions and leaves earlier ones in place.
pub async fn load_record<S: RecordSink + ?Sized>(
    sink: &S,
    destination: &Destination,
    record: &Record,
    repetitions: u64,
) -> Result<LoadMetrics> {
    if repetitions == 0 {
        return Err(LoadError::ZeroRepetitions.into());
    }

    let start_time = Instant::now();
    let mut metrics = LoadMetrics::default();

    info!(
        "Inserting 1 record into '{}' {} time(s)",
        destination, repetitions
    );

    for repetition in 1..=repetitions {
        let inserted = sink
            .insert_one(destination, record)
            .await
            .with_context(|| {
                format!("Insert {repetition} of {repetitions} into '{destination}' failed")
            })?;
        metrics.rows_inserted += inserted;
        metrics.insert_count += 1;
    }

    metrics.total_duration = start_time.elapsed();
    info!(
        "Load complete: {} rows in {:?} ({:.2} rows/sec)",
        metrics.rows_inserted,
        metrics.total_duration,
        metrics.rows_per_second()
    );

    Ok(metrics)
}

/// Insert each record once, in order, one statement per record.
///
/// Records need not share a column set, which is what the drift fixture
/// relies on.
pub async fn load_records<S: RecordSink + ?Sized>(
    sink: &S,
    destination: &Destination,
    records: &[Record],
) -> Result<LoadMetrics> {
    let start_time = Instant::now();
    let mut metrics = LoadMetrics::default();

    info!("Inserting {} records into '{}'", records.len(), destination);

    for (index, record) in records.iter().enumerate() {
        let inserted = sink
            .insert_one(destination, record)
            .await
            .with_context(|| format!("Insert of record {index} into '{destination}' failed"))?;
        metrics.rows_inserted += inserted;
        metrics.insert_count += 1;
    }

    metrics.total_duration = start_time.elapsed();
    info!(
        "Load complete: {} rows in {:?}",
        metrics.rows_inserted, metrics.total_duration
    );

    Ok(metrics)
}

/// Buffer rows in encounter order and flush them with
/// [`RecordSink::insert_many`] every `batch_size` rows.
///
/// A row that fails to read aborts the load. What happens to a final buffer
/// shorter than `batch_size` is decided by `remainder`.
pub async fn load_batches<S, I, E>(
    sink: &S,
    destination: &Destination,
    rows: I,
    batch_size: usize,
    remainder: RemainderPolicy,
) -> Result<LoadMetrics>
where
    S: RecordSink + ?Sized,
    I: IntoIterator<Item = Result<Record, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    if batch_size == 0 {
        return Err(LoadError::ZeroBatchSize.into());
    }

    let start_time = Instant::now();
    let mut metrics = LoadMetrics::default();
    let mut buffer: Vec<Record> = Vec::with_capacity(batch_size);
    let mut rows_read: u64 = 0;

    info!(
        "Loading rows into '{}' (batch size: {})",
        destination, batch_size
    );

    for row in rows {
        let record =
            row.with_context(|| format!("Failed to read source row {rows_read}"))?;
        rows_read += 1;
        buffer.push(record);

        if buffer.len() == batch_size {
            flush(sink, destination, &mut buffer, &mut metrics).await?;
        }
    }

    if !buffer.is_empty() {
        match remainder {
            RemainderPolicy::Flush => {
                flush(sink, destination, &mut buffer, &mut metrics).await?;
            }
            RemainderPolicy::Drop => {
                warn!(
                    "Dropping final partial batch of {} rows (batch size {})",
                    buffer.len(),
                    batch_size
                );
                metrics.dropped_rows = buffer.len() as u64;
                buffer.clear();
            }
        }
    }

    metrics.total_duration = start_time.elapsed();
    info!(
        "Load complete: {} of {} rows in {} batches, {:?} ({:.2} rows/sec)",
        metrics.rows_inserted,
        rows_read,
        metrics.batch_count,
        metrics.total_duration,
        metrics.rows_per_second()
    );

    Ok(metrics)
}

async fn flush<S: RecordSink + ?Sized>(
    sink: &S,
    destination: &Destination,
    buffer: &mut Vec<Record>,
    metrics: &mut LoadMetrics,
) -> Result<()> {
    let batch_number = metrics.batch_count + 1;
    let inserted = sink
        .insert_many(destination, buffer)
        .await
        .with_context(|| format!("Batch {batch_number} into '{destination}' failed"))?;

    metrics.rows_inserted += inserted;
    metrics.insert_count += 1;
    metrics.batch_count += 1;
    debug!("Batch {} complete: {} rows inserted", batch_number, inserted);

    buffer.clear();
    Ok(())
}
