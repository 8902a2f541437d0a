//! Metrics from a load operation.

use std::time::Duration;

/// Metrics from a load operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadMetrics {
    /// Number of rows persisted.
    pub rows_inserted: u64,
    /// Number of insert statements executed.
    pub insert_count: u64,
    /// Number of multi-record batches flushed.
    pub batch_count: u64,
    /// Rows read but never inserted (trailing partial batch).
    pub dropped_rows: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl LoadMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}
