//! Fixture records for data-type and schema-drift testing.
//!
//! Two fixtures are provided:
//!
//! - [`build_scalar_fixture`] - one record holding every supported value kind,
//!   including integer range boundaries, a numeric string, nested objects,
//!   an empty array and a 2048-element float vector
//! - [`build_drift_fixture_set`] - records sharing an integer `id` whose
//!   `name` field changes shape from record to record
//!
//! The shape of each fixture is fixed. The scalar fixture's `id` and
//! timestamps are fresh on every call.
//!
//! # Example
//!
//! ```rust
//! use fixture_generator::{build_drift_fixture_set, build_scalar_fixture};
//!
//! let record = build_scalar_fixture();
//! assert_eq!(record.get("vector_float").unwrap().as_array().unwrap().len(), 2048);
//!
//! let drift = build_drift_fixture_set();
//! assert_eq!(drift.len(), 7);
//! ```

pub mod drift;
pub mod scalar;

// Re-exports for convenience
pub use drift::{build_drift_fixture_set, DRIFT_FIELD};
pub use scalar::{build_scalar_fixture, VECTOR_DIMENSIONS};
