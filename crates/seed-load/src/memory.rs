//! In-memory [`RecordSink`] standing in for a database in tests.

use crate::sink::RecordSink;
use anyhow::Result;
use seed_core::{flatten_record, Destination, FlattenError, Record, ValueKind};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// How a [`MemorySink`] treats the shape of incoming records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Any field may hold any kind in any record, like a document store.
    Variant,
    /// Records are flattened and each column keeps the kind it was first
    /// seen with, like a schema-on-write table.
    FixedColumns,
}

#[derive(Error, Debug)]
pub enum MemorySinkError {
    #[error("Column '{column}' is {expected} but the record holds {found}")]
    KindMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Injected failure after {after} successful inserts")]
    InjectedFailure { after: u64 },

    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Record>>,
    column_kinds: HashMap<String, HashMap<String, ValueKind>>,
    batch_sizes: Vec<usize>,
    insert_one_calls: u64,
    statements: u64,
}

/// Stores records per destination in memory.
pub struct MemorySink {
    mode: StorageMode,
    fail_after: Option<u64>,
    state: Mutex<State>,
}

impl MemorySink {
    pub fn new(mode: StorageMode) -> Self {
        Self {
            mode,
            fail_after: None,
            state: Mutex::new(State::default()),
        }
    }

    pub fn variant() -> Self {
        Self::new(StorageMode::Variant)
    }

    pub fn fixed_columns() -> Self {
        Self::new(StorageMode::FixedColumns)
    }

    /// Fail every insert statement after the first `statements` succeed.
    pub fn fail_after(mut self, statements: u64) -> Self {
        self.fail_after = Some(statements);
        self
    }

    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    /// Records stored under `destination`, in insertion order.
    pub fn records(&self, destination: &str) -> Vec<Record> {
        self.lock()
            .tables
            .get(destination)
            .cloned()
            .unwrap_or_default()
    }

    /// Sizes of every `insert_many` call that succeeded, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.lock().batch_sizes.clone()
    }

    pub fn insert_one_calls(&self) -> u64 {
        self.lock().insert_one_calls
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(&self, state: &State) -> Result<(), MemorySinkError> {
        match self.fail_after {
            Some(after) if state.statements >= after => {
                Err(MemorySinkError::InjectedFailure { after })
            }
            _ => Ok(()),
        }
    }

    /// Validate `records` against the locked column kinds without touching
    /// state, then return the kinds they would lock.
    fn check_kinds(
        &self,
        locked: Option<&HashMap<String, ValueKind>>,
        records: &[Record],
    ) -> Result<HashMap<String, ValueKind>, MemorySinkError> {
        let mut kinds = locked.cloned().unwrap_or_default();
        if self.mode == StorageMode::Variant {
            return Ok(kinds);
        }

        for record in records {
            // Rejects shapes a flat table cannot hold
            flatten_record(record)?;

            for (column, value) in record {
                if value.is_null() {
                    continue;
                }
                let found = value.kind();
                match kinds.get(column) {
                    Some(&expected) if expected != found => {
                        return Err(MemorySinkError::KindMismatch {
                            column: column.clone(),
                            expected,
                            found,
                        });
                    }
                    Some(_) => {}
                    None => {
                        kinds.insert(column.clone(), found);
                    }
                }
            }
        }
        Ok(kinds)
    }

    fn store(&self, destination: &Destination, records: &[Record]) -> Result<u64, MemorySinkError> {
        let key = destination.to_string();
        let mut state = self.lock();
        self.check_failure(&state)?;

        let kinds = self.check_kinds(state.column_kinds.get(&key), records)?;
        if self.mode == StorageMode::FixedColumns {
            state.column_kinds.insert(key.clone(), kinds);
        }

        state
            .tables
            .entry(key)
            .or_default()
            .extend(records.iter().cloned());
        state.statements += 1;
        Ok(records.len() as u64)
    }
}

#[async_trait::async_trait]
impl RecordSink for MemorySink {
    async fn insert_one(&self, destination: &Destination, record: &Record) -> Result<u64> {
        self.lock().insert_one_calls += 1;
        Ok(self.store(destination, std::slice::from_ref(record))?)
    }

    async fn insert_many(&self, destination: &Destination, records: &[Record]) -> Result<u64> {
        let inserted = self.store(destination, records)?;
        self.lock().batch_sizes.push(records.len());
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::Value;

    fn dest(name: &str) -> Destination {
        Destination::parse(name).unwrap()
    }

    fn id1() -> Record {
        Record::new().with("id", 1).with("name", "one").with("sub_id", 1)
    }

    fn id6() -> Record {
        Record::new()
            .with("id", 6)
            .with("name", Record::new().with("key", "six"))
            .with("sub_id", "6")
    }

    #[tokio::test]
    async fn test_variant_accepts_drift() {
        let sink = MemorySink::variant();
        sink.insert_one(&dest("dirty"), &id1()).await.unwrap();
        sink.insert_one(&dest("dirty"), &id6()).await.unwrap();

        let stored = sink.records("dirty");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].get("name").map(Value::kind), Some(ValueKind::Text));
        assert_eq!(stored[1].get("name").map(Value::kind), Some(ValueKind::Object));
    }

    #[tokio::test]
    async fn test_fixed_columns_reject_drift() {
        let sink = MemorySink::fixed_columns();
        sink.insert_one(&dest("dirty"), &id1()).await.unwrap();
        let err = sink.insert_one(&dest("dirty"), &id6()).await.unwrap_err();

        match err.downcast_ref::<MemorySinkError>() {
            Some(MemorySinkError::KindMismatch {
                column,
                expected,
                found,
            }) => {
                assert_eq!(column, "name");
                assert_eq!(*expected, ValueKind::Text);
                assert_eq!(*found, ValueKind::Object);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(sink.records("dirty").len(), 1);
    }

    #[tokio::test]
    async fn test_fixed_columns_null_is_not_drift() {
        let sink = MemorySink::fixed_columns();
        sink.insert_one(&dest("t"), &Record::new().with("a", Value::Null))
            .await
            .unwrap();
        sink.insert_one(&dest("t"), &Record::new().with("a", 1)).await.unwrap();
        sink.insert_one(&dest("t"), &Record::new().with("a", Value::Null))
            .await
            .unwrap();
        assert_eq!(sink.records("t").len(), 3);
    }

    #[tokio::test]
    async fn test_fixed_columns_are_per_destination() {
        let sink = MemorySink::fixed_columns();
        sink.insert_one(&dest("a"), &id1()).await.unwrap();
        sink.insert_one(&dest("b"), &id6()).await.unwrap();
        assert_eq!(sink.records("a").len(), 1);
        assert_eq!(sink.records("b").len(), 1);
    }

    #[tokio::test]
    async fn test_fixed_columns_reject_list_of_lists() {
        let sink = MemorySink::fixed_columns();
        let record = Record::new().with(
            "matrix",
            Value::Array(vec![Value::Array(vec![Value::Int(1)])]),
        );
        let err = sink.insert_one(&dest("t"), &record).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MemorySinkError>(),
            Some(MemorySinkError::Flatten(FlattenError::UnsupportedNesting { .. }))
        ));
    }

    #[tokio::test]
    async fn test_insert_many_records_batch_sizes() {
        let sink = MemorySink::variant();
        sink.insert_many(&dest("t"), &[id1(), id6()]).await.unwrap();
        sink.insert_many(&dest("t"), &[id1()]).await.unwrap();
        assert_eq!(sink.batch_sizes(), vec![2, 1]);
        assert_eq!(sink.records("t").len(), 3);
        assert_eq!(sink.insert_one_calls(), 0);
    }

    #[tokio::test]
    async fn test_fail_after() {
        let sink = MemorySink::variant().fail_after(1);
        sink.insert_one(&dest("t"), &id1()).await.unwrap();
        let err = sink.insert_one(&dest("t"), &id1()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MemorySinkError>(),
            Some(MemorySinkError::InjectedFailure { after: 1 })
        ));
        assert_eq!(sink.records("t").len(), 1);
    }

    #[tokio::test]
    async fn test_schema_qualified_key() {
        let sink = MemorySink::variant();
        sink.insert_one(&dest("doc.dirty"), &id1()).await.unwrap();
        assert_eq!(sink.records("doc.dirty").len(), 1);
        assert!(sink.records("dirty").is_empty());
    }
}
