//! Validated load plans built from CLI arguments.
//!
//! Everything that can be rejected without a store connection is rejected
//! here, before any loader connects.

use anyhow::{bail, Context};
use seed_core::{resolve_drift, Destination, DriftSchema, Record};
use seed_load::{
    load_batches, load_record, load_records, CommonLoadArgs, DatasetLoadArgs, FixtureKind,
    LoadError, LoadMetrics, RecordSink, RemainderPolicy,
};
use tabular_source::TabularDataset;

/// A fixture, resolved against an optional drift schema, and where it goes.
#[derive(Debug, Clone)]
pub struct FixturePlan {
    pub destination: Destination,
    pub fixture: FixtureKind,
    pub records: Vec<Record>,
    pub repetitions: u64,
}

impl FixturePlan {
    pub fn prepare(args: &CommonLoadArgs) -> anyhow::Result<Self> {
        let destination = Destination::parse(&args.table)
            .with_context(|| format!("Invalid destination '{}'", args.table))?;

        if args.repeat == 0 {
            return Err(LoadError::ZeroRepetitions.into());
        }
        if args.fixture == FixtureKind::Drift && args.repeat > 1 {
            bail!(
                "--repeat {} is only supported for the scalar fixture",
                args.repeat
            );
        }

        let mut records = args.fixture.build();
        if let Some(path) = &args.drift_schema {
            let schema = DriftSchema::from_file(path)
                .with_context(|| format!("Failed to load drift schema from {path:?}"))?;
            records = resolve_drift(&records, &schema)
                .with_context(|| format!("Failed to apply drift schema from {path:?}"))?;
        }

        Ok(Self {
            destination,
            fixture: args.fixture,
            records,
            repetitions: args.repeat,
        })
    }

    pub fn is_single_record(&self) -> bool {
        self.records.len() == 1
    }

    /// Insert the fixture: a single record `repetitions` times, a record set
    /// once each in order.
    pub async fn execute<S: RecordSink + ?Sized>(&self, sink: &S) -> anyhow::Result<LoadMetrics> {
        match self.records.as_slice() {
            [record] => load_record(sink, &self.destination, record, self.repetitions).await,
            records => load_records(sink, &self.destination, records).await,
        }
    }
}

/// A dataset directory and the batching to load it with.
#[derive(Debug, Clone)]
pub struct DatasetPlan {
    pub destination: Destination,
    pub dataset: TabularDataset,
    pub batch_size: usize,
    pub remainder: RemainderPolicy,
}

impl DatasetPlan {
    pub fn prepare(args: &DatasetLoadArgs) -> anyhow::Result<Self> {
        let destination = Destination::parse(&args.table)
            .with_context(|| format!("Invalid destination '{}'", args.table))?;

        if args.batch_size == 0 {
            return Err(LoadError::ZeroBatchSize.into());
        }

        let dataset = TabularDataset::open(&args.path)
            .with_context(|| format!("Failed to open dataset {:?}", args.path))?;

        let remainder = if args.flush_remainder {
            RemainderPolicy::Flush
        } else {
            RemainderPolicy::Drop
        };

        Ok(Self {
            destination,
            dataset,
            batch_size: args.batch_size,
            remainder,
        })
    }

    /// Rows of the first batch, used to infer column types.
    pub fn sample(&self) -> anyhow::Result<Vec<Record>> {
        self.dataset
            .rows()
            .take(self.batch_size)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read the first batch")
    }

    pub async fn execute<S: RecordSink + ?Sized>(&self, sink: &S) -> anyhow::Result<LoadMetrics> {
        load_batches(
            sink,
            &self.destination,
            self.dataset.rows(),
            self.batch_size,
            self.remainder,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::Value;
    use seed_load::MemorySink;
    use std::path::PathBuf;

    fn common(table: &str, fixture: FixtureKind, repeat: u64) -> CommonLoadArgs {
        CommonLoadArgs {
            table: table.to_string(),
            fixture,
            repeat,
            create_table: false,
            drift_schema: None,
            dry_run: false,
        }
    }

    fn dataset(path: PathBuf, batch_size: usize, flush_remainder: bool) -> DatasetLoadArgs {
        DatasetLoadArgs {
            path,
            table: "taxi".to_string(),
            batch_size,
            flush_remainder,
            create_table: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_drift_with_repeat_is_rejected() {
        let err = FixturePlan::prepare(&common("drift", FixtureKind::Drift, 3)).unwrap_err();
        assert!(err.to_string().contains("--repeat 3"));
    }

    #[test]
    fn test_zero_repeat_is_rejected() {
        let err = FixturePlan::prepare(&common("scalars", FixtureKind::Scalar, 0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::ZeroRepetitions)
        );
    }

    #[test]
    fn test_invalid_destination_is_rejected() {
        assert!(FixturePlan::prepare(&common("a.b.c", FixtureKind::Scalar, 1)).is_err());
    }

    #[tokio::test]
    async fn test_scalar_plan_repeats() {
        let plan = FixturePlan::prepare(&common("testdrive.scalars", FixtureKind::Scalar, 3)).unwrap();
        assert!(plan.is_single_record());

        let sink = MemorySink::variant();
        let metrics = plan.execute(&sink).await.unwrap();
        assert_eq!(metrics.rows_inserted, 3);
        assert_eq!(sink.records("testdrive.scalars").len(), 3);
    }

    #[tokio::test]
    async fn test_drift_plan_inserts_each_record_once() {
        let plan = FixturePlan::prepare(&common("drift", FixtureKind::Drift, 1)).unwrap();
        assert!(!plan.is_single_record());

        let sink = MemorySink::variant();
        plan.execute(&sink).await.unwrap();
        assert_eq!(sink.records("drift").len(), 7);
        assert_eq!(sink.insert_one_calls(), 7);
    }

    #[tokio::test]
    async fn test_drift_schema_makes_fixed_storage_accept_the_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drift.yaml");
        std::fs::write(
            &path,
            "name:\n  kind: text\n  strategy: new_column\nsub_id:\n  kind: int\n  strategy: cast\n",
        )
        .unwrap();

        let mut args = common("drift", FixtureKind::Drift, 1);
        args.drift_schema = Some(path);
        let plan = FixturePlan::prepare(&args).unwrap();

        let sink = MemorySink::fixed_columns();
        plan.execute(&sink).await.unwrap();

        let stored = sink.records("drift");
        assert_eq!(stored.len(), 7);
        assert_eq!(stored[5].get("sub_id"), Some(&Value::Int(6)));
        assert!(stored[5].get("name").is_none());
        assert!(stored[5].get("name_object").is_some());
    }

    #[test]
    fn test_missing_drift_schema_file() {
        let mut args = common("drift", FixtureKind::Drift, 1);
        args.drift_schema = Some(PathBuf::from("/nonexistent/drift.yaml"));
        let err = FixturePlan::prepare(&args).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load drift schema"));
    }

    #[test]
    fn test_dataset_zero_batch_size() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetPlan::prepare(&dataset(dir.path().to_path_buf(), 0, false)).unwrap_err();
        assert_eq!(err.downcast_ref::<LoadError>(), Some(&LoadError::ZeroBatchSize));
    }

    #[tokio::test]
    async fn test_dataset_plan_sample_and_execute() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("trips.csv"),
            "vendor_id,fare\n1,7.5\n2,12.0\n3,4.25\n",
        )
        .unwrap();

        let plan = DatasetPlan::prepare(&dataset(dir.path().to_path_buf(), 2, true)).unwrap();
        assert_eq!(plan.remainder, RemainderPolicy::Flush);
        assert_eq!(plan.sample().unwrap().len(), 2);

        let sink = MemorySink::variant();
        let metrics = plan.execute(&sink).await.unwrap();
        assert_eq!(metrics.rows_inserted, 3);
        assert_eq!(sink.batch_sizes(), vec![2, 1]);
    }
}
