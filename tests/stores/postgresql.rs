//! PostgreSQL: flattened rows bound by the declared column types.

use crate::{env_or, init_tracing};
use fixture_generator::{build_drift_fixture_set, build_scalar_fixture};
use fixture_seed::FixturePlan;
use load_postgresql::{PostgreSQLLoader, PostgreSQLLoaderError, DEFAULT_POSTGRESQL_CONNECTION_STRING};
use seed_core::Destination;
use seed_load::{load_record, load_records, CommonLoadArgs, FixtureKind};

async fn connect() -> Result<PostgreSQLLoader, Box<dyn std::error::Error>> {
    let loader = PostgreSQLLoader::new(&env_or(
        "POSTGRESQL_CONNECTION_STRING",
        DEFAULT_POSTGRESQL_CONNECTION_STRING,
    ))
    .await?;
    Ok(loader)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_postgresql_scalar_repetitions() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let loader = connect().await?;
    let destination = Destination::parse("fixture_seed_scalars")?;
    let record = build_scalar_fixture();

    loader.drop_table(&destination).await?;
    loader
        .create_table(&destination, std::slice::from_ref(&record))
        .await?;

    let metrics = load_record(&loader, &destination, &record, 2).await?;
    assert_eq!(metrics.rows_inserted, 2);
    assert_eq!(loader.row_count(&destination).await?, 2);

    loader.drop_table(&destination).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_postgresql_rejects_unresolved_drift() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let loader = connect().await?;
    let destination = Destination::parse("fixture_seed_drift")?;
    let records = build_drift_fixture_set();

    loader.drop_table(&destination).await?;
    loader.create_table(&destination, &records).await?;

    let err = load_records(&loader, &destination, &records)
        .await
        .expect_err("a number does not bind to the text column inferred for `name`");
    assert!(err.chain().any(|cause| matches!(
        cause.downcast_ref::<PostgreSQLLoaderError>(),
        Some(PostgreSQLLoaderError::Bind(_))
    )));
    // Records ahead of the first mismatch stay committed
    assert_eq!(loader.row_count(&destination).await?, 2);

    loader.drop_table(&destination).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_postgresql_accepts_resolved_drift() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let loader = connect().await?;
    let dir = tempfile::tempdir()?;
    let schema_path = dir.path().join("drift.yaml");
    std::fs::write(
        &schema_path,
        "name:\n  kind: text\n  strategy: new_column\nsub_id:\n  kind: int\n  strategy: cast\n",
    )?;

    let plan = FixturePlan::prepare(&CommonLoadArgs {
        table: "fixture_seed_drift_resolved".to_string(),
        fixture: FixtureKind::Drift,
        repeat: 1,
        create_table: true,
        drift_schema: Some(schema_path),
        dry_run: false,
    })?;

    loader.drop_table(&plan.destination).await?;
    loader.create_table(&plan.destination, &plan.records).await?;

    let metrics = plan.execute(&loader).await?;
    assert_eq!(metrics.rows_inserted, 7);
    assert_eq!(loader.row_count(&plan.destination).await?, 7);

    loader.drop_table(&plan.destination).await?;
    Ok(())
}
