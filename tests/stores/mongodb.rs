//! MongoDB: documents keep the shape they were inserted with.

use crate::{env_or, init_tracing};
use fixture_generator::{build_drift_fixture_set, build_scalar_fixture, DRIFT_FIELD};
use load_mongodb::{MongoDBLoader, DEFAULT_MONGODB_CONNECTION_STRING, DEFAULT_MONGODB_DATABASE};
use seed_core::{is_heterogeneous, Destination};
use seed_load::{load_record, load_records};

async fn connect() -> Result<MongoDBLoader, Box<dyn std::error::Error>> {
    let loader = MongoDBLoader::new(
        &env_or("MONGODB_CONNECTION_STRING", DEFAULT_MONGODB_CONNECTION_STRING),
        &env_or("MONGODB_DATABASE", DEFAULT_MONGODB_DATABASE),
    )
    .await?;
    Ok(loader)
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_mongodb_scalar_repetitions() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let loader = connect().await?;
    let destination = Destination::parse("fixture_seed_scalars")?;
    loader.drop_collection(&destination).await?;

    let metrics = load_record(&loader, &destination, &build_scalar_fixture(), 3).await?;
    assert_eq!(metrics.rows_inserted, 3);
    assert_eq!(loader.document_count(&destination).await?, 3);

    loader.drop_collection(&destination).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_mongodb_drift_set_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let loader = connect().await?;
    let destination = Destination::parse("fixture_seed_drift")?;
    loader.drop_collection(&destination).await?;

    load_records(&loader, &destination, &build_drift_fixture_set()).await?;

    let stored = loader.find_all(&destination).await?;
    assert_eq!(stored, build_drift_fixture_set());
    assert!(is_heterogeneous(&stored, DRIFT_FIELD));

    loader.drop_collection(&destination).await?;
    Ok(())
}
