//! MySQL: flattened rows bound positionally.

use crate::{env_or, init_tracing};
use fixture_generator::build_scalar_fixture;
use load_mysql::{MySQLLoader, DEFAULT_MYSQL_CONNECTION_STRING};
use seed_core::{Destination, Record};
use seed_load::{load_batches, load_record, RemainderPolicy};
use std::convert::Infallible;

async fn connect() -> Result<MySQLLoader, Box<dyn std::error::Error>> {
    let loader =
        MySQLLoader::new(&env_or("MYSQL_CONNECTION_STRING", DEFAULT_MYSQL_CONNECTION_STRING))
            .await?;
    Ok(loader)
}

#[tokio::test]
#[ignore = "requires a running MySQL"]
async fn test_mysql_scalar_repetitions() -> Result<(), Box<dyn std::error::Error>> {
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
    loader.disconnect().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running MySQL"]
async fn test_mysql_batches() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let loader = connect().await?;
    let destination = Destination::parse("fixture_seed_batches")?;
    let rows: Vec<Record> = (0..25)
        .map(|i| Record::new().with("id", i).with("label", format!("row {i}")))
        .collect();

    loader.drop_table(&destination).await?;
    loader.create_table(&destination, &rows).await?;

    let metrics = load_batches(
        &loader,
        &destination,
        rows.into_iter().map(Ok::<_, Infallible>),
        10,
        RemainderPolicy::Drop,
    )
    .await?;
    assert_eq!(metrics.batch_count, 2);
    assert_eq!(metrics.dropped_rows, 5);
    assert_eq!(loader.row_count(&destination).await?, 20);

    loader.drop_table(&destination).await?;
    loader.disconnect().await?;
    Ok(())
}
