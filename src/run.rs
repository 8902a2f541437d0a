//! Command runners.

use anyhow::Context;
use load_mongodb::MongoDBLoader;
use load_mysql::MySQLLoader;
use load_postgresql::PostgreSQLLoader;
use seed_load::{FixtureKind, LoadMetrics};

use crate::logging::mask_connection_password;
use crate::plan::{DatasetPlan, FixturePlan};
use crate::{DatasetTarget, LoadTarget};

/// Run the load command: insert a fixture into one store.
pub async fn run_load(target: LoadTarget) -> anyhow::Result<()> {
    match target {
        LoadTarget::MongoDB { connection, common } => {
            let plan = FixturePlan::prepare(&common)?;
            let masked = mask_connection_password(&connection.mongodb_connection_string);

            if common.dry_run {
                log_fixture_dry_run("MongoDB", &masked, &plan);
                return Ok(());
            }

            tracing::info!(
                "Loading {:?} fixture into MongoDB at {} (database {})",
                plan.fixture,
                masked,
                connection.mongodb_database
            );
            let loader = MongoDBLoader::new(
                &connection.mongodb_connection_string,
                &connection.mongodb_database,
            )
            .await
            .context("Failed to connect to MongoDB")?;

            let metrics = plan.execute(&loader).await?;
            log_metrics(&plan.destination.to_string(), &metrics);
        }
        LoadTarget::PostgreSQL { connection, common } => {
            let plan = FixturePlan::prepare(&common)?;
            let masked = mask_connection_password(&connection.postgresql_connection_string);

            if common.dry_run {
                log_fixture_dry_run("PostgreSQL", &masked, &plan);
                return Ok(());
            }

            tracing::info!("Loading {:?} fixture into PostgreSQL at {}", plan.fixture, masked);
            let loader = PostgreSQLLoader::new(&connection.postgresql_connection_string)
                .await
                .context("Failed to connect to PostgreSQL")?;

            if common.create_table {
                loader
                    .create_table(&plan.destination, &plan.records)
                    .await
                    .with_context(|| format!("Failed to create table '{}'", plan.destination))?;
            }

            let metrics = plan.execute(&loader).await?;
            log_metrics(&plan.destination.to_string(), &metrics);
            if plan.is_single_record() {
                println!("ok");
            }
        }
        LoadTarget::MySQL { connection, common } => {
            let plan = FixturePlan::prepare(&common)?;
            let masked = mask_connection_password(&connection.mysql_connection_string);

            if common.dry_run {
                log_fixture_dry_run("MySQL", &masked, &plan);
                return Ok(());
            }

            tracing::info!("Loading {:?} fixture into MySQL at {}", plan.fixture, masked);
            let loader = MySQLLoader::new(&connection.mysql_connection_string)
                .await
                .context("Failed to connect to MySQL")?;

            if common.create_table {
                loader
                    .create_table(&plan.destination, &plan.records)
                    .await
                    .with_context(|| format!("Failed to create table '{}'", plan.destination))?;
            }

            let metrics = plan.execute(&loader).await?;
            log_metrics(&plan.destination.to_string(), &metrics);
            loader
                .disconnect()
                .await
                .context("Failed to close MySQL connection")?;
            if plan.is_single_record() {
                println!("ok");
            }
        }
    }

    Ok(())
}

/// Run the load-dataset command: batch a tabular directory into one store.
pub async fn run_load_dataset(target: DatasetTarget) -> anyhow::Result<()> {
    match target {
        DatasetTarget::MongoDB {
            connection,
            dataset,
        } => {
            let plan = DatasetPlan::prepare(&dataset)?;
            let masked = mask_connection_password(&connection.mongodb_connection_string);

            if dataset.dry_run {
                log_dataset_dry_run("MongoDB", &masked, &plan);
                return Ok(());
            }

            let loader = MongoDBLoader::new(
                &connection.mongodb_connection_string,
                &connection.mongodb_database,
            )
            .await
            .context("Failed to connect to MongoDB")?;

            let metrics = plan.execute(&loader).await?;
            log_metrics(&plan.destination.to_string(), &metrics);
        }
        DatasetTarget::PostgreSQL {
            connection,
            dataset,
        } => {
            let plan = DatasetPlan::prepare(&dataset)?;
            let masked = mask_connection_password(&connection.postgresql_connection_string);

            if dataset.dry_run {
                log_dataset_dry_run("PostgreSQL", &masked, &plan);
                return Ok(());
            }

            let loader = PostgreSQLLoader::new(&connection.postgresql_connection_string)
                .await
                .context("Failed to connect to PostgreSQL")?;

            if dataset.create_table {
                loader
                    .create_table(&plan.destination, &plan.sample()?)
                    .await
                    .with_context(|| format!("Failed to create table '{}'", plan.destination))?;
            }

            let metrics = plan.execute(&loader).await?;
            log_metrics(&plan.destination.to_string(), &metrics);
        }
        DatasetTarget::MySQL {
            connection,
            dataset,
        } => {
            let plan = DatasetPlan::prepare(&dataset)?;
            let masked = mask_connection_password(&connection.mysql_connection_string);

            if dataset.dry_run {
                log_dataset_dry_run("MySQL", &masked, &plan);
                return Ok(());
            }

            let loader = MySQLLoader::new(&connection.mysql_connection_string)
                .await
                .context("Failed to connect to MySQL")?;

            if dataset.create_table {
                loader
                    .create_table(&plan.destination, &plan.sample()?)
                    .await
                    .with_context(|| format!("Failed to create table '{}'", plan.destination))?;
            }

            let metrics = plan.execute(&loader).await?;
            log_metrics(&plan.destination.to_string(), &metrics);
            loader
                .disconnect()
                .await
                .context("Failed to close MySQL connection")?;
        }
    }

    Ok(())
}

/// Run the show command: print a fixture as pretty JSON.
pub fn run_show(fixture: FixtureKind) -> anyhow::Result<()> {
    let json = match fixture {
        FixtureKind::Scalar => serde_json::to_string_pretty(&fixture_generator::build_scalar_fixture()),
        FixtureKind::Drift => serde_json::to_string_pretty(&fixture_generator::build_drift_fixture_set()),
    }
    .context("Failed to serialize fixture")?;
    println!("{json}");
    Ok(())
}

fn log_fixture_dry_run(store: &str, connection: &str, plan: &FixturePlan) {
    tracing::info!(
        "[DRY-RUN] Would load {:?} fixture ({} records, {} repetitions) into {} '{}'",
        plan.fixture,
        plan.records.len(),
        plan.repetitions,
        store,
        plan.destination
    );
    tracing::info!("[DRY-RUN] Connection: {}", connection);
}

fn log_dataset_dry_run(store: &str, connection: &str, plan: &DatasetPlan) {
    tracing::info!(
        "[DRY-RUN] Would load {} files from {} into {} '{}' (batch size {}, remainder {:?})",
        plan.dataset.files().len(),
        plan.dataset.dir().display(),
        store,
        plan.destination,
        plan.batch_size,
        plan.remainder
    );
    tracing::info!("[DRY-RUN] Connection: {}", connection);
}

fn log_metrics(destination: &str, metrics: &LoadMetrics) {
    tracing::info!(
        "Loaded {}: {} rows in {} statements ({} dropped), {:?} ({:.0} rows/s)",
        destination,
        metrics.rows_inserted,
        metrics.insert_count,
        metrics.dropped_rows,
        metrics.total_duration,
        metrics.rows_per_second()
    );
}
