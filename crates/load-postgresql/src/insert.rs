//! INSERT logic for PostgreSQL.

use crate::error::{PostgreSQLLoaderError, MAX_PARAMETERS};
use postgresql_types::{bind_value, PostgreSQLDdl};
use seed_core::{flatten_record, Destination, FlatRow, Record};
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::Client;

/// Flatten records for insertion.
pub fn flatten_records(records: &[Record]) -> Result<Vec<FlatRow>, PostgreSQLLoaderError> {
    records
        .iter()
        .map(|record| flatten_record(record).map_err(PostgreSQLLoaderError::from))
        .collect()
}

/// Column list shared by every row.
pub fn shared_columns(rows: &[FlatRow]) -> Result<&[String], PostgreSQLLoaderError> {
    let Some(first) = rows.first() else {
        return Ok(&[]);
    };
    let expected = first.columns();
    if expected.is_empty() {
        return Err(PostgreSQLLoaderError::NoColumns);
    }

    for (row, flat) in rows.iter().enumerate().skip(1) {
        if flat.columns() != expected {
            return Err(PostgreSQLLoaderError::ColumnMismatch {
                row,
                expected: expected.to_vec(),
                found: flat.columns().to_vec(),
            });
        }
    }

    let count = expected.len() * rows.len();
    if count > MAX_PARAMETERS {
        return Err(PostgreSQLLoaderError::TooManyParameters { count });
    }
    Ok(expected)
}

/// Bind every value of every row against the declared parameter types.
///
/// `types` is in placeholder order, row by row.
pub fn bind_params(
    rows: &[FlatRow],
    types: &[Type],
) -> Result<Vec<Box<dyn ToSql + Sync + Send>>, PostgreSQLLoaderError> {
    let bound: usize = rows.iter().map(FlatRow::len).sum();
    if bound != types.len() {
        return Err(PostgreSQLLoaderError::ParameterCount {
            declared: types.len(),
            bound,
        });
    }

    let mut params: Vec<Box<dyn ToSql + Sync + Send>> = Vec::with_capacity(bound);
    let values = rows.iter().flat_map(FlatRow::pairs);
    for ((column, value), target) in values.zip(types) {
        params.push(bind_value(column, value, target)?.into_boxed());
    }
    Ok(params)
}

/// Insert flat rows with a single prepared statement.
pub async fn insert_rows(
    client: &Client,
    destination: &Destination,
    rows: &[FlatRow],
) -> Result<u64, PostgreSQLLoaderError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let columns = shared_columns(rows)?;
    let sql = PostgreSQLDdl.to_insert(destination, columns, rows.len());
    let statement = client.prepare(&sql).await?;

    let params = bind_params(rows, statement.params())?;

    // Convert to references for execution
    let param_refs: Vec<&(dyn ToSql + Sync)> = params
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect();

    let inserted = client.execute(&statement, &param_refs).await?;
    Ok(inserted)
}
