//! INSERT logic for MySQL.

use crate::error::MySQLLoaderError;
use mysql_async::{prelude::*, Conn, Params, Value};
use mysql_types::{MySQLDdl, MySQLValue};
use seed_core::{flatten_record, Destination, FlatRow, Record};

const MAX_PARAMETERS: usize = u16::MAX as usize;

/// Flatten records for insertion.
pub fn flatten_records(records: &[Record]) -> Result<Vec<FlatRow>, MySQLLoaderError> {
    records
        .iter()
        .map(|record| flatten_record(record).map_err(MySQLLoaderError::from))
        .collect()
}

/// Column list shared by every row.
pub fn shared_columns(rows: &[FlatRow]) -> Result<&[String], MySQLLoaderError> {
    let Some(first) = rows.first() else {
        return Ok(&[]);
    };
    let expected = first.columns();
    if expected.is_empty() {
        return Err(MySQLLoaderError::NoColumns);
    }

    for (row, flat) in rows.iter().enumerate().skip(1) {
        if flat.columns() != expected {
            return Err(MySQLLoaderError::ColumnMismatch {
                row,
                expected: expected.to_vec(),
                found: flat.columns().to_vec(),
            });
        }
    }

    let count = expected.len() * rows.len();
    if count > MAX_PARAMETERS {
        return Err(MySQLLoaderError::TooManyParameters { count });
    }
    Ok(expected)
}

/// Positional parameters, row by row.
pub fn positional_params(rows: &[FlatRow]) -> Vec<Value> {
    rows.iter()
        .flat_map(FlatRow::values)
        .map(|value| MySQLValue::from(value).into_inner())
        .collect()
}

/// Insert flat rows with a single statement.
pub async fn insert_rows(
    conn: &mut Conn,
    destination: &Destination,
    rows: &[FlatRow],
) -> Result<u64, MySQLLoaderError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let columns = shared_columns(rows)?;
    let sql = MySQLDdl.to_insert(destination, columns, rows.len());
    let params = positional_params(rows);

    // Execute the INSERT
    conn.exec_drop(&sql, Params::Positional(params)).await?;

    Ok(conn.affected_rows())
}
