//! CSV files: first line is the header.

use crate::error::TabularError;
use seed_core::{Record, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Open a CSV file and iterate its rows.
pub fn csv_rows(
    path: &Path,
) -> Result<impl Iterator<Item = Result<Record, TabularError>>, TabularError> {
    let csv_error = |source| TabularError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut seen = HashSet::new();
    if let Some(column) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(TabularError::DuplicateHeader {
            path: path.to_path_buf(),
            column: column.clone(),
        });
    }

    let path: PathBuf = path.to_path_buf();
    Ok(reader.into_records().map(move |row| {
        let row = row.map_err(|source| TabularError::Csv {
            path: path.clone(),
            source,
        })?;
        Ok(headers
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| (column.clone(), parse_cell(cell)))
            .collect())
    }))
}

/// Integer, then float, then bool; empty is null and the rest is text.
pub fn parse_cell(cell: &str) -> Value {
    if cell.is_empty() {
        Value::Null
    } else if let Ok(n) = cell.parse::<i64>() {
        Value::Int(n)
    } else if let Ok(f) = cell.parse::<f64>() {
        Value::Float64(f)
    } else if let Ok(b) = cell.parse::<bool>() {
        Value::Bool(b)
    } else {
        Value::Text(cell.to_string())
    }
}
