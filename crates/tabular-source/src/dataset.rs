//! A dataset directory and its lazy row iterator.

use crate::csv::csv_rows;
use crate::error::TabularError;
use crate::parquet::parquet_rows;
use seed_core::Record;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Parquet,
    Csv,
}

impl FileFormat {
    /// Format for a file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("parquet") {
            Some(Self::Parquet)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularFile {
    pub path: PathBuf,
    pub format: FileFormat,
}

/// The readable files of one directory, sorted by file name.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    dir: PathBuf,
    files: Vec<TabularFile>,
}

impl TabularDataset {
    /// List `dir`. Files that are neither Parquet nor CSV are skipped.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, TabularError> {
        let dir = dir.as_ref().to_path_buf();
        let io_error = |source| TabularError::Io {
            path: dir.clone(),
            source,
        };

        if !dir.is_dir() {
            if dir.exists() {
                return Err(TabularError::NotADirectory(dir));
            }
            return Err(io_error(std::io::Error::from(std::io::ErrorKind::NotFound)));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path.is_file() {
                continue;
            }
            match FileFormat::from_path(&path) {
                Some(format) => files.push(TabularFile { path, format }),
                None => debug!("Skipping {}", path.display()),
            }
        }
        files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

        info!("Found {} data files in {}", files.len(), dir.display());
        Ok(Self { dir, files })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[TabularFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Rows of every file in order. Nothing is read until iteration starts.
    pub fn rows(&self) -> Rows {
        Rows {
            pending: self.files.iter().cloned().collect(),
            current: None,
        }
    }
}

type RowSource = Box<dyn Iterator<Item = Result<Record, TabularError>>>;

/// Iterator over the rows of a [`TabularDataset`].
pub struct Rows {
    pending: VecDeque<TabularFile>,
    current: Option<RowSource>,
}

impl Rows {
    fn open_next(&mut self) -> Option<Result<(), TabularError>> {
        let file = self.pending.pop_front()?;
        debug!("Reading {}", file.path.display());
        let opened: Result<RowSource, TabularError> = match file.format {
            FileFormat::Parquet => parquet_rows(&file.path).map(|rows| Box::new(rows) as RowSource),
            FileFormat::Csv => csv_rows(&file.path).map(|rows| Box::new(rows) as RowSource),
        };
        Some(opened.map(|rows| self.current = Some(rows)))
    }
}

impl Iterator for Rows {
    type Item = Result<Record, TabularError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(rows) = self.current.as_mut() {
                match rows.next() {
                    Some(row) => return Some(row),
                    None => self.current = None,
                }
            }
            match self.open_next()? {
                Ok(()) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
