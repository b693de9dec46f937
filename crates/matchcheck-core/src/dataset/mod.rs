//! In-memory tabular dataset loaded from CSV.
//!
//! The whole file is read at once; the validator assumes the dataset fits in
//! memory. Cells are kept as raw strings and each column gets an inferred
//! storage type.

mod cell;
mod table;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use cell::{is_null, parse_bool, parse_float, parse_int};
pub use table::{Column, ColumnType, Table};

/// Errors while loading the dataset. All of them abort validation.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Missing required file: {}", .0.display())]
    Missing(PathBuf),
    #[error("read dataset {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: line {line} has {found} fields, header has {expected}", .path.display())]
    Ragged {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Load the dataset at `path`. A missing file is a precondition failure.
pub fn load(path: &Path) -> Result<Table, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::Missing(path.to_path_buf()));
    }
    let table = Table::from_csv_path(path)?;
    tracing::info!(
        "loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}
