//! Spreadsheet ingestion
//!
//! Loads tabular data (CSV) into a [`DataTable`] and turns a selected column
//! into the plain `Vec<f64>` sample the statistics engine works on. Cells
//! that do not hold a finite number are dropped at this boundary, so
//! [`crate::stats`] never sees malformed input.

pub mod summary;
pub mod table;

use std::path::PathBuf;
use thiserror::Error;

pub use summary::{ColumnSummary, TrendPoint, DEFAULT_TREND_LIMIT};
pub use table::{Cell, DataTable};

/// Errors raised while loading or querying tabular data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("File has no header row")]
    NoHeader,

    #[error("Unknown column '{name}' (available: {available})")]
    UnknownColumn { name: String, available: String },

    #[error("Column '{0}' contains no numeric values")]
    NoNumericValues(String),
}
