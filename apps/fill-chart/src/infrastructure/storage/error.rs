//! Storage error types.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Candle day-file loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No day in the range had a file.
    #[error("No data files found in {directory} for {start}..={end}")]
    NoData {
        /// First requested day.
        start: NaiveDate,
        /// Last requested day.
        end: NaiveDate,
        /// Directory searched.
        directory: PathBuf,
    },

    /// Start date after end date.
    #[error("Invalid date range: start {0} > end {1}")]
    InvalidDateRange(NaiveDate, NaiveDate),

    /// IO error reading a day file.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being read.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// Required column absent from the header.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn {
        /// File being read.
        path: PathBuf,
        /// Column name.
        column: String,
    },

    /// Time value that no supported format accepts.
    #[error("Invalid timestamp '{value}' at row {row} of {path}")]
    InvalidTimestamp {
        /// File being read.
        path: PathBuf,
        /// 1-based data row.
        row: usize,
        /// Raw cell text.
        value: String,
    },

    /// Non-numeric price or volume.
    #[error("Invalid number '{value}' in column '{column}' at row {row} of {path}")]
    InvalidNumber {
        /// File being read.
        path: PathBuf,
        /// 1-based data row.
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell text.
        value: String,
    },
}

/// Fill log reading errors.
#[derive(Debug, Error)]
pub enum FillLogError {
    /// IO error opening the log.
    #[error("IO error reading fill log {path}: {source}")]
    Io {
        /// Log path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error in fill log {path}: {source}")]
    Csv {
        /// Log path.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// Required column absent from the header.
    #[error("Missing column '{column}' in fill log {path}")]
    MissingColumn {
        /// Log path.
        path: PathBuf,
        /// Column name.
        column: String,
    },

    /// Non-numeric ts, qty, or price.
    #[error("Invalid number '{value}' in column '{column}' at row {row} of fill log {path}")]
    InvalidNumber {
        /// Log path.
        path: PathBuf,
        /// 1-based data row.
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell text.
        value: String,
    },
}
