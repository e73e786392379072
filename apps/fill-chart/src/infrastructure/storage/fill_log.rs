//! Trade fill log reader.
//!
//! The log is a CSV with columns `ts` (epoch milliseconds), `side`, `role`,
//! `qty`, `price`, `tag`. Other columns are ignored.

use std::fs::File;
use std::path::Path;

use tracing::{info, warn};

use super::error::FillLogError;
use super::parse::{parse_decimal, parse_millis};
use crate::domain::fills::{Fill, FillError, FillRole, FillSide};

/// Columns the log must carry. `tag` is optional.
const REQUIRED_COLUMNS: [&str; 5] = ["ts", "side", "role", "qty", "price"];

/// Parsed fill log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillLog {
    /// Accepted fills in log order.
    pub fills: Vec<Fill>,
    /// Rows dropped because side or role was outside its domain.
    pub rejected: usize,
}

/// Read the fill log at `path`.
///
/// Rows whose side or role is not one of the declared values are logged and
/// dropped; they never fall through to a default marker.
///
/// # Errors
///
/// Returns a `FillLogError` if the file cannot be read, a required column is
/// missing, or a numeric cell does not parse.
pub fn read_fill_log(path: &Path) -> Result<FillLog, FillLogError> {
    let file = File::open(path).map_err(|source| FillLogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source: csv::Error| FillLogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let find = |name: &str| headers.iter().position(|h| h == name);

    let mut cols = [0usize; 5];
    for (slot, name) in cols.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = find(name).ok_or_else(|| FillLogError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })?;
    }
    let [ts_col, side_col, role_col, qty_col, price_col] = cols;
    let tag_col = find("tag");

    let mut log = FillLog::default();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let row = idx + 1;
        let cell = |col: usize| record.get(col).unwrap_or_default();
        let invalid = |column: &str, value: &str| FillLogError::InvalidNumber {
            path: path.to_path_buf(),
            row,
            column: column.to_string(),
            value: value.to_string(),
        };

        let ts = parse_millis(cell(ts_col)).ok_or_else(|| invalid("ts", cell(ts_col)))?;
        let qty = parse_decimal(cell(qty_col)).ok_or_else(|| invalid("qty", cell(qty_col)))?;
        let price =
            parse_decimal(cell(price_col)).ok_or_else(|| invalid("price", cell(price_col)))?;
        let tag = tag_col.map(cell).unwrap_or_default();

        let parsed = cell(side_col)
            .parse::<FillSide>()
            .and_then(|side| Ok((side, cell(role_col).parse::<FillRole>()?)))
            .and_then(|(side, role)| Fill::from_millis(ts, side, role, qty, price, tag));

        match parsed {
            Ok(fill) => log.fills.push(fill),
            Err(e @ (FillError::UnknownSide(_) | FillError::UnknownRole(_))) => {
                warn!(row, error = %e, "Rejecting fill row");
                log.rejected += 1;
            }
            Err(FillError::TimestampOutOfRange(_)) => return Err(invalid("ts", cell(ts_col))),
        }
    }

    info!(
        path = %path.display(),
        fills = log.fills.len(),
        rejected = log.rejected,
        "Loaded fill log"
    );

    Ok(log)
}
