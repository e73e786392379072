//! Per-day candle file loader.
//!
//! Day files live under one directory per timeframe and are named
//! `<symbol>-candle<tf>-<YYYY-MM-DD>.csv`. Each file carries the OHLCV columns
//! plus housekeeping columns (`volume_ccy`, `volCcyQuote`, `timestamp`) that
//! are not projected into [`Candle`].
//!
//! Two loading modes:
//!
//! - [`CandleLoader::load_days`] returns one table per day in file order. Live
//!   replay consumes these as-is and relies on each day file being sorted.
//! - [`CandleLoader::load_combined`] concatenates every day and sorts by time,
//!   for the static full-range view.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use tracing::{debug, info, warn};

use super::error::LoadError;
use super::parse::{parse_decimal, parse_timestamp};
use crate::domain::market_data::{Candle, DayTable, Timeframe};

/// OHLCV columns every day file must carry.
const VALUE_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// Result of a progressive load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeLoad {
    /// Loaded days, chronological.
    pub days: Vec<DayTable>,
    /// Days in the range whose file was absent.
    pub missing_days: Vec<NaiveDate>,
}

impl RangeLoad {
    /// All candles concatenated in day order, unsorted.
    #[must_use]
    pub fn concat(&self) -> Vec<Candle> {
        self.days
            .iter()
            .flat_map(|d| d.candles.iter().cloned())
            .collect()
    }

    /// Total candle count across days.
    #[must_use]
    pub fn candle_count(&self) -> usize {
        self.days.iter().map(|d| d.candles.len()).sum()
    }
}

/// Loads candle day files for one symbol and timeframe.
#[derive(Debug, Clone)]
pub struct CandleLoader {
    directory: PathBuf,
    symbol: String,
    timeframe: Timeframe,
}

impl CandleLoader {
    /// Create a loader rooted at `directory`.
    pub fn new(
        directory: impl Into<PathBuf>,
        symbol: impl Into<String>,
        timeframe: Timeframe,
    ) -> Self {
        Self {
            directory: directory.into(),
            symbol: symbol.into(),
            timeframe,
        }
    }

    /// Expected path of the file for `date`.
    #[must_use]
    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.directory.join(format!(
            "{}-candle{}-{}.csv",
            self.symbol,
            self.timeframe.tag(),
            date.format("%Y-%m-%d")
        ))
    }

    /// Load every day in `[start, end]`, one table per present file.
    ///
    /// Missing days are logged and skipped. Tables are returned in day order
    /// without re-sorting rows.
    ///
    /// # Errors
    ///
    /// - `LoadError::InvalidDateRange` if `start > end`.
    /// - `LoadError::NoData` if no day in the range has a file.
    /// - Any parse error from a present file.
    pub fn load_days(&self, start: NaiveDate, end: NaiveDate) -> Result<RangeLoad, LoadError> {
        if start > end {
            return Err(LoadError::InvalidDateRange(start, end));
        }

        let mut load = RangeLoad::default();
        let mut current = start;

        while current <= end {
            let path = self.day_path(current);

            if path.exists() {
                info!(timeframe = %self.timeframe, date = %current, "Loading day file");
                let candles = self.read_day(&path)?;
                debug!(date = %current, candles = candles.len(), "Loaded day file");
                load.days.push(DayTable {
                    date: current,
                    candles,
                });
            } else {
                warn!(date = %current, path = %path.display(), "Day file not found, skipping");
                load.missing_days.push(current);
            }

            match current.checked_add_days(Days::new(1)) {
                Some(next) => current = next,
                None => break,
            }
        }

        if load.days.is_empty() {
            return Err(LoadError::NoData {
                start,
                end,
                directory: self.directory.clone(),
            });
        }

        Ok(load)
    }

    /// Load every day in `[start, end]` as one table sorted by time.
    ///
    /// The sort is stable, so rows sharing a timestamp keep file order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_days`].
    pub fn load_combined(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, LoadError> {
        let mut candles = self.load_days(start, end)?.concat();
        candles.sort_by_key(|c| c.time);
        Ok(candles)
    }

    /// Read one day file.
    fn read_day(&self, path: &Path) -> Result<Vec<Candle>, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let csv_err = |source: csv::Error| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let headers = reader.headers().map_err(csv_err)?.clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };

        let time_name = self.timeframe.time_column();
        let time_col = column(time_name)?;
        let mut value_cols = [0usize; 5];
        for (slot, name) in value_cols.iter_mut().zip(VALUE_COLUMNS) {
            *slot = column(name)?;
        }

        let mut candles = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(csv_err)?;
            let row = idx + 1;

            let raw_time = record.get(time_col).unwrap_or_default();
            let time = parse_timestamp(raw_time).ok_or_else(|| LoadError::InvalidTimestamp {
                path: path.to_path_buf(),
                row,
                value: raw_time.to_string(),
            })?;

            let mut values = [rust_decimal::Decimal::ZERO; 5];
            for ((value, &col), name) in values.iter_mut().zip(&value_cols).zip(VALUE_COLUMNS) {
                let raw = record.get(col).unwrap_or_default();
                *value = parse_decimal(raw).ok_or_else(|| LoadError::InvalidNumber {
                    path: path.to_path_buf(),
                    row,
                    column: name.to_string(),
                    value: raw.to_string(),
                })?;
            }

            let [open, high, low, close, volume] = values;
            candles.push(Candle::new(time, open, high, low, close, volume));
        }

        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal_macros::dec;
    use tempfile::{TempDir, tempdir};

    use super::*;

    const SYMBOL: &str = "BTC-USDT-SWAP";
    const HEADER: &str =
        "open,high,low,close,volume,volume_ccy,volCcyQuote,timestamp,timestamp_1m";

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 10, d).unwrap()
    }

    fn write_day(dir: &TempDir, date: NaiveDate, rows: &[String]) {
        let path = dir
            .path()
            .join(format!("{SYMBOL}-candle1m-{}.csv", date.format("%Y-%m-%d")));
        let mut file = File::create(path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
    }

    fn minute_rows(date: NaiveDate, minutes: impl IntoIterator<Item = u32>) -> Vec<String> {
        minutes
            .into_iter()
            .map(|m| {
                format!(
                    "43000.1,43100,42900,43050.5,12.5,0.03,1300.2,1633046400000,{} 00:{m:02}:00+08:00",
                    date.format("%Y-%m-%d")
                )
            })
            .collect()
    }

    fn loader(dir: &TempDir) -> CandleLoader {
        CandleLoader::new(dir.path(), SYMBOL, Timeframe::OneMinute)
    }

    #[test]
    fn day_path_follows_naming_pattern() {
        let loader = CandleLoader::new("/data/1s", SYMBOL, Timeframe::OneSecond);
        assert_eq!(
            loader.day_path(day(1)),
            PathBuf::from("/data/1s/BTC-USDT-SWAP-candle1s-2021-10-01.csv")
        );
    }

    #[test]
    fn loads_consecutive_days_sorted() {
        let dir = tempdir().unwrap();
        for d in 1..=3 {
            write_day(&dir, day(d), &minute_rows(day(d), 0..4));
        }

        let candles = loader(&dir).load_combined(day(1), day(3)).unwrap();

        assert_eq!(candles.len(), 12);
        assert!(candles.windows(2).all(|w| w[0].time <= w[1].time));
        let first = &candles[0];
        assert_eq!(first.time, day(1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(first.open, dec!(43000.1));
        assert_eq!(first.close, dec!(43050.5));
        assert_eq!(first.volume, dec!(12.5));
    }

    #[test]
    fn combined_sorts_unsorted_rows_but_days_do_not() {
        let dir = tempdir().unwrap();
        write_day(&dir, day(1), &minute_rows(day(1), [3, 1, 2]));

        let days = loader(&dir).load_days(day(1), day(1)).unwrap();
        let minutes: Vec<u32> = days.days[0]
            .candles
            .iter()
            .map(|c| chrono::Timelike::minute(&c.time))
            .collect();
        assert_eq!(minutes, vec![3, 1, 2]);

        let combined = loader(&dir).load_combined(day(1), day(1)).unwrap();
        let minutes: Vec<u32> = combined
            .iter()
            .map(|c| chrono::Timelike::minute(&c.time))
            .collect();
        assert_eq!(minutes, vec![1, 2, 3]);
    }

    #[test]
    fn missing_middle_day_is_skipped() {
        let dir = tempdir().unwrap();
        write_day(&dir, day(1), &minute_rows(day(1), 0..2));
        write_day(&dir, day(3), &minute_rows(day(3), 0..2));

        let load = loader(&dir).load_days(day(1), day(3)).unwrap();

        let dates: Vec<NaiveDate> = load.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(1), day(3)]);
        assert_eq!(load.missing_days, vec![day(2)]);
        assert_eq!(load.candle_count(), 4);
    }

    #[test]
    fn all_days_missing_is_no_data() {
        let dir = tempdir().unwrap();
        let result = loader(&dir).load_days(day(1), day(3));
        assert!(matches!(result, Err(LoadError::NoData { .. })));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let dir = tempdir().unwrap();
        let result = loader(&dir).load_days(day(3), day(1));
        assert!(matches!(result, Err(LoadError::InvalidDateRange(_, _))));
    }

    #[test]
    fn missing_time_column_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(format!("{SYMBOL}-candle1s-2021-10-01.csv"));
        let mut file = File::create(path).unwrap();
        writeln!(file, "{HEADER}").unwrap();

        let loader = CandleLoader::new(dir.path(), SYMBOL, Timeframe::OneSecond);
        let result = loader.load_days(day(1), day(1));

        let Err(LoadError::MissingColumn { column, .. }) = result else {
            panic!("expected missing column error");
        };
        assert_eq!(column, "timestamp_1s");
    }

    #[test]
    fn bad_timestamp_reports_row() {
        let dir = tempdir().unwrap();
        let mut rows = minute_rows(day(1), 0..1);
        rows.push("1,1,1,1,1,0,0,0,not-a-time".to_string());
        write_day(&dir, day(1), &rows);

        let result = loader(&dir).load_days(day(1), day(1));

        let Err(LoadError::InvalidTimestamp { row, value, .. }) = result else {
            panic!("expected invalid timestamp error");
        };
        assert_eq!(row, 2);
        assert_eq!(value, "not-a-time");
    }

    #[test]
    fn housekeeping_columns_are_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(format!("{SYMBOL}-candle1m-2021-10-01.csv"));
        let mut file = File::create(path).unwrap();
        writeln!(file, "timestamp_1m,open,high,low,close,volume").unwrap();
        writeln!(file, "2021-10-01 00:00:00,1,2,0.5,1.5,3").unwrap();

        let candles = loader(&dir).load_combined(day(1), day(1)).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].high, dec!(2));
    }
}
