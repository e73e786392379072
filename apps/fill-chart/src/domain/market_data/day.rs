//! One calendar day of candles.

use chrono::NaiveDate;

use super::Candle;

/// Candles from one day file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTable {
    /// Calendar day the file covers.
    pub date: NaiveDate,
    /// Rows in file order.
    pub candles: Vec<Candle>,
}
