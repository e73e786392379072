//! OHLCV candle and series summaries.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV aggregation over a fixed time bucket.
///
/// `time` is a naive timestamp: any timezone present in the source file has
/// been stripped, keeping the wall-clock value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time.
    pub time: NaiveDateTime,
    /// Open price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Close price.
    pub close: Decimal,
    /// Traded volume in contracts.
    pub volume: Decimal,
}

impl Candle {
    /// Create a new candle.
    #[must_use]
    pub const fn new(
        time: NaiveDateTime,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Earliest and latest candle time in a series.
///
/// Uses min/max rather than first/last so unsorted progressive tables still
/// report the true span.
#[must_use]
pub fn time_span(candles: &[Candle]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = candles.first()?.time;
    Some(candles.iter().fold((first, first), |(lo, hi), c| {
        (lo.min(c.time), hi.max(c.time))
    }))
}

/// Lowest low and highest high in a series.
#[must_use]
pub fn price_range(candles: &[Candle]) -> Option<(Decimal, Decimal)> {
    let first = candles.first()?;
    Some(
        candles
            .iter()
            .fold((first.low, first.high), |(lo, hi), c| {
                (lo.min(c.low), hi.max(c.high))
            }),
    )
}

/// Latest candle time in a series.
#[must_use]
pub fn last_time(candles: &[Candle]) -> Option<NaiveDateTime> {
    candles.iter().map(|c| c.time).max()
}
