//! Executed trade fill and its side/role enums.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised when a fill field is outside its declared domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    /// Side was neither BUY nor SELL.
    #[error("Unknown fill side '{0}', expected BUY or SELL")]
    UnknownSide(String),

    /// Role was neither open nor close.
    #[error("Unknown fill role '{0}', expected open or close")]
    UnknownRole(String),

    /// Epoch milliseconds outside the representable range.
    #[error("Fill timestamp {0} ms is out of range")]
    TimestampOutOfRange(i64),
}

/// Fill side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillSide {
    /// Buy fill.
    Buy,
    /// Sell fill.
    Sell,
}

impl fmt::Display for FillSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for FillSide {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("buy") {
            Ok(Self::Buy)
        } else if trimmed.eq_ignore_ascii_case("sell") {
            Ok(Self::Sell)
        } else {
            Err(FillError::UnknownSide(trimmed.to_string()))
        }
    }
}

/// Whether a fill opens or closes a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRole {
    /// Opening fill.
    Open,
    /// Closing fill.
    Close,
}

impl fmt::Display for FillRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
        }
    }
}

impl FromStr for FillRole {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("open") {
            Ok(Self::Open)
        } else if trimmed.eq_ignore_ascii_case("close") {
            Ok(Self::Close)
        } else {
            Err(FillError::UnknownRole(trimmed.to_string()))
        }
    }
}

/// One executed order fill from the trade log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Fill time as naive UTC, derived from `ts_millis`.
    pub time: NaiveDateTime,
    /// Raw epoch milliseconds from the log.
    pub ts_millis: i64,
    /// Buy or sell.
    pub side: FillSide,
    /// Open or close.
    pub role: FillRole,
    /// Filled quantity.
    pub qty: Decimal,
    /// Fill price.
    pub price: Decimal,
    /// Free-form label, e.g. the exit reason.
    pub tag: String,
}

impl Fill {
    /// Build a fill from epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `FillError::TimestampOutOfRange` if `ts_millis` cannot be
    /// represented as a date-time.
    pub fn from_millis(
        ts_millis: i64,
        side: FillSide,
        role: FillRole,
        qty: Decimal,
        price: Decimal,
        tag: impl Into<String>,
    ) -> Result<Self, FillError> {
        let time = DateTime::from_timestamp_millis(ts_millis)
            .ok_or(FillError::TimestampOutOfRange(ts_millis))?
            .naive_utc();

        Ok(Self {
            time,
            ts_millis,
            side,
            role,
            qty,
            price,
            tag: tag.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn side_parse_is_case_insensitive() {
        assert_eq!("BUY".parse::<FillSide>(), Ok(FillSide::Buy));
        assert_eq!("sell".parse::<FillSide>(), Ok(FillSide::Sell));
        assert_eq!(
            "HOLD".parse::<FillSide>(),
            Err(FillError::UnknownSide("HOLD".to_string()))
        );
    }

    #[test]
    fn role_parse_rejects_unknown() {
        assert_eq!(" open ".parse::<FillRole>(), Ok(FillRole::Open));
        assert_eq!("CLOSE".parse::<FillRole>(), Ok(FillRole::Close));
        assert!(matches!(
            "reduce".parse::<FillRole>(),
            Err(FillError::UnknownRole(_))
        ));
    }

    #[test]
    fn display_matches_log_spelling() {
        assert_eq!(FillSide::Buy.to_string(), "BUY");
        assert_eq!(FillRole::Close.to_string(), "close");
    }

    #[test]
    fn from_millis_is_naive_utc() {
        // 2021-10-01T00:00:00Z
        let fill = Fill::from_millis(
            1_633_046_400_000,
            FillSide::Buy,
            FillRole::Open,
            dec!(1),
            dec!(43000),
            "",
        )
        .unwrap();

        let expected = NaiveDate::from_ymd_opt(2021, 10, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(fill.time, expected);
        assert_eq!(fill.ts_millis, 1_633_046_400_000);
    }

    #[test]
    fn from_millis_rejects_out_of_range() {
        let result = Fill::from_millis(
            i64::MAX,
            FillSide::Sell,
            FillRole::Close,
            dec!(1),
            dec!(1),
            "tp",
        );
        assert_eq!(result, Err(FillError::TimestampOutOfRange(i64::MAX)));
    }
}
