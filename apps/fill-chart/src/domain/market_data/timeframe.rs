//! Candle timeframe selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Candle bucket size of the stored day files.
///
/// The timeframe picks both the per-file time column and the filename tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    /// One-minute candles.
    #[default]
    #[serde(rename = "1m")]
    OneMinute,
    /// One-second candles.
    #[serde(rename = "1s")]
    OneSecond,
}

impl Timeframe {
    /// Tag used in filenames, e.g. `1m` in `BTC-USDT-SWAP-candle1m-2021-10-01.csv`.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::OneSecond => "1s",
        }
    }

    /// Name of the source column holding the bucket time.
    #[must_use]
    pub const fn time_column(&self) -> &'static str {
        match self {
            Self::OneMinute => "timestamp_1m",
            Self::OneSecond => "timestamp_1s",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_timeframe() {
        assert_eq!(Timeframe::OneMinute.time_column(), "timestamp_1m");
        assert_eq!(Timeframe::OneSecond.time_column(), "timestamp_1s");
    }

    #[test]
    fn display_is_filename_tag() {
        assert_eq!(Timeframe::OneMinute.to_string(), "1m");
        assert_eq!(Timeframe::OneSecond.to_string(), Timeframe::OneSecond.tag());
    }

    #[test]
    fn serde_rejects_unknown_tag() {
        assert!(serde_json::from_str::<Timeframe>("\"5m\"").is_err());
    }

    #[test]
    fn serde_uses_tags() {
        let json = serde_json::to_string(&Timeframe::OneSecond).unwrap();
        assert_eq!(json, "\"1s\"");

        let parsed: Timeframe = serde_json::from_str("\"1m\"").unwrap();
        assert_eq!(parsed, Timeframe::OneMinute);
    }
}
