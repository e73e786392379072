//! Data source configuration: candle directory, date range, fill log.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::market_data::Timeframe;

/// Candle day-file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding `<symbol>-candle<tf>-<date>.csv` files.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Instrument symbol used in filenames.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Candle timeframe.
    #[serde(default)]
    pub timeframe: Timeframe,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            symbol: default_symbol(),
            timeframe: Timeframe::default(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./Data/Storage/BTCUSDTSWAP_candle1m/")
}

fn default_symbol() -> String {
    "BTC-USDT-SWAP".to_string()
}

/// Inclusive calendar-day range to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConfig {
    /// First day.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Last day.
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            end_date: default_end_date(),
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 10, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 10, 2).unwrap_or_default()
}

/// Trade fill log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillsConfig {
    /// Path to the fill CSV. `None` draws candles only.
    #[serde(default = "default_fills_path")]
    pub path: Option<PathBuf>,
}

impl Default for FillsConfig {
    fn default() -> Self {
        Self {
            path: default_fills_path(),
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_fills_path() -> Option<PathBuf> {
    Some(PathBuf::from("./fill_historys.csv"))
}
