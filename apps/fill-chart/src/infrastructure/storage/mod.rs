//! CSV-backed storage: candle day files and the fill log.

mod candle_loader;
mod error;
mod fill_log;
mod parse;

pub use candle_loader::{CandleLoader, RangeLoad};
pub use error::{FillLogError, LoadError};
pub use fill_log::{FillLog, read_fill_log};
pub use parse::{parse_decimal, parse_timestamp};
