//! Market data: candles and the timeframes they are stored in.

mod candle;
mod day;
mod timeframe;

pub use candle::{Candle, last_time, price_range, time_span};
pub use day::DayTable;
pub use timeframe::Timeframe;
