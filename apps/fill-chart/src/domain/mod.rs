//! Domain layer: candles, fills, and the markers derived from fills.
//!
//! Pure data and functions. No I/O.

pub mod fills;
pub mod market_data;
pub mod markers;
