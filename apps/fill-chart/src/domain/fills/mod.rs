//! Trade fills and window selection over the fill log.

mod fill;
mod window;

pub use fill::{Fill, FillError, FillRole, FillSide};
pub use window::{filter_fills, fills_at, split_at};
