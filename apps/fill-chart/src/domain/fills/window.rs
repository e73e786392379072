//! Time-window selection over a fill log.

use chrono::NaiveDateTime;

use super::Fill;

/// Fills with `start <= time <= end`, preserving log order.
#[must_use]
pub fn filter_fills(fills: &[Fill], start: NaiveDateTime, end: NaiveDateTime) -> Vec<Fill> {
    fills
        .iter()
        .filter(|f| f.time >= start && f.time <= end)
        .cloned()
        .collect()
}

/// Split fills at `boundary` into `(time <= boundary, time > boundary)`.
///
/// The first half is already visible on a chart seeded up to `boundary`; the
/// second half arrives during replay.
#[must_use]
pub fn split_at(fills: &[Fill], boundary: NaiveDateTime) -> (Vec<Fill>, Vec<Fill>) {
    fills.iter().cloned().partition(|f| f.time <= boundary)
}

/// Fills whose time equals `time` exactly.
pub fn fills_at(fills: &[Fill], time: NaiveDateTime) -> impl Iterator<Item = &Fill> {
    fills.iter().filter(move |f| f.time == time)
}
