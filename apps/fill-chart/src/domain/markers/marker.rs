//! Chart marker value objects.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Vertical placement of a marker relative to its candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPosition {
    /// Above the candle high.
    Above,
    /// Below the candle low.
    Below,
}

/// Glyph drawn for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    /// Upward arrow.
    ArrowUp,
    /// Downward arrow.
    ArrowDown,
    /// Filled circle.
    Circle,
}

/// How a fill is drawn: everything except its time and label values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerStyle {
    /// Placement relative to the candle.
    pub position: MarkerPosition,
    /// Glyph.
    pub shape: MarkerShape,
    /// RGB hex color, e.g. `#26a69a`.
    pub color: &'static str,
    /// Label prefix, e.g. `LONG`. Exit styles append the fill tag.
    pub prefix: &'static str,
    /// Whether the fill tag follows the prefix.
    pub tagged: bool,
}

/// Visual annotation placed on the chart at a candle time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Candle time the marker attaches to.
    pub time: NaiveDateTime,
    /// Placement relative to the candle.
    pub position: MarkerPosition,
    /// Glyph.
    pub shape: MarkerShape,
    /// RGB hex color.
    pub color: String,
    /// Human-readable label.
    pub text: String,
}
