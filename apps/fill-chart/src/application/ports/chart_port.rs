//! Chart Port (Driven Port)
//!
//! Interface to the charting surface that candles and markers are drawn on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::market_data::Candle;
use crate::domain::markers::Marker;

/// Chart errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// The surface was closed by the user and can no longer be drawn on.
    #[error("Chart surface disposed")]
    Disposed,

    /// Any other backend failure.
    #[error("Chart backend error: {0}")]
    Backend(String),
}

/// How the chart is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    /// Display and return immediately; drawing continues afterwards.
    NonBlocking,
    /// Display as the final step; the caller waits for close next.
    Blocking,
}

/// Legend configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    /// Whether the legend is shown at all.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Show open/high/low/close values.
    #[serde(default = "default_true")]
    pub ohlc: bool,
    /// Show percent change.
    #[serde(default = "default_true")]
    pub percent: bool,
    /// Color legend text by candle direction.
    #[serde(default = "default_true")]
    pub color_based_on_candle: bool,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            visible: true,
            ohlc: true,
            percent: true,
            color_based_on_candle: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Chart port: the drawing API of a candlestick chart.
///
/// Accessed from a single task. `is_alive` and `ChartError::Disposed` are the
/// two ways a closed surface is reported.
#[async_trait]
pub trait ChartPort: Send {
    /// Replace the displayed candles.
    async fn set_candles(&mut self, candles: &[Candle]) -> Result<(), ChartError>;

    /// Append a candle, or update the latest bar if the time matches.
    async fn update_candle(&mut self, candle: &Candle) -> Result<(), ChartError>;

    /// Overlay a marker.
    async fn add_marker(&mut self, marker: &Marker) -> Result<(), ChartError>;

    /// Configure the legend.
    async fn set_legend(&mut self, legend: &LegendOptions) -> Result<(), ChartError>;

    /// Display the chart.
    async fn show(&mut self, mode: ShowMode) -> Result<(), ChartError>;

    /// Resolve once the surface has been closed.
    async fn wait_closed(&mut self) -> Result<(), ChartError>;

    /// Close the surface and release its resources.
    async fn exit(&mut self) -> Result<(), ChartError>;

    /// Whether the surface is still open.
    fn is_alive(&self) -> bool;

    /// Adapter name for logging.
    fn name(&self) -> &'static str;
}
