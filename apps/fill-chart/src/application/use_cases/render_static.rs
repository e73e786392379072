//! Render Static Use Case
//!
//! Shows a whole date range at once with trade markers overlaid.

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::session::{ReplayError, SessionEnd, draw_markers, log_summary, wait_for_close};
use crate::application::ports::{ChartPort, LegendOptions, ShowMode};
use crate::domain::fills::{Fill, filter_fills};
use crate::domain::market_data::{Candle, time_span};

/// Result of a static render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticOutcome {
    /// Candles set on the chart.
    pub candles: usize,
    /// Markers drawn.
    pub markers_drawn: usize,
    /// How the session ended.
    pub end: SessionEnd,
}

/// Use case for rendering a full range in one pass.
pub struct RenderStaticUseCase<'a, C: ChartPort> {
    chart: &'a mut C,
    legend: LegendOptions,
    cancel: CancellationToken,
}

impl<'a, C: ChartPort> RenderStaticUseCase<'a, C> {
    /// Create a new `RenderStaticUseCase`.
    pub const fn new(chart: &'a mut C, legend: LegendOptions, cancel: CancellationToken) -> Self {
        Self {
            chart,
            legend,
            cancel,
        }
    }

    /// Render `candles` (already sorted) with markers for `fills` inside
    /// their time span, then block until the chart is closed.
    ///
    /// # Errors
    ///
    /// `ReplayError::EmptyRange` for no candles, or any chart failure.
    pub async fn execute(
        &mut self,
        candles: &[Candle],
        fills: &[Fill],
    ) -> Result<StaticOutcome, ReplayError> {
        let (start, end) = time_span(candles).ok_or(ReplayError::EmptyRange)?;
        log_summary("all", candles);

        self.chart.set_candles(candles).await?;

        let in_range = filter_fills(fills, start, end);
        info!(total = fills.len(), in_range = in_range.len(), "Trades within data range");
        let markers_drawn = draw_markers(&mut *self.chart, &in_range).await?;

        self.chart.set_legend(&self.legend).await?;
        self.chart.show(ShowMode::Blocking).await?;
        info!(chart = self.chart.name(), "Chart shown, waiting for close");

        let end = wait_for_close(&mut *self.chart, &self.cancel).await?;

        Ok(StaticOutcome {
            candles: candles.len(),
            markers_drawn,
            end,
        })
    }
}
