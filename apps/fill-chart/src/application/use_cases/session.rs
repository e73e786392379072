//! Pieces shared by the static and live render use cases.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::application::ports::{ChartError, ChartPort};
use crate::domain::fills::Fill;
use crate::domain::market_data::{Candle, price_range, time_span};
use crate::domain::markers::classify;

/// Render errors.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Live replay needs a seed day plus at least one day to replay.
    #[error("Need at least 2 days of data for live replay, loaded {loaded}")]
    InsufficientDays {
        /// Days actually loaded.
        loaded: usize,
    },

    /// No candles to render.
    #[error("No candles to render")]
    EmptyRange,

    /// Chart failure other than the user closing it.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// How a render session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Everything was shown and the chart was then closed.
    Completed,
    /// The chart was closed before replay finished.
    ClosedByUser,
    /// An interrupt cancelled the session.
    Interrupted,
}

/// Log candle count, time span, and price range.
pub(super) fn log_summary(label: &str, candles: &[Candle]) {
    if let Some((first, last)) = time_span(candles) {
        info!(label, candles = candles.len(), %first, %last, "Time range");
    }
    if let Some((low, high)) = price_range(candles) {
        info!(label, %low, %high, "Price range");
    }
}

/// Draw one marker per fill. Returns how many were drawn.
pub(super) async fn draw_markers<'a, C>(
    chart: &mut C,
    fills: impl IntoIterator<Item = &'a Fill>,
) -> Result<usize, ChartError>
where
    C: ChartPort + ?Sized,
{
    let mut drawn = 0;
    for fill in fills {
        let marker = classify(fill);
        debug!(time = %marker.time, text = %marker.text, "Drawing marker");
        chart.add_marker(&marker).await?;
        drawn += 1;
    }
    Ok(drawn)
}

/// Wait until the chart is closed or the session is cancelled.
pub(super) async fn wait_for_close<C>(
    chart: &mut C,
    cancel: &CancellationToken,
) -> Result<SessionEnd, ChartError>
where
    C: ChartPort + ?Sized,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Ok(SessionEnd::Interrupted),
        closed = chart.wait_closed() => match closed {
            Ok(()) | Err(ChartError::Disposed) => Ok(SessionEnd::Completed),
            Err(e) => Err(e),
        },
    }
}
