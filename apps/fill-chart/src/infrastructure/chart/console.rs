//! Console chart adapter.
//!
//! Renders draw calls as structured log lines. Liveness is driven through a
//! cloneable [`CloseHandle`], so whoever owns the surface lifecycle can close
//! it from outside the replay loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::application::ports::{ChartError, ChartPort, LegendOptions, ShowMode};
use crate::domain::market_data::{Candle, price_range, time_span};
use crate::domain::markers::Marker;

/// Shared close flag for a console chart.
#[derive(Debug, Clone, Default)]
pub struct CloseHandle {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CloseHandle {
    /// Mark the surface closed and wake any waiter.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Whether the surface has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Chart that logs every draw call.
#[derive(Debug)]
pub struct ConsoleChart {
    handle: CloseHandle,
    toolbox: bool,
    hold_open: bool,
    candles: usize,
    markers: usize,
}

impl ConsoleChart {
    /// Create a console chart.
    ///
    /// With `hold_open`, `wait_closed` blocks until the handle is closed;
    /// otherwise it closes the surface and returns immediately.
    #[must_use]
    pub fn new(toolbox: bool, hold_open: bool) -> Self {
        Self {
            handle: CloseHandle::default(),
            toolbox,
            hold_open,
            candles: 0,
            markers: 0,
        }
    }

    /// Handle that closes this chart.
    #[must_use]
    pub fn close_handle(&self) -> CloseHandle {
        self.handle.clone()
    }

    fn ensure_open(&self) -> Result<(), ChartError> {
        if self.handle.is_closed() {
            Err(ChartError::Disposed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChartPort for ConsoleChart {
    async fn set_candles(&mut self, candles: &[Candle]) -> Result<(), ChartError> {
        self.ensure_open()?;
        self.candles = candles.len();

        let span = time_span(candles);
        let range = price_range(candles);
        info!(
            candles = candles.len(),
            first = ?span.map(|(lo, _)| lo),
            last = ?span.map(|(_, hi)| hi),
            low = ?range.map(|(lo, _)| lo),
            high = ?range.map(|(_, hi)| hi),
            "Chart data set"
        );
        Ok(())
    }

    async fn update_candle(&mut self, candle: &Candle) -> Result<(), ChartError> {
        self.ensure_open()?;
        self.candles += 1;

        debug!(
            time = %candle.time,
            open = %candle.open,
            high = %candle.high,
            low = %candle.low,
            close = %candle.close,
            volume = %candle.volume,
            "Candle update"
        );
        Ok(())
    }

    async fn add_marker(&mut self, marker: &Marker) -> Result<(), ChartError> {
        self.ensure_open()?;
        self.markers += 1;

        let payload =
            serde_json::to_string(marker).map_err(|e| ChartError::Backend(e.to_string()))?;
        info!(marker = %payload, "Marker added");
        Ok(())
    }

    async fn set_legend(&mut self, legend: &LegendOptions) -> Result<(), ChartError> {
        self.ensure_open()?;
        debug!(?legend, "Legend configured");
        Ok(())
    }

    async fn show(&mut self, mode: ShowMode) -> Result<(), ChartError> {
        self.ensure_open()?;
        info!(
            ?mode,
            toolbox = self.toolbox,
            candles = self.candles,
            markers = self.markers,
            "Chart shown"
        );
        Ok(())
    }

    async fn wait_closed(&mut self) -> Result<(), ChartError> {
        if !self.hold_open {
            self.handle.close();
            return Ok(());
        }

        loop {
            let notified = self.handle.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.handle.is_closed() {
                return Ok(());
            }
            notified.await;
        }
    }

    async fn exit(&mut self) -> Result<(), ChartError> {
        self.handle.close();
        info!(
            candles = self.candles,
            markers = self.markers,
            "Chart closed"
        );
        Ok(())
    }

    fn is_alive(&self) -> bool {
        !self.handle.is_closed()
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
