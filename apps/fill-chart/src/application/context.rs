//! Application context.
//!
//! Owns the chart surface and the cancellation token that interrupts a
//! running session. Teardown is explicit: call [`AppContext::teardown`]
//! once the session has ended, however it ended.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::ports::ChartPort;

/// Chart plus session cancellation.
pub struct AppContext<C: ChartPort> {
    chart: C,
    cancel: CancellationToken,
}

impl<C: ChartPort> AppContext<C> {
    /// Wrap a chart with a fresh cancellation token.
    pub fn new(chart: C) -> Self {
        Self {
            chart,
            cancel: CancellationToken::new(),
        }
    }

    /// The chart surface.
    pub const fn chart(&self) -> &C {
        &self.chart
    }

    /// A clone of the session token, for use cases and signal handlers.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Split into the chart and a token clone, for running a use case.
    pub fn session(&mut self) -> (&mut C, CancellationToken) {
        (&mut self.chart, self.cancel.clone())
    }

    /// Whether the session was interrupted.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Close the chart. Failures are logged, never returned.
    pub async fn teardown(&mut self) {
        debug!(chart = self.chart.name(), "Tearing down chart");
        if let Err(e) = self.chart.exit().await {
            warn!(chart = self.chart.name(), error = %e, "Chart teardown failed");
        }
    }
}
