//! Recording chart for testing.
//!
//! Records every draw call in order and can simulate the user closing the
//! window, either through the liveness flag or a disposed error.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::application::ports::{ChartError, ChartPort, LegendOptions, ShowMode};
use crate::domain::market_data::Candle;
use crate::domain::markers::Marker;

/// One recorded chart call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartCall {
    /// `set_candles` with this many rows.
    SetCandles(usize),
    /// `update_candle` at this time.
    UpdateCandle(NaiveDateTime),
    /// `add_marker`.
    AddMarker(Marker),
    /// `set_legend`.
    SetLegend(LegendOptions),
    /// `show`.
    Show(ShowMode),
    /// `wait_closed`.
    WaitClosed,
    /// `exit`.
    Exit,
}

/// In-memory chart that records calls.
#[derive(Debug)]
pub struct RecordingChart {
    calls: Vec<ChartCall>,
    alive: bool,
    updates: usize,
    close_after_updates: Option<usize>,
    dispose_after_updates: Option<usize>,
    fail_exit: bool,
}

impl Default for RecordingChart {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingChart {
    /// Create an open recording chart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            calls: Vec::new(),
            alive: true,
            updates: 0,
            close_after_updates: None,
            dispose_after_updates: None,
            fail_exit: false,
        }
    }

    /// Report not-alive once `n` candle updates have been applied.
    #[must_use]
    pub fn close_after_updates(mut self, n: usize) -> Self {
        self.close_after_updates = Some(n);
        self
    }

    /// Fail updates with `ChartError::Disposed` once `n` have been applied.
    #[must_use]
    pub fn dispose_after_updates(mut self, n: usize) -> Self {
        self.dispose_after_updates = Some(n);
        self
    }

    /// Make `exit` fail with a backend error.
    #[must_use]
    pub fn failing_exit(mut self) -> Self {
        self.fail_exit = true;
        self
    }

    /// All calls in order.
    #[must_use]
    pub fn calls(&self) -> &[ChartCall] {
        &self.calls
    }

    /// Markers added, in order.
    #[must_use]
    pub fn markers(&self) -> Vec<&Marker> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ChartCall::AddMarker(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    /// Times of applied candle updates, in order.
    #[must_use]
    pub fn updated_times(&self) -> Vec<NaiveDateTime> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ChartCall::UpdateCandle(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    fn ensure_open(&self) -> Result<(), ChartError> {
        if self.alive {
            Ok(())
        } else {
            Err(ChartError::Disposed)
        }
    }
}

#[async_trait]
impl ChartPort for RecordingChart {
    async fn set_candles(&mut self, candles: &[Candle]) -> Result<(), ChartError> {
        self.ensure_open()?;
        self.calls.push(ChartCall::SetCandles(candles.len()));
        Ok(())
    }

    async fn update_candle(&mut self, candle: &Candle) -> Result<(), ChartError> {
        self.ensure_open()?;
        if self.dispose_after_updates.is_some_and(|n| self.updates >= n) {
            self.alive = false;
            return Err(ChartError::Disposed);
        }

        self.calls.push(ChartCall::UpdateCandle(candle.time));
        self.updates += 1;

        if self.close_after_updates.is_some_and(|n| self.updates >= n) {
            self.alive = false;
        }
        Ok(())
    }

    async fn add_marker(&mut self, marker: &Marker) -> Result<(), ChartError> {
        self.ensure_open()?;
        self.calls.push(ChartCall::AddMarker(marker.clone()));
        Ok(())
    }

    async fn set_legend(&mut self, legend: &LegendOptions) -> Result<(), ChartError> {
        self.ensure_open()?;
        self.calls.push(ChartCall::SetLegend(*legend));
        Ok(())
    }

    async fn show(&mut self, mode: ShowMode) -> Result<(), ChartError> {
        self.ensure_open()?;
        self.calls.push(ChartCall::Show(mode));
        Ok(())
    }

    async fn wait_closed(&mut self) -> Result<(), ChartError> {
        self.calls.push(ChartCall::WaitClosed);
        self.alive = false;
        Ok(())
    }

    async fn exit(&mut self) -> Result<(), ChartError> {
        self.calls.push(ChartCall::Exit);
        self.alive = false;
        if self.fail_exit {
            return Err(ChartError::Backend("exit failed".to_string()));
        }
        Ok(())
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn candle(minute: u32) -> Candle {
        let time = NaiveDate::from_ymd_opt(2021, 10, 2)
            .and_then(|d| d.and_hms_opt(0, minute, 0))
            .unwrap();
        Candle::new(time, dec!(1), dec!(1), dec!(1), dec!(1), dec!(1))
    }

    #[tokio::test]
    async fn records_calls_in_order() {
        let mut chart = RecordingChart::new();
        chart.set_candles(&[candle(0), candle(1)]).await.unwrap();
        chart.show(ShowMode::NonBlocking).await.unwrap();
        chart.update_candle(&candle(2)).await.unwrap();

        assert_eq!(
            chart.calls(),
            &[
                ChartCall::SetCandles(2),
                ChartCall::Show(ShowMode::NonBlocking),
                ChartCall::UpdateCandle(candle(2).time),
            ]
        );
    }

    #[tokio::test]
    async fn close_after_flips_liveness() {
        let mut chart = RecordingChart::new().close_after_updates(1);
        chart.update_candle(&candle(0)).await.unwrap();

        assert!(!chart.is_alive());
        assert_eq!(
            chart.update_candle(&candle(1)).await,
            Err(ChartError::Disposed)
        );
    }

    #[tokio::test]
    async fn dispose_after_fails_update() {
        let mut chart = RecordingChart::new().dispose_after_updates(0);

        assert!(chart.is_alive());
        assert_eq!(
            chart.update_candle(&candle(0)).await,
            Err(ChartError::Disposed)
        );
        assert!(chart.updated_times().is_empty());
    }
}
