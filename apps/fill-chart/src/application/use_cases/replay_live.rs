//! Replay Live Use Case
//!
//! Seeds the chart with the first loaded day, then pushes the remaining
//! candles one at a time at a fixed pace, drawing each trade as its candle
//! arrives.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::session::{ReplayError, SessionEnd, draw_markers, log_summary, wait_for_close};
use crate::application::ports::{ChartError, ChartPort, LegendOptions, ShowMode};
use crate::domain::fills::{Fill, fills_at, filter_fills, split_at};
use crate::domain::market_data::{Candle, DayTable, last_time, time_span};

/// Result of a live replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Candles in the seed table.
    pub initial_candles: usize,
    /// Candles pushed during replay.
    pub replayed_candles: usize,
    /// Markers drawn, seed and replayed.
    pub markers_drawn: usize,
    /// How the session ended.
    pub end: SessionEnd,
}

/// Use case for the simulated live replay.
pub struct ReplayLiveUseCase<'a, C: ChartPort> {
    chart: &'a mut C,
    legend: LegendOptions,
    step_delay: Duration,
    cancel: CancellationToken,
}

impl<'a, C: ChartPort> ReplayLiveUseCase<'a, C> {
    /// Create a new `ReplayLiveUseCase`.
    pub const fn new(
        chart: &'a mut C,
        legend: LegendOptions,
        step_delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            chart,
            legend,
            step_delay,
            cancel,
        }
    }

    /// Replay `days`: the first seeds the chart, the rest stream in.
    ///
    /// Fills are scoped to the span of all candles. Those at or before the
    /// seed's last candle are drawn up front; the rest are drawn when a
    /// replayed candle has exactly their time.
    ///
    /// # Errors
    ///
    /// `ReplayError::InsufficientDays` for fewer than two days, or any chart
    /// failure other than the user closing it.
    pub async fn execute(
        &mut self,
        days: &[DayTable],
        fills: &[Fill],
    ) -> Result<ReplayOutcome, ReplayError> {
        let [seed, rest @ ..] = days else {
            return Err(ReplayError::InsufficientDays { loaded: 0 });
        };
        if rest.is_empty() {
            return Err(ReplayError::InsufficientDays { loaded: 1 });
        }

        let initial = &seed.candles;
        let remaining: Vec<Candle> = rest.iter().flat_map(|d| d.candles.iter().cloned()).collect();
        let all: Vec<Candle> = initial.iter().chain(&remaining).cloned().collect();

        info!(date = %seed.date, candles = initial.len(), "Initial data");
        info!(days = rest.len(), candles = remaining.len(), "Remaining data to stream");
        log_summary("all", &all);

        let (start, end) = time_span(&all).ok_or(ReplayError::EmptyRange)?;
        let in_range = filter_fills(fills, start, end);
        let (visible, pending) = match last_time(initial) {
            Some(boundary) => split_at(&in_range, boundary),
            None => (Vec::new(), in_range),
        };
        info!(
            total = fills.len(),
            visible = visible.len(),
            pending = pending.len(),
            "Trades within data range"
        );

        self.chart.set_candles(initial).await?;
        self.chart.set_legend(&self.legend).await?;
        let mut markers_drawn = draw_markers(&mut *self.chart, &visible).await?;
        self.chart.show(ShowMode::NonBlocking).await?;
        info!(chart = self.chart.name(), "Chart shown, starting replay");

        let mut replayed_candles = 0;
        let mut end = SessionEnd::Completed;

        for candle in &remaining {
            if self.cancel.is_cancelled() {
                end = SessionEnd::Interrupted;
                break;
            }
            if !self.chart.is_alive() {
                end = SessionEnd::ClosedByUser;
                break;
            }

            debug!(time = %candle.time, close = %candle.close, "Replaying candle");
            match self.chart.update_candle(candle).await {
                Ok(()) => replayed_candles += 1,
                Err(ChartError::Disposed) => {
                    end = SessionEnd::ClosedByUser;
                    break;
                }
                Err(e) => return Err(e.into()),
            }

            match self.draw_arrivals(candle, &pending).await {
                Ok(drawn) => markers_drawn += drawn,
                Err(ChartError::Disposed) => {
                    end = SessionEnd::ClosedByUser;
                    break;
                }
                Err(e) => return Err(e.into()),
            }

            tokio::select! {
                () = tokio::time::sleep(self.step_delay) => {}
                () = self.cancel.cancelled() => {
                    end = SessionEnd::Interrupted;
                    break;
                }
            }
        }

        match end {
            SessionEnd::Completed => {
                info!(
                    replayed = replayed_candles,
                    "All data loaded, chart stays open until closed"
                );
                end = wait_for_close(&mut *self.chart, &self.cancel).await?;
            }
            SessionEnd::ClosedByUser => {
                info!(replayed = replayed_candles, "Chart closed by user");
            }
            SessionEnd::Interrupted => {
                info!(replayed = replayed_candles, "Replay interrupted");
            }
        }

        Ok(ReplayOutcome {
            initial_candles: initial.len(),
            replayed_candles,
            markers_drawn,
            end,
        })
    }

    /// Draw the trades stamped at `candle`'s time.
    async fn draw_arrivals(
        &mut self,
        candle: &Candle,
        pending: &[Fill],
    ) -> Result<usize, ChartError> {
        let arrived: Vec<&Fill> = fills_at(pending, candle.time).collect();
        for fill in &arrived {
            info!(
                "[LIVE] {} {} @ {}",
                fill.role.to_string().to_uppercase(),
                fill.side,
                fill.time
            );
        }
        draw_markers(&mut *self.chart, arrived).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::fills::{FillRole, FillSide};
    use crate::infrastructure::chart::{ChartCall, RecordingChart};

    fn at(day: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 10, day)
            .and_then(|d| d.and_hms_opt(0, minute, 0))
            .unwrap()
    }

    fn day(day: u32, minutes: u32) -> DayTable {
        DayTable {
            date: NaiveDate::from_ymd_opt(2021, 10, day).unwrap(),
            candles: (0..minutes)
                .map(|m| {
                    let p = Decimal::from(100 + m);
                    Candle::new(at(day, m), p, p + dec!(1), p - dec!(1), p, dec!(1))
                })
                .collect(),
        }
    }

    fn fill(time: NaiveDateTime, side: FillSide, role: FillRole) -> Fill {
        let ts = time.and_utc().timestamp_millis();
        Fill::from_millis(ts, side, role, dec!(1), dec!(100), "tp").unwrap()
    }

    fn use_case(chart: &mut RecordingChart) -> ReplayLiveUseCase<'_, RecordingChart> {
        ReplayLiveUseCase::new(
            chart,
            LegendOptions::default(),
            Duration::from_millis(1),
            CancellationToken::new(),
        )
    }

    #[tokio::test]
    async fn test_single_day_is_insufficient() {
        let mut chart = RecordingChart::new();
        let result = use_case(&mut chart).execute(&[day(1, 3)], &[]).await;

        assert!(matches!(
            result,
            Err(ReplayError::InsufficientDays { loaded: 1 })
        ));
        assert!(chart.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_days_is_insufficient() {
        let mut chart = RecordingChart::new();
        let result = use_case(&mut chart).execute(&[], &[]).await;
        assert!(matches!(
            result,
            Err(ReplayError::InsufficientDays { loaded: 0 })
        ));
    }

    #[tokio::test]
    async fn test_replays_remaining_days_in_order() {
        let days = vec![day(1, 3), day(2, 2), day(3, 2)];
        let mut chart = RecordingChart::new();

        let outcome = use_case(&mut chart).execute(&days, &[]).await.unwrap();

        assert_eq!(outcome.initial_candles, 3);
        assert_eq!(outcome.replayed_candles, 4);
        assert_eq!(outcome.end, SessionEnd::Completed);
        assert_eq!(
            chart.updated_times(),
            vec![at(2, 0), at(2, 1), at(3, 0), at(3, 1)]
        );
        assert_eq!(chart.calls().last(), Some(&ChartCall::WaitClosed));
    }

    #[tokio::test]
    async fn test_seed_markers_before_show_and_live_markers_after_update() {
        let days = vec![day(1, 3), day(2, 3)];
        let fills = vec![
            fill(at(1, 1), FillSide::Buy, FillRole::Open),
            fill(at(2, 1), FillSide::Buy, FillRole::Close),
            // Outside every candle
            fill(at(5, 0), FillSide::Sell, FillRole::Open),
        ];
        let mut chart = RecordingChart::new();

        let outcome = use_case(&mut chart).execute(&days, &fills).await.unwrap();
        assert_eq!(outcome.markers_drawn, 2);

        let calls = chart.calls();
        let show = calls
            .iter()
            .position(|c| *c == ChartCall::Show(ShowMode::NonBlocking))
            .unwrap();
        assert!(matches!(&calls[show - 1], ChartCall::AddMarker(m) if m.text.starts_with("LONG")));

        let update = calls
            .iter()
            .position(|c| *c == ChartCall::UpdateCandle(at(2, 1)))
            .unwrap();
        assert!(matches!(&calls[update + 1], ChartCall::AddMarker(m) if m.text.starts_with("EXIT")));
    }

    #[tokio::test]
    async fn test_closed_chart_stops_replay() {
        let days = vec![day(1, 2), day(2, 5)];
        let mut chart = RecordingChart::new().close_after_updates(2);

        let outcome = use_case(&mut chart).execute(&days, &[]).await.unwrap();

        assert_eq!(outcome.end, SessionEnd::ClosedByUser);
        assert_eq!(outcome.replayed_candles, 2);
        assert!(!chart.calls().contains(&ChartCall::WaitClosed));
    }

    #[tokio::test]
    async fn test_disposed_chart_stops_replay() {
        let days = vec![day(1, 2), day(2, 5)];
        let mut chart = RecordingChart::new().dispose_after_updates(3);

        let outcome = use_case(&mut chart).execute(&days, &[]).await.unwrap();

        assert_eq!(outcome.end, SessionEnd::ClosedByUser);
        assert_eq!(outcome.replayed_candles, 3);
    }

    #[tokio::test]
    async fn test_close_while_drawing_counts_pushed_candle() {
        let days = vec![day(1, 2), day(2, 5)];
        let fills = vec![fill(at(2, 0), FillSide::Sell, FillRole::Open)];
        // Closes right after the first update, so its marker hits a closed surface.
        let mut chart = RecordingChart::new().close_after_updates(1);

        let outcome = use_case(&mut chart).execute(&days, &fills).await.unwrap();

        assert_eq!(outcome.end, SessionEnd::ClosedByUser);
        assert_eq!(outcome.replayed_candles, 1);
        assert_eq!(outcome.markers_drawn, 0);
        assert_eq!(chart.updated_times(), vec![at(2, 0)]);
    }

    #[tokio::test]
    async fn test_cancelled_replay_is_interrupted() {
        let days = vec![day(1, 2), day(2, 5)];
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut chart = RecordingChart::new();

        let outcome = ReplayLiveUseCase::new(
            &mut chart,
            LegendOptions::default(),
            Duration::from_secs(60),
            cancel,
        )
        .execute(&days, &[])
        .await
        .unwrap();

        assert_eq!(outcome.end, SessionEnd::Interrupted);
        assert_eq!(outcome.replayed_candles, 0);
    }
}
