// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Fill Chart - candlestick charts with trade-fill overlays.
//!
//! Loads per-day perpetual-swap candle files and a trade fill log, classifies
//! each fill into a chart marker, and draws both onto a chart surface, either
//! as one static view or as a simulated live replay.
//!
//! # Architecture
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: candles, fills, and the fill → marker classifier
//!   - `market_data`: `Candle`, `Timeframe`, `DayTable`
//!   - `fills`: `Fill`, side/role, time-window filtering
//!   - `markers`: `Marker`, the (role, side) style table
//!
//! - **Application**: use cases and orchestration
//!   - `ports`: `ChartPort`
//!   - `use_cases`: `RenderStatic`, `ReplayLive`
//!   - `context`: chart ownership, interrupts, teardown
//!
//! - **Infrastructure**: adapters
//!   - `storage`: day-file candle loader, fill log reader
//!   - `chart`: console and recording chart surfaces

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

pub mod application;
pub mod domain;
pub mod infrastructure;

// =============================================================================
// Wiring and ambient concerns
// =============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod telemetry;

pub use app::{RunOutcome, run};
pub use error::AppError;
