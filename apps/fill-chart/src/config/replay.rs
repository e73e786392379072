//! Render mode and replay pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the loaded range is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Seed with the first day, then replay the rest candle by candle.
    #[default]
    Live,
    /// Show the whole range at once.
    Static,
}

/// Replay pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Sleep between replayed candles, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

impl ReplayConfig {
    /// Step delay as a duration.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

const fn default_step_delay_ms() -> u64 {
    50
}
