//! Chart surface configuration.

use serde::{Deserialize, Serialize};

use crate::application::ports::LegendOptions;

/// Chart surface options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Enable drawing tools.
    #[serde(default = "default_true")]
    pub toolbox: bool,
    /// Keep the chart open after all data is shown, until it is closed.
    #[serde(default = "default_true")]
    pub hold_open: bool,
    /// Legend options.
    #[serde(default)]
    pub legend: LegendOptions,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            toolbox: true,
            hold_open: true,
            legend: LegendOptions::default(),
        }
    }
}

const fn default_true() -> bool {
    true
}
