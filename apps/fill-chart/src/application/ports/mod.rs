//! Ports (interfaces) to external collaborators.

mod chart_port;

pub use chart_port::{ChartError, ChartPort, LegendOptions, ShowMode};
