//! Infrastructure layer: CSV storage and chart adapters.

pub mod chart;
pub mod storage;
