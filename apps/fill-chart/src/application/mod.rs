//! Application Layer
//!
//! Orchestrates domain logic through use cases. It defines:
//!
//! - **Ports**: the chart surface interface
//! - **Use Cases**: static render and live replay
//! - **Context**: chart ownership, interrupts, and teardown

pub mod context;
pub mod ports;
pub mod use_cases;

pub use context::AppContext;
pub use ports::*;
pub use use_cases::*;
