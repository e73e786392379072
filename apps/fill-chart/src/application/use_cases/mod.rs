//! Application Use Cases
//!
//! Use cases drive the chart port from loaded candles and fills.

mod render_static;
mod replay_live;
mod session;

pub use render_static::{RenderStaticUseCase, StaticOutcome};
pub use replay_live::{ReplayLiveUseCase, ReplayOutcome};
pub use session::{ReplayError, SessionEnd};
