//! Chart adapters.

mod console;
mod recording;

pub use console::{CloseHandle, ConsoleChart};
pub use recording::{ChartCall, RecordingChart};
