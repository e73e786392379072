//! Trade markers and the fill classifier.

mod classifier;
mod marker;

pub use classifier::{LONG_ENTRY, LONG_EXIT, SHORT_ENTRY, SHORT_EXIT, classify, label, style_for};
pub use marker::{Marker, MarkerPosition, MarkerShape, MarkerStyle};
