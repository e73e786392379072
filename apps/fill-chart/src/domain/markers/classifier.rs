//! Fill-to-marker classification.
//!
//! | role  | side | position | shape      | color   | label prefix |
//! |-------|------|----------|------------|---------|--------------|
//! | open  | BUY  | below    | arrow_up   | #26a69a | `LONG`       |
//! | open  | SELL | above    | arrow_down | #ef5350 | `SHORT`      |
//! | close | SELL | above    | circle     | #4caf50 | `EXIT <tag>` |
//! | close | BUY  | below    | circle     | #ff5252 | `EXIT <tag>` |
//!
//! Labels read `"{prefix} {qty:.2}@{price:.1}"`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::marker::{Marker, MarkerPosition, MarkerShape, MarkerStyle};
use crate::domain::fills::{Fill, FillRole, FillSide};

/// Long entry.
pub const LONG_ENTRY: MarkerStyle = MarkerStyle {
    position: MarkerPosition::Below,
    shape: MarkerShape::ArrowUp,
    color: "#26a69a",
    prefix: "LONG",
    tagged: false,
};

/// Short entry.
pub const SHORT_ENTRY: MarkerStyle = MarkerStyle {
    position: MarkerPosition::Above,
    shape: MarkerShape::ArrowDown,
    color: "#ef5350",
    prefix: "SHORT",
    tagged: false,
};

/// Long exit (closing sell).
pub const LONG_EXIT: MarkerStyle = MarkerStyle {
    position: MarkerPosition::Above,
    shape: MarkerShape::Circle,
    color: "#4caf50",
    prefix: "EXIT",
    tagged: true,
};

/// Short exit (closing buy).
pub const SHORT_EXIT: MarkerStyle = MarkerStyle {
    position: MarkerPosition::Below,
    shape: MarkerShape::Circle,
    color: "#ff5252",
    prefix: "EXIT",
    tagged: true,
};

/// Style for a (role, side) pair. Total over the four combinations.
#[must_use]
pub const fn style_for(role: FillRole, side: FillSide) -> MarkerStyle {
    match (role, side) {
        (FillRole::Open, FillSide::Buy) => LONG_ENTRY,
        (FillRole::Open, FillSide::Sell) => SHORT_ENTRY,
        (FillRole::Close, FillSide::Sell) => LONG_EXIT,
        (FillRole::Close, FillSide::Buy) => SHORT_EXIT,
    }
}

/// Classify a fill into the marker drawn for it.
#[must_use]
pub fn classify(fill: &Fill) -> Marker {
    let style = style_for(fill.role, fill.side);

    Marker {
        time: fill.time,
        position: style.position,
        shape: style.shape,
        color: style.color.to_string(),
        text: label(&style, fill),
    }
}

/// Marker label for a fill drawn in `style`.
#[must_use]
pub fn label(style: &MarkerStyle, fill: &Fill) -> String {
    let qty = fixed(fill.qty, 2);
    let price = fixed(fill.price, 1);

    if style.tagged {
        format!("{} {} {qty}@{price}", style.prefix, fill.tag)
    } else {
        format!("{} {qty}@{price}", style.prefix)
    }
}

/// Render with exactly `dp` decimal places.
///
/// Formats the nearest `f64`, so rounding follows the binary value the fill
/// log was written from: `2.675` renders as `2.67`.
fn fixed(value: Decimal, dp: usize) -> String {
    format!("{:.dp$}", value.to_f64().unwrap_or_default())
}
