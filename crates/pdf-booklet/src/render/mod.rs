//! Page rendering
//!
//! Turns placement decisions into printpdf op streams:
//! - Per-page chrome (center divider, header title and rule)
//! - Per-item content (citation line, image xobject, number mask, new number)
//! - Font resolution with built-in fallback

mod fonts;
mod page;

pub use fonts::DocumentFont;
pub(crate) use page::*;

use printpdf::{Color, Rgb};

/// Neutral gray at the given level (0 = black, 1 = white)
pub(crate) fn gray(level: f32) -> Color {
    Color::Rgb(Rgb {
        r: level,
        g: level,
        b: level,
        icc_profile: None,
    })
}
