//! Layout calculation for booklet assembly
//!
//! This module handles the geometric side of packing question images into
//! two vertical columns per page:
//! - Page geometry (margins, column extents, reserved header/footer bands)
//! - The greedy column-packing engine and its cursor state

mod engine;
mod types;

pub use engine::*;
pub use types::*;
