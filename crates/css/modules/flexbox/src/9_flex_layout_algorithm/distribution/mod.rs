//! Main-axis sizing and positioning.

mod flex_algorithm;
mod main_axis;

pub use flex_algorithm::{clamp, resolve_flexible_lengths};
pub use main_axis::{accumulate_main_offsets, justify_params};
