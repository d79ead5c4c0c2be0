//! Multi-line containers: line breaking and line packing.

mod align_content;
mod line_breaking;

pub use align_content::{align_content_params, stretch_lines};
pub use line_breaking::{LineRange, break_into_lines};
