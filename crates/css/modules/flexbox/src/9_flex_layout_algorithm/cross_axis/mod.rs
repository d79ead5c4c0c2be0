//! Cross-axis sizing and alignment.

mod alignment;

pub use alignment::align_single_line_cross;
