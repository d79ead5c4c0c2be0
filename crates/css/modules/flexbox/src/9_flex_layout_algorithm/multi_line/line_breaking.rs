//! Collecting flex items into flex lines.
//!
//! Spec: §9.3 Main Size Determination, step 5
//! <https://www.w3.org/TR/css-flexbox-1/#algo-line-break>

use core::ops::Range;

use super::super::FlexChild;

/// Item indices belonging to one line: `[start, end)`.
pub type LineRange = Range<usize>;

/// Break items into lines by cumulative outer hypothetical main size.
///
/// A line always takes at least one item, so an oversized item gets a line of
/// its own rather than being dropped.
pub fn break_into_lines(available_main: f32, main_gap: f32, items: &[FlexChild]) -> Vec<LineRange> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut cursor = 0.0;
    for (index, child) in items.iter().enumerate() {
        let outer = child.hypothetical_main() + child.main_margins();
        if index == start {
            cursor = outer;
            continue;
        }
        let next = cursor + main_gap + outer;
        if next > available_main {
            lines.push(start..index);
            start = index;
            cursor = outer;
        } else {
            cursor = next;
        }
    }
    if start < items.len() {
        lines.push(start..items.len());
    }
    lines
}
