//! Packing flex lines along the cross axis.
//!
//! Spec: §8.4 Packing Flex Lines
//! <https://www.w3.org/TR/css-flexbox-1/#align-content-property>

use log::debug;

use super::super::AlignContent;

/// Leading offset and extra between-line spacing for `align-content`.
///
/// Mirrors `justify-content`; `stretch` packs from the start because the
/// extra space has already been added to the lines themselves.
pub fn align_content_params(align: AlignContent, free_space: f32, line_count: usize) -> (f32, f32) {
    let positive = free_space.max(0.0);
    match (align, line_count) {
        (AlignContent::End, _) => (free_space, 0.0),
        (AlignContent::Center, _) => (free_space * 0.5, 0.0),
        (AlignContent::SpaceBetween, count) if count > 1 => (0.0, positive / (count as f32 - 1.0)),
        (AlignContent::SpaceAround, count) if count > 0 => {
            let slot = positive / count as f32;
            (slot * 0.5, slot)
        }
        (AlignContent::SpaceEvenly, count) if count > 0 => {
            let slot = positive / (count as f32 + 1.0);
            (slot, slot)
        }
        _ => (0.0, 0.0),
    }
}

/// Grow every line by an equal share of positive free space.
pub fn stretch_lines(line_crosses: &mut [f32], free_space: f32) {
    if free_space <= 0.0 || line_crosses.is_empty() {
        return;
    }
    let add_each = free_space / line_crosses.len() as f32;
    debug!(
        target: "css::flexbox::multi_line",
        "align-content stretch: free={free_space:.3} add_each={add_each:.3}"
    );
    for line in line_crosses {
        *line += add_each;
    }
}
