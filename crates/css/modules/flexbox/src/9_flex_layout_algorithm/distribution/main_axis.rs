//! Main-axis justification.
//!
//! Spec: §9.5 Main-Axis Alignment
//! <https://www.w3.org/TR/css-flexbox-1/#main-alignment>

use super::super::{FlexChild, JustifyContent};

/// Leading offset and extra between-item spacing for `justify-content`.
///
/// `start` packs from 0, `end` from the free space, `center` from half of it.
/// The `space-*` modes only distribute positive free space; on overflow they
/// pack like `start`.
pub fn justify_params(justify: JustifyContent, free_space: f32, item_count: usize) -> (f32, f32) {
    let positive = free_space.max(0.0);
    match (justify, item_count) {
        (JustifyContent::End, _) => (free_space, 0.0),
        (JustifyContent::Center, _) => (free_space * 0.5, 0.0),
        (JustifyContent::SpaceBetween, count) if count > 1 => {
            (0.0, positive / (count as f32 - 1.0))
        }
        (JustifyContent::SpaceAround, count) if count > 0 => {
            let slot = positive / count as f32;
            (slot * 0.5, slot)
        }
        (JustifyContent::SpaceEvenly, count) if count > 0 => {
            let slot = positive / (count as f32 + 1.0);
            (slot, slot)
        }
        _ => (0.0, 0.0),
    }
}

/// Border-box main offsets for one line, packed in flow order.
pub fn accumulate_main_offsets(
    items: &[FlexChild],
    sizes: &[f32],
    start_offset: f32,
    spacing: f32,
) -> Vec<f32> {
    let mut cursor = start_offset;
    items
        .iter()
        .zip(sizes)
        .map(|(child, size)| {
            let offset = cursor + child.margin_main_start;
            cursor = offset + size + child.margin_main_end + spacing;
            offset
        })
        .collect()
}
