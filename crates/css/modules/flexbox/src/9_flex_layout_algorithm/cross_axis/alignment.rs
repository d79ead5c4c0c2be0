//! Cross-axis alignment within a line.
//!
//! Spec: §8.3 Cross-axis Alignment
//! <https://www.w3.org/TR/css-flexbox-1/#align-items-property>

use super::super::distribution::clamp;
use super::super::{AlignItems, CrossPlacement, FlexChild};

/// Size and offset of one item inside a line of cross size `line_cross`.
///
/// `stretch` only grows items whose cross size is `auto`; an item with a
/// declared cross size is placed at cross-start instead.
pub fn align_single_line_cross(align: AlignItems, line_cross: f32, child: &FlexChild) -> CrossPlacement {
    let hypothetical = child.hypothetical_cross();
    let margins = child.margin_cross_start + child.margin_cross_end;
    match align {
        AlignItems::Stretch if child.cross_size.is_none() => CrossPlacement {
            cross_size: clamp((line_cross - margins).max(0.0), child.min_cross, child.max_cross),
            cross_offset: child.margin_cross_start,
        },
        AlignItems::Stretch | AlignItems::Start => CrossPlacement {
            cross_size: hypothetical,
            cross_offset: child.margin_cross_start,
        },
        AlignItems::End => CrossPlacement {
            cross_size: hypothetical,
            cross_offset: line_cross - hypothetical - child.margin_cross_end,
        },
        AlignItems::Center => CrossPlacement {
            cross_size: hypothetical,
            cross_offset: child.margin_cross_start + (line_cross - hypothetical - margins) * 0.5,
        },
    }
}
