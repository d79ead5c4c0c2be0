//! CSS Flexible Box Layout Module Level 1: Flex layout algorithm.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/>
//!
//! The algorithm works on plain item descriptors ([`FlexChild`]) and knows
//! nothing about the document tree; callers map results back through
//! [`ItemRef`].

// Chapter modules mapped to the Flexbox Level 1 spec structure.
// CSS Flexbox §5: Flex Containers
#[path = "5_flex_containers/mod.rs"]
mod chapter5;
// CSS Flexbox §6: Flex Items
#[path = "6_flex_items/mod.rs"]
mod chapter6;
// CSS Flexbox §7: Axis resolution
#[path = "7_axis_and_order/mod.rs"]
mod chapter7;
// CSS Flexbox §9: Flex Layout Algorithm (single and multi-line)
#[path = "9_flex_layout_algorithm/mod.rs"]
mod chapter9;

pub use chapter5::{FlexDirection, FlexWrap};
pub use chapter6::{ItemRef, ItemStyle, collect_flex_items, is_flex_item};
pub use chapter7::{Axes, resolve_axes};
pub use chapter9::{
    AlignContent, AlignItems, CrossPlacement, FlexChild, FlexContainerInputs, FlexLayout,
    FlexPlacement, JustifyContent, align_single_line_cross, layout_flex_container,
};
