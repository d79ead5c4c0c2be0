//! Keyword codes.
//!
//! Keyword properties are stored as `StyleValue::Number(code)` so they pass
//! through bulk application like any other scalar. Consumers map the code
//! back with the constants below.

use crate::property::PropertyId;

pub mod display {
    pub const NONE: u8 = 0;
    pub const BLOCK: u8 = 1;
    pub const INLINE_BLOCK: u8 = 2;
    pub const FLEX: u8 = 3;
    pub const INLINE_FLEX: u8 = 4;
    pub const GRID: u8 = 5;
    pub const INLINE_GRID: u8 = 6;
}

pub mod position {
    pub const STATIC: u8 = 0;
    pub const RELATIVE: u8 = 1;
    pub const ABSOLUTE: u8 = 2;
    pub const FIXED: u8 = 3;
}

pub mod overflow {
    pub const VISIBLE: u8 = 0;
    pub const HIDDEN: u8 = 1;
    pub const SCROLL: u8 = 2;
    pub const AUTO: u8 = 3;
}

pub mod flex_direction {
    pub const ROW: u8 = 0;
    pub const ROW_REVERSE: u8 = 1;
    pub const COLUMN: u8 = 2;
    pub const COLUMN_REVERSE: u8 = 3;
}

pub mod flex_wrap {
    pub const NOWRAP: u8 = 0;
    pub const WRAP: u8 = 1;
    pub const WRAP_REVERSE: u8 = 2;
}

/// Shared by `justify-content` and `align-content`.
pub mod content {
    pub const START: u8 = 0;
    pub const END: u8 = 1;
    pub const CENTER: u8 = 2;
    pub const SPACE_BETWEEN: u8 = 3;
    pub const SPACE_AROUND: u8 = 4;
    pub const SPACE_EVENLY: u8 = 5;
    pub const STRETCH: u8 = 6;
}

/// Shared by `align-items` and `justify-items`.
pub mod items {
    pub const STRETCH: u8 = 0;
    pub const START: u8 = 1;
    pub const END: u8 = 2;
    pub const CENTER: u8 = 3;
}

pub mod grid_auto_flow {
    pub const ROW: u8 = 0;
    pub const COLUMN: u8 = 1;
}

/// Map a keyword for `property` to its code.
///
/// Returns `None` for properties that are not keyword-valued and for
/// keywords the engine does not support.
pub fn keyword_code(property: PropertyId, keyword: &str) -> Option<u8> {
    let lower = keyword.trim().to_ascii_lowercase();
    let word = lower.as_str();
    match property {
        PropertyId::Display => match word {
            "none" => Some(display::NONE),
            "block" => Some(display::BLOCK),
            "inline-block" | "inline" => Some(display::INLINE_BLOCK),
            "flex" => Some(display::FLEX),
            "inline-flex" => Some(display::INLINE_FLEX),
            "grid" => Some(display::GRID),
            "inline-grid" => Some(display::INLINE_GRID),
            _ => None,
        },
        PropertyId::Position => match word {
            "static" => Some(position::STATIC),
            "relative" => Some(position::RELATIVE),
            "absolute" => Some(position::ABSOLUTE),
            "fixed" => Some(position::FIXED),
            _ => None,
        },
        PropertyId::Overflow => match word {
            "visible" => Some(overflow::VISIBLE),
            "hidden" | "clip" => Some(overflow::HIDDEN),
            "scroll" => Some(overflow::SCROLL),
            "auto" => Some(overflow::AUTO),
            _ => None,
        },
        PropertyId::FlexDirection => match word {
            "row" => Some(flex_direction::ROW),
            "row-reverse" => Some(flex_direction::ROW_REVERSE),
            "column" => Some(flex_direction::COLUMN),
            "column-reverse" => Some(flex_direction::COLUMN_REVERSE),
            _ => None,
        },
        PropertyId::FlexWrap => match word {
            "nowrap" => Some(flex_wrap::NOWRAP),
            "wrap" => Some(flex_wrap::WRAP),
            "wrap-reverse" => Some(flex_wrap::WRAP_REVERSE),
            _ => None,
        },
        PropertyId::JustifyContent | PropertyId::AlignContent => match word {
            "start" | "flex-start" | "normal" => Some(content::START),
            "end" | "flex-end" => Some(content::END),
            "center" => Some(content::CENTER),
            "space-between" => Some(content::SPACE_BETWEEN),
            "space-around" => Some(content::SPACE_AROUND),
            "space-evenly" => Some(content::SPACE_EVENLY),
            "stretch" if property == PropertyId::AlignContent => Some(content::STRETCH),
            _ => None,
        },
        PropertyId::AlignItems | PropertyId::JustifyItems => match word {
            "stretch" | "normal" => Some(items::STRETCH),
            "start" | "flex-start" | "self-start" => Some(items::START),
            "end" | "flex-end" | "self-end" => Some(items::END),
            "center" => Some(items::CENTER),
            _ => None,
        },
        PropertyId::GridAutoFlow => match word {
            "row" | "row dense" | "dense" => Some(grid_auto_flow::ROW),
            "column" | "column dense" => Some(grid_auto_flow::COLUMN),
            _ => None,
        },
        _ => None,
    }
}
