//! Axis resolution
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#box-model>

use crate::chapter5::{FlexDirection, FlexWrap};

/// Resolved axes for a flex container in a horizontal writing mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Axes {
    /// Main axis is horizontal.
    pub main_is_row: bool,
    /// `row-reverse` / `column-reverse`.
    pub main_reverse: bool,
    /// `wrap-reverse`.
    pub cross_reverse: bool,
}

/// Resolve main/cross axes from `flex-direction` and `flex-wrap`.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>
pub const fn resolve_axes(direction: FlexDirection, wrap: FlexWrap) -> Axes {
    Axes {
        main_is_row: direction.is_row(),
        main_reverse: direction.is_reverse(),
        cross_reverse: matches!(wrap, FlexWrap::WrapReverse),
    }
}
