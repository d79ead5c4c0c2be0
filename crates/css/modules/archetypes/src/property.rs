//! Property identifiers and resolved property values.

use css_values_units::StyleValue;

macro_rules! property_ids {
    ($($variant:ident => $name:literal,)*) => {
        /// A longhand property understood by the layout engine.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PropertyId {
            $($variant,)*
        }

        impl PropertyId {
            /// Every property, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// CSS name of the property.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Look up a longhand by its CSS name (ASCII case-insensitive).
            pub fn from_name(name: &str) -> Option<Self> {
                let lower = name.trim().to_ascii_lowercase();
                match lower.as_str() {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

property_ids! {
    Display => "display",
    Position => "position",
    Overflow => "overflow",
    Width => "width",
    Height => "height",
    MinWidth => "min-width",
    MinHeight => "min-height",
    MaxWidth => "max-width",
    MaxHeight => "max-height",
    MarginTop => "margin-top",
    MarginRight => "margin-right",
    MarginBottom => "margin-bottom",
    MarginLeft => "margin-left",
    PaddingTop => "padding-top",
    PaddingRight => "padding-right",
    PaddingBottom => "padding-bottom",
    PaddingLeft => "padding-left",
    BorderTopWidth => "border-top-width",
    BorderRightWidth => "border-right-width",
    BorderBottomWidth => "border-bottom-width",
    BorderLeftWidth => "border-left-width",
    Top => "top",
    Right => "right",
    Bottom => "bottom",
    Left => "left",
    FlexDirection => "flex-direction",
    FlexWrap => "flex-wrap",
    JustifyContent => "justify-content",
    AlignItems => "align-items",
    AlignContent => "align-content",
    FlexGrow => "flex-grow",
    FlexShrink => "flex-shrink",
    FlexBasis => "flex-basis",
    RowGap => "row-gap",
    ColumnGap => "column-gap",
    GridTemplateColumns => "grid-template-columns",
    GridTemplateRows => "grid-template-rows",
    GridAutoFlow => "grid-auto-flow",
    GridColumnStart => "grid-column-start",
    GridColumnEnd => "grid-column-end",
    GridRowStart => "grid-row-start",
    GridRowEnd => "grid-row-end",
    JustifyItems => "justify-items",
    ZIndex => "z-index",
    BackgroundColor => "background-color",
    BorderColor => "border-color",
    FontSize => "font-size",
}

impl PropertyId {
    /// Properties whose values are keywords stored as `Number` codes.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Display
                | Self::Position
                | Self::Overflow
                | Self::FlexDirection
                | Self::FlexWrap
                | Self::JustifyContent
                | Self::AlignItems
                | Self::AlignContent
                | Self::GridAutoFlow
                | Self::JustifyItems
        )
    }

    /// Properties whose values are kept as raw text for a layout module.
    pub const fn is_raw_text(self) -> bool {
        matches!(self, Self::GridTemplateColumns | Self::GridTemplateRows)
    }

    /// Grid line placements: positive line number, negative span, `0` auto.
    pub const fn is_grid_line(self) -> bool {
        matches!(
            self,
            Self::GridColumnStart | Self::GridColumnEnd | Self::GridRowStart | Self::GridRowEnd
        )
    }
}

/// One resolved declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleProperty {
    pub id: PropertyId,
    pub value: StyleValue,
}

impl StyleProperty {
    #[inline]
    pub const fn new(id: PropertyId, value: StyleValue) -> Self {
        Self { id, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Names map back to the same property.
    ///
    /// # Panics
    /// Panics if any name does not round-trip.
    fn names_are_unique() {
        for property in PropertyId::ALL {
            assert_eq!(PropertyId::from_name(property.name()), Some(*property));
        }
        assert_eq!(PropertyId::from_name("Margin-Left"), Some(PropertyId::MarginLeft));
        assert_eq!(PropertyId::from_name("float"), None);
    }
}
