//! Box model resolution.
//!
//! Declared `width`/`height` size the content box. The border box adds
//! padding and border; the outer (margin) box adds margins. All four sides
//! are independent.

use css_flexbox::FlexDirection;
use css_values_units::Dimension;

use crate::arrays::{Display, LayoutArrays, Position, Sides};

/// Sizing-related style of one row, copied out of the columns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct BoxStyle {
    pub display: Display,
    pub position: Position,
    pub specified_width: Dimension,
    pub specified_height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,
    pub margin: Sides<f32>,
    pub padding: Sides<f32>,
    pub border: Sides<f32>,
    pub flex_direction: FlexDirection,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            position: Position::Static,
            specified_width: Dimension::Auto,
            specified_height: Dimension::Auto,
            min_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_width: Dimension::Auto,
            max_height: Dimension::Auto,
            margin: Sides::ZERO,
            padding: Sides::ZERO,
            border: Sides::ZERO,
            flex_direction: FlexDirection::Row,
        }
    }
}

/// `value` clamped by `min`/`max`, with `min` winning a conflict.
/// `auto` minimums are zero and `auto` maximums unbounded.
fn clamp_dimension(value: f32, min: Dimension, max: Dimension, basis: Option<f32>) -> f32 {
    let lower = min.resolve(basis).unwrap_or(0.0);
    let upper = max.resolve(basis).unwrap_or(f32::INFINITY);
    value.min(upper).max(lower)
}

impl BoxStyle {
    /// Padding plus border.
    #[inline]
    pub fn frame(&self) -> Sides<f32> {
        self.padding.sum(&self.border)
    }

    #[inline]
    pub fn direction_is_row(&self) -> bool {
        self.flex_direction.is_row()
    }

    pub fn clamp_width(&self, content_width: f32, containing_width: Option<f32>) -> f32 {
        clamp_dimension(content_width, self.min_width, self.max_width, containing_width)
    }

    pub fn clamp_height(&self, content_height: f32, containing_height: Option<f32>) -> f32 {
        clamp_dimension(
            content_height,
            self.min_height,
            self.max_height,
            containing_height,
        )
    }

    /// Declared content width, clamped, or `None` when it is `auto` or a
    /// percentage of an indefinite width.
    pub fn definite_content_width(&self, containing_width: Option<f32>) -> Option<f32> {
        self.specified_width
            .resolve(containing_width)
            .map(|width| self.clamp_width(width.max(0.0), containing_width))
    }

    /// Declared content height, clamped, or `None` when it is `auto` or a
    /// percentage of an indefinite height.
    pub fn definite_content_height(&self, containing_height: Option<f32>) -> Option<f32> {
        self.specified_height
            .resolve(containing_height)
            .map(|height| self.clamp_height(height.max(0.0), containing_height))
    }

    /// Border-box width from a content width.
    #[inline]
    pub fn border_box_width(&self, content_width: f32) -> f32 {
        content_width + self.frame().horizontal()
    }

    /// Border-box height from a content height.
    #[inline]
    pub fn border_box_height(&self, content_height: f32) -> f32 {
        content_height + self.frame().vertical()
    }

    /// Outer width: border box plus horizontal margins.
    #[inline]
    pub fn outer_width(&self, content_width: f32) -> f32 {
        self.border_box_width(content_width) + self.margin.horizontal()
    }

    /// Outer height: border box plus vertical margins.
    #[inline]
    pub fn outer_height(&self, content_height: f32) -> f32 {
        self.border_box_height(content_height) + self.margin.vertical()
    }

    /// Width an in-flow block fills inside `containing_width`: the space left
    /// after margins, never narrower than its own padding and border.
    pub fn fill_width(&self, containing_width: f32) -> f32 {
        let frame = self.frame().horizontal();
        let content = (containing_width - self.margin.horizontal() - frame).max(0.0);
        self.clamp_width(content, Some(containing_width)) + frame
    }
}

impl LayoutArrays {
    /// Copy the sizing style of row `index`; missing rows read as initial.
    pub(crate) fn box_style(&self, index: usize) -> BoxStyle {
        let initial = BoxStyle::default();
        BoxStyle {
            display: self.display.get(index).copied().unwrap_or(initial.display),
            position: self.position.get(index).copied().unwrap_or(initial.position),
            specified_width: self.specified_width.get(index).copied().unwrap_or_default(),
            specified_height: self.specified_height.get(index).copied().unwrap_or_default(),
            min_width: self.min_width.get(index).copied().unwrap_or_default(),
            min_height: self.min_height.get(index).copied().unwrap_or_default(),
            max_width: self.max_width.get(index).copied().unwrap_or_default(),
            max_height: self.max_height.get(index).copied().unwrap_or_default(),
            margin: self.margin.get(index).copied().unwrap_or_default(),
            padding: self.padding.get(index).copied().unwrap_or_default(),
            border: self.border.get(index).copied().unwrap_or_default(),
            flex_direction: self
                .flex_direction
                .get(index)
                .copied()
                .unwrap_or(initial.flex_direction),
        }
    }
}
