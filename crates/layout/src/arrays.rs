//! Parallel layout columns.

use std::sync::Arc;

use css_archetypes::keywords::{display, overflow, position};
use css_flexbox::{AlignContent, AlignItems, FlexDirection, FlexWrap, JustifyContent};
use css_grid::{GridAlignment, GridAutoFlow, GridLine, GridTrackSize};
use css_values_units::{Color, Dimension};
use node_table::NodeId;

/// `display`, reduced to the box kinds the engine lays out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Display {
    None,
    #[default]
    Block,
    InlineBlock,
    Flex,
    InlineFlex,
    Grid,
    InlineGrid,
}

impl Display {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            display::NONE => Some(Self::None),
            display::BLOCK => Some(Self::Block),
            display::INLINE_BLOCK => Some(Self::InlineBlock),
            display::FLEX => Some(Self::Flex),
            display::INLINE_FLEX => Some(Self::InlineFlex),
            display::GRID => Some(Self::Grid),
            display::INLINE_GRID => Some(Self::InlineGrid),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_flex(self) -> bool {
        matches!(self, Self::Flex | Self::InlineFlex)
    }

    #[inline]
    pub const fn is_grid(self) -> bool {
        matches!(self, Self::Grid | Self::InlineGrid)
    }

    /// Inline-level boxes shrink to fit instead of filling the line.
    #[inline]
    pub const fn is_inline_level(self) -> bool {
        matches!(self, Self::InlineBlock | Self::InlineFlex | Self::InlineGrid)
    }
}

/// `position`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

impl Position {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            position::STATIC => Some(Self::Static),
            position::RELATIVE => Some(Self::Relative),
            position::ABSOLUTE => Some(Self::Absolute),
            position::FIXED => Some(Self::Fixed),
            _ => None,
        }
    }

    /// Absolute and fixed boxes do not take part in flow, flex or grid.
    #[inline]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// `overflow`. Recorded for the paint side; layout does not clip.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

impl Overflow {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            overflow::VISIBLE => Some(Self::Visible),
            overflow::HIDDEN => Some(Self::Hidden),
            overflow::SCROLL => Some(Self::Scroll),
            overflow::AUTO => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Four independent box sides.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Sides<T> {
    pub const fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Sides<f32> {
    pub const ZERO: Self = Self::all(0.0);

    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    #[inline]
    pub fn sum(&self, other: &Self) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}

/// Computed geometry of one node, in absolute document coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Geometry {
    /// Border-box left edge
    pub x: f32,
    /// Border-box top edge
    pub y: f32,
    /// Border-box width
    pub width: f32,
    /// Border-box height
    pub height: f32,
    pub content_width: f32,
    pub content_height: f32,
}

fn no_tracks() -> Arc<[GridTrackSize]> {
    Arc::from(Vec::new())
}

macro_rules! layout_columns {
    ($($(#[$doc:meta])* $name:ident: $ty:ty = $initial:expr,)*) => {
        /// Per-node layout data as parallel columns.
        ///
        /// Every column has one row per node; [`LayoutArrays::resize`] keeps
        /// the lengths equal. New rows take the CSS initial value of their
        /// property and zero geometry.
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct LayoutArrays {
            $($(#[$doc])* pub(crate) $name: Vec<$ty>,)*
        }

        impl LayoutArrays {
            /// Grow or shrink every column to `len` rows.
            pub fn resize(&mut self, len: usize) {
                $(self.$name.resize(len, $initial);)*
            }

            /// Reset every style and geometry column of one row.
            pub(crate) fn reset_row(&mut self, index: usize) {
                $(if let Some(slot) = self.$name.get_mut(index) {
                    *slot = $initial;
                })*
            }

            $(
                $(#[$doc])*
                #[inline]
                pub fn $name(&self) -> &[$ty] {
                    &self.$name
                }
            )*
        }
    };
}

layout_columns! {
    /// Border-box left edge, absolute
    x: f32 = 0.0,
    /// Border-box top edge, absolute
    y: f32 = 0.0,
    /// Border-box width
    width: f32 = 0.0,
    /// Border-box height
    height: f32 = 0.0,
    content_width: f32 = 0.0,
    content_height: f32 = 0.0,

    /// Declared content-box width
    specified_width: Dimension = Dimension::Auto,
    /// Declared content-box height
    specified_height: Dimension = Dimension::Auto,
    min_width: Dimension = Dimension::Auto,
    min_height: Dimension = Dimension::Auto,
    /// `Auto` stands for `none`
    max_width: Dimension = Dimension::Auto,
    /// `Auto` stands for `none`
    max_height: Dimension = Dimension::Auto,

    margin: Sides<f32> = Sides::ZERO,
    padding: Sides<f32> = Sides::ZERO,
    border: Sides<f32> = Sides::ZERO,
    /// `top`/`right`/`bottom`/`left` for positioned boxes
    inset: Sides<Dimension> = Sides::all(Dimension::Auto),

    display: Display = Display::Block,
    position: Position = Position::Static,
    overflow: Overflow = Overflow::Visible,

    flex_direction: FlexDirection = FlexDirection::Row,
    flex_wrap: FlexWrap = FlexWrap::Nowrap,
    justify_content: JustifyContent = JustifyContent::Start,
    /// Shared by flex and grid containers
    align_items: AlignItems = AlignItems::Stretch,
    align_content: AlignContent = AlignContent::Stretch,
    flex_grow: f32 = 0.0,
    flex_shrink: f32 = 1.0,
    flex_basis: Dimension = Dimension::Auto,
    row_gap: f32 = 0.0,
    column_gap: f32 = 0.0,

    /// Parsed once per archetype and shared between rows
    grid_template_columns: Arc<[GridTrackSize]> = no_tracks(),
    /// Parsed once per archetype and shared between rows
    grid_template_rows: Arc<[GridTrackSize]> = no_tracks(),
    grid_auto_flow: GridAutoFlow = GridAutoFlow::Row,
    justify_items: GridAlignment = GridAlignment::Stretch,
    grid_column_start: GridLine = GridLine::Auto,
    grid_column_end: GridLine = GridLine::Auto,
    grid_row_start: GridLine = GridLine::Auto,
    grid_row_end: GridLine = GridLine::Auto,

    background_color: Color = Color::TRANSPARENT,
    border_color: Color = Color::BLACK,
    z_index: i32 = 0,
    /// Computed font size, for `em`
    font_size: f32 = 16.0,
}

impl LayoutArrays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrays with `len` rows of initial values.
    pub fn with_len(len: usize) -> Self {
        let mut arrays = Self::default();
        arrays.resize(len);
        arrays
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Computed geometry of `node`, `None` when the row does not exist.
    pub fn geometry(&self, node: NodeId) -> Option<Geometry> {
        let index = node.index();
        Some(Geometry {
            x: *self.x.get(index)?,
            y: *self.y.get(index)?,
            width: *self.width.get(index)?,
            height: *self.height.get(index)?,
            content_width: *self.content_width.get(index)?,
            content_height: *self.content_height.get(index)?,
        })
    }

    /// Whether the declared width is `auto`. An explicit `0px` is not.
    pub fn is_width_auto(&self, node: NodeId) -> bool {
        self.specified_width
            .get(node.index())
            .is_none_or(|width| width.is_auto())
    }

    /// Whether the declared height is `auto`. An explicit `0px` is not.
    pub fn is_height_auto(&self, node: NodeId) -> bool {
        self.specified_height
            .get(node.index())
            .is_none_or(|height| height.is_auto())
    }

    pub(crate) fn set_geometry(&mut self, index: usize, geometry: Geometry) {
        let columns = [
            (&mut self.x, geometry.x),
            (&mut self.y, geometry.y),
            (&mut self.width, geometry.width),
            (&mut self.height, geometry.height),
            (&mut self.content_width, geometry.content_width),
            (&mut self.content_height, geometry.content_height),
        ];
        for (column, value) in columns {
            if let Some(slot) = column.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// Move the border box of row `index` by `(dx, dy)`.
    pub(crate) fn translate(&mut self, index: usize, dx: f32, dy: f32) {
        if let Some(slot) = self.x.get_mut(index) {
            *slot += dx;
        }
        if let Some(slot) = self.y.get_mut(index) {
            *slot += dy;
        }
    }

    /// Zero the geometry of every row, keeping style.
    pub(crate) fn clear_geometry(&mut self) {
        for column in [
            &mut self.x,
            &mut self.y,
            &mut self.width,
            &mut self.height,
            &mut self.content_width,
            &mut self.content_height,
        ] {
            column.fill(0.0);
        }
    }
}
