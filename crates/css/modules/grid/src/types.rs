//! Grid container and item type definitions.
//!
//! Spec: CSS Grid Layout Module Level 1
//! <https://www.w3.org/TR/css-grid-1/>

/// Represents a track breadth in the grid.
///
/// Spec: §7.2.1 Track Sizing Functions
/// <https://www.w3.org/TR/css-grid-1/#track-sizing>
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackBreadth {
    /// Length in pixels
    Length(f32),
    /// Literal percentage of the available space, `25%` is `25.0`
    Percentage(f32),
    /// Flex factor (fr units)
    Flex(f32),
    MinContent,
    MaxContent,
    Auto,
}

impl TrackBreadth {
    /// Check if this breadth is intrinsic (depends on content).
    pub const fn is_intrinsic(self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::Auto)
    }

    /// Get the flex factor, or 0.0 if not flexible.
    pub const fn flex_factor(self) -> f32 {
        match self {
            Self::Flex(factor) => factor,
            _ => 0.0,
        }
    }

    /// Resolve to px against `available`. Intrinsic breadths resolve to
    /// `content`; flexible ones and percentages of indefinite space have no
    /// fixed size.
    pub fn resolve(self, available: Option<f32>, content: f32) -> Option<f32> {
        match self {
            Self::Length(px) => Some(px),
            Self::Percentage(percent) => available.map(|space| space * percent / 100.0),
            Self::Flex(_) => None,
            Self::MinContent | Self::MaxContent | Self::Auto => Some(content),
        }
    }
}

/// Track sizing function.
///
/// Spec: §7.2.1 Track Sizing Functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridTrackSize {
    /// Single breadth used as both minimum and maximum
    Breadth(TrackBreadth),
    /// minmax(min, max)
    MinMax(TrackBreadth, TrackBreadth),
}

impl GridTrackSize {
    pub const AUTO: Self = Self::Breadth(TrackBreadth::Auto);

    /// Get the minimum breadth for this track size. A flexible minimum is
    /// treated as `auto`.
    pub const fn min_breadth(self) -> TrackBreadth {
        match self {
            Self::Breadth(TrackBreadth::Flex(_)) | Self::MinMax(TrackBreadth::Flex(_), _) => {
                TrackBreadth::Auto
            }
            Self::Breadth(breadth) | Self::MinMax(breadth, _) => breadth,
        }
    }

    pub const fn max_breadth(self) -> TrackBreadth {
        match self {
            Self::Breadth(breadth) | Self::MinMax(_, breadth) => breadth,
        }
    }

    /// Flex weight of the maximum breadth, if it is flexible.
    pub const fn flex_weight(self) -> Option<f32> {
        match self.max_breadth() {
            TrackBreadth::Flex(factor) => Some(factor),
            _ => None,
        }
    }
}

/// Auto-placement algorithm direction.
///
/// Spec: §7.7 The grid-auto-flow property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAutoFlow {
    /// Fill each row before starting the next
    #[default]
    Row,
    /// Fill each column before starting the next
    Column,
}

/// Highest line number or span a placement may name.
pub const MAX_GRID_LINE: u32 = 10_000;

const fn clamp_line(value: u32) -> u32 {
    if value > MAX_GRID_LINE { MAX_GRID_LINE } else { value }
}

/// One end of an item's placement on one axis.
///
/// Spec: §8.3 Line-based Placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLine {
    #[default]
    Auto,
    /// 1-based line number
    Line(u32),
    /// `span N`
    Span(u32),
}

impl GridLine {
    /// Decode the compact placement code: positive is a line number,
    /// negative is a span, zero is `auto`.
    pub const fn from_code(code: i32) -> Self {
        if code > 0 {
            Self::Line(clamp_line(code.unsigned_abs()))
        } else if code < 0 {
            Self::Span(clamp_line(code.unsigned_abs()))
        } else {
            Self::Auto
        }
    }

    pub const fn line(self) -> Option<usize> {
        match self {
            Self::Line(line) => Some(clamp_line(line) as usize),
            Self::Auto | Self::Span(_) => None,
        }
    }

    pub const fn span(self) -> Option<usize> {
        match self {
            Self::Span(span) => Some(clamp_line(span) as usize),
            Self::Auto | Self::Line(_) => None,
        }
    }
}

/// Represents a grid item with its style and content information.
///
/// Sizes are border-box px. `None` width/height means `auto`.
#[derive(Debug, Clone)]
pub struct GridItem<NodeId = usize> {
    /// Node identifier (generic to support different node ID types)
    pub node_id: NodeId,
    pub row_start: GridLine,
    pub row_end: GridLine,
    pub col_start: GridLine,
    pub col_end: GridLine,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Minimum content width, used for auto tracks and auto widths
    pub min_content_width: f32,
    /// Minimum content height, used for auto tracks and auto heights
    pub min_content_height: f32,
    /// Margins as `[top, right, bottom, left]`
    pub margin: [f32; 4],
}

impl<NodeId> GridItem<NodeId> {
    /// Create an auto-placed, auto-sized grid item.
    pub const fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            row_start: GridLine::Auto,
            row_end: GridLine::Auto,
            col_start: GridLine::Auto,
            col_end: GridLine::Auto,
            width: None,
            height: None,
            min_content_width: 0.0,
            min_content_height: 0.0,
            margin: [0.0; 4],
        }
    }

    /// Outer width contribution to the tracks it spans.
    pub fn outer_width(&self) -> f32 {
        let [_, right, _, left] = self.margin;
        self.width.unwrap_or(self.min_content_width) + left + right
    }

    /// Outer height contribution to the tracks it spans.
    pub fn outer_height(&self) -> f32 {
        let [top, _, bottom, _] = self.margin;
        self.height.unwrap_or(self.min_content_height) + top + bottom
    }
}
