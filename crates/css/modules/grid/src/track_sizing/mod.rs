//! Grid track sizing algorithm.
//!
//! Spec: §11 Grid Sizing
//! <https://www.w3.org/TR/css-grid-1/#algo-track-sizing>

mod distribution;
mod resolution;

use crate::placement::GridArea;
use crate::types::{GridItem, GridTrackSize};

use distribution::{distribute_flex_space, maximize_tracks};
use resolution::{content_contributions, initial_track_bases};

/// Axis identifier (row or column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Sizes the rows (block axis)
    Row,
    /// Sizes the columns (inline axis)
    Column,
}

impl GridAxis {
    /// The item's `(start, end)` lines on this axis.
    pub const fn lines(self, area: &GridArea) -> (usize, usize) {
        match self {
            Self::Row => (area.row_start, area.row_end),
            Self::Column => (area.col_start, area.col_end),
        }
    }
}

/// Parameters for track sizing on one axis.
#[derive(Debug)]
pub struct TrackSizingParams<'params, NodeId> {
    /// Explicit tracks from the template
    pub tracks: &'params [GridTrackSize],
    /// Gap between adjacent tracks
    pub gap: f32,
    /// Definite space for the tracks, `None` when it depends on content
    pub available_size: Option<f32>,
    pub items: &'params [GridItem<NodeId>],
    /// One area per item
    pub placements: &'params [GridArea],
    pub axis: GridAxis,
}

/// Final track sizes and offsets for one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTracks {
    pub sizes: Vec<f32>,
    /// Start offset of each track, gaps included
    pub offsets: Vec<f32>,
    pub gap: f32,
}

impl ResolvedTracks {
    fn from_sizes(sizes: Vec<f32>, gap: f32) -> Self {
        let mut cursor = 0.0;
        let offsets = sizes
            .iter()
            .map(|size| {
                let offset = cursor;
                cursor += size + gap;
                offset
            })
            .collect();
        Self {
            sizes,
            offsets,
            gap,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sum of all tracks plus the gaps between them.
    pub fn total(&self) -> f32 {
        let gaps = self.gap * self.sizes.len().saturating_sub(1) as f32;
        self.sizes.iter().sum::<f32>() + gaps
    }

    /// Offset and size of the cell spanning lines `[start_line, end_line)`.
    /// Spanned gaps are part of the size.
    pub fn span_extent(&self, start_line: usize, end_line: usize) -> (f32, f32) {
        let first = start_line.saturating_sub(1).min(self.sizes.len());
        let last = end_line.saturating_sub(1).clamp(first, self.sizes.len());
        let offset = self
            .offsets
            .get(first)
            .copied()
            .unwrap_or_else(|| self.total() + self.gap);
        let spanned = self.sizes.get(first..last).unwrap_or(&[]);
        let gaps = self.gap * spanned.len().saturating_sub(1) as f32;
        (offset, spanned.iter().sum::<f32>() + gaps)
    }
}

/// Resolve track sizes according to the grid sizing algorithm.
///
/// Spec: §11.3-11.7
///
/// 1. Implicit `auto` tracks are appended for placements past the explicit
///    grid.
/// 2. Fixed, percentage and intrinsic tracks take their base size; intrinsic
///    tracks use the largest content contribution of the items in them.
/// 3. The space left after base sizes and gaps is split into `fr` units;
///    each flexible track gets weight × unit, floored at its minimum.
/// 4. Without flexible tracks, leftover space grows `minmax()` tracks up to
///    their maximum.
///
/// With an indefinite available size, flexible tracks size like `auto`.
pub fn resolve_track_sizes<NodeId>(params: &TrackSizingParams<'_, NodeId>) -> ResolvedTracks {
    let furthest_line = params
        .placements
        .iter()
        .map(|area| params.axis.lines(area).1)
        .max()
        .unwrap_or(0);
    let track_count = params.tracks.len().max(furthest_line.saturating_sub(1));
    let mut tracks = params.tracks.to_vec();
    tracks.resize(track_count, GridTrackSize::AUTO);

    let contributions = content_contributions(params, track_count);
    let mut bases = initial_track_bases(&tracks, &contributions, params.available_size);

    let total_gap = params.gap * track_count.saturating_sub(1) as f32;
    tracing::debug!(
        "resolve_track_sizes: axis={:?}, tracks={} (explicit {}), available={:?}, gaps={}",
        params.axis,
        track_count,
        params.tracks.len(),
        params.available_size,
        total_gap
    );

    if let Some(available) = params.available_size {
        let fixed: f32 = bases
            .iter()
            .filter(|track| track.flex_weight.is_none())
            .map(|track| track.base)
            .sum();
        let remaining = available - total_gap - fixed;
        if bases.iter().any(|track| track.flex_weight.is_some()) {
            distribute_flex_space(&mut bases, remaining);
        } else {
            maximize_tracks(&mut bases, remaining);
        }
    }

    let sizes: Vec<f32> = bases.iter().map(|track| track.base).collect();
    tracing::debug!("resolve_track_sizes: axis={:?}, sizes={:?}", params.axis, sizes);
    ResolvedTracks::from_sizes(sizes, params.gap)
}
