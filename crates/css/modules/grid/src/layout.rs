//! Grid layout algorithm.
//!
//! Spec: §11 Grid Sizing
//! <https://www.w3.org/TR/css-grid-1/#layout-algorithm>

use crate::placement::{GridArea, place_grid_items};
use crate::track_sizing::{GridAxis, ResolvedTracks, TrackSizingParams, resolve_track_sizes};
use crate::types::{GridAutoFlow, GridItem, GridTrackSize};

/// Alignment of an item inside its grid area.
///
/// Spec: §10 Alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAlignment {
    Start,
    End,
    Center,
    /// Fill the area when the item's own size is `auto`
    #[default]
    Stretch,
}

/// Input parameters for grid layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridContainerInputs {
    /// Explicit column tracks; empty means a single `auto` column
    pub columns: Vec<GridTrackSize>,
    /// Explicit row tracks; rows beyond these are implicit `auto`
    pub rows: Vec<GridTrackSize>,
    pub auto_flow: GridAutoFlow,
    pub column_gap: f32,
    pub row_gap: f32,
    /// Definite content-box width
    pub width: Option<f32>,
    /// Definite content-box height
    pub height: Option<f32>,
    /// Inline-axis alignment in the area
    pub justify_items: GridAlignment,
    /// Block-axis alignment in the area
    pub align_items: GridAlignment,
}

impl GridContainerInputs {
    /// Create inputs with default flow, gaps and alignment.
    pub const fn new(
        columns: Vec<GridTrackSize>,
        rows: Vec<GridTrackSize>,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Self {
        Self {
            columns,
            rows,
            auto_flow: GridAutoFlow::Row,
            column_gap: 0.0,
            row_gap: 0.0,
            width,
            height,
            justify_items: GridAlignment::Stretch,
            align_items: GridAlignment::Stretch,
        }
    }
}

/// A grid item with its final position and size.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlacedItem<NodeId = usize> {
    pub node_id: NodeId,
    /// Border-box x relative to the container's content box
    pub x: f32,
    /// Border-box y relative to the container's content box
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub area: GridArea,
}

/// Result of grid layout computation.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayoutResult<NodeId = usize> {
    /// Placed items in input order
    pub items: Vec<GridPlacedItem<NodeId>>,
    pub columns: ResolvedTracks,
    pub rows: ResolvedTracks,
    /// Width of all columns plus gaps
    pub total_width: f32,
    /// Height of all rows plus gaps
    pub total_height: f32,
}

impl<NodeId> GridLayoutResult<NodeId> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            columns: ResolvedTracks::default(),
            rows: ResolvedTracks::default(),
            total_width: 0.0,
            total_height: 0.0,
        }
    }
}

/// Own-size, margin and alignment inputs for one axis of one item.
struct AxisFit {
    own: Option<f32>,
    content: f32,
    margin_start: f32,
    margin_end: f32,
    alignment: GridAlignment,
}

/// Position and size of an item inside a cell `[offset, offset + size)`.
fn fit_in_cell(cell_offset: f32, cell_size: f32, fit: &AxisFit) -> (f32, f32) {
    let margins = fit.margin_start + fit.margin_end;
    let start = cell_offset + fit.margin_start;
    match (fit.own, fit.alignment) {
        (None, GridAlignment::Stretch) => (start, (cell_size - margins).max(0.0)),
        (own, alignment) => {
            let size = own.unwrap_or(fit.content);
            let free = cell_size - margins - size;
            let position = match alignment {
                GridAlignment::Start | GridAlignment::Stretch => start,
                GridAlignment::End => start + free,
                GridAlignment::Center => start + free * 0.5,
            };
            (position, size)
        }
    }
}

/// Run the grid layout algorithm.
///
/// Spec: §11.1 Grid Sizing Algorithm
///
/// 1. Places items (explicit lines first, then auto-placement)
/// 2. Resolves column sizes, then row sizes
/// 3. Positions items at the cumulative offset of preceding tracks and gaps
/// 4. Stretches auto-sized items to their area, or aligns them within it
///
/// A container without items returns an empty result without sizing tracks.
pub fn layout_grid<NodeId: Clone>(
    items: &[GridItem<NodeId>],
    inputs: &GridContainerInputs,
) -> GridLayoutResult<NodeId> {
    if items.is_empty() {
        return GridLayoutResult::empty();
    }
    let default_columns = [GridTrackSize::AUTO];
    let columns: &[GridTrackSize] = if inputs.columns.is_empty() {
        &default_columns
    } else {
        &inputs.columns
    };

    // Step 1: Place grid items
    let placements = place_grid_items(items, columns.len(), inputs.rows.len(), inputs.auto_flow);

    // Step 2: Resolve column sizes, then rows
    let column_tracks = resolve_track_sizes(&TrackSizingParams {
        tracks: columns,
        gap: inputs.column_gap,
        available_size: inputs.width,
        items,
        placements: &placements,
        axis: GridAxis::Column,
    });
    let row_tracks = resolve_track_sizes(&TrackSizingParams {
        tracks: &inputs.rows,
        gap: inputs.row_gap,
        available_size: inputs.height,
        items,
        placements: &placements,
        axis: GridAxis::Row,
    });

    // Steps 3-4: Position items in their grid areas
    let placed = items
        .iter()
        .zip(&placements)
        .map(|(item, area)| {
            let [top, right, bottom, left] = item.margin;
            let (cell_x, cell_width) = column_tracks.span_extent(area.col_start, area.col_end);
            let (cell_y, cell_height) = row_tracks.span_extent(area.row_start, area.row_end);
            let (x, width) = fit_in_cell(
                cell_x,
                cell_width,
                &AxisFit {
                    own: item.width,
                    content: item.min_content_width,
                    margin_start: left,
                    margin_end: right,
                    alignment: inputs.justify_items,
                },
            );
            let (y, height) = fit_in_cell(
                cell_y,
                cell_height,
                &AxisFit {
                    own: item.height,
                    content: item.min_content_height,
                    margin_start: top,
                    margin_end: bottom,
                    alignment: inputs.align_items,
                },
            );
            GridPlacedItem {
                node_id: item.node_id.clone(),
                x,
                y,
                width,
                height,
                area: *area,
            }
        })
        .collect();

    let total_width = column_tracks.total();
    let total_height = row_tracks.total();
    tracing::debug!(
        "layout_grid: {} items, {}x{} tracks, total={}x{}",
        items.len(),
        column_tracks.len(),
        row_tracks.len(),
        total_width,
        total_height
    );
    GridLayoutResult {
        items: placed,
        columns: column_tracks,
        rows: row_tracks,
        total_width,
        total_height,
    }
}
