//! CSS Grid Layout Module Level 1
//! Spec: <https://www.w3.org/TR/css-grid-1/>
//!
//! Pure grid algorithm: track lists in, cell geometry out. Callers resolve
//! item sizes and container sizes to px beforehand.

// Grid container and item types
mod types;
pub use types::{GridAutoFlow, GridItem, GridLine, GridTrackSize, MAX_GRID_LINE, TrackBreadth};

// Track list parsing
mod template;
pub use template::{TrackListError, parse_track_list, track_list_or_auto};

// Grid placement algorithm
mod placement;
pub use placement::{GridArea, place_grid_items};

// Track sizing algorithm
mod track_sizing;
pub use track_sizing::{GridAxis, ResolvedTracks, TrackSizingParams, resolve_track_sizes};

// Grid layout algorithm
mod layout;
pub use layout::{
    GridAlignment, GridContainerInputs, GridLayoutResult, GridPlacedItem, layout_grid,
};
