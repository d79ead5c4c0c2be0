//! Grid item placement algorithm.
//!
//! Spec: §8.5 Grid Item Placement Algorithm
//! <https://www.w3.org/TR/css-grid-1/#auto-placement-algo>
//!
//! Placement runs in flow-relative coordinates: "major" is the axis the
//! cursor advances line by line (rows for `row` flow) and "minor" the axis
//! it fills first. Results are mapped back to rows and columns at the end.

use log::{debug, trace};

use crate::types::{GridAutoFlow, GridItem, GridLine};

/// Area occupied by a grid item. Lines are 1-based, ends exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl GridArea {
    pub const fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// Get the row span (number of rows occupied).
    pub const fn row_span(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    /// Get the column span (number of columns occupied).
    pub const fn col_span(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    /// Check if this area overlaps with another area.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.row_start < other.row_end
            && self.row_end > other.row_start
            && self.col_start < other.col_end
            && self.col_end > other.col_start
    }

    const fn transposed(self) -> Self {
        Self::new(self.col_start, self.col_end, self.row_start, self.row_end)
    }
}

/// One axis of an item's placement: a fixed start line, or auto with a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisPlacement {
    start: Option<usize>,
    span: usize,
}

impl AxisPlacement {
    fn end(self) -> Option<usize> {
        self.start.map(|start| start + self.span)
    }
}

/// Resolve one axis from its start/end lines.
///
/// Spec: §8.3.1 Grid Placement Conflict Handling
fn resolve_axis(start: GridLine, end: GridLine) -> AxisPlacement {
    let fixed = |start: usize, span: usize| AxisPlacement {
        start: Some(start.max(1)),
        span: span.max(1),
    };
    match (start.line(), end.line()) {
        (Some(first), Some(second)) => {
            let (low, high) = if second < first { (second, first) } else { (first, second) };
            fixed(low, high - low)
        }
        (Some(first), None) => fixed(first, end.span().unwrap_or(1)),
        (None, Some(last)) => {
            let span = start.span().unwrap_or(1);
            let first = last.saturating_sub(span).max(1);
            fixed(first, last.saturating_sub(first))
        }
        (None, None) => AxisPlacement {
            start: None,
            span: start.span().or_else(|| end.span()).unwrap_or(1).max(1),
        },
    }
}

/// Flow-relative placement request for one item.
#[derive(Debug, Clone, Copy)]
struct Request {
    major: AxisPlacement,
    minor: AxisPlacement,
}

impl Request {
    const fn area(major_start: usize, major_span: usize, minor_start: usize, minor_span: usize) -> GridArea {
        GridArea::new(
            major_start,
            major_start + major_span,
            minor_start,
            minor_start + minor_span,
        )
    }
}

fn is_free(placed: &[GridArea], candidate: &GridArea) -> bool {
    !placed.iter().any(|area| area.overlaps(candidate))
}

/// Place grid items according to the grid placement algorithm.
///
/// Spec: §8.5 Grid Item Placement Algorithm
///
/// 1. Items with a definite position on both axes are placed as declared.
/// 2. Items locked to a major line take the first free minor position.
/// 3. Remaining items follow the auto-placement cursor, wrapping at the
///    explicit minor count (columns for `row` flow).
///
/// Returns one area per item in input order. Placements may extend past the
/// explicit grid; the track sizing step adds implicit tracks for them.
pub fn place_grid_items<NodeId>(
    items: &[GridItem<NodeId>],
    col_count: usize,
    row_count: usize,
    auto_flow: GridAutoFlow,
) -> Vec<GridArea> {
    let by_row = auto_flow == GridAutoFlow::Row;
    let requests: Vec<Request> = items
        .iter()
        .map(|item| {
            let rows = resolve_axis(item.row_start, item.row_end);
            let cols = resolve_axis(item.col_start, item.col_end);
            if by_row {
                Request {
                    major: rows,
                    minor: cols,
                }
            } else {
                Request {
                    major: cols,
                    minor: rows,
                }
            }
        })
        .collect();

    let explicit_minor = if by_row { col_count } else { row_count };
    let minor_count = requests
        .iter()
        .map(|request| {
            request
                .minor
                .end()
                .map_or(request.minor.span, |end| end.saturating_sub(1))
        })
        .fold(explicit_minor.max(1), usize::max);

    let mut slots: Vec<Option<GridArea>> = vec![None; requests.len()];
    let mut placed: Vec<GridArea> = Vec::with_capacity(requests.len());

    // Step 1: fully definite items.
    for (slot, request) in slots.iter_mut().zip(&requests) {
        if let (Some(major), Some(minor)) = (request.major.start, request.minor.start) {
            let area = Request::area(major, request.major.span, minor, request.minor.span);
            placed.push(area);
            *slot = Some(area);
        }
    }

    // Step 2: items locked to a major line.
    for (slot, request) in slots.iter_mut().zip(&requests) {
        let (Some(major), None) = (request.major.start, request.minor.start) else {
            continue;
        };
        let mut minor = 1;
        let area = loop {
            let candidate = Request::area(major, request.major.span, minor, request.minor.span);
            if is_free(&placed, &candidate) {
                break candidate;
            }
            minor += 1;
        };
        placed.push(area);
        *slot = Some(area);
    }

    // Step 3: auto major position, following the cursor.
    let mut cursor_major = 1;
    let mut cursor_minor = 1;
    for (slot, request) in slots.iter_mut().zip(&requests) {
        if slot.is_some() {
            continue;
        }
        let area = if let Some(minor) = request.minor.start {
            if minor < cursor_minor {
                cursor_major += 1;
            }
            loop {
                let candidate =
                    Request::area(cursor_major, request.major.span, minor, request.minor.span);
                if is_free(&placed, &candidate) {
                    cursor_minor = minor + request.minor.span;
                    break candidate;
                }
                cursor_major += 1;
            }
        } else {
            loop {
                if cursor_minor > 1 && cursor_minor + request.minor.span - 1 > minor_count {
                    cursor_major += 1;
                    cursor_minor = 1;
                }
                let candidate = Request::area(
                    cursor_major,
                    request.major.span,
                    cursor_minor,
                    request.minor.span,
                );
                if is_free(&placed, &candidate) {
                    cursor_minor += request.minor.span;
                    break candidate;
                }
                cursor_minor += 1;
            }
        };
        trace!(target: "css::grid::placement", "auto-placed at {area:?}");
        placed.push(area);
        *slot = Some(area);
    }

    debug!(
        target: "css::grid::placement",
        "placed {} items, flow={auto_flow:?}, minor_count={minor_count}",
        items.len()
    );
    slots
        .into_iter()
        .map(|slot| {
            let area = slot.unwrap_or(GridArea::new(1, 2, 1, 2));
            if by_row { area } else { area.transposed() }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positioned(id: usize, row: (i32, i32), col: (i32, i32)) -> GridItem {
        GridItem {
            row_start: GridLine::from_code(row.0),
            row_end: GridLine::from_code(row.1),
            col_start: GridLine::from_code(col.0),
            col_end: GridLine::from_code(col.1),
            ..GridItem::new(id)
        }
    }

    /// Test grid area span calculation.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn grid_area_span() {
        let area = GridArea::new(1, 3, 2, 5);
        assert_eq!(area.row_span(), 2);
        assert_eq!(area.col_span(), 3);
    }

    /// Test grid area overlap detection.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn grid_area_overlaps() {
        let first = GridArea::new(1, 3, 1, 3);
        let second = GridArea::new(2, 4, 2, 4);
        let third = GridArea::new(4, 5, 4, 5);

        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
        assert!(!first.overlaps(&third));
    }

    /// Row flow fills columns then wraps to the next row.
    ///
    /// # Panics
    /// Panics if auto-placement does not wrap at the column count.
    #[test]
    fn row_flow_wraps_at_column_count() {
        let items = vec![GridItem::new(1), GridItem::new(2), GridItem::new(3)];
        let placements = place_grid_items(&items, 2, 0, GridAutoFlow::Row);
        assert_eq!(
            placements,
            vec![
                GridArea::new(1, 2, 1, 2),
                GridArea::new(1, 2, 2, 3),
                GridArea::new(2, 3, 1, 2),
            ]
        );
    }

    /// Column flow fills rows then wraps to the next column.
    ///
    /// # Panics
    /// Panics if column flow does not wrap at the row count.
    #[test]
    fn column_flow_wraps_at_row_count() {
        let items = vec![GridItem::new(1), GridItem::new(2), GridItem::new(3)];
        let placements = place_grid_items(&items, 3, 2, GridAutoFlow::Column);
        assert_eq!(
            placements,
            vec![
                GridArea::new(1, 2, 1, 2),
                GridArea::new(2, 3, 1, 2),
                GridArea::new(1, 2, 2, 3),
            ]
        );
    }

    /// Explicit items are placed first and auto items flow around them.
    ///
    /// # Panics
    /// Panics if an auto item overlaps an explicit one.
    #[test]
    fn auto_items_skip_explicit_cells() {
        let items = vec![
            GridItem::new(1),
            positioned(2, (1, 0), (1, -2)),
            GridItem::new(3),
        ];
        let placements = place_grid_items(&items, 3, 0, GridAutoFlow::Row);
        assert_eq!(
            placements,
            vec![
                GridArea::new(1, 2, 3, 4),
                GridArea::new(1, 2, 1, 3),
                GridArea::new(2, 3, 1, 2),
            ]
        );
    }

    /// Reversed lines swap and an end line with a span counts backwards.
    ///
    /// # Panics
    /// Panics if conflict handling differs.
    #[test]
    fn line_conflicts_resolve() {
        let items = vec![positioned(1, (3, 1), (-2, 4))];
        let placements = place_grid_items(&items, 4, 4, GridAutoFlow::Row);
        assert_eq!(placements, vec![GridArea::new(1, 3, 2, 4)]);
    }

    /// Placements past the explicit grid are kept; tracks are added later.
    ///
    /// # Panics
    /// Panics if an out-of-range line is clamped.
    #[test]
    fn placement_beyond_explicit_grid() {
        let items = vec![positioned(1, (5, 0), (4, 0))];
        let placements = place_grid_items(&items, 2, 2, GridAutoFlow::Row);
        assert_eq!(placements, vec![GridArea::new(5, 6, 4, 5)]);
    }
}
