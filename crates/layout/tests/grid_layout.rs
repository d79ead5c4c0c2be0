mod common;

use common::Scene;
use css_grid::GridTrackSize;

/// Flexible tracks share the width by weight.
///
/// # Panics
/// Panics if columns are not `[100, 200, 100]`.
#[test]
fn fr_tracks_share_width() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let grid = scene.element(
        Some(root),
        "display: grid; width: 400px; grid-template-columns: 1fr 2fr 1fr",
    );
    let cells: Vec<_> = (0..3).map(|_| scene.element(Some(grid), "height: 30px")).collect();
    scene.layout();

    let rects: Vec<(f32, f32)> = cells
        .iter()
        .map(|cell| {
            let rect = scene.geometry(*cell);
            (rect.x, rect.width)
        })
        .collect();
    assert_eq!(rects, vec![(0.0, 100.0), (100.0, 200.0), (300.0, 100.0)]);
    assert!(scene.at(grid, 0.0, 0.0, 400.0, 30.0));
}

/// Lines and gaps place an item in its declared cell.
///
/// # Panics
/// Panics if the item ignores its lines or the gap.
#[test]
fn explicit_lines_and_gaps() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let grid = scene.element(
        Some(root),
        "display: grid; grid-template-columns: 100px 100px; grid-template-rows: 30px 30px; gap: 10px; padding: 4px",
    );
    let placed = scene.element(Some(grid), "grid-column: 2; grid-row: 2");
    let spanning = scene.element(Some(grid), "grid-column: 1 / span 2; grid-row: 1");
    scene.layout();

    assert!(scene.at(placed, 114.0, 44.0, 100.0, 30.0));
    assert!(scene.at(spanning, 4.0, 4.0, 210.0, 30.0));
    assert!(scene.at(grid, 0.0, 0.0, 800.0, 78.0));
}

/// A malformed template falls back to a single auto column.
///
/// # Panics
/// Panics if the bad template is kept or items are not stacked.
#[test]
fn malformed_template_falls_back() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let grid = scene.element(
        Some(root),
        "display: grid; width: 300px; grid-template-columns: 1fr banana 2fr",
    );
    let first = scene.element(Some(grid), "height: 20px");
    let second = scene.element(Some(grid), "height: 25px");
    scene.layout();

    let tracks = scene
        .arrays
        .grid_template_columns()
        .get(grid.index())
        .map(|tracks| tracks.to_vec());
    assert_eq!(tracks, Some(vec![GridTrackSize::AUTO]));
    assert!(scene.geometry(first).x.abs() < 0.01);
    assert!((scene.geometry(second).y - 20.0).abs() < 0.01);
    assert!((scene.geometry(grid).height - 45.0).abs() < 0.01);
}

/// A grid container without items keeps its own box-model size.
///
/// # Panics
/// Panics if an empty grid collapses.
#[test]
fn empty_grid_keeps_size() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let grid = scene.element(
        Some(root),
        "display: grid; width: 200px; height: 50px; border-width: 2px; grid-template-columns: 1fr 1fr",
    );
    scene.layout();

    assert!(scene.at(grid, 0.0, 0.0, 204.0, 54.0));
}

/// Sized items align inside their cell; auto items stretch to it.
///
/// # Panics
/// Panics if alignment keywords are ignored.
#[test]
fn items_align_in_cells() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let grid = scene.element(
        Some(root),
        "display: grid; width: 200px; grid-template-columns: 100px 100px; grid-template-rows: 60px; justify-items: center; align-items: end",
    );
    let sized = scene.element(Some(grid), "width: 40px; height: 20px");
    let stretched = scene.element(Some(root), "display: grid; grid-template-columns: 100px; grid-template-rows: 30px");
    let filler = scene.element(Some(stretched), "");
    scene.layout();

    assert!(scene.at(sized, 30.0, 40.0, 40.0, 20.0));
    assert!(scene.at(filler, 0.0, 60.0, 100.0, 30.0));
}

/// A line number far past the explicit grid is capped instead of
/// allocating that many implicit tracks.
///
/// # Panics
/// Panics if the far item or its grid loses its size.
#[test]
fn huge_line_numbers_are_capped() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let grid = scene.element(
        Some(root),
        "display: grid; width: 400px; grid-template-columns: 100px",
    );
    let far = scene.element(Some(grid), "grid-column-start: 2000000000; height: 10px");
    scene.layout();

    assert!(scene.at(grid, 0.0, 0.0, 400.0, 10.0));
    let rect = scene.geometry(far);
    assert!(rect.x >= 100.0, "{rect:?}");
    assert!((rect.height - 10.0).abs() < 0.01, "{rect:?}");
}
