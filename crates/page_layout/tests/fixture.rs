use std::path::Path;

use page_layout::fixture::load_fixture_file;
use page_layout::{EngineConfig, Fixture, load_document, load_fixture};

const EPSILON: f32 = 0.01;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dashboard() -> Option<Fixture> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dashboard.json");
    load_fixture_file(&path, EngineConfig::default()).ok()
}

/// Whether node `id` sits at `(x, y)` with size `width x height`.
fn placed(fixture: &Fixture, id: &str, expected: [f32; 4]) -> bool {
    let Some(geometry) = fixture.node(id).and_then(|node| fixture.document.geometry(node)) else {
        log::error!("{id}: no geometry");
        return false;
    };
    let actual = [geometry.x, geometry.y, geometry.width, geometry.height];
    let matches = actual
        .iter()
        .zip(expected)
        .all(|(left, right)| (left - right).abs() < EPSILON);
    if !matches {
        log::error!("{id}: expected {expected:?}, got {actual:?}");
    }
    matches
}

/// The dashboard scene goes through the whole pipeline.
///
/// # Panics
/// Panics if any box is misplaced.
#[test]
fn dashboard_end_to_end() {
    init_logging();
    let loaded = dashboard();
    assert!(loaded.is_some(), "dashboard fixture failed to load");
    let Some(mut fixture) = loaded else { return };
    let pass = fixture.document.layout();
    assert!(!pass.skipped);
    assert_eq!(pass.nodes, 13);

    assert!(placed(&fixture, "page", [0.0, 0.0, 400.0, 132.0]));
    assert!(placed(&fixture, "toolbar", [10.0, 10.0, 380.0, 30.0]));
    assert!(placed(&fixture, "back", [10.0, 15.0, 60.0, 20.0]));
    assert!(placed(&fixture, "forward", [330.0, 15.0, 60.0, 20.0]));
    assert!(placed(&fixture, "tile-a", [10.0, 50.0, 90.0, 40.0]));
    assert!(placed(&fixture, "tile-b", [110.0, 50.0, 180.0, 40.0]));
    assert!(placed(&fixture, "tile-c", [300.0, 50.0, 90.0, 40.0]));
    assert!(placed(&fixture, "note", [10.0, 90.0, 50.0, 32.0]));
    assert!(placed(&fixture, "words", [10.0, 90.0, 48.0, 32.0]));
    assert!(placed(&fixture, "badge", [380.0, 0.0, 20.0, 20.0]));

    let painted = fixture.document.paint_records().len();
    assert_eq!(painted, 11);
    assert!(fixture.document.layout().skipped);
}

/// Loading without a file uses the default viewport.
///
/// # Panics
/// Panics if the minimal scene does not span the viewport.
#[test]
fn minimal_scene_uses_defaults() {
    init_logging();
    let json = r#"{ "roots": [ { "kind": "document", "children": [ { "id": "x" } ] } ] }"#;
    let loaded = load_document(json).ok();
    assert!(loaded.is_some(), "minimal scene failed to load");
    let Some(mut document) = loaded else { return };
    document.layout();
    let root = document.nodes().roots().next();
    let size = root
        .and_then(|node| document.geometry(node))
        .map(|geometry| (geometry.width, geometry.height));
    assert_eq!(size, Some((800.0, 600.0)));
}

/// Structural mistakes are reported with their location.
///
/// # Panics
/// Panics if an invalid scene loads or the message lacks context.
#[test]
fn invalid_scenes_are_rejected() {
    init_logging();
    let cases = [
        (r#"{ "roots": [ { "id": "a" }, { "id": "a" } ] }"#, "duplicate node id `a`"),
        (
            r#"{ "roots": [ { "children": [ { "kind": "text", "text": "t", "classes": ["c"] } ] } ] }"#,
            "child 0",
        ),
        (r#"{ "roots": [ { "text": "stray" } ] }"#, "only text nodes carry text"),
        (r#"{ "roots": [ { "colour": "red" } ] }"#, "parsing scene JSON"),
        (r#"{ "roots": "#, "parsing scene JSON"),
    ];
    for (json, expected) in cases {
        let message = load_fixture(json, EngineConfig::default())
            .err()
            .map(|error| format!("{error:#}"))
            .unwrap_or_default();
        assert!(message.contains(expected), "{json}: {message}");
    }
}

/// Missing files name the path.
///
/// # Panics
/// Panics if a missing file loads.
#[test]
fn missing_file_names_path() {
    init_logging();
    let result = load_fixture_file(Path::new("no/such/scene.json"), EngineConfig::default());
    let message = result.err().map(|error| format!("{error:#}")).unwrap_or_default();
    assert!(message.contains("no/such/scene.json"), "{message}");
}
