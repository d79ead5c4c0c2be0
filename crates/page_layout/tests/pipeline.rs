use css_archetypes::{ClassRules, parse_style_block};
use node_table::{Atom, NodeId, NodeKind};
use page_layout::{Document, EngineConfig, layout_all};

const EPSILON: f32 = 0.01;

struct Classes {
    row: Atom,
    cell: Atom,
    wide: Atom,
    hidden: Atom,
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn classes() -> Option<Classes> {
    Some(Classes {
        row: Atom::from_raw(1)?,
        cell: Atom::from_raw(2)?,
        wide: Atom::from_raw(3)?,
        hidden: Atom::from_raw(4)?,
    })
}

fn rules(classes: &Classes) -> ClassRules {
    let mut rules = ClassRules::new();
    rules.insert(
        classes.row,
        parse_style_block("display: flex; justify-content: space-between; width: 300px"),
    );
    rules.insert(classes.cell, parse_style_block("width: 100px; height: 10px"));
    rules.insert(classes.wide, parse_style_block("width: 50px"));
    rules.insert(classes.hidden, parse_style_block("display: none"));
    rules
}

/// A row of three cells under one flex root.
fn row_document(classes: &Classes) -> (Document, NodeId, Vec<NodeId>) {
    let mut document = Document::with_rules(EngineConfig::default(), rules(classes));
    let root = document.add_node(NodeKind::Element, None, None, None);
    document.assign_classes(root, &[classes.row]);
    let cells = (0..3)
        .map(|_| {
            let cell = document.add_node(NodeKind::Element, None, None, Some(root));
            document.assign_classes(cell, &[classes.cell]);
            cell
        })
        .collect();
    (document, root, cells)
}

fn xs(document: &Document, nodes: &[NodeId]) -> Vec<f32> {
    nodes
        .iter()
        .map(|node| document.geometry(*node).map_or(f32::NAN, |geometry| geometry.x))
        .collect()
}

fn close_all(actual: &[f32], expected: &[f32]) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(left, right)| (left - right).abs() < EPSILON)
}

/// The second pass is served from the cache; a restyle recomputes.
///
/// # Panics
/// Panics if passes are skipped or recomputed at the wrong time.
#[test]
fn restyle_invalidates_and_relayouts() {
    init_logging();
    let Some(classes) = classes() else { return };
    let (mut document, root, cells) = row_document(&classes);

    let first = document.layout();
    assert!(!first.skipped);
    assert_eq!(first.rows_styled, 4);
    assert_eq!(first.cache.size, 4);
    assert!(close_all(&xs(&document, &cells), &[0.0, 100.0, 200.0]));

    let second = document.layout();
    assert!(second.skipped);
    assert_eq!(second.pass, 2);

    let [narrow, middle, last] = cells[..] else { return };
    document.restyle(narrow, &[classes.cell, classes.wide]);
    assert!(!document.cache().has_cached_layout(root));
    assert!(!document.cache().has_cached_layout(narrow));
    assert!(document.cache().has_cached_layout(middle));

    let third = document.layout();
    assert!(!third.skipped);
    assert_eq!(document.archetypes().len(), 3);
    assert!(close_all(&xs(&document, &[narrow, middle, last]), &[0.0, 75.0, 200.0]));
}

/// Restyling with the same classes changes nothing.
///
/// # Panics
/// Panics if an unchanged archetype invalidates the cache.
#[test]
fn same_classes_keep_cache() {
    init_logging();
    let Some(classes) = classes() else { return };
    let (mut document, _, cells) = row_document(&classes);
    document.layout();
    let [first, ..] = cells[..] else { return };
    document.restyle(first, &[classes.cell]);
    assert!(document.is_layout_cached());
    assert!(document.layout().skipped);
}

/// Appending a child invalidates its ancestors and lays the child out.
///
/// # Panics
/// Panics if the new child is ignored.
#[test]
fn added_node_triggers_layout() {
    init_logging();
    let Some(classes) = classes() else { return };
    let (mut document, root, _) = row_document(&classes);
    document.layout();
    let extra = document.add_node(NodeKind::Element, None, None, Some(root));
    document.assign_classes(extra, &[classes.cell]);
    assert!(!document.is_layout_cached());

    let pass = document.layout();
    assert!(!pass.skipped);
    let width = document.geometry(extra).map(|geometry| geometry.width);
    assert!(width.is_some_and(|value| (value - 75.0).abs() < EPSILON));
}

/// Geometry lookups go through the cache and count hits.
///
/// # Panics
/// Panics if lookups are not counted.
#[test]
fn geometry_reads_count_hits() {
    init_logging();
    let Some(classes) = classes() else { return };
    let (mut document, root, _) = row_document(&classes);
    let Some(unknown) = NodeId::from_raw(99) else { return };
    document.layout();
    assert!(document.geometry(root).is_some());
    assert!(document.geometry(unknown).is_none());
    let stats = document.cache().get_cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

/// Paint records skip hidden subtrees and non-box nodes.
///
/// # Panics
/// Panics if a hidden or comment node is painted.
#[test]
fn paint_records_skip_hidden() {
    init_logging();
    let Some(classes) = classes() else { return };
    let mut document = Document::with_rules(EngineConfig::default(), rules(&classes));
    let root = document.add_node(NodeKind::Element, None, None, None);
    let hidden = document.add_node(NodeKind::Element, None, None, Some(root));
    document.assign_classes(hidden, &[classes.hidden]);
    let inside_hidden = document.add_node(NodeKind::Element, None, None, Some(hidden));
    let comment = document.add_node(NodeKind::Comment, None, None, Some(root));
    let shown = document.add_node(NodeKind::Element, None, None, Some(root));
    document.assign_classes(shown, &[classes.cell]);
    let text = document.add_node(NodeKind::Text, None, None, Some(shown));
    document.layout();

    let painted: Vec<NodeId> = document.paint_records().iter().map(|record| record.node).collect();
    assert_eq!(painted, vec![root, shown, text]);
    assert!(!painted.contains(&hidden) && !painted.contains(&inside_hidden));
    assert!(!painted.contains(&comment));
}

/// Draining precache hints recomputes entries invalidated behind the
/// document's back.
///
/// # Panics
/// Panics if the queue or the refreshed entry is wrong.
#[test]
fn drain_precache_refreshes_stale_entries() {
    init_logging();
    let Some(classes) = classes() else { return };
    let (mut document, _, cells) = row_document(&classes);
    document.layout();
    let [first, second, _] = cells[..] else { return };
    document.precache(&[first, second, first]);
    document.cache().invalidate_node(second);

    assert_eq!(document.drain_precache(), vec![first, second]);
    assert!(document.cache().has_cached_layout(second));
    assert!(document.drain_precache().is_empty());
}

/// Independent documents lay out in parallel with identical results.
///
/// # Panics
/// Panics if a parallel pass differs.
#[test]
fn parallel_documents_match() {
    init_logging();
    let Some(classes) = classes() else { return };
    let mut built: Vec<(Document, NodeId, Vec<NodeId>)> =
        (0..8).map(|_| row_document(&classes)).collect();
    let cells = built.first().map(|(_, _, cells)| cells.clone()).unwrap_or_default();
    let mut documents: Vec<Document> = built.drain(..).map(|(document, _, _)| document).collect();

    let reports = layout_all(&mut documents);
    assert_eq!(reports.len(), 8);
    assert!(reports.iter().all(|report| !report.skipped && report.nodes == 4));
    assert!(
        documents
            .iter()
            .all(|document| close_all(&xs(document, &cells), &[0.0, 100.0, 200.0]))
    );
}

/// Telemetry reports serialize with their cache counters.
///
/// # Panics
/// Panics if the report shape changes.
#[test]
fn telemetry_report_serializes() {
    init_logging();
    let Some(classes) = classes() else { return };
    let config = EngineConfig::default().with_telemetry(true);
    let mut document = Document::with_rules(config, rules(&classes));
    document.add_node(NodeKind::Element, None, None, None);
    let report = document.layout();
    let json = serde_json::to_value(report).unwrap_or_default();
    assert_eq!(json.get("nodes").and_then(serde_json::Value::as_u64), Some(1));
    assert!(json.get("cache").and_then(|cache| cache.get("hit_rate")).is_some());
}
