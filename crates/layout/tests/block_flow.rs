mod common;

use common::{Scene, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use layout_arrays::{ContentSize, LayoutContext, compute_layout};
use node_table::{Atom, NodeId, NodeKind};

/// Block children stack under each other, offset by their own margins.
///
/// # Panics
/// Panics if a block is misplaced.
#[test]
fn blocks_stack_with_margins() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let first = scene.element(Some(root), "height: 50px; margin: 10px 20px");
    let second = scene.element(Some(root), "height: 30px; padding: 5px; border-width: 1px");
    scene.layout();

    assert!(scene.at(first, 20.0, 10.0, 760.0, 50.0));
    assert!(scene.at(second, 0.0, 70.0, 800.0, 42.0));
    assert!(scene.at(root, 0.0, 0.0, 800.0, 112.0));
    assert!((scene.geometry(second).content_width - 788.0).abs() < 0.01);
}

/// An explicit zero width is kept; only padding remains.
///
/// # Panics
/// Panics if the zero is treated as auto.
#[test]
fn explicit_zero_width_stays_zero() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let zero = scene.element(Some(root), "width: 0; height: 10px; padding-left: 4px");
    scene.layout();

    assert!(!scene.arrays.is_width_auto(zero));
    assert!(scene.at(zero, 0.0, 0.0, 4.0, 10.0));
}

/// Percentages resolve against the containing block; min beats max.
///
/// # Panics
/// Panics if percentage widths or clamps are wrong.
#[test]
fn percentage_widths_and_clamps() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let half = scene.element(Some(root), "width: 50%; height: 10px");
    let capped = scene.element(Some(root), "max-width: 300px; height: 10px");
    let conflicted = scene.element(Some(root), "min-width: 200px; max-width: 100px; height: 10px");
    scene.layout();

    assert!(scene.at(half, 0.0, 0.0, 400.0, 10.0));
    assert!(scene.at(capped, 0.0, 10.0, 300.0, 10.0));
    assert!(scene.at(conflicted, 0.0, 20.0, 200.0, 10.0));
}

/// `display: none` subtrees have zero geometry and take no space.
///
/// # Panics
/// Panics if a hidden box is laid out or shifts its siblings.
#[test]
fn display_none_takes_no_space() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let hidden = scene.element(Some(root), "display: none; height: 100px");
    let inner = scene.element(Some(hidden), "height: 20px");
    let visible = scene.element(Some(root), "height: 10px");
    scene.layout();

    assert!(scene.at(hidden, 0.0, 0.0, 0.0, 0.0));
    assert!(scene.at(inner, 0.0, 0.0, 0.0, 0.0));
    assert!(scene.at(visible, 0.0, 0.0, 800.0, 10.0));
}

/// A document root spans the viewport; comments and doctypes stay empty.
///
/// # Panics
/// Panics if the document or its non-element children are sized.
#[test]
fn document_root_spans_viewport() {
    let mut scene = Scene::new();
    let document = scene.node(NodeKind::Document, None);
    let doctype = scene.node(NodeKind::Doctype, Some(document));
    let html = scene.element(Some(document), "height: 40px");
    let comment = scene.node(NodeKind::Comment, Some(html));
    scene.layout();

    assert!(scene.at(document, 0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
    assert!(scene.at(doctype, 0.0, 0.0, 0.0, 0.0));
    assert!(scene.at(html, 0.0, 0.0, VIEWPORT_WIDTH, 40.0));
    assert!(scene.at(comment, 0.0, 0.0, 0.0, 0.0));
}

/// Inline-level boxes shrink to their content.
///
/// # Panics
/// Panics if an inline-block fills the line.
#[test]
fn inline_block_shrinks_to_fit() {
    let mut scene = Scene::new();
    let root = scene.element(None, "");
    let inline = scene.element(Some(root), "display: inline-block; padding: 2px");
    let content = scene.element(Some(inline), "width: 120px; height: 10px");
    scene.layout();

    assert!(scene.at(inline, 0.0, 0.0, 124.0, 14.0));
    assert!(scene.at(content, 2.0, 2.0, 120.0, 10.0));
}

/// Text is sized by the caller's measurer and stacks like a block.
///
/// # Panics
/// Panics if text sizes are not taken from the measurer.
#[test]
fn text_uses_intrinsic_measurer() {
    let mut scene = Scene::new();
    let root = scene.element(None, "width: 300px");
    let mut texts = Vec::new();
    for raw in 1..=2 {
        let Some(atom) = Atom::from_raw(raw) else {
            return;
        };
        texts.push(scene.nodes.add_node(NodeKind::Text, None, Some(atom), Some(root)));
    }
    let measure = |_: NodeId, text: Option<Atom>, available: Option<f32>| ContentSize {
        width: available.unwrap_or(0.0).min(100.0),
        height: text.map_or(0.0, |atom| 10.0 * atom.get() as f32),
    };
    let context = LayoutContext::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT).with_intrinsic(&measure);
    compute_layout(&scene.nodes, &mut scene.arrays, &context);

    let (Some(first), Some(second)) = (texts.first(), texts.get(1)) else {
        return;
    };
    assert!(scene.at(*first, 0.0, 0.0, 100.0, 10.0));
    assert!(scene.at(*second, 0.0, 10.0, 100.0, 20.0));
    assert!(scene.at(root, 0.0, 0.0, 300.0, 30.0));
}

/// Laying out unchanged input twice gives identical arrays.
///
/// # Panics
/// Panics if a second pass changes any column.
#[test]
fn layout_is_idempotent() {
    let mut scene = Scene::new();
    let root = scene.element(None, "padding: 8px");
    let flex = scene.element(Some(root), "display: flex; justify-content: center; gap: 4px");
    scene.element(Some(flex), "flex: 1; height: 20px");
    scene.element(Some(flex), "width: 30px; height: 10px");
    let grid = scene.element(Some(root), "display: grid; grid-template-columns: 1fr 2fr");
    scene.element(Some(grid), "height: 15px");
    scene.element(Some(root), "position: absolute; right: 0; width: 10px; height: 10px");

    scene.layout();
    let first = scene.arrays.clone();
    scene.layout();
    assert_eq!(first, scene.arrays);
}

/// A branching cycle made through the raw link setters still finishes.
///
/// # Panics
/// Panics if the real child loses its declared size.
#[test]
fn branching_cycle_terminates() {
    let mut scene = Scene::new();
    let root = scene.element(None, "display: flex");
    let child = scene.element(Some(root), "width: 30px; height: 10px");
    scene.nodes.set_first_child(root, Some(root));
    scene.nodes.set_next_sibling(root, Some(child));
    scene.nodes.set_first_child(child, Some(root));
    scene.layout();

    let rect = scene.geometry(child);
    assert!((rect.width - 30.0).abs() < 0.01, "{rect:?}");
    assert!((rect.height - 10.0).abs() < 0.01, "{rect:?}");
}
