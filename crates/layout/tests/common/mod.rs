//! Scene builder shared by the layout integration tests.

#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use css_archetypes::parse_style_block;
use css_values_units::ResolveContext;
use layout_arrays::{Geometry, LayoutArrays, LayoutContext, compute_layout};
use node_table::{NodeId, NodeKind, NodeTable};

pub const VIEWPORT_WIDTH: f32 = 800.0;
pub const VIEWPORT_HEIGHT: f32 = 600.0;
const EPSILON: f32 = 0.01;

/// A node tree with inline styles applied row by row.
#[derive(Default)]
pub struct Scene {
    pub nodes: NodeTable,
    pub arrays: LayoutArrays,
}

impl Scene {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self::default()
    }

    /// Append an element styled by a `name: value; ...` block.
    pub fn element(&mut self, parent: Option<NodeId>, style: &str) -> NodeId {
        let node = self.nodes.add_node(NodeKind::Element, None, None, parent);
        let context = ResolveContext {
            percent_base: Some(VIEWPORT_WIDTH),
            ..ResolveContext::default()
        };
        self.arrays.apply_style(node, &parse_style_block(style), &context);
        node
    }

    pub fn node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        self.nodes.add_node(kind, None, None, parent)
    }

    pub fn layout(&mut self) {
        let context = LayoutContext::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        compute_layout(&self.nodes, &mut self.arrays, &context);
    }

    pub fn geometry(&self, node: NodeId) -> Geometry {
        self.arrays.geometry(node).unwrap_or_default()
    }

    /// Whether `node` sits at `(x, y)` with border-box size `width x height`.
    pub fn at(&self, node: NodeId, x: f32, y: f32, width: f32, height: f32) -> bool {
        let rect = self.geometry(node);
        let close = |actual: f32, expected: f32| (actual - expected).abs() < EPSILON;
        let matches = close(rect.x, x)
            && close(rect.y, y)
            && close(rect.width, width)
            && close(rect.height, height);
        if !matches {
            log::error!("{node}: expected ({x}, {y}, {width}, {height}), got {rect:?}");
        }
        matches
    }
}
