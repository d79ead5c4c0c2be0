//! Layout entry point and per-box driver.

use core::fmt;

use log::{debug, trace};
use node_table::{NodeId, NodeKind, NodeTable};

use crate::arrays::{Display, Geometry, LayoutArrays, Position};
use crate::measure::{ContentSize, IntrinsicSize, NoIntrinsicSize};

/// Content estimates descend at most this many levels.
pub(crate) const MEASURE_DEPTH: usize = 256;

/// Viewport and measurement inputs for one layout pass.
#[derive(Copy, Clone)]
pub struct LayoutContext<'ctx> {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Sizes text nodes.
    pub intrinsic: &'ctx dyn IntrinsicSize,
}

impl LayoutContext<'static> {
    /// A viewport where text measures as empty.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            intrinsic: &NoIntrinsicSize,
        }
    }
}

impl LayoutContext<'_> {
    /// Same viewport, measuring text through `intrinsic`.
    pub fn with_intrinsic<'measure>(
        self,
        intrinsic: &'measure dyn IntrinsicSize,
    ) -> LayoutContext<'measure> {
        LayoutContext {
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            intrinsic,
        }
    }
}

impl fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LayoutContext")
            .field("viewport_width", &self.viewport_width)
            .field("viewport_height", &self.viewport_height)
            .finish_non_exhaustive()
    }
}

/// A content box children are laid out into. Coordinates are absolute.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ContainerBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// `None` while the height depends on the children
    pub height: Option<f32>,
}

/// What a parent decides for one child box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct BoxRequest {
    /// Border-box origin before relative offsets
    pub x: f32,
    pub y: f32,
    /// Border-box width imposed by a flex or grid parent
    pub width: Option<f32>,
    /// Border-box height imposed by a flex or grid parent
    pub height: Option<f32>,
    pub containing_width: f32,
    pub containing_height: Option<f32>,
    /// Size an `auto` width to the content instead of filling
    pub shrink_to_fit: bool,
}

impl BoxRequest {
    /// An in-flow box at `(x, y)` inside `container`.
    pub const fn in_flow(x: f32, y: f32, container: &ContainerBox) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
            containing_width: container.width,
            containing_height: container.height,
            shrink_to_fit: false,
        }
    }

    /// A box whose border-box size was already decided by its parent.
    pub const fn sized(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        container: &ContainerBox,
    ) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
            containing_width: container.width,
            containing_height: container.height,
            shrink_to_fit: false,
        }
    }
}

/// State for one `compute_layout` call.
pub(crate) struct LayoutPass<'pass, 'ctx> {
    pub nodes: &'pass NodeTable,
    pub arrays: &'pass mut LayoutArrays,
    pub context: &'pass LayoutContext<'ctx>,
    /// Rows already laid out; a second visit means a cycle.
    visited: Vec<bool>,
    pub boxes: usize,
}

/// Compute absolute border-box geometry for every node.
///
/// The arrays are resized to the node count and their geometry cleared, so
/// repeated calls on unchanged input give identical results. Each root is
/// laid out in the viewport: a `Document` root spans it, an element root
/// fills its width.
pub fn compute_layout(nodes: &NodeTable, arrays: &mut LayoutArrays, context: &LayoutContext<'_>) {
    arrays.resize(nodes.len());
    arrays.clear_geometry();
    let mut pass = LayoutPass {
        nodes,
        arrays,
        context,
        visited: vec![false; nodes.len()],
        boxes: 0,
    };
    let roots: Vec<NodeId> = nodes.roots().collect();
    for root in &roots {
        pass.layout_root(*root);
    }
    debug!(
        target: "layout",
        "compute_layout: {} nodes, {} roots, {} boxes, viewport={}x{}",
        nodes.len(),
        roots.len(),
        pass.boxes,
        context.viewport_width,
        context.viewport_height
    );
}

impl LayoutPass<'_, '_> {
    fn viewport(&self) -> ContainerBox {
        ContainerBox {
            x: 0.0,
            y: 0.0,
            width: self.context.viewport_width,
            height: Some(self.context.viewport_height),
        }
    }

    fn layout_root(&mut self, root: NodeId) {
        let viewport = self.viewport();
        let request = if self.nodes.kind(root) == Some(NodeKind::Document) {
            BoxRequest::sized(0.0, 0.0, viewport.width, self.context.viewport_height, &viewport)
        } else {
            BoxRequest::in_flow(0.0, 0.0, &viewport)
        };
        self.layout_box(root, request);
    }

    /// Mark `index` as laid out. `false` when it already was.
    fn enter(&mut self, index: usize) -> bool {
        match self.visited.get_mut(index) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    /// Whether `child` sits outside normal flow: `display: none`, an
    /// absolutely or fixed positioned element, or a node that generates no
    /// box at all (comments, doctypes).
    pub(crate) fn is_out_of_flow_or_hidden(&self, child: NodeId) -> bool {
        match self.nodes.kind(child) {
            Some(NodeKind::Element) => {}
            Some(NodeKind::Text) => return false,
            Some(NodeKind::Comment | NodeKind::Doctype | NodeKind::Document) | None => return true,
        }
        let index = child.index();
        self.arrays.display.get(index) == Some(&Display::None)
            || self
                .arrays
                .position
                .get(index)
                .is_some_and(|position| position.is_out_of_flow())
    }

    /// Lay out `node` and its subtree. Returns the border-box size.
    pub(crate) fn layout_box(&mut self, node: NodeId, request: BoxRequest) -> ContentSize {
        let index = node.index();
        if !self.enter(index) {
            debug!(target: "layout", "layout_box: {node} reached twice, skipping");
            return ContentSize::ZERO;
        }
        self.boxes += 1;
        match self.nodes.kind(node) {
            Some(NodeKind::Text) => self.layout_text(node, request),
            Some(NodeKind::Element | NodeKind::Document) => self.layout_element(node, request),
            Some(NodeKind::Comment | NodeKind::Doctype) | None => ContentSize::ZERO,
        }
    }

    fn layout_text(&mut self, node: NodeId, request: BoxRequest) -> ContentSize {
        let measured = self.context.intrinsic.measure(
            node,
            self.nodes.text_content(node),
            Some(request.containing_width),
        );
        let width = request.width.unwrap_or(measured.width);
        let height = request.height.unwrap_or(measured.height);
        self.arrays.set_geometry(
            node.index(),
            Geometry {
                x: request.x,
                y: request.y,
                width,
                height,
                content_width: width,
                content_height: height,
            },
        );
        ContentSize { width, height }
    }

    /// Offset of a `position: relative` box from its flow position.
    fn relative_offset(&self, index: usize, request: &BoxRequest) -> (f32, f32) {
        let Some(inset) = self.arrays.inset.get(index) else {
            return (0.0, 0.0);
        };
        let width = Some(request.containing_width);
        let height = request.containing_height;
        let dx = inset
            .left
            .resolve(width)
            .or_else(|| inset.right.resolve(width).map(|right| -right))
            .unwrap_or(0.0);
        let dy = inset
            .top
            .resolve(height)
            .or_else(|| inset.bottom.resolve(height).map(|bottom| -bottom))
            .unwrap_or(0.0);
        (dx, dy)
    }

    fn layout_element(&mut self, node: NodeId, request: BoxRequest) -> ContentSize {
        let index = node.index();
        let style = self.arrays.box_style(index);
        if style.display == Display::None {
            return ContentSize::ZERO;
        }
        let frame = style.frame();
        let containing_width = request.containing_width;

        let width = match request.width {
            Some(forced) => forced,
            None => match style.definite_content_width(Some(containing_width)) {
                Some(content) => content + frame.horizontal(),
                None if request.shrink_to_fit || style.display.is_inline_level() => {
                    let measured = self.measure_content(node, Some(containing_width), MEASURE_DEPTH);
                    measured.width.min(style.fill_width(containing_width))
                }
                None => style.fill_width(containing_width),
            },
        };
        let content_width = (width - frame.horizontal()).max(0.0);
        let definite_height = request
            .height
            .map(|forced| (forced - frame.vertical()).max(0.0))
            .or_else(|| style.definite_content_height(request.containing_height));

        let (dx, dy) = if style.position == Position::Relative {
            self.relative_offset(index, &request)
        } else {
            (0.0, 0.0)
        };
        let x = request.x + dx;
        let y = request.y + dy;
        let content = ContainerBox {
            x: x + style.border.left + style.padding.left,
            y: y + style.border.top + style.padding.top,
            width: content_width,
            height: definite_height,
        };

        let used_height = if style.display.is_flex() {
            self.layout_flex_children(node, &content)
        } else if style.display.is_grid() {
            self.layout_grid_children(node, &content)
        } else {
            self.layout_block_children(node, &content)
        };
        let content_height = definite_height
            .unwrap_or_else(|| style.clamp_height(used_height, request.containing_height));
        let height = content_height + frame.vertical();
        trace!(
            target: "layout",
            "{node}: {:?} at ({x}, {y}) size {width}x{height}",
            style.display
        );
        self.arrays.set_geometry(
            index,
            Geometry {
                x,
                y,
                width,
                height,
                content_width,
                content_height,
            },
        );

        let padding_box = ContainerBox {
            x: x + style.border.left,
            y: y + style.border.top,
            width: content_width + style.padding.horizontal(),
            height: Some(content_height + style.padding.vertical()),
        };
        self.layout_positioned_children(node, &padding_box, &content);
        ContentSize { width, height }
    }
}
