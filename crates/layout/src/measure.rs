//! Intrinsic sizes.
//!
//! Text shaping lives outside the engine. Text nodes (and any node the caller
//! wants to size itself) are measured through [`IntrinsicSize`]; boxes with
//! `auto` sizes fall back to a content estimate built from their children.

use node_table::{Atom, NodeId, NodeKind};

use crate::Display;
use crate::compute::LayoutPass;

/// Border-box size of a measured node.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ContentSize {
    pub width: f32,
    pub height: f32,
}

impl ContentSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

/// Measures leaf content.
pub trait IntrinsicSize {
    /// Size of the text node `node` with interned content `text`, given the
    /// width it may wrap within (`None` when unconstrained).
    fn measure(&self, node: NodeId, text: Option<Atom>, available_width: Option<f32>)
    -> ContentSize;
}

impl<F> IntrinsicSize for F
where
    F: Fn(NodeId, Option<Atom>, Option<f32>) -> ContentSize,
{
    fn measure(
        &self,
        node: NodeId,
        text: Option<Atom>,
        available_width: Option<f32>,
    ) -> ContentSize {
        self(node, text, available_width)
    }
}

/// Every text node measures as empty.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoIntrinsicSize;

impl IntrinsicSize for NoIntrinsicSize {
    fn measure(&self, _: NodeId, _: Option<Atom>, _: Option<f32>) -> ContentSize {
        ContentSize::ZERO
    }
}

impl LayoutPass<'_, '_> {
    /// Border-box content estimate for `node`, used for `auto` flex bases,
    /// grid auto tracks and shrink-to-fit widths.
    ///
    /// Declared sizes win; otherwise block children stack, row flex children
    /// sit side by side, and text asks the [`IntrinsicSize`] seam. Descends
    /// at most `depth` levels and visits each node once per estimate.
    pub(crate) fn measure_content(
        &self,
        node: NodeId,
        available_width: Option<f32>,
        depth: usize,
    ) -> ContentSize {
        let mut seen = vec![false; self.nodes.len()];
        self.measure_node(node, available_width, depth, &mut seen)
    }

    fn measure_node(
        &self,
        node: NodeId,
        available_width: Option<f32>,
        depth: usize,
        seen: &mut [bool],
    ) -> ContentSize {
        let index = node.index();
        match seen.get_mut(index) {
            Some(flag) if !*flag => *flag = true,
            _ => return ContentSize::ZERO,
        }
        match self.nodes.kind(node) {
            Some(NodeKind::Text) => {
                return self
                    .context
                    .intrinsic
                    .measure(node, self.nodes.text_content(node), available_width);
            }
            Some(NodeKind::Element | NodeKind::Document) => {}
            Some(NodeKind::Comment | NodeKind::Doctype) | None => return ContentSize::ZERO,
        }
        let style = self.arrays.box_style(index);
        if style.display == Display::None {
            return ContentSize::ZERO;
        }
        let frame = style.frame();
        let inner_available = available_width.map(|width| (width - frame.horizontal()).max(0.0));
        let declared_width = style.definite_content_width(available_width);
        let declared_height = style.definite_content_height(None);

        let mut content = ContentSize::ZERO;
        if depth > 0 && (declared_width.is_none() || declared_height.is_none()) {
            let row_flex = style.display.is_flex() && style.direction_is_row();
            let child_available = declared_width.or(inner_available);
            for child in self.nodes.children(node) {
                if self.is_out_of_flow_or_hidden(child) {
                    continue;
                }
                let child_size = self.measure_node(child, child_available, depth - 1, seen);
                let margin = self.arrays.margin.get(child.index()).copied().unwrap_or_default();
                let outer_width = child_size.width + margin.horizontal();
                let outer_height = child_size.height + margin.vertical();
                if row_flex {
                    content.width += outer_width;
                    content.height = content.height.max(outer_height);
                } else {
                    content.width = content.width.max(outer_width);
                    content.height += outer_height;
                }
            }
        }
        let width = style.clamp_width(declared_width.unwrap_or(content.width), available_width);
        let height = style.clamp_height(declared_height.unwrap_or(content.height), None);
        ContentSize {
            width: width + frame.horizontal(),
            height: height + frame.vertical(),
        }
    }
}
