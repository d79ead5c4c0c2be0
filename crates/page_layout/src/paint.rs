//! Paint handoff records.

use css_values_units::Color;
use layout_arrays::{Display, Overflow};
use node_table::{NodeId, NodeKind};

use crate::document::Document;

/// What the render-command emitter needs to paint one box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxRecord {
    pub node: NodeId,
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub display: Display,
    pub overflow: Overflow,
    pub background_color: Color,
    pub border_color: Color,
    pub z_index: i32,
}

impl Document {
    /// Element and text boxes in node-id order. `display: none` subtrees
    /// and nodes unreachable from a root are left out.
    pub fn paint_records(&self) -> Vec<BoxRecord> {
        let nodes = &self.nodes;
        let arrays = &self.arrays;
        let mut visible = vec![false; nodes.len()];
        let mut stack: Vec<NodeId> = nodes.roots().collect();
        while let Some(node) = stack.pop() {
            let index = node.index();
            if arrays.display().get(index) == Some(&Display::None) {
                continue;
            }
            match visible.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            stack.extend(nodes.children(node));
        }

        nodes
            .ids()
            .zip(visible)
            .filter(|(_, shown)| *shown)
            .filter_map(|(node, _)| {
                let kind = nodes.kind(node).filter(|kind| {
                    matches!(kind, NodeKind::Element | NodeKind::Text)
                })?;
                let geometry = arrays.geometry(node)?;
                let index = node.index();
                Some(BoxRecord {
                    node,
                    kind,
                    x: geometry.x,
                    y: geometry.y,
                    width: geometry.width,
                    height: geometry.height,
                    display: arrays.display().get(index).copied().unwrap_or_default(),
                    overflow: arrays.overflow().get(index).copied().unwrap_or_default(),
                    background_color: arrays
                        .background_color()
                        .get(index)
                        .copied()
                        .unwrap_or(Color::TRANSPARENT),
                    border_color: arrays.border_color().get(index).copied().unwrap_or(Color::BLACK),
                    z_index: arrays.z_index().get(index).copied().unwrap_or(0),
                })
            })
            .collect()
    }
}
