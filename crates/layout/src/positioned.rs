//! Absolutely and fixed positioned boxes.
//!
//! These are laid out after their parent's flow, against the parent's
//! padding box (`absolute`) or the viewport (`fixed`). A missing inset keeps
//! the static position, taken as the parent's content-box origin.

use log::trace;
use node_table::NodeId;

use crate::arrays::{Display, Position};
use crate::compute::{BoxRequest, ContainerBox, LayoutPass};

/// Resolved insets of one box; `None` is `auto`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Insets {
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

/// Border-box size left between two insets once margins are removed.
fn between(start: Option<f32>, end: Option<f32>, extent: f32, margins: f32, frame: f32) -> Option<f32> {
    let (Some(first), Some(second)) = (start, end) else {
        return None;
    };
    Some((extent - first - second - margins).max(frame))
}

impl LayoutPass<'_, '_> {
    fn insets(&self, index: usize, block: &ContainerBox) -> Insets {
        let Some(inset) = self.arrays.inset.get(index) else {
            return Insets::default();
        };
        let height = block.height;
        Insets {
            top: inset.top.resolve(height),
            right: inset.right.resolve(Some(block.width)),
            bottom: inset.bottom.resolve(height),
            left: inset.left.resolve(Some(block.width)),
        }
    }

    /// Lay out the absolute and fixed children of `parent`.
    pub(crate) fn layout_positioned_children(
        &mut self,
        parent: NodeId,
        padding_box: &ContainerBox,
        content: &ContainerBox,
    ) {
        let nodes = self.nodes;
        let viewport = ContainerBox {
            x: 0.0,
            y: 0.0,
            width: self.context.viewport_width,
            height: Some(self.context.viewport_height),
        };
        for child in nodes.children(parent) {
            let index = child.index();
            let style = self.arrays.box_style(index);
            if style.display == Display::None || !style.position.is_out_of_flow() {
                continue;
            }
            let block = if style.position == Position::Fixed {
                viewport
            } else {
                *padding_box
            };
            let block_height = block.height.unwrap_or(0.0);
            let insets = self.insets(index, &block);
            let frame = style.frame();
            let margin = style.margin;

            let x = insets
                .left
                .map_or(content.x, |left| block.x + left)
                + margin.left;
            let y = insets
                .top
                .map_or(content.y, |top| block.y + top)
                + margin.top;
            let width = style
                .definite_content_width(Some(block.width))
                .map(|width| width + frame.horizontal())
                .or_else(|| {
                    between(
                        insets.left,
                        insets.right,
                        block.width,
                        margin.horizontal(),
                        frame.horizontal(),
                    )
                });
            let height = style
                .definite_content_height(block.height)
                .map(|height| height + frame.vertical())
                .or_else(|| {
                    between(
                        insets.top,
                        insets.bottom,
                        block_height,
                        margin.vertical(),
                        frame.vertical(),
                    )
                });
            let size = self.layout_box(
                child,
                BoxRequest {
                    x,
                    y,
                    width,
                    height,
                    containing_width: block.width,
                    containing_height: block.height,
                    shrink_to_fit: true,
                },
            );

            let dx = match (insets.left, insets.right) {
                (None, Some(right)) => {
                    block.x + block.width - right - margin.right - size.width - x
                }
                _ => 0.0,
            };
            let dy = match (insets.top, insets.bottom) {
                (None, Some(bottom)) => {
                    block.y + block_height - bottom - margin.bottom - size.height - y
                }
                _ => 0.0,
            };
            if dx != 0.0 || dy != 0.0 {
                self.translate_subtree(child, dx, dy);
            }
            trace!(
                target: "layout::positioned",
                "{child}: {:?} at ({}, {})",
                style.position,
                x + dx,
                y + dy
            );
        }
    }

    /// Move `root` and its laid-out descendants by `(dx, dy)`. Fixed
    /// descendants stay attached to the viewport.
    fn translate_subtree(&mut self, root: NodeId, dx: f32, dy: f32) {
        let nodes = self.nodes;
        let mut seen = vec![false; self.arrays.len()];
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let index = node.index();
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            let fixed = node != root && self.arrays.position.get(index) == Some(&Position::Fixed);
            if fixed || self.arrays.display.get(index) == Some(&Display::None) {
                continue;
            }
            self.arrays.translate(index, dx, dy);
            stack.extend(nodes.children(node));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Both insets size an auto box; one inset leaves it to content.
    ///
    /// # Panics
    /// Panics if the size between insets is wrong.
    #[test]
    fn size_between_insets() {
        assert_eq!(between(Some(10.0), Some(20.0), 200.0, 10.0, 0.0), Some(160.0));
        assert_eq!(between(Some(10.0), None, 200.0, 0.0, 0.0), None);
        assert_eq!(between(Some(150.0), Some(150.0), 200.0, 0.0, 4.0), Some(4.0));
    }
}
