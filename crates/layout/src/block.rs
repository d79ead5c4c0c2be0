//! Block flow: in-flow children stack vertically.
//!
//! Margins do not collapse. Inline-level boxes stack like blocks but shrink
//! to fit their content.

use node_table::NodeId;

use crate::compute::{BoxRequest, ContainerBox, LayoutPass};

impl LayoutPass<'_, '_> {
    /// Lay out the in-flow children of `parent` top to bottom inside
    /// `container`. Returns the summed outer height.
    pub(crate) fn layout_block_children(&mut self, parent: NodeId, container: &ContainerBox) -> f32 {
        let nodes = self.nodes;
        let mut cursor = 0.0;
        for child in nodes.children(parent) {
            if self.is_out_of_flow_or_hidden(child) {
                continue;
            }
            let margin = self.arrays.margin.get(child.index()).copied().unwrap_or_default();
            let size = self.layout_box(
                child,
                BoxRequest::in_flow(
                    container.x + margin.left,
                    container.y + cursor + margin.top,
                    container,
                ),
            );
            cursor += margin.top + size.height + margin.bottom;
        }
        cursor
    }
}
