//! Grid container driver.

use css_flexbox::AlignItems;
use css_grid::{GridAlignment, GridContainerInputs, GridItem, GridLine, layout_grid};
use log::debug;
use node_table::NodeId;

use crate::compute::{BoxRequest, ContainerBox, LayoutPass, MEASURE_DEPTH};

/// `align-items` is stored once for flex and grid containers.
const fn block_alignment(align: AlignItems) -> GridAlignment {
    match align {
        AlignItems::Stretch => GridAlignment::Stretch,
        AlignItems::Start => GridAlignment::Start,
        AlignItems::End => GridAlignment::End,
        AlignItems::Center => GridAlignment::Center,
    }
}

impl LayoutPass<'_, '_> {
    fn grid_item(&self, child: NodeId, container: &ContainerBox) -> GridItem<NodeId> {
        let index = child.index();
        let arrays = &*self.arrays;
        let style = arrays.box_style(index);
        let frame = style.frame();
        let measured = self.measure_content(child, None, MEASURE_DEPTH);
        let line = |column: &[GridLine]| column.get(index).copied().unwrap_or_default();
        GridItem {
            row_start: line(&arrays.grid_row_start),
            row_end: line(&arrays.grid_row_end),
            col_start: line(&arrays.grid_column_start),
            col_end: line(&arrays.grid_column_end),
            width: style
                .definite_content_width(Some(container.width))
                .map(|width| width + frame.horizontal()),
            height: style
                .definite_content_height(container.height)
                .map(|height| height + frame.vertical()),
            min_content_width: measured.width,
            min_content_height: measured.height,
            margin: [
                style.margin.top,
                style.margin.right,
                style.margin.bottom,
                style.margin.left,
            ],
            ..GridItem::new(child)
        }
    }

    /// Lay out the grid items of `parent`. Returns the used content height.
    ///
    /// A container without in-flow children sizes no tracks.
    pub(crate) fn layout_grid_children(&mut self, parent: NodeId, container: &ContainerBox) -> f32 {
        let nodes = self.nodes;
        let index = parent.index();
        let items: Vec<GridItem<NodeId>> = nodes
            .children(parent)
            .filter(|child| !self.is_out_of_flow_or_hidden(*child))
            .map(|child| self.grid_item(child, container))
            .collect();
        if items.is_empty() {
            return 0.0;
        }
        let arrays = &*self.arrays;
        let inputs = GridContainerInputs {
            columns: arrays
                .grid_template_columns
                .get(index)
                .map(|tracks| tracks.to_vec())
                .unwrap_or_default(),
            rows: arrays
                .grid_template_rows
                .get(index)
                .map(|tracks| tracks.to_vec())
                .unwrap_or_default(),
            auto_flow: arrays.grid_auto_flow.get(index).copied().unwrap_or_default(),
            column_gap: arrays.column_gap.get(index).copied().unwrap_or(0.0),
            row_gap: arrays.row_gap.get(index).copied().unwrap_or(0.0),
            width: Some(container.width),
            height: container.height,
            justify_items: arrays.justify_items.get(index).copied().unwrap_or_default(),
            align_items: block_alignment(arrays.align_items.get(index).copied().unwrap_or_default()),
        };
        let result = layout_grid(&items, &inputs);
        debug!(
            target: "layout::grid",
            "{parent}: {} items on {}x{} tracks, {}x{}",
            result.items.len(),
            result.columns.len(),
            result.rows.len(),
            result.total_width,
            result.total_height
        );
        for placed in &result.items {
            self.layout_box(
                placed.node_id,
                BoxRequest::sized(
                    container.x + placed.x,
                    container.y + placed.y,
                    placed.width,
                    placed.height,
                    container,
                ),
            );
        }
        result.total_height
    }
}
