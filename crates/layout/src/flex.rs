//! Flex container driver.
//!
//! Maps in-flow children onto [`FlexChild`] descriptors, runs the flexbox
//! algorithm, then lays each item out at its placement with the resolved
//! sizes imposed.

use css_flexbox::{
    FlexChild, FlexContainerInputs, ItemRef, ItemStyle, collect_flex_items, layout_flex_container,
};
use log::debug;
use node_table::{NodeId, NodeKind};

use crate::arrays::Display;
use crate::compute::{BoxRequest, ContainerBox, LayoutPass, MEASURE_DEPTH};

fn item_ref(node: NodeId) -> ItemRef {
    ItemRef(u64::from(node.get()))
}

fn item_node(handle: ItemRef) -> Option<NodeId> {
    u32::try_from(handle.0).ok().and_then(NodeId::from_raw)
}

/// Main/cross view of a `(horizontal, vertical)` pair.
#[inline]
const fn along(row: bool, horizontal: f32, vertical: f32) -> (f32, f32) {
    if row { (horizontal, vertical) } else { (vertical, horizontal) }
}

impl LayoutPass<'_, '_> {
    fn item_style(&self, child: NodeId) -> ItemStyle {
        match self.nodes.kind(child) {
            Some(NodeKind::Element) => {
                let style = self.arrays.box_style(child.index());
                ItemStyle {
                    display_none: style.display == Display::None,
                    out_of_flow: style.position.is_out_of_flow(),
                }
            }
            Some(NodeKind::Text) => ItemStyle::default(),
            Some(NodeKind::Comment | NodeKind::Doctype | NodeKind::Document) | None => ItemStyle {
                display_none: true,
                out_of_flow: false,
            },
        }
    }

    /// Describe `child` as a flex item of a container with content box
    /// `container` and the given main axis.
    fn flex_child(&self, child: NodeId, row: bool, container: &ContainerBox) -> FlexChild {
        let index = child.index();
        let style = self.arrays.box_style(index);
        let frame = style.frame();
        let (main_frame, cross_frame) = along(row, frame.horizontal(), frame.vertical());
        let (main_basis, cross_basis) = if row {
            (Some(container.width), container.height)
        } else {
            (container.height, Some(container.width))
        };
        let (declared_main, declared_cross) = if row {
            (
                style.definite_content_width(main_basis),
                style.definite_content_height(cross_basis),
            )
        } else {
            (
                style.definite_content_height(main_basis),
                style.definite_content_width(cross_basis),
            )
        };
        let measure_width = if row { None } else { Some(container.width) };
        let measured = self.measure_content(child, measure_width, MEASURE_DEPTH);
        let (measured_main, measured_cross) = along(row, measured.width, measured.height);

        let flex_basis = self
            .arrays
            .flex_basis
            .get(index)
            .and_then(|basis| basis.resolve(main_basis))
            .map(|basis| basis.max(0.0) + main_frame)
            .or_else(|| declared_main.map(|main| main + main_frame))
            .unwrap_or(measured_main);

        let (min_main_dim, max_main_dim, min_cross_dim, max_cross_dim) = if row {
            (style.min_width, style.max_width, style.min_height, style.max_height)
        } else {
            (style.min_height, style.max_height, style.min_width, style.max_width)
        };
        let (margin_main_start, margin_main_end, margin_cross_start, margin_cross_end) = if row {
            (style.margin.left, style.margin.right, style.margin.top, style.margin.bottom)
        } else {
            (style.margin.top, style.margin.bottom, style.margin.left, style.margin.right)
        };

        FlexChild {
            flex_grow: self.arrays.flex_grow.get(index).copied().unwrap_or(0.0),
            flex_shrink: self.arrays.flex_shrink.get(index).copied().unwrap_or(1.0),
            min_main: min_main_dim.resolve(main_basis).unwrap_or(0.0) + main_frame,
            max_main: max_main_dim
                .resolve(main_basis)
                .map_or(f32::INFINITY, |max| max + main_frame),
            margin_main_start,
            margin_main_end,
            margin_cross_start,
            margin_cross_end,
            cross_size: declared_cross.map(|cross| cross + cross_frame),
            content_cross: measured_cross,
            min_cross: min_cross_dim.resolve(cross_basis).unwrap_or(0.0) + cross_frame,
            max_cross: max_cross_dim
                .resolve(cross_basis)
                .map_or(f32::INFINITY, |max| max + cross_frame),
            ..FlexChild::new(item_ref(child), flex_basis)
        }
    }

    /// Lay out the flex items of `parent`. Returns the used content height.
    pub(crate) fn layout_flex_children(&mut self, parent: NodeId, container: &ContainerBox) -> f32 {
        let nodes = self.nodes;
        let index = parent.index();
        let arrays = &*self.arrays;
        let direction = arrays.flex_direction.get(index).copied().unwrap_or_default();
        let row = direction.is_row();
        let row_gap = arrays.row_gap.get(index).copied().unwrap_or(0.0);
        let column_gap = arrays.column_gap.get(index).copied().unwrap_or(0.0);
        let (main_gap, cross_gap) = along(row, column_gap, row_gap);
        let (main_size, cross_size) = if row {
            (Some(container.width), container.height)
        } else {
            (container.height, Some(container.width))
        };
        let inputs = FlexContainerInputs {
            direction,
            wrap: arrays.flex_wrap.get(index).copied().unwrap_or_default(),
            main_size,
            cross_size,
            main_gap,
            cross_gap,
            justify_content: arrays.justify_content.get(index).copied().unwrap_or_default(),
            align_items: arrays.align_items.get(index).copied().unwrap_or_default(),
            align_content: arrays.align_content.get(index).copied().unwrap_or_default(),
        };

        let handles = collect_flex_items(
            nodes
                .children(parent)
                .map(|child| (item_ref(child), self.item_style(child))),
        );
        let children: Vec<FlexChild> = handles
            .iter()
            .filter_map(|handle| item_node(*handle))
            .map(|child| self.flex_child(child, row, container))
            .collect();
        let layout = layout_flex_container(&inputs, &children);
        debug!(
            target: "layout::flex",
            "{parent}: {} items in {} lines, used main={} cross={}",
            children.len(),
            layout.line_count,
            layout.main_size,
            layout.cross_size
        );

        for placement in &layout.placements {
            let Some(child) = item_node(placement.handle) else {
                continue;
            };
            let (x, y) = along(row, placement.main_offset, placement.cross_offset);
            let (width, height) = along(row, placement.main_size, placement.cross_size);
            self.layout_box(
                child,
                BoxRequest::sized(container.x + x, container.y + y, width, height, container),
            );
        }
        if row { layout.cross_size } else { layout.main_size }
    }
}
