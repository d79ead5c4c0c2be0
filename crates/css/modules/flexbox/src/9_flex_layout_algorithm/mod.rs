//! Flex Layout Algorithm
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>
//!
//! Sizes are border-box sizes in CSS px. Offsets are relative to the
//! container's content box and exclude item margins.

use log::debug;

use crate::{FlexDirection, FlexWrap, ItemRef, resolve_axes};

mod cross_axis;
mod distribution;
mod multi_line;

pub use cross_axis::align_single_line_cross;

use distribution::{accumulate_main_offsets, clamp, justify_params, resolve_flexible_lengths};
use multi_line::{LineRange, align_content_params, break_into_lines, stretch_lines};

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#justify-content-property>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum JustifyContent {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#align-items-property>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum AlignItems {
    #[default]
    Stretch,
    Start,
    End,
    Center,
}

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#align-content-property>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum AlignContent {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    #[default]
    Stretch,
}

/// One flex item, already resolved to px along both axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlexChild {
    pub handle: ItemRef,
    /// Flex base size (border box).
    pub flex_basis: f32,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub min_main: f32,
    pub max_main: f32,
    pub margin_main_start: f32,
    pub margin_main_end: f32,
    pub margin_cross_start: f32,
    pub margin_cross_end: f32,
    /// Declared cross size; `None` is `auto` and may be stretched.
    pub cross_size: Option<f32>,
    /// Content-based cross size, used while the cross size is `auto`.
    pub content_cross: f32,
    pub min_cross: f32,
    pub max_cross: f32,
}

impl FlexChild {
    /// An item with the given basis, no flexing, no margins and auto cross size.
    pub const fn new(handle: ItemRef, flex_basis: f32) -> Self {
        Self {
            handle,
            flex_basis,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            min_main: 0.0,
            max_main: f32::INFINITY,
            margin_main_start: 0.0,
            margin_main_end: 0.0,
            margin_cross_start: 0.0,
            margin_cross_end: 0.0,
            cross_size: None,
            content_cross: 0.0,
            min_cross: 0.0,
            max_cross: f32::INFINITY,
        }
    }

    /// Basis clamped by min/max main.
    #[inline]
    pub fn hypothetical_main(&self) -> f32 {
        clamp(self.flex_basis, self.min_main, self.max_main)
    }

    #[inline]
    pub fn main_margins(&self) -> f32 {
        self.margin_main_start + self.margin_main_end
    }

    /// Declared (or content) cross size clamped by min/max cross.
    #[inline]
    pub fn hypothetical_cross(&self) -> f32 {
        clamp(
            self.cross_size.unwrap_or(self.content_cross),
            self.min_cross,
            self.max_cross,
        )
    }

    #[inline]
    fn outer_cross(&self) -> f32 {
        self.hypothetical_cross() + self.margin_cross_start + self.margin_cross_end
    }
}

/// Container inputs.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct FlexContainerInputs {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    /// Definite inner main size, `None` when it depends on the items.
    pub main_size: Option<f32>,
    /// Definite inner cross size, `None` when it depends on the lines.
    pub cross_size: Option<f32>,
    /// Gap between adjacent items on a line.
    pub main_gap: f32,
    /// Gap between adjacent lines.
    pub cross_gap: f32,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
}

/// Cross-axis result for one item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CrossPlacement {
    pub cross_size: f32,
    /// Offset from the start of the item's line.
    pub cross_offset: f32,
}

/// Final placement of one item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlexPlacement {
    pub handle: ItemRef,
    pub main_offset: f32,
    pub main_size: f32,
    pub cross_offset: f32,
    pub cross_size: f32,
}

/// Result of laying out one container.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FlexLayout {
    /// One placement per item, in input order.
    pub placements: Vec<FlexPlacement>,
    /// Used inner main size of the container.
    pub main_size: f32,
    /// Used inner cross size of the container.
    pub cross_size: f32,
    pub line_count: usize,
}

/// Main-axis result for one line, before cross placement.
struct LineMain {
    range: LineRange,
    offsets: Vec<f32>,
    sizes: Vec<f32>,
    cross: f32,
}

/// Steps 4-5 for one line: flexible lengths then justification.
fn layout_line_main(
    container: &FlexContainerInputs,
    available_main: f32,
    range: LineRange,
    items: &[FlexChild],
) -> LineMain {
    let line_items = items.get(range.clone()).unwrap_or(&[]);
    let sizes = resolve_flexible_lengths(available_main, container.main_gap, line_items);
    let used: f32 = sizes.iter().sum::<f32>()
        + line_items.iter().map(FlexChild::main_margins).sum::<f32>()
        + container.main_gap * line_items.len().saturating_sub(1) as f32;
    let free_space = available_main - used;
    let (start_offset, between) =
        justify_params(container.justify_content, free_space, line_items.len());
    debug!(
        target: "css::flexbox::line",
        "justify={:?} free={free_space:.3} start={start_offset:.3} between={between:.3}",
        container.justify_content
    );
    let offsets = accumulate_main_offsets(
        line_items,
        &sizes,
        start_offset,
        container.main_gap + between,
    );
    let cross = line_items
        .iter()
        .map(FlexChild::outer_cross)
        .fold(0.0, f32::max);
    LineMain {
        range,
        offsets,
        sizes,
        cross,
    }
}

/// Lay out a flex container's in-flow items.
///
/// Steps: hypothetical sizes, line breaking (when wrapping with a definite
/// main size), flexible lengths and `justify-content` per line, line cross
/// sizes and `align-content`, `align-items` within each line, then mirroring
/// for reversed main and cross axes.
pub fn layout_flex_container(container: &FlexContainerInputs, items: &[FlexChild]) -> FlexLayout {
    let axes = resolve_axes(container.direction, container.wrap);
    let gaps_total = container.main_gap * items.len().saturating_sub(1) as f32;
    let content_main: f32 = items
        .iter()
        .map(|child| child.hypothetical_main() + child.main_margins())
        .sum::<f32>()
        + gaps_total;
    let available_main = container.main_size.unwrap_or(content_main);

    let ranges = match container.main_size {
        Some(definite) if container.wrap.is_multi_line() => {
            break_into_lines(definite, container.main_gap, items)
        }
        _ if items.is_empty() => Vec::new(),
        _ => vec![0..items.len()],
    };
    let lines: Vec<LineMain> = ranges
        .into_iter()
        .map(|range| layout_line_main(container, available_main, range, items))
        .collect();

    let single_line = !container.wrap.is_multi_line();
    let mut line_crosses: Vec<f32> = lines.iter().map(|line| line.cross).collect();
    if single_line
        && let (Some(definite), Some(only)) = (container.cross_size, line_crosses.first_mut())
    {
        *only = definite;
    }
    let cross_gaps = container.cross_gap * line_crosses.len().saturating_sub(1) as f32;
    let lines_total: f32 = line_crosses.iter().sum::<f32>() + cross_gaps;
    let container_cross = container.cross_size.unwrap_or(lines_total);

    let mut free_cross = container_cross - lines_total;
    if !single_line && container.align_content == AlignContent::Stretch {
        stretch_lines(&mut line_crosses, free_cross);
        free_cross = free_cross.min(0.0);
    }
    let (mut line_offset, line_between) = if single_line {
        (0.0, 0.0)
    } else {
        align_content_params(container.align_content, free_cross, line_crosses.len())
    };

    let mut placements: Vec<FlexPlacement> = Vec::with_capacity(items.len());
    for (line, line_cross) in lines.iter().zip(&line_crosses) {
        let line_items = items.get(line.range.clone()).unwrap_or(&[]);
        for ((child, offset), size) in line_items.iter().zip(&line.offsets).zip(&line.sizes) {
            let cross = align_single_line_cross(container.align_items, *line_cross, child);
            let mut main_offset = *offset;
            if axes.main_reverse {
                main_offset = available_main - main_offset - size;
            }
            let mut cross_offset = line_offset + cross.cross_offset;
            if axes.cross_reverse {
                cross_offset = container_cross - cross_offset - cross.cross_size;
            }
            placements.push(FlexPlacement {
                handle: child.handle,
                main_offset,
                main_size: *size,
                cross_offset,
                cross_size: cross.cross_size,
            });
        }
        line_offset += line_cross + container.cross_gap + line_between;
    }

    debug!(
        target: "css::flexbox",
        "laid out {} items in {} lines: main={available_main:.3} cross={container_cross:.3}",
        items.len(),
        lines.len()
    );
    FlexLayout {
        placements,
        main_size: available_main,
        cross_size: container_cross,
        line_count: lines.len(),
    }
}

#[cfg(test)]
mod tests;
