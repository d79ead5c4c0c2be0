//! Writing resolved properties into layout rows.
//!
//! Keyword properties arrive as numeric codes, sizes as typed values. Font
//! size is resolved first so `em` lengths on the same element use it; box
//! sides resolve percentages against the context's percent base.

use std::sync::Arc;

use css_archetypes::keywords::{content, flex_direction, flex_wrap, grid_auto_flow, items};
use css_archetypes::{ArchetypeTable, PropertyId, StyleProperty};
use css_flexbox::{AlignContent, AlignItems, FlexDirection, FlexWrap, JustifyContent};
use css_grid::{GridAlignment, GridAutoFlow, GridLine, GridTrackSize, track_list_or_auto};
use css_values_units::{ResolveContext, StyleValue};
use log::{debug, trace};
use node_table::{ArchetypeId, NodeId, NodeKind, NodeTable};
use rustc_hash::FxHashMap;

use crate::arrays::{Display, LayoutArrays, Overflow, Position, Sides};

/// Keyword code carried by a `Number` value.
fn keyword(value: &StyleValue) -> Option<u8> {
    match value {
        StyleValue::Number(code) if code.fract() == 0.0 && (0.0..=255.0).contains(code) => {
            Some(*code as u8)
        }
        _ => None,
    }
}

const fn direction_from_code(code: u8) -> Option<FlexDirection> {
    match code {
        flex_direction::ROW => Some(FlexDirection::Row),
        flex_direction::ROW_REVERSE => Some(FlexDirection::RowReverse),
        flex_direction::COLUMN => Some(FlexDirection::Column),
        flex_direction::COLUMN_REVERSE => Some(FlexDirection::ColumnReverse),
        _ => None,
    }
}

const fn wrap_from_code(code: u8) -> Option<FlexWrap> {
    match code {
        flex_wrap::NOWRAP => Some(FlexWrap::Nowrap),
        flex_wrap::WRAP => Some(FlexWrap::Wrap),
        flex_wrap::WRAP_REVERSE => Some(FlexWrap::WrapReverse),
        _ => None,
    }
}

/// `justify-content: stretch` behaves as `start` for flex items.
const fn justify_from_code(code: u8) -> Option<JustifyContent> {
    match code {
        content::START | content::STRETCH => Some(JustifyContent::Start),
        content::END => Some(JustifyContent::End),
        content::CENTER => Some(JustifyContent::Center),
        content::SPACE_BETWEEN => Some(JustifyContent::SpaceBetween),
        content::SPACE_AROUND => Some(JustifyContent::SpaceAround),
        content::SPACE_EVENLY => Some(JustifyContent::SpaceEvenly),
        _ => None,
    }
}

const fn align_content_from_code(code: u8) -> Option<AlignContent> {
    match code {
        content::START => Some(AlignContent::Start),
        content::END => Some(AlignContent::End),
        content::CENTER => Some(AlignContent::Center),
        content::SPACE_BETWEEN => Some(AlignContent::SpaceBetween),
        content::SPACE_AROUND => Some(AlignContent::SpaceAround),
        content::SPACE_EVENLY => Some(AlignContent::SpaceEvenly),
        content::STRETCH => Some(AlignContent::Stretch),
        _ => None,
    }
}

const fn align_items_from_code(code: u8) -> Option<AlignItems> {
    match code {
        items::STRETCH => Some(AlignItems::Stretch),
        items::START => Some(AlignItems::Start),
        items::END => Some(AlignItems::End),
        items::CENTER => Some(AlignItems::Center),
        _ => None,
    }
}

const fn justify_items_from_code(code: u8) -> Option<GridAlignment> {
    match code {
        items::STRETCH => Some(GridAlignment::Stretch),
        items::START => Some(GridAlignment::Start),
        items::END => Some(GridAlignment::End),
        items::CENTER => Some(GridAlignment::Center),
        _ => None,
    }
}

const fn auto_flow_from_code(code: u8) -> Option<GridAutoFlow> {
    match code {
        grid_auto_flow::ROW => Some(GridAutoFlow::Row),
        grid_auto_flow::COLUMN => Some(GridAutoFlow::Column),
        _ => None,
    }
}

fn grid_line(value: &StyleValue) -> GridLine {
    match value {
        StyleValue::Number(code) if code.fract() == 0.0 => GridLine::from_code(*code as i32),
        _ => GridLine::Auto,
    }
}

/// Store `parsed` in `column[index]`, logging keyword codes that do not map.
fn set_keyword<T>(column: &mut [T], index: usize, id: PropertyId, parsed: Option<T>) {
    match (parsed, column.get_mut(index)) {
        (Some(value), Some(slot)) => *slot = value,
        (None, _) => debug!(target: "layout::style", "ignoring unknown {} keyword", id.name()),
        (Some(_), None) => {}
    }
}

fn set<T>(column: &mut [T], index: usize, value: T) {
    if let Some(slot) = column.get_mut(index) {
        *slot = value;
    }
}

/// The side a box-side longhand writes.
fn side_of<T>(sides: &mut Sides<T>, id: PropertyId) -> &mut T {
    match id {
        PropertyId::MarginTop
        | PropertyId::PaddingTop
        | PropertyId::BorderTopWidth
        | PropertyId::Top => &mut sides.top,
        PropertyId::MarginRight
        | PropertyId::PaddingRight
        | PropertyId::BorderRightWidth
        | PropertyId::Right => &mut sides.right,
        PropertyId::MarginBottom
        | PropertyId::PaddingBottom
        | PropertyId::BorderBottomWidth
        | PropertyId::Bottom => &mut sides.bottom,
        _ => &mut sides.left,
    }
}

fn parse_template(_: PropertyId, text: &str) -> Arc<[GridTrackSize]> {
    Arc::from(track_list_or_auto(text))
}

/// Computed font size for `value` on an element whose parent font size is
/// `context.font_size`. Percentages and `em` are relative to the parent.
fn font_size(value: &StyleValue, context: &ResolveContext) -> Option<f32> {
    let parent = ResolveContext {
        percent_base: Some(context.font_size),
        ..*context
    };
    value.resolve_px(&parent).map(|size| size.max(0.0))
}

impl LayoutArrays {
    /// Write `properties` into the row of `node`, replacing its previous
    /// style.
    ///
    /// `context.font_size` is the parent's computed font size; `em` on
    /// `font-size` resolves against it and every other `em` against the
    /// element's own size. Grid templates are parsed on every call; use
    /// [`StyleApplier`] to share them between rows.
    pub fn apply_style(
        &mut self,
        node: NodeId,
        properties: &[StyleProperty],
        context: &ResolveContext,
    ) {
        let index = node.index();
        if index >= self.len() {
            self.resize(index + 1);
        }
        self.write_row(index, properties, context, &mut parse_template);
    }

    fn write_row(
        &mut self,
        index: usize,
        properties: &[StyleProperty],
        context: &ResolveContext,
        templates: &mut dyn FnMut(PropertyId, &str) -> Arc<[GridTrackSize]>,
    ) {
        self.reset_row(index);
        let own_font = properties
            .iter()
            .rev()
            .find(|property| property.id == PropertyId::FontSize)
            .and_then(|property| font_size(&property.value, context))
            .unwrap_or(context.font_size);
        set(&mut self.font_size, index, own_font);
        let element = ResolveContext {
            font_size: own_font,
            ..*context
        };
        for property in properties {
            self.write_property(index, property, &element, templates);
        }
    }

    fn write_keyword(&mut self, index: usize, id: PropertyId, code: Option<u8>) {
        match id {
            PropertyId::Display => {
                set_keyword(&mut self.display, index, id, code.and_then(Display::from_code));
            }
            PropertyId::Position => {
                set_keyword(&mut self.position, index, id, code.and_then(Position::from_code));
            }
            PropertyId::Overflow => {
                set_keyword(&mut self.overflow, index, id, code.and_then(Overflow::from_code));
            }
            PropertyId::FlexDirection => {
                set_keyword(&mut self.flex_direction, index, id, code.and_then(direction_from_code));
            }
            PropertyId::FlexWrap => {
                set_keyword(&mut self.flex_wrap, index, id, code.and_then(wrap_from_code));
            }
            PropertyId::JustifyContent => {
                set_keyword(&mut self.justify_content, index, id, code.and_then(justify_from_code));
            }
            PropertyId::AlignItems => {
                set_keyword(&mut self.align_items, index, id, code.and_then(align_items_from_code));
            }
            PropertyId::AlignContent => {
                let parsed = code.and_then(align_content_from_code);
                set_keyword(&mut self.align_content, index, id, parsed);
            }
            PropertyId::JustifyItems => {
                let parsed = code.and_then(justify_items_from_code);
                set_keyword(&mut self.justify_items, index, id, parsed);
            }
            PropertyId::GridAutoFlow => {
                set_keyword(&mut self.grid_auto_flow, index, id, code.and_then(auto_flow_from_code));
            }
            _ => {}
        }
    }

    fn write_property(
        &mut self,
        index: usize,
        property: &StyleProperty,
        context: &ResolveContext,
        templates: &mut dyn FnMut(PropertyId, &str) -> Arc<[GridTrackSize]>,
    ) {
        let id = property.id;
        let value = &property.value;
        if id.is_keyword() {
            self.write_keyword(index, id, keyword(value));
            return;
        }
        let length = || value.resolve_px(context).unwrap_or(0.0);
        match id {
            PropertyId::Width => set(&mut self.specified_width, index, value.to_dimension(context)),
            PropertyId::Height => set(&mut self.specified_height, index, value.to_dimension(context)),
            PropertyId::MinWidth => set(&mut self.min_width, index, value.to_dimension(context)),
            PropertyId::MinHeight => set(&mut self.min_height, index, value.to_dimension(context)),
            PropertyId::MaxWidth => set(&mut self.max_width, index, value.to_dimension(context)),
            PropertyId::MaxHeight => set(&mut self.max_height, index, value.to_dimension(context)),
            PropertyId::MarginTop
            | PropertyId::MarginRight
            | PropertyId::MarginBottom
            | PropertyId::MarginLeft => {
                if let Some(margin) = self.margin.get_mut(index) {
                    *side_of(margin, id) = length();
                }
            }
            PropertyId::PaddingTop
            | PropertyId::PaddingRight
            | PropertyId::PaddingBottom
            | PropertyId::PaddingLeft => {
                if let Some(padding) = self.padding.get_mut(index) {
                    *side_of(padding, id) = length().max(0.0);
                }
            }
            PropertyId::BorderTopWidth
            | PropertyId::BorderRightWidth
            | PropertyId::BorderBottomWidth
            | PropertyId::BorderLeftWidth => {
                if let Some(border) = self.border.get_mut(index) {
                    *side_of(border, id) = length().max(0.0);
                }
            }
            PropertyId::Top | PropertyId::Right | PropertyId::Bottom | PropertyId::Left => {
                if let Some(inset) = self.inset.get_mut(index) {
                    *side_of(inset, id) = value.to_dimension(context);
                }
            }
            PropertyId::FlexGrow => set(&mut self.flex_grow, index, value.numeric().max(0.0)),
            PropertyId::FlexShrink => set(&mut self.flex_shrink, index, value.numeric().max(0.0)),
            PropertyId::FlexBasis => set(&mut self.flex_basis, index, value.to_dimension(context)),
            PropertyId::RowGap => set(&mut self.row_gap, index, length().max(0.0)),
            PropertyId::ColumnGap => set(&mut self.column_gap, index, length().max(0.0)),
            PropertyId::GridTemplateColumns | PropertyId::GridTemplateRows => {
                let tracks = if let StyleValue::Raw(text) = value {
                    templates(id, text)
                } else {
                    debug!(target: "layout::style", "{}: expected a track list, got {value:?}", id.name());
                    Arc::from(vec![GridTrackSize::AUTO])
                };
                let column = if id == PropertyId::GridTemplateColumns {
                    &mut self.grid_template_columns
                } else {
                    &mut self.grid_template_rows
                };
                set(column, index, tracks);
            }
            PropertyId::GridColumnStart => set(&mut self.grid_column_start, index, grid_line(value)),
            PropertyId::GridColumnEnd => set(&mut self.grid_column_end, index, grid_line(value)),
            PropertyId::GridRowStart => set(&mut self.grid_row_start, index, grid_line(value)),
            PropertyId::GridRowEnd => set(&mut self.grid_row_end, index, grid_line(value)),
            PropertyId::ZIndex => set(&mut self.z_index, index, value.numeric() as i32),
            PropertyId::BackgroundColor | PropertyId::BorderColor => {
                let StyleValue::Color(color) = value else {
                    debug!(target: "layout::style", "{}: expected a color, got {value:?}", id.name());
                    return;
                };
                let column = if id == PropertyId::BackgroundColor {
                    &mut self.background_color
                } else {
                    &mut self.border_color
                };
                set(column, index, *color);
            }
            _ => {}
        }
    }
}

/// Counters for [`StyleApplier`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleApplierStats {
    /// Element rows written from an archetype
    pub rows_styled: u64,
    /// Track lists parsed from text
    pub templates_parsed: u64,
    /// Track lists served from the per-archetype memo
    pub templates_reused: u64,
}

/// Writes archetype styles into [`LayoutArrays`] for a whole tree.
///
/// Grid templates are parsed once per archetype and the parsed tracks are
/// shared between every row using it. Call [`StyleApplier::clear`] when the
/// rules behind the archetypes change.
#[derive(Clone, Debug, Default)]
pub struct StyleApplier {
    templates: FxHashMap<(ArchetypeId, PropertyId), Arc<[GridTrackSize]>>,
    stats: StyleApplierStats,
}

impl StyleApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> StyleApplierStats {
        self.stats
    }

    /// Forget memoized track lists.
    pub fn clear(&mut self) {
        self.templates.clear();
    }

    /// Style every row of `nodes` from its archetype.
    ///
    /// Rows are visited parents first so font sizes inherit. Elements
    /// without an archetype, and text, get initial values with the
    /// parent's font size. `context` supplies the root font size and the
    /// percent base for box sides.
    pub fn apply_all<R>(
        &mut self,
        nodes: &NodeTable,
        archetypes: &ArchetypeTable<R>,
        arrays: &mut LayoutArrays,
        context: &ResolveContext,
    ) {
        arrays.resize(nodes.len());
        let mut seen = vec![false; nodes.len()];
        let roots: Vec<NodeId> = nodes.roots().collect();
        let mut stack: Vec<(NodeId, f32)> =
            roots.iter().rev().map(|root| (*root, context.root_font_size)).collect();
        while let Some((node, parent_font)) = stack.pop() {
            let index = node.index();
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            let node_context = ResolveContext {
                font_size: parent_font,
                ..*context
            };
            self.apply_node(nodes, archetypes, arrays, node, &node_context);
            let own_font = arrays.font_size.get(index).copied().unwrap_or(parent_font);
            let children: Vec<NodeId> = nodes.children(node).collect();
            stack.extend(children.into_iter().rev().map(|child| (child, own_font)));
        }
        debug!(
            target: "layout::style",
            "styled {} rows, {} archetypes cached",
            nodes.len(),
            self.templates.len()
        );
    }

    /// Style one row. `context.font_size` is the parent's font size.
    pub fn apply_node<R>(
        &mut self,
        nodes: &NodeTable,
        archetypes: &ArchetypeTable<R>,
        arrays: &mut LayoutArrays,
        node: NodeId,
        context: &ResolveContext,
    ) {
        let index = node.index();
        if index >= arrays.len() {
            arrays.resize(index + 1);
        }
        let archetype = nodes
            .archetype(node)
            .filter(|_| nodes.kind(node) == Some(NodeKind::Element))
            .and_then(|id| archetypes.get_archetype(id).map(|archetype| (id, archetype)));
        let Some((archetype_id, archetype)) = archetype else {
            arrays.write_row(index, &[], context, &mut parse_template);
            return;
        };
        self.stats.rows_styled += 1;
        trace!(target: "layout::style", "{node}: archetype {archetype_id}");
        let templates = &mut self.templates;
        let stats = &mut self.stats;
        let mut memoized = |id: PropertyId, text: &str| {
            if let Some(tracks) = templates.get(&(archetype_id, id)) {
                stats.templates_reused += 1;
                return Arc::clone(tracks);
            }
            stats.templates_parsed += 1;
            let tracks = parse_template(id, text);
            templates.insert((archetype_id, id), Arc::clone(&tracks));
            tracks
        };
        arrays.write_row(index, &archetype.properties, context, &mut memoized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_archetypes::keywords::display;
    use css_archetypes::{ClassRules, parse_declaration};
    use css_grid::TrackBreadth;
    use css_values_units::Dimension;
    use node_table::Atom;

    fn declared(pairs: &[(&str, &str)]) -> Vec<StyleProperty> {
        pairs
            .iter()
            .filter_map(|(name, value)| parse_declaration(name, value).ok())
            .collect()
    }

    fn first_node() -> Option<NodeId> {
        NodeId::from_raw(1)
    }

    /// Keywords, lengths and colors land in their columns.
    ///
    /// # Panics
    /// Panics if a property is written to the wrong column.
    #[test]
    fn writes_typed_columns() {
        let Some(node) = first_node() else {
            return;
        };
        let mut arrays = LayoutArrays::with_len(1);
        let properties = declared(&[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("width", "50%"),
            ("margin-left", "2em"),
            ("padding-top", "-4px"),
            ("grid-row-start", "span 2"),
            ("background-color", "#ff0000"),
            ("z-index", "3"),
        ]);
        assert_eq!(properties.len(), 8);
        arrays.apply_style(node, &properties, &ResolveContext::default());

        assert_eq!(arrays.display().first(), Some(&Display::Flex));
        assert_eq!(arrays.flex_direction().first(), Some(&FlexDirection::Column));
        assert_eq!(arrays.specified_width().first(), Some(&Dimension::Percent(50.0)));
        assert!(arrays.margin().first().is_some_and(|margin| (margin.left - 32.0).abs() < f32::EPSILON));
        assert!(arrays.padding().first().is_some_and(|padding| padding.top == 0.0));
        assert_eq!(arrays.grid_row_start().first(), Some(&GridLine::Span(2)));
        assert!(arrays.background_color().first().is_some_and(|color| color.to_array()[0] == 255));
        assert_eq!(arrays.z_index().first(), Some(&3));
    }

    /// `font-size` in `em` uses the parent size; other `em`s use the own size.
    ///
    /// # Panics
    /// Panics if font-relative lengths resolve against the wrong size.
    #[test]
    fn font_size_resolves_first() {
        let Some(node) = first_node() else {
            return;
        };
        let mut arrays = LayoutArrays::with_len(1);
        let properties = declared(&[("width", "2em"), ("font-size", "2em")]);
        let context = ResolveContext {
            font_size: 10.0,
            ..ResolveContext::default()
        };
        arrays.apply_style(node, &properties, &context);
        assert_eq!(arrays.font_size().first(), Some(&20.0));
        assert_eq!(arrays.specified_width().first(), Some(&Dimension::Px(40.0)));
    }

    /// Reapplying replaces the previous style rather than merging.
    ///
    /// # Panics
    /// Panics if a stale value survives.
    #[test]
    fn reapply_resets_row() {
        let Some(node) = first_node() else {
            return;
        };
        let mut arrays = LayoutArrays::with_len(1);
        arrays.apply_style(node, &declared(&[("display", "grid"), ("width", "10px")]), &ResolveContext::default());
        arrays.apply_style(node, &declared(&[("height", "0")]), &ResolveContext::default());
        assert_eq!(arrays.display().first(), Some(&Display::Block));
        assert!(arrays.is_width_auto(node));
        assert!(!arrays.is_height_auto(node));
    }

    /// Malformed track lists fall back to one auto track.
    ///
    /// # Panics
    /// Panics if a bad template is kept or dropped.
    #[test]
    fn malformed_template_falls_back() {
        let Some(node) = first_node() else {
            return;
        };
        let mut arrays = LayoutArrays::with_len(1);
        let properties = declared(&[("grid-template-columns", "1fr banana")]);
        arrays.apply_style(node, &properties, &ResolveContext::default());
        let tracks = arrays.grid_template_columns().first().map(|tracks| tracks.to_vec());
        assert_eq!(tracks, Some(vec![GridTrackSize::AUTO]));
        assert_eq!(keyword(&StyleValue::Number(f32::from(display::GRID))), Some(display::GRID));
        assert_eq!(keyword(&StyleValue::Number(1.5)), None);
    }

    /// Archetype templates are parsed once and shared between rows.
    ///
    /// # Panics
    /// Panics if a template is parsed per row or rows miss their style.
    #[test]
    fn applier_shares_templates() {
        let (Some(grid_class), Some(tag)) = (Atom::from_raw(1), Atom::from_raw(9)) else {
            return;
        };
        let mut rules = ClassRules::new();
        rules.insert(
            grid_class,
            declared(&[("display", "grid"), ("grid-template-columns", "1fr 2fr"), ("font-size", "20px")]),
        );
        let mut archetypes = ArchetypeTable::new(rules);
        let archetype = archetypes.get_or_create_archetype(&[grid_class]);

        let mut nodes = NodeTable::new();
        let root = nodes.add_node(NodeKind::Element, Some(tag), None, None);
        let first = nodes.add_node(NodeKind::Element, Some(tag), None, Some(root));
        let second = nodes.add_node(NodeKind::Element, Some(tag), None, Some(root));
        let text = nodes.add_node(NodeKind::Text, None, None, Some(first));
        nodes.set_archetype(first, Some(archetype));
        nodes.set_archetype(second, Some(archetype));

        let mut arrays = LayoutArrays::new();
        let mut applier = StyleApplier::new();
        applier.apply_all(&nodes, &archetypes, &mut arrays, &ResolveContext::default());

        assert_eq!(arrays.len(), 4);
        assert_eq!(arrays.display().get(first.index()), Some(&Display::Grid));
        assert_eq!(arrays.display().get(root.index()), Some(&Display::Block));
        assert_eq!(arrays.font_size().get(text.index()), Some(&20.0));
        let columns = arrays.grid_template_columns().get(second.index()).map(|tracks| tracks.to_vec());
        assert_eq!(
            columns,
            Some(vec![
                GridTrackSize::Breadth(TrackBreadth::Flex(1.0)),
                GridTrackSize::Breadth(TrackBreadth::Flex(2.0)),
            ])
        );
        let stats = applier.stats();
        assert_eq!(stats.rows_styled, 2);
        assert_eq!(stats.templates_parsed, 1);
        assert_eq!(stats.templates_reused, 1);
    }
}
