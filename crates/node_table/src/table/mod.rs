//! Column storage for the document tree.

use crate::ids::{ArchetypeId, Atom, NodeId};
use log::debug;

/// Kind of a document node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Element,
    Text,
    Comment,
    Document,
    Doctype,
}

/// Document tree as parallel columns, one row per node.
///
/// Rows are append-only. Column `i` holds the data for `NodeId` `i + 1`.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
    kind: Vec<NodeKind>,
    tag: Vec<Option<Atom>>,
    text_content: Vec<Option<Atom>>,
    parent: Vec<Option<NodeId>>,
    first_child: Vec<Option<NodeId>>,
    next_sibling: Vec<Option<NodeId>>,
    archetype: Vec<Option<ArchetypeId>>,
    id_attr: Vec<Option<Atom>>,
    class_attr: Vec<Option<Atom>>,
    style_attr: Vec<Option<Atom>>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `capacity` nodes in every column.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            kind: Vec::with_capacity(capacity),
            tag: Vec::with_capacity(capacity),
            text_content: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            first_child: Vec::with_capacity(capacity),
            next_sibling: Vec::with_capacity(capacity),
            archetype: Vec::with_capacity(capacity),
            id_attr: Vec::with_capacity(capacity),
            class_attr: Vec::with_capacity(capacity),
            style_attr: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.kind.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    #[inline]
    fn row(&self, node: NodeId) -> Option<usize> {
        let index = node.index();
        (index < self.len()).then_some(index)
    }

    /// Whether `node` names a row in this table.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.row(node).is_some()
    }

    /// Append a node and return its identifier.
    ///
    /// When `parent` names an existing node the new node becomes its last
    /// child. An unknown parent is dropped and the node is stored as a root.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        tag: Option<Atom>,
        text: Option<Atom>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let parent = parent.filter(|candidate| {
            let known = self.contains(*candidate);
            if !known {
                debug!(target: "node_table", "add_node: unknown parent {candidate}, storing as root");
            }
            known
        });
        let Some(node) = NodeId::from_index(self.len()) else {
            debug!(target: "node_table", "add_node: identifier space exhausted");
            return NodeId::MAX;
        };

        self.kind.push(kind);
        self.tag.push(tag);
        self.text_content.push(text);
        self.parent.push(parent);
        self.first_child.push(None);
        self.next_sibling.push(None);
        self.archetype.push(None);
        self.id_attr.push(None);
        self.class_attr.push(None);
        self.style_attr.push(None);

        if let Some(parent_id) = parent {
            self.append_child(parent_id, node);
        }
        node
    }

    /// Link `child` at the tail of `parent`'s sibling chain.
    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(mut cursor) = self.first_child(parent) else {
            self.set_first_child(parent, Some(child));
            return;
        };
        // Bounded by the node count so a caller-made cycle cannot spin forever.
        for _ in 0..self.len() {
            match self.next_sibling(cursor) {
                Some(next) => cursor = next,
                None => {
                    self.set_next_sibling(cursor, Some(child));
                    return;
                }
            }
        }
        debug!(target: "node_table", "append_child: sibling chain of {parent} does not terminate");
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.row(node).and_then(|index| self.kind.get(index).copied())
    }

    pub fn tag(&self, node: NodeId) -> Option<Atom> {
        self.row(node).and_then(|index| self.tag.get(index).copied().flatten())
    }

    pub fn text_content(&self, node: NodeId) -> Option<Atom> {
        self.row(node)
            .and_then(|index| self.text_content.get(index).copied().flatten())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.row(node)
            .and_then(|index| self.parent.get(index).copied().flatten())
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.row(node)
            .and_then(|index| self.first_child.get(index).copied().flatten())
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.row(node)
            .and_then(|index| self.next_sibling.get(index).copied().flatten())
    }

    pub fn archetype(&self, node: NodeId) -> Option<ArchetypeId> {
        self.row(node)
            .and_then(|index| self.archetype.get(index).copied().flatten())
    }

    pub fn id_attr(&self, node: NodeId) -> Option<Atom> {
        self.row(node)
            .and_then(|index| self.id_attr.get(index).copied().flatten())
    }

    pub fn class_attr(&self, node: NodeId) -> Option<Atom> {
        self.row(node)
            .and_then(|index| self.class_attr.get(index).copied().flatten())
    }

    pub fn style_attr(&self, node: NodeId) -> Option<Atom> {
        self.row(node)
            .and_then(|index| self.style_attr.get(index).copied().flatten())
    }

    /// Raw parent write. No tree validation is performed.
    pub fn set_parent(&mut self, node: NodeId, value: Option<NodeId>) {
        if let Some(slot) = self.parent.get_mut(node.index()) {
            *slot = value;
        }
    }

    /// Raw first-child write. No tree validation is performed.
    pub fn set_first_child(&mut self, node: NodeId, value: Option<NodeId>) {
        if let Some(slot) = self.first_child.get_mut(node.index()) {
            *slot = value;
        }
    }

    /// Raw next-sibling write. No tree validation is performed.
    pub fn set_next_sibling(&mut self, node: NodeId, value: Option<NodeId>) {
        if let Some(slot) = self.next_sibling.get_mut(node.index()) {
            *slot = value;
        }
    }

    pub fn set_archetype(&mut self, node: NodeId, value: Option<ArchetypeId>) {
        if let Some(slot) = self.archetype.get_mut(node.index()) {
            *slot = value;
        }
    }

    /// Partial attribute update: only the `Some` arguments are written.
    pub fn set_attributes(
        &mut self,
        node: NodeId,
        id_attr: Option<Atom>,
        class_attr: Option<Atom>,
        style_attr: Option<Atom>,
    ) {
        let Some(index) = self.row(node) else {
            return;
        };
        if let (Some(value), Some(slot)) = (id_attr, self.id_attr.get_mut(index)) {
            *slot = Some(value);
        }
        if let (Some(value), Some(slot)) = (class_attr, self.class_attr.get_mut(index)) {
            *slot = Some(value);
        }
        if let (Some(value), Some(slot)) = (style_attr, self.style_attr.get_mut(index)) {
            *slot = Some(value);
        }
    }

    /// All node ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.len()).filter_map(NodeId::from_index)
    }

    /// Nodes without a parent, in id order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids().filter(|node| self.parent(*node).is_none())
    }

    /// Iterate the direct children of `node` in source order.
    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children {
            table: self,
            next: self.first_child(node),
            remaining: self.len(),
        }
    }
}

/// Iterator over a sibling chain.
#[derive(Clone, Debug)]
pub struct Children<'table> {
    table: &'table NodeTable,
    next: Option<NodeId>,
    remaining: usize,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        if self.remaining == 0 {
            self.next = None;
            return None;
        }
        self.remaining -= 1;
        self.next = self.table.next_sibling(current);
        Some(current)
    }
}
