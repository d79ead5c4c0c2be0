//! Cache entries and the inputs that create them.

use node_table::NodeId;

/// Border-box rectangle plus content-box size of one laid-out node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CachedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub content_width: f32,
    pub content_height: f32,
}

impl CachedRect {
    /// A rectangle whose content box matches its border box.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            content_width: width,
            content_height: height,
        }
    }
}

/// Topology and change-detection data recorded alongside a rectangle.
///
/// The children list is the cache's own mirror of the tree. Callers that
/// change topology must re-cache or invalidate the affected nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheLinks {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub content_hash: Option<u64>,
}

impl CacheLinks {
    #[inline]
    pub fn new(parent: Option<NodeId>, children: Vec<NodeId>) -> Self {
        Self {
            parent,
            children,
            content_hash: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_content_hash(mut self, hash: u64) -> Self {
        self.content_hash = Some(hash);
        self
    }
}

/// One node's cached geometry and bookkeeping.
///
/// Timestamps are ticks of the owning cache's logical clock.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCacheEntry {
    pub node_id: NodeId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub created_at: u64,
    pub access_count: u64,
    pub last_access: u64,
    pub valid: bool,
    pub parent_id: Option<NodeId>,
    pub children_ids: Vec<NodeId>,
    /// Parent first, then children
    pub dependencies: Vec<NodeId>,
    pub content_hash: u64,
}

impl LayoutCacheEntry {
    pub(crate) fn new(node_id: NodeId, rect: CachedRect, links: CacheLinks, now: u64) -> Self {
        let dependencies = links
            .parent
            .into_iter()
            .chain(links.children.iter().copied())
            .collect();
        Self {
            node_id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            content_width: rect.content_width,
            content_height: rect.content_height,
            created_at: now,
            access_count: 0,
            last_access: now,
            valid: true,
            parent_id: links.parent,
            children_ids: links.children,
            dependencies,
            content_hash: links.content_hash.unwrap_or(0),
        }
    }

    /// The cached border-box rectangle.
    #[inline]
    pub const fn rect(&self) -> CachedRect {
        CachedRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            content_width: self.content_width,
            content_height: self.content_height,
        }
    }
}
