//! One document: tree, archetypes, layout rows and a shared geometry cache.

use core::fmt;
use core::hash::{Hash as _, Hasher as _};
use std::sync::Arc;
use std::time::Instant;

use css_archetypes::{ArchetypeTable, ClassRules};
use css_values_units::ResolveContext;
use layout_arrays::{
    Geometry, IntrinsicSize, LayoutArrays, LayoutContext, NoIntrinsicSize, StyleApplier,
    compute_layout,
};
use layout_cache::{CacheLinks, CacheStats, CachedRect, LayoutCache};
use log::{debug, trace};
use node_table::{ArchetypeId, Atom, NodeId, NodeKind, NodeTable};
use rustc_hash::FxHasher;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::telemetry;

/// Report of one [`Document::layout`] call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayoutPass {
    /// 1-based pass counter of the document
    pub pass: u64,
    /// Every root was validly cached, so nothing was recomputed
    pub skipped: bool,
    pub nodes: usize,
    pub archetypes: usize,
    /// Element rows written from an archetype during this pass
    pub rows_styled: u64,
    pub elapsed_us: u64,
    pub cache: CacheStats,
}

/// Text measurer shared across threads with its document.
type Measurer = Box<dyn IntrinsicSize + Send + Sync>;

/// A document owning its layout state.
///
/// Topology and class changes go through the document so the cache is
/// invalidated at the same call site as the mutation.
pub struct Document {
    pub(crate) nodes: NodeTable,
    archetypes: ArchetypeTable<ClassRules>,
    pub(crate) arrays: LayoutArrays,
    styler: StyleApplier,
    cache: Arc<LayoutCache>,
    config: EngineConfig,
    intrinsic: Measurer,
    passes: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("archetypes", &self.archetypes.len())
            .field("config", &self.config)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Document {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rules(config, ClassRules::new())
    }

    /// A document whose class sets resolve through `rules`.
    pub fn with_rules(config: EngineConfig, rules: ClassRules) -> Self {
        Self {
            nodes: NodeTable::new(),
            archetypes: ArchetypeTable::new(rules),
            arrays: LayoutArrays::new(),
            styler: StyleApplier::new(),
            cache: Arc::new(LayoutCache::new(config.cache)),
            config,
            intrinsic: Box::new(NoIntrinsicSize),
            passes: 0,
        }
    }

    /// Measure text through `intrinsic` from the next pass on.
    pub fn set_intrinsic_size(&mut self, intrinsic: impl IntrinsicSize + Send + Sync + 'static) {
        self.intrinsic = Box::new(intrinsic);
        self.invalidate_all();
    }

    #[inline]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub const fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    #[inline]
    pub const fn arrays(&self) -> &LayoutArrays {
        &self.arrays
    }

    #[inline]
    pub const fn archetypes(&self) -> &ArchetypeTable<ClassRules> {
        &self.archetypes
    }

    /// The document's cache, shareable with other threads.
    #[inline]
    pub const fn cache(&self) -> &Arc<LayoutCache> {
        &self.cache
    }

    /// Append a node. A new child invalidates its parent's cached subtree
    /// and ancestors.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        tag: Option<Atom>,
        text: Option<Atom>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let node = self.nodes.add_node(kind, tag, text, parent);
        if let Some(parent_id) = self.nodes.parent(node) {
            self.invalidate_around(parent_id);
        }
        node
    }

    /// Resolve the archetype of `classes` and attach it to `node`.
    ///
    /// Returns `None` for unknown nodes.
    pub fn assign_classes(&mut self, node: NodeId, classes: &[Atom]) -> Option<ArchetypeId> {
        if !self.nodes.contains(node) {
            debug!(target: "page_layout", "assign_classes: unknown node {node}");
            return None;
        }
        let archetype = self.archetypes.get_or_create_archetype(classes);
        self.nodes.set_archetype(node, Some(archetype));
        Some(archetype)
    }

    /// Change the classes of `node` and invalidate what its style affects:
    /// its cached subtree and every ancestor.
    pub fn restyle(&mut self, node: NodeId, classes: &[Atom]) -> Option<ArchetypeId> {
        let previous = self.nodes.archetype(node);
        let archetype = self.assign_classes(node, classes)?;
        if previous != Some(archetype) {
            self.invalidate_around(node);
        }
        Some(archetype)
    }

    fn invalidate_around(&self, node: NodeId) {
        let marked = self.cache.invalidate_subtree(node);
        let mut ancestors = 0;
        let mut cursor = self.nodes.parent(node);
        while let Some(ancestor) = cursor {
            if ancestors >= self.nodes.len() {
                break;
            }
            self.cache.invalidate_node(ancestor);
            ancestors += 1;
            cursor = self.nodes.parent(ancestor);
        }
        trace!(target: "page_layout", "{node}: {marked} below, {ancestors} ancestors invalidated");
    }

    fn invalidate_all(&self) {
        for root in self.nodes.roots() {
            self.cache.invalidate_subtree(root);
        }
    }

    /// Whether every root has a valid cached layout.
    pub fn is_layout_cached(&self) -> bool {
        let mut roots = self.nodes.roots().peekable();
        roots.peek().is_some() && roots.all(|root| self.cache.has_cached_layout(root))
    }

    /// Style and lay out the document unless the cache says nothing changed.
    pub fn layout(&mut self) -> LayoutPass {
        self.run_pass(false)
    }

    fn run_pass(&mut self, force: bool) -> LayoutPass {
        self.passes += 1;
        let started = Instant::now();
        let skipped = !force && self.is_layout_cached();
        let mut rows_styled = 0;
        if !skipped {
            let before = self.styler.stats().rows_styled;
            let style_context = ResolveContext {
                percent_base: Some(self.config.viewport_width),
                ..ResolveContext::default()
            };
            self.styler
                .apply_all(&self.nodes, &self.archetypes, &mut self.arrays, &style_context);
            rows_styled = self.styler.stats().rows_styled - before;

            let context = LayoutContext::new(self.config.viewport_width, self.config.viewport_height)
                .with_intrinsic(&*self.intrinsic);
            compute_layout(&self.nodes, &mut self.arrays, &context);
            self.populate_cache();
        }
        let report = LayoutPass {
            pass: self.passes,
            skipped,
            nodes: self.nodes.len(),
            archetypes: self.archetypes.len(),
            rows_styled,
            elapsed_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
            cache: self.cache.get_cache_stats(),
        };
        debug!(
            target: "page_layout",
            "pass {}: skipped={skipped}, {} nodes, {rows_styled} rows styled",
            report.pass,
            report.nodes
        );
        telemetry::emit(self.config.telemetry_enabled, &report);
        report
    }

    /// Hash of what a node's layout depends on locally.
    pub fn content_hash(&self, node: NodeId) -> u64 {
        let mut hasher = FxHasher::default();
        self.nodes.kind(node).hash(&mut hasher);
        self.nodes.tag(node).hash(&mut hasher);
        self.nodes.text_content(node).hash(&mut hasher);
        self.nodes.archetype(node).hash(&mut hasher);
        hasher.finish()
    }

    /// Store every node's geometry with a child mirror read from the tree.
    fn populate_cache(&self) {
        for node in self.nodes.ids() {
            let Some(geometry) = self.arrays.geometry(node) else {
                continue;
            };
            let rect = CachedRect {
                x: geometry.x,
                y: geometry.y,
                width: geometry.width,
                height: geometry.height,
                content_width: geometry.content_width,
                content_height: geometry.content_height,
            };
            let links = CacheLinks::new(self.nodes.parent(node), self.nodes.children(node).collect())
                .with_content_hash(self.content_hash(node));
            self.cache.cache_layout(node, rect, links);
        }
    }

    /// Queue nodes whose layout the caller expects to need soon.
    pub fn precache(&self, nodes: &[NodeId]) {
        self.cache.precache_layouts(nodes);
    }

    /// Drain the precache queue, running a pass first when a queued node
    /// lacks a valid entry. Returns the drained ids.
    pub fn drain_precache(&mut self) -> Vec<NodeId> {
        let queued = self.cache.get_precache_queue();
        let stale = queued
            .iter()
            .any(|node| self.nodes.contains(*node) && !self.cache.has_cached_layout(*node));
        if stale {
            self.run_pass(true);
        }
        queued
    }

    /// Geometry of `node`, served from the cache when valid.
    pub fn geometry(&self, node: NodeId) -> Option<Geometry> {
        if let Some(entry) = self.cache.get_cached_layout(node) {
            return Some(Geometry {
                x: entry.x,
                y: entry.y,
                width: entry.width,
                height: entry.height,
                content_width: entry.content_width,
                content_height: entry.content_height,
            });
        }
        self.arrays.geometry(node)
    }
}
