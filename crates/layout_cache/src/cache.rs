//! The cache itself: one mutex around entries, counters, clock and queue.

use core::mem;
use std::collections::VecDeque;

use log::{debug, trace};
use node_table::NodeId;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::config::CacheConfig;
use crate::entry::{CacheLinks, CachedRect, LayoutCacheEntry};

/// Snapshot of cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// `hits / (hits + misses)`, 0 before the first lookup
    pub hit_rate: f64,
    pub invalidations: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: FxHashMap<NodeId, LayoutCacheEntry>,
    precache_queue: Vec<NodeId>,
    clock: u64,
    hits: u64,
    misses: u64,
    invalidations: u64,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Drop the entry with the oldest access tick. Ties go to the lower id.
    fn evict_lru(&mut self) -> Option<NodeId> {
        let victim = self
            .entries
            .values()
            .min_by_key(|entry| (entry.last_access, entry.node_id))
            .map(|entry| entry.node_id)?;
        self.entries.remove(&victim);
        Some(victim)
    }
}

/// Thread-safe per-node geometry cache.
#[derive(Debug, Default)]
pub struct LayoutCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl LayoutCache {
    #[inline]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    #[inline]
    pub const fn config(&self) -> CacheConfig {
        self.config
    }

    /// Number of stored entries, valid or not.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Store `rect` for `node`, replacing any previous entry.
    ///
    /// Inserting a new node into a full cache first evicts the least recently
    /// used entry when eviction is enabled; otherwise the cache grows.
    pub fn cache_layout(&self, node: NodeId, rect: CachedRect, links: CacheLinks) {
        let mut state = self.state.lock();
        let full = state.entries.len() >= self.config.capacity;
        if full && !state.entries.contains_key(&node) {
            if self.config.eviction_enabled {
                let victim = state.evict_lru();
                debug!(target: "layout_cache", "evicted {victim:?} to make room for {node}");
            } else {
                debug!(
                    target: "layout_cache",
                    "capacity {} exceeded without eviction",
                    self.config.capacity
                );
            }
        }
        let now = state.tick();
        state
            .entries
            .insert(node, LayoutCacheEntry::new(node, rect, links, now));
    }

    /// Copy of the valid entry for `node`, counting a hit; otherwise a miss.
    pub fn get_cached_layout(&self, node: NodeId) -> Option<LayoutCacheEntry> {
        let mut state = self.state.lock();
        let now = state.tick();
        let found = state.entries.get_mut(&node).filter(|entry| entry.valid).map(|entry| {
            entry.access_count += 1;
            entry.last_access = now;
            entry.clone()
        });
        if found.is_some() {
            state.hits += 1;
        } else {
            state.misses += 1;
        }
        found
    }

    /// Whether a valid entry exists. Leaves the counters alone.
    pub fn has_cached_layout(&self, node: NodeId) -> bool {
        self.state
            .lock()
            .entries
            .get(&node)
            .is_some_and(|entry| entry.valid)
    }

    /// Stored content hash of `node`, valid or not.
    pub fn content_hash(&self, node: NodeId) -> Option<u64> {
        self.state
            .lock()
            .entries
            .get(&node)
            .map(|entry| entry.content_hash)
    }

    /// Mark the entry of `node` invalid. Returns `false` for uncached nodes.
    pub fn invalidate_node(&self, node: NodeId) -> bool {
        let mut state = self.state.lock();
        let Some(entry) = state.entries.get_mut(&node) else {
            return false;
        };
        entry.valid = false;
        state.invalidations += 1;
        trace!(target: "layout_cache", "invalidated {node}");
        true
    }

    /// Invalidate every cached node reachable from `root` through the cached
    /// child lists. Uncached nodes end the walk along their branch.
    ///
    /// Returns how many entries were marked.
    pub fn invalidate_subtree(&self, root: NodeId) -> usize {
        let mut state = self.state.lock();
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::from([root]);
        let mut marked = 0;
        while let Some(node) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            let Some(entry) = state.entries.get_mut(&node) else {
                continue;
            };
            entry.valid = false;
            queue.extend(entry.children_ids.iter().copied());
            marked += 1;
        }
        state.invalidations += marked as u64;
        debug!(target: "layout_cache", "invalidated {marked} entries under {root}");
        marked
    }

    /// Queue `nodes` as precache hints; the queue keeps first occurrences.
    pub fn precache_layouts(&self, nodes: &[NodeId]) {
        let mut state = self.state.lock();
        state.precache_queue.extend_from_slice(nodes);
        let mut seen = FxHashSet::default();
        state.precache_queue.retain(|node| seen.insert(*node));
    }

    /// Take the queued hints, leaving the queue empty.
    pub fn get_precache_queue(&self) -> Vec<NodeId> {
        mem::take(&mut self.state.lock().precache_queue)
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        let state = self.state.lock();
        let requests = state.hits + state.misses;
        let hit_rate = if requests == 0 {
            0.0
        } else {
            state.hits as f64 / requests as f64
        };
        CacheStats {
            size: state.entries.len(),
            capacity: self.config.capacity,
            hits: state.hits,
            misses: state.misses,
            hit_rate,
            invalidations: state.invalidations,
        }
    }

    /// Drop every entry, counting each as an invalidation. Hit and miss
    /// counters and the precache queue survive. Returns the cleared count.
    pub fn clear_cache(&self) -> usize {
        let mut state = self.state.lock();
        let cleared = state.entries.len();
        state.entries.clear();
        state.invalidations += cleared as u64;
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(count: u32) -> Vec<NodeId> {
        (1..=count).filter_map(NodeId::from_raw).collect()
    }

    fn rect(width: f32) -> CachedRect {
        CachedRect::new(0.0, 0.0, width, 10.0)
    }

    /// A miss, then a hit after caching.
    ///
    /// # Panics
    /// Panics if hit or miss counts are off.
    #[test]
    fn hit_and_miss_counting() {
        let cache = LayoutCache::default();
        let [node] = ids(1)[..] else { return };
        assert!(cache.get_cached_layout(node).is_none());
        assert_eq!((cache.get_cache_stats().hits, cache.get_cache_stats().misses), (0, 1));

        cache.cache_layout(node, rect(50.0), CacheLinks::default());
        let entry = cache.get_cached_layout(node);
        assert_eq!(entry.as_ref().map(|found| found.access_count), Some(1));
        let stats = cache.get_cache_stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    /// Invalid entries miss, and `has_cached_layout` does not count.
    ///
    /// # Panics
    /// Panics if an invalid entry is returned.
    #[test]
    fn invalid_entries_miss() {
        let cache = LayoutCache::default();
        let [node, other] = ids(2)[..] else { return };
        cache.cache_layout(node, rect(1.0), CacheLinks::default());
        assert!(cache.invalidate_node(node));
        assert!(!cache.invalidate_node(other));
        assert!(!cache.has_cached_layout(node));
        assert!(cache.get_cached_layout(node).is_none());
        let stats = cache.get_cache_stats();
        assert_eq!((stats.hits, stats.misses, stats.invalidations), (0, 1, 1));
        assert_eq!(stats.size, 1);
    }

    /// Subtree invalidation follows cached children once each, even
    /// through a cyclic mirror.
    ///
    /// # Panics
    /// Panics if a reachable entry stays valid or one is counted twice.
    #[test]
    fn subtree_invalidation_follows_mirror() {
        let cache = LayoutCache::default();
        let [root, left, right, grandchild, unrelated] = ids(5)[..] else {
            return;
        };
        cache.cache_layout(root, rect(1.0), CacheLinks::new(None, vec![left, right]));
        cache.cache_layout(left, rect(1.0), CacheLinks::new(Some(root), vec![grandchild, root]));
        cache.cache_layout(grandchild, rect(1.0), CacheLinks::new(Some(left), Vec::new()));
        cache.cache_layout(unrelated, rect(1.0), CacheLinks::default());

        assert_eq!(cache.invalidate_subtree(root), 3);
        assert!(!cache.has_cached_layout(grandchild));
        assert!(cache.has_cached_layout(unrelated));
        assert_eq!(cache.get_cache_stats().invalidations, 3);
        assert_eq!(cache.invalidate_subtree(right), 0);
    }

    /// The least recently accessed entry goes first.
    ///
    /// # Panics
    /// Panics if the wrong entry is evicted.
    #[test]
    fn lru_eviction() {
        let cache = LayoutCache::new(CacheConfig::new(2, true));
        let [first, second, third] = ids(3)[..] else { return };
        cache.cache_layout(first, rect(1.0), CacheLinks::default());
        cache.cache_layout(second, rect(2.0), CacheLinks::default());
        assert!(cache.get_cached_layout(first).is_some());
        cache.cache_layout(third, rect(3.0), CacheLinks::default());

        assert!(cache.has_cached_layout(first));
        assert!(!cache.has_cached_layout(second));
        assert!(cache.has_cached_layout(third));
        assert_eq!(cache.len(), 2);

        cache.cache_layout(third, rect(4.0), CacheLinks::default());
        assert_eq!(cache.len(), 2);
        assert!(cache.has_cached_layout(first));
    }

    /// Without eviction the cache grows past its capacity.
    ///
    /// # Panics
    /// Panics if an entry is dropped.
    #[test]
    fn disabled_eviction_grows() {
        let cache = LayoutCache::new(CacheConfig::new(1, false));
        for node in ids(3) {
            cache.cache_layout(node, rect(1.0), CacheLinks::default());
        }
        assert_eq!(cache.len(), 3);
    }

    /// Hints are deduplicated and drained atomically.
    ///
    /// # Panics
    /// Panics if the queue keeps duplicates or is not drained.
    #[test]
    fn precache_queue_dedups_and_drains() {
        let cache = LayoutCache::default();
        let [first, second, third] = ids(3)[..] else { return };
        cache.precache_layouts(&[second, first, second]);
        cache.precache_layouts(&[first, third]);
        assert_eq!(cache.get_precache_queue(), vec![second, first, third]);
        assert!(cache.get_precache_queue().is_empty());
    }

    /// Clearing counts the cleared entries and keeps the hit counters.
    ///
    /// # Panics
    /// Panics if the counters are wrong after clearing.
    #[test]
    fn clear_counts_entries() {
        let cache = LayoutCache::default();
        let nodes = ids(4);
        for node in &nodes {
            cache.cache_layout(*node, rect(1.0), CacheLinks::default());
        }
        let [first, ..] = nodes[..] else { return };
        assert!(cache.get_cached_layout(first).is_some());
        assert_eq!(cache.clear_cache(), 4);
        let stats = cache.get_cache_stats();
        assert_eq!((stats.size, stats.invalidations, stats.hits), (0, 4, 1));
        assert!(cache.is_empty());
    }

    /// Content hashes are readable regardless of validity.
    ///
    /// # Panics
    /// Panics if the hash is lost on invalidation.
    #[test]
    fn content_hash_survives_invalidation() {
        let cache = LayoutCache::default();
        let [node] = ids(1)[..] else { return };
        assert_eq!(cache.content_hash(node), None);
        cache.cache_layout(
            node,
            rect(1.0),
            CacheLinks::default().with_content_hash(0xfeed),
        );
        cache.invalidate_node(node);
        assert_eq!(cache.content_hash(node), Some(0xfeed));
    }
}
