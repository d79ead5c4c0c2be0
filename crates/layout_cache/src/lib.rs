//! Concurrent layout geometry cache.
//!
//! A [`LayoutCache`] memoizes per-node geometry together with a local mirror
//! of the tree topology, so a subtree can be invalidated without consulting
//! the node table. Every operation holds one mutex for its whole body.

#![forbid(unsafe_code)]

mod cache;
mod config;
mod entry;

pub use cache::{CacheStats, LayoutCache};
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use entry::{CacheLinks, CachedRect, LayoutCacheEntry};
