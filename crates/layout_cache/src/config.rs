//! Cache sizing configuration.

use std::env;

/// Entry count used when `DOP_CACHE_CAPACITY` is unset or invalid.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Capacity and eviction settings of a [`LayoutCache`](crate::LayoutCache).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries before eviction kicks in (at least 1)
    pub capacity: usize,
    /// Whether a full cache evicts its least recently used entry
    pub eviction_enabled: bool,
}

impl CacheConfig {
    /// Construct a config; a zero capacity is raised to 1.
    #[inline]
    pub const fn new(capacity: usize, eviction_enabled: bool) -> Self {
        Self {
            capacity: if capacity == 0 { 1 } else { capacity },
            eviction_enabled,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `DOP_CACHE_CAPACITY`: maximum entry count (default: 10000)
    /// - `DOP_CACHE_EVICTION`: `0` or `false` disables LRU eviction
    #[inline]
    pub fn from_env() -> Self {
        let capacity = env::var("DOP_CACHE_CAPACITY")
            .ok()
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_CAPACITY);
        let eviction_enabled = env::var("DOP_CACHE_EVICTION")
            .ok()
            .is_none_or(|val| !(val == "0" || val.eq_ignore_ascii_case("false")));
        Self::new(capacity, eviction_enabled)
    }
}

impl Default for CacheConfig {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Zero capacity would make every insert evict.
    ///
    /// # Panics
    /// Panics if the capacity is not raised.
    #[test]
    fn zero_capacity_is_raised() {
        assert_eq!(CacheConfig::new(0, true).capacity, 1);
        assert_eq!(CacheConfig::default().capacity, DEFAULT_CAPACITY);
        assert!(CacheConfig::default().eviction_enabled);
    }
}
