//! Engine configuration.
//!
//! Settings can be loaded from environment variables or constructed
//! programmatically.

use std::env;

use layout_cache::CacheConfig;

/// Viewport used when none is configured.
pub const DEFAULT_VIEWPORT: (f32, f32) = (800.0, 600.0);

/// Runtime configuration of a [`Document`](crate::Document).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub cache: CacheConfig,
    /// Whether each layout pass logs a JSON telemetry line at info level
    pub telemetry_enabled: bool,
}

/// Parse a positive, finite viewport extent.
fn viewport_extent(name: &str) -> Option<f32> {
    env::var(name)
        .ok()
        .and_then(|val| val.trim().parse::<f32>().ok())
        .filter(|extent| extent.is_finite() && *extent > 0.0)
}

impl EngineConfig {
    /// Construct a config for a viewport with the default cache settings.
    #[inline]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width: viewport_width.max(0.0),
            viewport_height: viewport_height.max(0.0),
            cache: CacheConfig::default(),
            telemetry_enabled: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `DOP_VIEWPORT_WIDTH` / `DOP_VIEWPORT_HEIGHT`: viewport in px
    ///   (default: 800x600)
    /// - `DOP_TELEMETRY`: set to "1" to log per-pass telemetry
    /// - cache settings per [`CacheConfig::from_env`]
    #[inline]
    pub fn from_env() -> Self {
        let (default_width, default_height) = DEFAULT_VIEWPORT;
        Self {
            viewport_width: viewport_extent("DOP_VIEWPORT_WIDTH").unwrap_or(default_width),
            viewport_height: viewport_extent("DOP_VIEWPORT_HEIGHT").unwrap_or(default_height),
            cache: CacheConfig::from_env(),
            telemetry_enabled: env::var("DOP_TELEMETRY").ok().as_deref() == Some("1"),
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_telemetry(mut self, enabled: bool) -> Self {
        self.telemetry_enabled = enabled;
        self
    }
}

impl Default for EngineConfig {
    #[inline]
    fn default() -> Self {
        let (width, height) = DEFAULT_VIEWPORT;
        Self::new(width, height)
    }
}
