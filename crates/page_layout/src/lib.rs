//! Document layout pipeline.
//!
//! A [`Document`] ties the node table, the archetype table, the layout rows
//! and a shared [`LayoutCache`] together: classes resolve to archetypes,
//! archetypes are written into [`LayoutArrays`](layout_arrays::LayoutArrays),
//! layout runs, and the result is cached per node until a mutation
//! invalidates it.

#![forbid(unsafe_code)]

mod batch;
mod config;
mod document;
pub mod fixture;
mod paint;
mod telemetry;

pub use batch::layout_all;
pub use config::{DEFAULT_VIEWPORT, EngineConfig};
pub use document::{Document, LayoutPass};
pub use fixture::{FixedAdvanceText, Fixture, load_document, load_fixture};
pub use layout_cache::{CacheConfig, CacheStats, LayoutCache};
pub use paint::BoxRecord;
