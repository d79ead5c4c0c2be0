//! Structure-of-arrays layout engine.
//!
//! [`LayoutArrays`] holds one row per node in parallel columns. Style is
//! written into the rows from resolved property lists, then
//! [`compute_layout`] walks the [`NodeTable`](node_table::NodeTable)
//! topology and fills in absolute border-box geometry using block flow,
//! flexbox and grid.

#![forbid(unsafe_code)]

mod arrays;
mod block;
mod box_model;
mod compute;
mod flex;
mod grid;
mod measure;
mod positioned;
mod style_apply;

pub use arrays::{Display, Geometry, LayoutArrays, Overflow, Position, Sides};
pub use compute::{LayoutContext, compute_layout};
pub use measure::{ContentSize, IntrinsicSize, NoIntrinsicSize};
pub use style_apply::{StyleApplier, StyleApplierStats};
