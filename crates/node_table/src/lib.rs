//! Structure-of-arrays document tree.
//!
//! Nodes live in parallel columns indexed by a dense, 1-based [`NodeId`].
//! Topology is an intrusive first-child/next-sibling chain; no previous
//! sibling is stored. Absence is expressed as `Option`, never as a sentinel.

#![forbid(unsafe_code)]

pub mod ids;
mod table;

pub use ids::{ArchetypeId, Atom, NodeId};
pub use table::{Children, NodeKind, NodeTable};
