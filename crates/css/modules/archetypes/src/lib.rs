//! Style archetypes.
//!
//! Every distinct sorted class set resolves its style once. Nodes that share
//! a class set share one [`ArchetypeId`] and one resolved property list.

#![forbid(unsafe_code)]

mod declarations;
pub mod keywords;
mod property;
mod resolver;
mod table;

pub use declarations::{DeclarationError, parse_declaration, parse_declarations, parse_style_block};
pub use node_table::{ArchetypeId, Atom};
pub use property::{PropertyId, StyleProperty};
pub use resolver::{ClassRules, PropertyResolver};
pub use table::{Archetype, ArchetypeStats, ArchetypeTable, apply_archetype, class_set_hash};
