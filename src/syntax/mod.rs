//! Syntax tree types and position queries
pub mod ast;
pub mod lookup;

pub use ast::{Family, FamilyId, Person, RelList, Relation, RelationId, Root, Side};
pub use lookup::{NodeRef, node_at, nodes_overlapping};

// Re-export location types used by every node
pub use crate::base::{Loc, OverlapType, Position};
