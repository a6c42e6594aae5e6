//! Curriculum document model.
//!
//! # Responsibility
//! - Define canonical data structures edited by the store.
//! - Define the closed set of editable leaf fields and their validation.
//!
//! # Invariants
//! - Every non-root node is identified by a `NodeId` unique in the forest.
//! - Deletion removes subtrees; there are no tombstones.

pub mod field;
pub mod id;
pub mod maquette;
