//! Unsaved-change tracking per document.
//!
//! # Responsibility
//! - Record which documents carry local changes not yet confirmed persisted.
//! - Decide, per mutation, whether it counts as a persisted-content change.
//!
//! # Invariants
//! - Marking is idempotent.
//! - Iteration order is deterministic (sorted by id).

use crate::model::id::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of document ids with pending unsaved changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtySet {
    ids: BTreeSet<NodeId>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one document dirty. Returns `true` when it was clean before.
    pub fn mark(&mut self, id: &NodeId) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.clone())
    }

    /// Clears one document. Returns `true` when it was dirty before.
    pub fn clear(&mut self, id: &NodeId) -> bool {
        self.ids.remove(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns dirty ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }
}

/// Kind of local mutation, as seen by the dirty policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Rename,
    EditCourseField,
    EditExtraItemField,
    AddYear,
    AddChild,
    DeleteCourse,
    DeleteChild,
    BeginDocument,
}

/// Which mutations mark their owning document dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirtyPolicy {
    /// Every mutation that changes persisted content marks dirty.
    #[default]
    AllEdits,
    /// Only course field edits and course deletes mark dirty. Structural
    /// year/semester/module changes, renames and extra edits stay clean.
    Legacy,
}

impl DirtyPolicy {
    /// Returns whether `kind` marks the owning document dirty.
    pub fn marks(self, kind: MutationKind) -> bool {
        match self {
            Self::AllEdits => kind != MutationKind::BeginDocument,
            Self::Legacy => matches!(
                kind,
                MutationKind::EditCourseField | MutationKind::DeleteCourse
            ),
        }
    }
}
