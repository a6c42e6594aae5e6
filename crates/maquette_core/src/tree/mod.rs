//! Forest traversal and copy-on-write mutation.
//!
//! # Responsibility
//! - Locate nodes by id at a fixed depth (`locate`).
//! - Produce new forests with one change applied (`edit`).
//!
//! # Invariants
//! - Mutations never touch the input forest.
//! - Subtrees off the root-to-node path are shared with the input forest.

use crate::model::field::ValidationError;
use crate::model::id::NodeId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod edit;
pub mod locate;

pub use locate::NodeKind;

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from tree lookups and mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// No node of `kind` carries `id`.
    NotFound { kind: NodeKind, id: NodeId },
    /// Field edit rejected before mutation.
    Validation(ValidationError),
}

impl TreeError {
    pub(crate) fn not_found(kind: NodeKind, id: &NodeId) -> Self {
        Self::NotFound {
            kind,
            id: id.clone(),
        }
    }
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for TreeError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
