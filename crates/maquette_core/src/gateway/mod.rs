//! Persistence gateway contract.
//!
//! # Responsibility
//! - Define the remote persistence operations the store depends on.
//! - Keep transport details (HTTP, auth, timeouts) outside core.
//!
//! # Invariants
//! - Every returned document is the canonical persisted representation.
//! - Failures are reported as `GatewayError` and never partially applied by
//!   callers.

use crate::model::id::NodeId;
use crate::model::maquette::Maquette;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;

pub use memory::InMemoryGateway;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors reported by a persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Service could not be reached.
    Unavailable(String),
    /// Service does not know the requested document.
    NotFound(NodeId),
    /// Service refused the request.
    Rejected { code: String, message: String },
}

impl GatewayError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "persistence service unavailable: {details}"),
            Self::NotFound(id) => write!(f, "maquette not found on server: {id}"),
            Self::Rejected { code, message } => {
                write!(f, "persistence service rejected request ({code}): {message}")
            }
        }
    }
}

impl Error for GatewayError {}

/// Remote persistence operations over whole documents.
#[async_trait]
pub trait MaquetteGateway: Send + Sync {
    /// Loads every document visible to the user.
    async fn fetch_all(&self) -> GatewayResult<Vec<Maquette>>;
    /// Replaces one persisted document and returns its canonical form.
    async fn save(&self, id: &NodeId, maquette: &Maquette) -> GatewayResult<Maquette>;
    /// Persists a never-saved document; the service assigns the final id.
    async fn save_new(&self, maquette: &Maquette) -> GatewayResult<Maquette>;
    /// Sets the production lock.
    async fn lock(&self, id: &NodeId) -> GatewayResult<Maquette>;
    /// Clears the production lock.
    async fn unlock(&self, id: &NodeId) -> GatewayResult<Maquette>;
    async fn delete_by_id(&self, id: &NodeId) -> GatewayResult<()>;
}
