//! Node identity.
//!
//! # Responsibility
//! - Provide the identifier type shared by documents and every nested node.
//! - Generate fresh identifiers for nodes created on the client.
//!
//! # Invariants
//! - Generated ids are UUID v4 strings and never collide in practice.
//! - Server-assigned ids are opaque strings and are kept verbatim.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a document or any node below it.
///
/// Documents carry server-assigned ids (or the reserved transient id), so the
/// inner value is an opaque string rather than a parsed `Uuid`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generates a new globally unique node id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, e.g. one returned by the persistence service.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::NodeId;
    use uuid::Uuid;

    #[test]
    fn generated_ids_are_uuid_v4_and_distinct() {
        let first = NodeId::generate();
        let second = NodeId::generate();

        assert_ne!(first, second);
        let parsed = Uuid::parse_str(first.as_str()).expect("generated id should be a uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn compares_against_plain_strings() {
        let id = NodeId::from("m1");
        assert_eq!(id, "m1");
        assert_eq!(id.to_string(), "m1");
    }
}
