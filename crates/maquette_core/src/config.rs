//! Store configuration.
//!
//! # Responsibility
//! - Hold the knobs the application shell may set when building a store.
//! - Validate them once, before any command runs.
//!
//! # Invariants
//! - `transient_id` is never blank.
//! - `detail_route` has at least one segment.

use crate::dirty::DirtyPolicy;
use crate::model::id::NodeId;
use crate::model::maquette::TRANSIENT_DOCUMENT_ID;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store settings, deserializable from the shell's configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Reserved id of the unsaved document.
    pub transient_id: String,
    /// Route prefix of a document detail view; the document id is appended.
    pub detail_route: Vec<String>,
    /// Which mutations mark documents dirty.
    pub dirty_policy: DirtyPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            transient_id: TRANSIENT_DOCUMENT_ID.to_string(),
            detail_route: vec!["maquette".to_string(), "detail".to_string()],
            dirty_policy: DirtyPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Validates configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transient_id.trim().is_empty() {
            return Err(ConfigError::BlankTransientId);
        }
        if self.detail_route.is_empty() {
            return Err(ConfigError::EmptyDetailRoute);
        }
        if let Some(index) = self
            .detail_route
            .iter()
            .position(|segment| segment.trim().is_empty())
        {
            return Err(ConfigError::BlankRouteSegment(index));
        }
        Ok(())
    }

    pub fn transient_id(&self) -> NodeId {
        NodeId::new(self.transient_id.trim())
    }

    /// Route of the detail view for `document_id`.
    pub fn detail_route_for(&self, document_id: &NodeId) -> Vec<String> {
        let mut route = self.detail_route.clone();
        route.push(document_id.to_string());
        route
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BlankTransientId,
    EmptyDetailRoute,
    BlankRouteSegment(usize),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTransientId => write!(f, "transient document id must not be blank"),
            Self::EmptyDetailRoute => write!(f, "detail route must have at least one segment"),
            Self::BlankRouteSegment(index) => {
                write!(f, "detail route segment {index} must not be blank")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig};
    use crate::dirty::DirtyPolicy;
    use crate::model::id::NodeId;

    #[test]
    fn defaults_are_valid() {
        let config = StoreConfig::default();
        config.validate().expect("default config should validate");
        assert_eq!(config.transient_id(), NodeId::from("new"));
        assert_eq!(config.dirty_policy, DirtyPolicy::AllEdits);
        assert_eq!(
            config.detail_route_for(&NodeId::from("m1")),
            vec!["maquette", "detail", "m1"]
        );
    }

    #[test]
    fn rejects_blank_values() {
        let config = StoreConfig {
            transient_id: "  ".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BlankTransientId));

        let config = StoreConfig {
            detail_route: vec!["maquette".to_string(), " ".to_string()],
            ..StoreConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BlankRouteSegment(1)));
    }
}
