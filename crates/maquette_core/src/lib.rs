//! Client-side store for curriculum plans ("maquettes").
//! This crate owns the document tree, its copy-on-write edits and the
//! persistence boundary; UI shells only send commands and read state.

pub mod command;
pub mod config;
pub mod dirty;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod store;
pub mod tree;

pub use command::{Command, CommandOutcome};
pub use config::{ConfigError, StoreConfig};
pub use dirty::{DirtyPolicy, DirtySet};
pub use gateway::{GatewayError, GatewayResult, InMemoryGateway, MaquetteGateway};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::field::{CourseField, ExtraItemField, FieldValue, ValidationError};
pub use model::id::NodeId;
pub use model::maquette::{
    Course, ExtraGroup, ExtraItem, Forest, Maquette, Module, Semester, Year,
    TRANSIENT_DOCUMENT_ID,
};
pub use navigation::{Navigator, NoopNavigator, RecordingNavigator};
pub use store::{MaquetteStore, StoreError, StoreResult};
pub use tree::{NodeKind, TreeError, TreeResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
