//! Maquette store.
//!
//! # Responsibility
//! - Own the document forest and the dirty set for one application shell.
//! - Apply local tree mutations and the configured dirty policy.
//! - Drive persistence gateway calls and fold their results back in.
//!
//! # Invariants
//! - A failed mutation or gateway call leaves forest and dirty set unchanged.
//! - The forest is only replaced after a gateway call resolved successfully.
//! - At most one transient document exists.
//! - Every failure is returned to the caller; none is only logged.

use crate::config::{ConfigError, StoreConfig};
use crate::dirty::{DirtySet, MutationKind};
use crate::gateway::{GatewayError, MaquetteGateway};
use crate::model::field::{CourseField, ExtraItemField, FieldValue};
use crate::model::id::NodeId;
use crate::model::maquette::{Forest, Maquette};
use crate::navigation::Navigator;
use crate::tree::edit::{self, Applied};
use crate::tree::locate::owning_document;
use crate::tree::{TreeError, TreeResult};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store commands.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Tree lookup or field validation failure.
    Tree(TreeError),
    /// Persistence gateway failure, unmodified.
    Gateway(GatewayError),
    /// No local document carries this id.
    DocumentNotFound(NodeId),
    /// Save-new was requested without a transient document.
    NoTransientDocument,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tree(err) => write!(f, "{err}"),
            Self::Gateway(err) => write!(f, "{err}"),
            Self::DocumentNotFound(id) => write!(f, "maquette not found: {id}"),
            Self::NoTransientDocument => write!(f, "no unsaved maquette to create"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Gateway(err) => Some(err),
            Self::DocumentNotFound(_) | Self::NoTransientDocument => None,
        }
    }
}

impl From<TreeError> for StoreError {
    fn from(value: TreeError) -> Self {
        Self::Tree(value)
    }
}

impl From<GatewayError> for StoreError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

/// Client-side store for curriculum documents.
pub struct MaquetteStore<G: MaquetteGateway, N: Navigator> {
    items: Forest,
    dirty: DirtySet,
    gateway: G,
    navigator: N,
    config: StoreConfig,
    transient_id: NodeId,
}

impl<G: MaquetteGateway, N: Navigator> MaquetteStore<G, N> {
    /// Creates an empty store with default configuration.
    pub fn new(gateway: G, navigator: N) -> Self {
        let config = StoreConfig::default();
        Self {
            items: Forest::new(),
            dirty: DirtySet::new(),
            gateway,
            navigator,
            transient_id: config.transient_id(),
            config,
        }
    }

    /// Creates an empty store after validating `config`.
    pub fn with_config(gateway: G, navigator: N, config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            items: Forest::new(),
            dirty: DirtySet::new(),
            gateway,
            navigator,
            transient_id: config.transient_id(),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// All documents, in load/creation order.
    pub fn all(&self) -> &Forest {
        &self.items
    }

    pub fn by_id(&self, id: &NodeId) -> Option<&Maquette> {
        self.items
            .iter()
            .find(|document| document.id == *id)
            .map(Arc::as_ref)
    }

    /// The unsaved document being composed, if any.
    pub fn transient(&self) -> Option<&Maquette> {
        self.by_id(&self.transient_id)
    }

    pub fn is_dirty(&self, id: &NodeId) -> bool {
        self.dirty.contains(id)
    }

    pub fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    /// Id of the document whose subtree contains `node_id`.
    pub fn owner_of(&self, node_id: &NodeId) -> Option<&NodeId> {
        owning_document(&self.items, node_id)
    }

    /// Marks a document dirty. Idempotent.
    pub fn mark_dirty(&mut self, id: &NodeId) {
        if self.dirty.mark(id) {
            debug!("event=maquette_mark_dirty module=store status=ok maquette={id}");
        }
    }

    pub fn rename_year(&mut self, year_id: &NodeId, level: impl Into<String>) -> StoreResult<()> {
        let applied = checked("year_rename", edit::rename_year(&self.items, year_id, level))?;
        self.apply("year_rename", MutationKind::Rename, applied);
        Ok(())
    }

    pub fn rename_semester(
        &mut self,
        semester_id: &NodeId,
        name: impl Into<String>,
    ) -> StoreResult<()> {
        let applied = checked(
            "semester_rename",
            edit::rename_semester(&self.items, semester_id, name),
        )?;
        self.apply("semester_rename", MutationKind::Rename, applied);
        Ok(())
    }

    pub fn rename_module(
        &mut self,
        module_id: &NodeId,
        name: impl Into<String>,
    ) -> StoreResult<()> {
        let applied = checked(
            "module_rename",
            edit::rename_module(&self.items, module_id, name),
        )?;
        self.apply("module_rename", MutationKind::Rename, applied);
        Ok(())
    }

    pub fn rename_extra_group(
        &mut self,
        group_id: &NodeId,
        name: impl Into<String>,
    ) -> StoreResult<()> {
        let applied = checked(
            "extra_group_rename",
            edit::rename_extra_group(&self.items, group_id, name),
        )?;
        self.apply("extra_group_rename", MutationKind::Rename, applied);
        Ok(())
    }

    pub fn edit_course_field(&mut self, course_id: &NodeId, field: CourseField) -> StoreResult<()> {
        let applied = checked(
            "course_edit",
            edit::edit_course_field(&self.items, course_id, field),
        )?;
        self.apply("course_edit", MutationKind::EditCourseField, applied);
        Ok(())
    }

    /// Validates and writes one course field received as name and value.
    ///
    /// # Errors
    /// - `TreeError::Validation` for unknown names or mistyped values; the
    ///   forest is left untouched.
    /// - `TreeError::NotFound` when the course does not exist.
    pub fn edit_course_field_value(
        &mut self,
        course_id: &NodeId,
        field: &str,
        value: FieldValue,
    ) -> StoreResult<()> {
        let applied = checked(
            "course_edit",
            edit::edit_course_field_value(&self.items, course_id, field, value),
        )?;
        self.apply("course_edit", MutationKind::EditCourseField, applied);
        Ok(())
    }

    pub fn edit_extra_item_field(
        &mut self,
        item_id: &NodeId,
        field: ExtraItemField,
    ) -> StoreResult<()> {
        let applied = checked(
            "extra_item_edit",
            edit::edit_extra_item_field(&self.items, item_id, field),
        )?;
        self.apply("extra_item_edit", MutationKind::EditExtraItemField, applied);
        Ok(())
    }

    pub fn edit_extra_item_field_value(
        &mut self,
        item_id: &NodeId,
        field: &str,
        value: FieldValue,
    ) -> StoreResult<()> {
        let applied = checked(
            "extra_item_edit",
            edit::edit_extra_item_field_value(&self.items, item_id, field, value),
        )?;
        self.apply("extra_item_edit", MutationKind::EditExtraItemField, applied);
        Ok(())
    }

    /// Appends a year to a document and returns its id.
    pub fn add_year(
        &mut self,
        document_id: &NodeId,
        level: impl Into<String>,
    ) -> StoreResult<NodeId> {
        let (applied, id) = checked("year_add", edit::add_year(&self.items, document_id, level))?;
        self.apply("year_add", MutationKind::AddYear, applied);
        Ok(id)
    }

    /// Appends a semester numbered after its year's current semester count.
    pub fn add_semester(&mut self, year_id: &NodeId) -> StoreResult<NodeId> {
        let (applied, id) = checked("semester_add", edit::add_semester(&self.items, year_id))?;
        self.apply("semester_add", MutationKind::AddChild, applied);
        Ok(id)
    }

    pub fn add_module(&mut self, semester_id: &NodeId) -> StoreResult<NodeId> {
        let (applied, id) = checked("module_add", edit::add_module(&self.items, semester_id))?;
        self.apply("module_add", MutationKind::AddChild, applied);
        Ok(id)
    }

    pub fn add_course(&mut self, module_id: &NodeId) -> StoreResult<NodeId> {
        let (applied, id) = checked("course_add", edit::add_course(&self.items, module_id))?;
        self.apply("course_add", MutationKind::AddChild, applied);
        Ok(id)
    }

    pub fn add_extra_group(&mut self, year_id: &NodeId) -> StoreResult<NodeId> {
        let (applied, id) =
            checked("extra_group_add", edit::add_extra_group(&self.items, year_id))?;
        self.apply("extra_group_add", MutationKind::AddChild, applied);
        Ok(id)
    }

    pub fn add_extra_item(&mut self, group_id: &NodeId) -> StoreResult<NodeId> {
        let (applied, id) = checked("extra_item_add", edit::add_extra_item(&self.items, group_id))?;
        self.apply("extra_item_add", MutationKind::AddChild, applied);
        Ok(id)
    }

    /// Removes a semester and its subtree. Returns `false` when not found.
    pub fn delete_semester(&mut self, semester_id: &NodeId) -> bool {
        let applied = edit::delete_semester(&self.items, semester_id);
        self.apply_removal("semester_delete", MutationKind::DeleteChild, semester_id, applied)
    }

    pub fn delete_module(&mut self, module_id: &NodeId) -> bool {
        let applied = edit::delete_module(&self.items, module_id);
        self.apply_removal("module_delete", MutationKind::DeleteChild, module_id, applied)
    }

    pub fn delete_course(&mut self, course_id: &NodeId) -> bool {
        let applied = edit::delete_course(&self.items, course_id);
        self.apply_removal("course_delete", MutationKind::DeleteCourse, course_id, applied)
    }

    pub fn delete_extra_group(&mut self, group_id: &NodeId) -> bool {
        let applied = edit::delete_extra_group(&self.items, group_id);
        self.apply_removal("extra_group_delete", MutationKind::DeleteChild, group_id, applied)
    }

    pub fn delete_extra_item(&mut self, item_id: &NodeId) -> bool {
        let applied = edit::delete_extra_item(&self.items, item_id);
        self.apply_removal("extra_item_delete", MutationKind::DeleteChild, item_id, applied)
    }

    /// Starts a new unsaved document, replacing any previous one, and
    /// navigates to its detail view.
    pub fn begin_document(
        &mut self,
        master: impl Into<String>,
        school_year: impl Into<String>,
    ) -> NodeId {
        let applied = edit::begin_document(&self.items, &self.transient_id, master, school_year);
        self.apply("maquette_begin", MutationKind::BeginDocument, applied);
        self.dirty.clear(&self.transient_id);
        self.navigator
            .navigate_to(&self.config.detail_route_for(&self.transient_id));
        self.transient_id.clone()
    }

    /// Drops a document locally without contacting the gateway.
    pub fn discard_document(&mut self, id: &NodeId) -> bool {
        match edit::remove_document(&self.items, id) {
            Some(next) => {
                self.items = next;
                self.dirty.clear(id);
                debug!("event=maquette_discard module=store status=ok maquette={id}");
                true
            }
            None => {
                debug!("event=maquette_discard module=store status=noop maquette={id}");
                false
            }
        }
    }

    /// Replaces every document with the gateway's list. Dirty ids are kept.
    pub async fn fetch_all(&mut self) -> StoreResult<usize> {
        let documents = self
            .gateway
            .fetch_all()
            .await
            .map_err(|err| gateway_failure("maquette_fetch", None, err))?;
        self.items = documents.into_iter().map(Arc::new).collect();
        info!(
            "event=maquette_fetch module=store status=ok count={}",
            self.items.len()
        );
        Ok(self.items.len())
    }

    /// Persists one document and adopts the returned canonical form.
    pub async fn save(&mut self, id: &NodeId) -> StoreResult<()> {
        let document = self.document(id)?;
        let saved = self
            .gateway
            .save(id, &document)
            .await
            .map_err(|err| gateway_failure("maquette_save", Some(id), err))?;
        self.adopt(id, saved)?;
        info!("event=maquette_save module=store status=ok maquette={id}");
        Ok(())
    }

    /// Persists the transient document, replaces it with the created one and
    /// navigates to the created document's detail view.
    pub async fn save_new(&mut self) -> StoreResult<NodeId> {
        let transient_id = self.transient_id.clone();
        let document = self
            .document(&transient_id)
            .map_err(|_| StoreError::NoTransientDocument)?;
        let saved = self
            .gateway
            .save_new(&document)
            .await
            .map_err(|err| gateway_failure("maquette_save_new", Some(&transient_id), err))?;

        let created_id = saved.id.clone();
        let mut next = edit::remove_document(&self.items, &transient_id)
            .unwrap_or_else(|| self.items.clone());
        next.push(Arc::new(saved));
        self.items = next;
        self.dirty.clear(&transient_id);
        info!("event=maquette_save_new module=store status=ok maquette={created_id}");

        self.navigator
            .navigate_to(&self.config.detail_route_for(&created_id));
        Ok(created_id)
    }

    /// Toggles the production lock and returns the new lock state.
    ///
    /// The gateway answers with the persisted document, which replaces the
    /// local one, so the dirty flag is cleared as on save.
    pub async fn lock_or_unlock(&mut self, id: &NodeId) -> StoreResult<bool> {
        let document = self.document(id)?;
        let result = if document.in_production {
            self.gateway.unlock(id).await
        } else {
            self.gateway.lock(id).await
        };
        let updated = result.map_err(|err| gateway_failure("maquette_lock", Some(id), err))?;
        let locked = updated.in_production;
        self.adopt(id, updated)?;
        info!("event=maquette_lock module=store status=ok maquette={id} locked={locked}");
        Ok(locked)
    }

    /// Deletes a document on the server, then locally.
    pub async fn delete(&mut self, id: &NodeId) -> StoreResult<()> {
        self.gateway
            .delete_by_id(id)
            .await
            .map_err(|err| gateway_failure("maquette_delete", Some(id), err))?;
        if let Some(next) = edit::remove_document(&self.items, id) {
            self.items = next;
        }
        self.dirty.clear(id);
        info!("event=maquette_delete module=store status=ok maquette={id}");
        Ok(())
    }

    fn document(&self, id: &NodeId) -> StoreResult<Arc<Maquette>> {
        self.items
            .iter()
            .find(|document| document.id == *id)
            .cloned()
            .ok_or_else(|| StoreError::DocumentNotFound(id.clone()))
    }

    fn adopt(&mut self, id: &NodeId, persisted: Maquette) -> StoreResult<()> {
        let next = edit::replace_document(&self.items, id, persisted)
            .ok_or_else(|| StoreError::DocumentNotFound(id.clone()))?;
        self.items = next;
        self.dirty.clear(id);
        Ok(())
    }

    fn apply_removal(
        &mut self,
        event: &'static str,
        kind: MutationKind,
        target: &NodeId,
        applied: Option<Applied>,
    ) -> bool {
        match applied {
            Some(applied) => {
                self.apply(event, kind, applied);
                true
            }
            None => {
                debug!("event={event} module=store status=noop target={target}");
                false
            }
        }
    }

    fn apply(&mut self, event: &'static str, kind: MutationKind, applied: Applied) {
        let Applied { forest, document } = applied;
        self.items = forest;
        if self.config.dirty_policy.marks(kind) {
            self.dirty.mark(&document);
        }
        debug!(
            "event={event} module=store status=ok maquette={document} dirty={}",
            self.dirty.contains(&document)
        );
    }
}

fn checked<T>(event: &'static str, result: TreeResult<T>) -> StoreResult<T> {
    result.map_err(|err| {
        warn!("event={event} module=store status=error error={err}");
        StoreError::Tree(err)
    })
}

fn gateway_failure(event: &'static str, id: Option<&NodeId>, err: GatewayError) -> StoreError {
    match id {
        Some(id) => warn!("event={event} module=store status=error maquette={id} error={err}"),
        None => warn!("event={event} module=store status=error error={err}"),
    }
    StoreError::Gateway(err)
}
