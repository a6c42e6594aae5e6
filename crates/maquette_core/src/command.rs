//! Command surface for the UI shell.
//!
//! # Responsibility
//! - Name every store mutation as one serializable command.
//! - Route commands to the store and report a uniform outcome.
//!
//! # Invariants
//! - Field edits arrive as name + untyped value and are validated before
//!   any mutation.
//! - Deleting a missing child is reported as `Unchanged`, not as an error.

use crate::gateway::MaquetteGateway;
use crate::model::field::FieldValue;
use crate::model::id::NodeId;
use crate::navigation::Navigator;
use crate::store::{MaquetteStore, StoreResult};
use serde::{Deserialize, Serialize};

/// One UI-originated store command.
///
/// Serialized as `{"type": "<commandName>", ...fields}` with camelCase names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    FetchAll,
    DeleteMaquette { maquette_id: NodeId },
    DiscardMaquette { maquette_id: NodeId },
    NewMaquette { master: String, school_year: String },
    SaveMaquette { maquette_id: NodeId },
    SaveNewMaquette,
    LockOrUnlock { maquette_id: NodeId },
    MarkDirty { maquette_id: NodeId },
    NewYear { maquette_id: NodeId, level: String },
    EditYearLevel { year_id: NodeId, level: String },
    AddSemester { year_id: NodeId },
    EditSemesterName { semester_id: NodeId, name: String },
    DeleteSemester { semester_id: NodeId },
    AddModule { semester_id: NodeId },
    EditModuleName { module_id: NodeId, name: String },
    DeleteModule { module_id: NodeId },
    AddCourse { module_id: NodeId },
    EditCourseField {
        course_id: NodeId,
        field: String,
        value: FieldValue,
    },
    DeleteCourse { course_id: NodeId },
    AddExtraGroup { year_id: NodeId },
    EditExtraGroupName { extra_id: NodeId, name: String },
    DeleteExtraGroup { extra_id: NodeId },
    AddExtraItem { extra_id: NodeId },
    EditExtraItemField {
        item_id: NodeId,
        field: String,
        value: FieldValue,
    },
    DeleteExtraItem { item_id: NodeId },
}

impl Command {
    /// Stable command name, as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchAll => "fetchAll",
            Self::DeleteMaquette { .. } => "deleteMaquette",
            Self::DiscardMaquette { .. } => "discardMaquette",
            Self::NewMaquette { .. } => "newMaquette",
            Self::SaveMaquette { .. } => "saveMaquette",
            Self::SaveNewMaquette => "saveNewMaquette",
            Self::LockOrUnlock { .. } => "lockOrUnlock",
            Self::MarkDirty { .. } => "markDirty",
            Self::NewYear { .. } => "newYear",
            Self::EditYearLevel { .. } => "editYearLevel",
            Self::AddSemester { .. } => "addSemester",
            Self::EditSemesterName { .. } => "editSemesterName",
            Self::DeleteSemester { .. } => "deleteSemester",
            Self::AddModule { .. } => "addModule",
            Self::EditModuleName { .. } => "editModuleName",
            Self::DeleteModule { .. } => "deleteModule",
            Self::AddCourse { .. } => "addCourse",
            Self::EditCourseField { .. } => "editCourseField",
            Self::DeleteCourse { .. } => "deleteCourse",
            Self::AddExtraGroup { .. } => "addExtraGroup",
            Self::EditExtraGroupName { .. } => "editExtraGroupName",
            Self::DeleteExtraGroup { .. } => "deleteExtraGroup",
            Self::AddExtraItem { .. } => "addExtraItem",
            Self::EditExtraItemField { .. } => "editExtraItemField",
            Self::DeleteExtraItem { .. } => "deleteExtraItem",
        }
    }

    /// Whether the command needs the persistence gateway.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::FetchAll
                | Self::DeleteMaquette { .. }
                | Self::SaveMaquette { .. }
                | Self::SaveNewMaquette
                | Self::LockOrUnlock { .. }
        )
    }
}

/// Result of one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// State changed.
    Applied,
    /// State changed and a node or document with this id was created.
    Created(NodeId),
    /// Target was absent; nothing changed.
    Unchanged,
}

impl CommandOutcome {
    fn removal(removed: bool) -> Self {
        if removed {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }
}

impl<G: MaquetteGateway, N: Navigator> MaquetteStore<G, N> {
    /// Runs one command to completion.
    ///
    /// Local commands finish synchronously inside the returned future; remote
    /// ones resolve once the gateway answered.
    pub async fn dispatch(&mut self, command: Command) -> StoreResult<CommandOutcome> {
        log::trace!("event=command_dispatch module=command name={}", command.name());
        let outcome = match command {
            Command::FetchAll => {
                self.fetch_all().await?;
                CommandOutcome::Applied
            }
            Command::DeleteMaquette { maquette_id } => {
                self.delete(&maquette_id).await?;
                CommandOutcome::Applied
            }
            Command::DiscardMaquette { maquette_id } => {
                CommandOutcome::removal(self.discard_document(&maquette_id))
            }
            Command::NewMaquette {
                master,
                school_year,
            } => CommandOutcome::Created(self.begin_document(master, school_year)),
            Command::SaveMaquette { maquette_id } => {
                self.save(&maquette_id).await?;
                CommandOutcome::Applied
            }
            Command::SaveNewMaquette => CommandOutcome::Created(self.save_new().await?),
            Command::LockOrUnlock { maquette_id } => {
                self.lock_or_unlock(&maquette_id).await?;
                CommandOutcome::Applied
            }
            Command::MarkDirty { maquette_id } => {
                self.mark_dirty(&maquette_id);
                CommandOutcome::Applied
            }
            Command::NewYear { maquette_id, level } => {
                CommandOutcome::Created(self.add_year(&maquette_id, level)?)
            }
            Command::EditYearLevel { year_id, level } => {
                self.rename_year(&year_id, level)?;
                CommandOutcome::Applied
            }
            Command::AddSemester { year_id } => {
                CommandOutcome::Created(self.add_semester(&year_id)?)
            }
            Command::EditSemesterName { semester_id, name } => {
                self.rename_semester(&semester_id, name)?;
                CommandOutcome::Applied
            }
            Command::DeleteSemester { semester_id } => {
                CommandOutcome::removal(self.delete_semester(&semester_id))
            }
            Command::AddModule { semester_id } => {
                CommandOutcome::Created(self.add_module(&semester_id)?)
            }
            Command::EditModuleName { module_id, name } => {
                self.rename_module(&module_id, name)?;
                CommandOutcome::Applied
            }
            Command::DeleteModule { module_id } => {
                CommandOutcome::removal(self.delete_module(&module_id))
            }
            Command::AddCourse { module_id } => {
                CommandOutcome::Created(self.add_course(&module_id)?)
            }
            Command::EditCourseField {
                course_id,
                field,
                value,
            } => {
                self.edit_course_field_value(&course_id, &field, value)?;
                CommandOutcome::Applied
            }
            Command::DeleteCourse { course_id } => {
                CommandOutcome::removal(self.delete_course(&course_id))
            }
            Command::AddExtraGroup { year_id } => {
                CommandOutcome::Created(self.add_extra_group(&year_id)?)
            }
            Command::EditExtraGroupName { extra_id, name } => {
                self.rename_extra_group(&extra_id, name)?;
                CommandOutcome::Applied
            }
            Command::DeleteExtraGroup { extra_id } => {
                CommandOutcome::removal(self.delete_extra_group(&extra_id))
            }
            Command::AddExtraItem { extra_id } => {
                CommandOutcome::Created(self.add_extra_item(&extra_id)?)
            }
            Command::EditExtraItemField {
                item_id,
                field,
                value,
            } => {
                self.edit_extra_item_field_value(&item_id, &field, value)?;
                CommandOutcome::Applied
            }
            Command::DeleteExtraItem { item_id } => {
                CommandOutcome::removal(self.delete_extra_item(&item_id))
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::Command;
    use crate::model::field::FieldValue;
    use crate::model::id::NodeId;

    #[test]
    fn only_persistence_commands_are_remote() {
        assert!(Command::SaveNewMaquette.is_remote());
        assert!(Command::LockOrUnlock {
            maquette_id: NodeId::from("m1")
        }
        .is_remote());
        assert!(!Command::AddCourse {
            module_id: NodeId::from("mod1")
        }
        .is_remote());
        assert!(!Command::EditCourseField {
            course_id: NodeId::from("c1"),
            field: "name".to_string(),
            value: FieldValue::from("Analyse"),
        }
        .is_remote());
    }
}
