//! Copy-on-write tree mutations.
//!
//! # Responsibility
//! - Apply one rename, field edit, insertion or deletion to a forest.
//! - Report which document owns the change so callers can track dirtiness.
//!
//! # Invariants
//! - The input forest is never modified; a new forest is returned.
//! - Only the ancestor chain of the changed node is rebuilt (`Arc::make_mut`
//!   on a shared node clones that node alone; its children stay shared).
//! - Rename, edit and add fail with `NotFound` when the target is missing.
//! - Delete is a no-op (`None`) when no parent holds the child.

use crate::model::field::{CourseField, ExtraItemField, FieldValue};
use crate::model::id::NodeId;
use crate::model::maquette::{
    Course, ExtraGroup, ExtraItem, Forest, Maquette, Module, Semester, Year,
};
use crate::tree::locate::{find_parent, locate, Collection, NodeKind};
use crate::tree::{TreeError, TreeResult};
use std::sync::Arc;

/// Result of one successful mutation.
#[derive(Debug, Clone)]
pub struct Applied {
    /// Forest with the change applied.
    pub forest: Forest,
    /// Id of the document that owns the changed node.
    pub document: NodeId,
}

type Access<T> = for<'f> fn(&'f mut Forest, &[usize]) -> Option<&'f mut T>;

/// Sets the level label of a year.
pub fn rename_year(
    forest: &Forest,
    year_id: &NodeId,
    level: impl Into<String>,
) -> TreeResult<Applied> {
    let level = level.into();
    update(forest, NodeKind::Year, year_id, year_mut, |year| year.level = level)
}

/// Sets the display name of a semester.
pub fn rename_semester(
    forest: &Forest,
    semester_id: &NodeId,
    name: impl Into<String>,
) -> TreeResult<Applied> {
    let name = name.into();
    update(forest, NodeKind::Semester, semester_id, semester_mut, |semester| {
        semester.name = name
    })
}

pub fn rename_module(
    forest: &Forest,
    module_id: &NodeId,
    name: impl Into<String>,
) -> TreeResult<Applied> {
    let name = name.into();
    update(forest, NodeKind::Module, module_id, module_mut, |module| module.name = name)
}

pub fn rename_extra_group(
    forest: &Forest,
    group_id: &NodeId,
    name: impl Into<String>,
) -> TreeResult<Applied> {
    let name = name.into();
    update(forest, NodeKind::ExtraGroup, group_id, extra_group_mut, |group| {
        group.name = name
    })
}

/// Writes one validated course attribute.
pub fn edit_course_field(
    forest: &Forest,
    course_id: &NodeId,
    field: CourseField,
) -> TreeResult<Applied> {
    update(forest, NodeKind::Course, course_id, course_mut, |course| {
        field.apply(course)
    })
}

/// Validates a wire field name and value, then writes it to the course.
///
/// # Errors
/// - `TreeError::Validation` before any lookup when the field is rejected.
/// - `TreeError::NotFound` when the course does not exist.
pub fn edit_course_field_value(
    forest: &Forest,
    course_id: &NodeId,
    field: &str,
    value: FieldValue,
) -> TreeResult<Applied> {
    let field = CourseField::parse(field, value)?;
    edit_course_field(forest, course_id, field)
}

pub fn edit_extra_item_field(
    forest: &Forest,
    item_id: &NodeId,
    field: ExtraItemField,
) -> TreeResult<Applied> {
    update(forest, NodeKind::ExtraItem, item_id, extra_item_mut, |item| {
        field.apply(item)
    })
}

pub fn edit_extra_item_field_value(
    forest: &Forest,
    item_id: &NodeId,
    field: &str,
    value: FieldValue,
) -> TreeResult<Applied> {
    let field = ExtraItemField::parse(field, value)?;
    edit_extra_item_field(forest, item_id, field)
}

/// Appends a year with no semesters and no extras to a document.
pub fn add_year(
    forest: &Forest,
    document_id: &NodeId,
    level: impl Into<String>,
) -> TreeResult<(Applied, NodeId)> {
    let id = NodeId::generate();
    let year = Year::new(id.clone(), level);
    let applied = update(forest, NodeKind::Maquette, document_id, document_mut, |document| {
        document.years.push(Arc::new(year))
    })?;
    Ok((applied, id))
}

/// Appends a semester numbered after the year's current semester count.
pub fn add_semester(forest: &Forest, year_id: &NodeId) -> TreeResult<(Applied, NodeId)> {
    let id = NodeId::generate();
    let semester_id = id.clone();
    let applied = update(forest, NodeKind::Year, year_id, year_mut, |year| {
        let number = year.semesters.len() as u32 + 1;
        year.semesters.push(Arc::new(Semester::new(semester_id, number)))
    })?;
    Ok((applied, id))
}

pub fn add_module(forest: &Forest, semester_id: &NodeId) -> TreeResult<(Applied, NodeId)> {
    let id = NodeId::generate();
    let module = Module::new(id.clone());
    let applied = update(forest, NodeKind::Semester, semester_id, semester_mut, |semester| {
        semester.modules.push(Arc::new(module))
    })?;
    Ok((applied, id))
}

/// Appends a course with creation defaults (see [`Course::new`]).
pub fn add_course(forest: &Forest, module_id: &NodeId) -> TreeResult<(Applied, NodeId)> {
    let id = NodeId::generate();
    let course = Course::new(id.clone());
    let applied = update(forest, NodeKind::Module, module_id, module_mut, |module| {
        module.courses.push(Arc::new(course))
    })?;
    Ok((applied, id))
}

pub fn add_extra_group(forest: &Forest, year_id: &NodeId) -> TreeResult<(Applied, NodeId)> {
    let id = NodeId::generate();
    let group = ExtraGroup::new(id.clone());
    let applied = update(forest, NodeKind::Year, year_id, year_mut, |year| {
        year.extras.push(Arc::new(group))
    })?;
    Ok((applied, id))
}

pub fn add_extra_item(forest: &Forest, group_id: &NodeId) -> TreeResult<(Applied, NodeId)> {
    let id = NodeId::generate();
    let item = ExtraItem::new(id.clone());
    let applied = update(forest, NodeKind::ExtraGroup, group_id, extra_group_mut, |group| {
        group.items.push(Arc::new(item))
    })?;
    Ok((applied, id))
}

pub fn delete_semester(forest: &Forest, semester_id: &NodeId) -> Option<Applied> {
    remove_child(
        forest,
        NodeKind::Year,
        Collection::Semesters,
        semester_id,
        year_mut,
        |year, index| {
            year.semesters.remove(index);
        },
    )
}

/// Removes a module and every course below it.
pub fn delete_module(forest: &Forest, module_id: &NodeId) -> Option<Applied> {
    remove_child(
        forest,
        NodeKind::Semester,
        Collection::Modules,
        module_id,
        semester_mut,
        |semester, index| {
            semester.modules.remove(index);
        },
    )
}

pub fn delete_course(forest: &Forest, course_id: &NodeId) -> Option<Applied> {
    remove_child(
        forest,
        NodeKind::Module,
        Collection::Courses,
        course_id,
        module_mut,
        |module, index| {
            module.courses.remove(index);
        },
    )
}

pub fn delete_extra_group(forest: &Forest, group_id: &NodeId) -> Option<Applied> {
    remove_child(
        forest,
        NodeKind::Year,
        Collection::Extras,
        group_id,
        year_mut,
        |year, index| {
            year.extras.remove(index);
        },
    )
}

pub fn delete_extra_item(forest: &Forest, item_id: &NodeId) -> Option<Applied> {
    remove_child(
        forest,
        NodeKind::ExtraGroup,
        Collection::Items,
        item_id,
        extra_group_mut,
        |group, index| {
            group.items.remove(index);
        },
    )
}

/// Starts a new unsaved document under `transient_id`.
///
/// Any previous document with that id is dropped first, so at most one
/// transient document exists.
pub fn begin_document(
    forest: &Forest,
    transient_id: &NodeId,
    master: impl Into<String>,
    school_year: impl Into<String>,
) -> Applied {
    let mut next = forest
        .iter()
        .filter(|document| document.id != *transient_id)
        .cloned()
        .collect::<Forest>();
    next.push(Arc::new(Maquette::new(
        transient_id.clone(),
        master,
        school_year,
    )));
    Applied {
        forest: next,
        document: transient_id.clone(),
    }
}

/// Drops a document from the forest. `None` when it is not present.
pub fn remove_document(forest: &Forest, document_id: &NodeId) -> Option<Forest> {
    let index = forest
        .iter()
        .position(|document| document.id == *document_id)?;
    let mut next = forest.clone();
    next.remove(index);
    Some(next)
}

/// Swaps the document with id `document_id` for `replacement`, in place.
pub fn replace_document(
    forest: &Forest,
    document_id: &NodeId,
    replacement: Maquette,
) -> Option<Forest> {
    let index = forest
        .iter()
        .position(|document| document.id == *document_id)?;
    let mut next = forest.clone();
    next[index] = Arc::new(replacement);
    Some(next)
}

fn update<T>(
    forest: &Forest,
    kind: NodeKind,
    id: &NodeId,
    access: Access<T>,
    change: impl FnOnce(&mut T),
) -> TreeResult<Applied> {
    let path = locate(forest, kind, id)?.path;
    let mut next = forest.clone();
    let target = access(&mut next, path.indices())
        .ok_or_else(|| TreeError::not_found(kind, id))?;
    change(target);
    let document = next[path.document()].id.clone();
    Ok(Applied {
        forest: next,
        document,
    })
}

fn remove_child<P>(
    forest: &Forest,
    parent_kind: NodeKind,
    collection: Collection,
    child_id: &NodeId,
    access: Access<P>,
    remove: impl FnOnce(&mut P, usize),
) -> Option<Applied> {
    let (parent, index) = find_parent(forest, parent_kind, collection, child_id)?;
    let path = parent.path;
    let mut next = forest.clone();
    remove(access(&mut next, path.indices())?, index);
    let document = next[path.document()].id.clone();
    Some(Applied {
        forest: next,
        document,
    })
}

fn document_mut<'f>(forest: &'f mut Forest, at: &[usize]) -> Option<&'f mut Maquette> {
    let [document, ..] = at else { return None };
    Some(Arc::make_mut(forest.get_mut(*document)?))
}

fn year_mut<'f>(forest: &'f mut Forest, at: &[usize]) -> Option<&'f mut Year> {
    let [_, year, ..] = at else { return None };
    let document = document_mut(forest, at)?;
    Some(Arc::make_mut(document.years.get_mut(*year)?))
}

fn semester_mut<'f>(forest: &'f mut Forest, at: &[usize]) -> Option<&'f mut Semester> {
    let [_, _, semester, ..] = at else { return None };
    let year = year_mut(forest, at)?;
    Some(Arc::make_mut(year.semesters.get_mut(*semester)?))
}

fn module_mut<'f>(forest: &'f mut Forest, at: &[usize]) -> Option<&'f mut Module> {
    let [_, _, _, module, ..] = at else { return None };
    let semester = semester_mut(forest, at)?;
    Some(Arc::make_mut(semester.modules.get_mut(*module)?))
}

fn course_mut<'f>(forest: &'f mut Forest, at: &[usize]) -> Option<&'f mut Course> {
    let [_, _, _, _, course, ..] = at else { return None };
    let module = module_mut(forest, at)?;
    Some(Arc::make_mut(module.courses.get_mut(*course)?))
}

fn extra_group_mut<'f>(forest: &'f mut Forest, at: &[usize]) -> Option<&'f mut ExtraGroup> {
    let [_, _, group, ..] = at else { return None };
    let year = year_mut(forest, at)?;
    Some(Arc::make_mut(year.extras.get_mut(*group)?))
}

fn extra_item_mut<'f>(forest: &'f mut Forest, at: &[usize]) -> Option<&'f mut ExtraItem> {
    let [_, _, _, item, ..] = at else { return None };
    let group = extra_group_mut(forest, at)?;
    Some(Arc::make_mut(group.items.get_mut(*item)?))
}
