//! Deep-path locator over the document forest.
//!
//! # Responsibility
//! - Flatten every node at a fixed depth into one ordered sequence.
//! - Find a node by id at that depth, together with its index path.
//!
//! # Invariants
//! - All nodes at one depth are expanded through the same collection name.
//! - A collection that does not exist on a node kind expands to nothing.
//! - The first match wins; id collisions are not defended against.
//! - Traversal is read-only.

use crate::model::id::NodeId;
use crate::model::maquette::{Course, ExtraGroup, ExtraItem, Maquette, Module, Semester, Year};
use crate::tree::{TreeError, TreeResult};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Named child collection of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Years,
    Semesters,
    Modules,
    Courses,
    Extras,
    Items,
}

impl Collection {
    /// Wire name of the collection.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Semesters => "semesters",
            Self::Modules => "modules",
            Self::Courses => "courses",
            Self::Extras => "extras",
            Self::Items => "items",
        }
    }
}

/// Collection-name sequences leading from the documents to each node kind.
pub mod path {
    use super::Collection::{self, Courses, Extras, Items, Modules, Semesters, Years};

    pub const DOCUMENTS: &[Collection] = &[];
    pub const YEARS: &[Collection] = &[Years];
    pub const SEMESTERS: &[Collection] = &[Years, Semesters];
    pub const MODULES: &[Collection] = &[Years, Semesters, Modules];
    pub const COURSES: &[Collection] = &[Years, Semesters, Modules, Courses];
    pub const EXTRA_GROUPS: &[Collection] = &[Years, Extras];
    pub const EXTRA_ITEMS: &[Collection] = &[Years, Extras, Items];
}

/// Kind of a node in the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Maquette,
    Year,
    Semester,
    Module,
    Course,
    ExtraGroup,
    ExtraItem,
}

impl NodeKind {
    /// Every kind, root first.
    pub const ALL: [NodeKind; 7] = [
        Self::Maquette,
        Self::Year,
        Self::Semester,
        Self::Module,
        Self::Course,
        Self::ExtraGroup,
        Self::ExtraItem,
    ];

    /// Collection path from the documents to nodes of this kind.
    pub fn path(self) -> &'static [Collection] {
        match self {
            Self::Maquette => path::DOCUMENTS,
            Self::Year => path::YEARS,
            Self::Semester => path::SEMESTERS,
            Self::Module => path::MODULES,
            Self::Course => path::COURSES,
            Self::ExtraGroup => path::EXTRA_GROUPS,
            Self::ExtraItem => path::EXTRA_ITEMS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maquette => "maquette",
            Self::Year => "year",
            Self::Semester => "semester",
            Self::Module => "module",
            Self::Course => "course",
            Self::ExtraGroup => "extra_group",
            Self::ExtraItem => "extra_item",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of any node in the forest.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Maquette(&'a Maquette),
    Year(&'a Year),
    Semester(&'a Semester),
    Module(&'a Module),
    Course(&'a Course),
    ExtraGroup(&'a ExtraGroup),
    ExtraItem(&'a ExtraItem),
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> &'a NodeId {
        match self {
            Self::Maquette(node) => &node.id,
            Self::Year(node) => &node.id,
            Self::Semester(node) => &node.id,
            Self::Module(node) => &node.id,
            Self::Course(node) => &node.id,
            Self::ExtraGroup(node) => &node.id,
            Self::ExtraItem(node) => &node.id,
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            Self::Maquette(_) => NodeKind::Maquette,
            Self::Year(_) => NodeKind::Year,
            Self::Semester(_) => NodeKind::Semester,
            Self::Module(_) => NodeKind::Module,
            Self::Course(_) => NodeKind::Course,
            Self::ExtraGroup(_) => NodeKind::ExtraGroup,
            Self::ExtraItem(_) => NodeKind::ExtraItem,
        }
    }

    /// Children in `collection`, or nothing when this kind has no such
    /// collection.
    pub fn children(self, collection: Collection) -> Vec<NodeRef<'a>> {
        match (self, collection) {
            (Self::Maquette(node), Collection::Years) => wrap(&node.years, Self::Year),
            (Self::Year(node), Collection::Semesters) => wrap(&node.semesters, Self::Semester),
            (Self::Year(node), Collection::Extras) => wrap(&node.extras, Self::ExtraGroup),
            (Self::Semester(node), Collection::Modules) => wrap(&node.modules, Self::Module),
            (Self::Module(node), Collection::Courses) => wrap(&node.courses, Self::Course),
            (Self::ExtraGroup(node), Collection::Items) => wrap(&node.items, Self::ExtraItem),
            _ => Vec::new(),
        }
    }
}

fn wrap<'a, T>(nodes: &'a [Arc<T>], variant: fn(&'a T) -> NodeRef<'a>) -> Vec<NodeRef<'a>> {
    nodes.iter().map(|node| variant(node.as_ref())).collect()
}

/// Index path of a node: document index first, then one index per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    fn root(document_index: usize) -> Self {
        Self(vec![document_index])
    }

    fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Index of the owning document in the forest.
    pub fn document(&self) -> usize {
        self.0[0]
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Position of the node inside its parent collection.
    pub fn last(&self) -> usize {
        self.0[self.0.len() - 1]
    }
}

/// One node found by the locator.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub node: NodeRef<'a>,
    pub path: NodePath,
}

impl<'a> Located<'a> {
    fn expand(&self, collection: Collection) -> impl Iterator<Item = Located<'a>> + '_ {
        self.node
            .children(collection)
            .into_iter()
            .enumerate()
            .map(move |(index, node)| Located {
                node,
                path: self.path.child(index),
            })
    }
}

/// Flattens every node reached by following `steps` from the documents.
///
/// Order is breadth-preserving: children of earlier nodes come first.
pub fn reduce_chain<'a>(forest: &'a [Arc<Maquette>], steps: &[Collection]) -> Vec<Located<'a>> {
    let documents = forest
        .iter()
        .enumerate()
        .map(|(index, document)| Located {
            node: NodeRef::Maquette(document.as_ref()),
            path: NodePath::root(index),
        })
        .collect::<Vec<_>>();

    steps.iter().fold(documents, |level, collection| {
        let next = level
            .iter()
            .flat_map(|located| located.expand(*collection))
            .collect::<Vec<_>>();
        next
    })
}

/// Finds the first node at the end of `steps` whose id equals `id`.
pub fn find_deep<'a>(
    forest: &'a [Arc<Maquette>],
    steps: &[Collection],
    id: &NodeId,
) -> Option<Located<'a>> {
    reduce_chain(forest, steps)
        .into_iter()
        .find(|located| located.node.id() == id)
}

/// Finds a node of `kind` by id.
///
/// # Errors
/// - `TreeError::NotFound` when no node of that kind carries `id`.
pub fn locate<'a>(
    forest: &'a [Arc<Maquette>],
    kind: NodeKind,
    id: &NodeId,
) -> TreeResult<Located<'a>> {
    find_deep(forest, kind.path(), id).ok_or_else(|| TreeError::not_found(kind, id))
}

/// Finds the first `parent_kind` node whose `collection` contains `child_id`.
///
/// Returns the parent and the child's position inside that collection.
pub fn find_parent<'a>(
    forest: &'a [Arc<Maquette>],
    parent_kind: NodeKind,
    collection: Collection,
    child_id: &NodeId,
) -> Option<(Located<'a>, usize)> {
    reduce_chain(forest, parent_kind.path())
        .into_iter()
        .find_map(|parent| {
            let index = parent
                .node
                .children(collection)
                .iter()
                .position(|child| child.id() == child_id)?;
            Some((parent, index))
        })
}

/// Returns the id of the document whose subtree contains `id`.
///
/// A document id resolves to itself.
pub fn owning_document<'a>(forest: &'a [Arc<Maquette>], id: &NodeId) -> Option<&'a NodeId> {
    NodeKind::ALL.iter().find_map(|kind| {
        find_deep(forest, kind.path(), id).map(|located| &forest[located.path.document()].id)
    })
}

pub fn find_year<'a>(forest: &'a [Arc<Maquette>], id: &NodeId) -> TreeResult<&'a Year> {
    match locate(forest, NodeKind::Year, id)?.node {
        NodeRef::Year(year) => Ok(year),
        _ => Err(TreeError::not_found(NodeKind::Year, id)),
    }
}

pub fn find_semester<'a>(forest: &'a [Arc<Maquette>], id: &NodeId) -> TreeResult<&'a Semester> {
    match locate(forest, NodeKind::Semester, id)?.node {
        NodeRef::Semester(semester) => Ok(semester),
        _ => Err(TreeError::not_found(NodeKind::Semester, id)),
    }
}

pub fn find_module<'a>(forest: &'a [Arc<Maquette>], id: &NodeId) -> TreeResult<&'a Module> {
    match locate(forest, NodeKind::Module, id)?.node {
        NodeRef::Module(module) => Ok(module),
        _ => Err(TreeError::not_found(NodeKind::Module, id)),
    }
}

pub fn find_course<'a>(forest: &'a [Arc<Maquette>], id: &NodeId) -> TreeResult<&'a Course> {
    match locate(forest, NodeKind::Course, id)?.node {
        NodeRef::Course(course) => Ok(course),
        _ => Err(TreeError::not_found(NodeKind::Course, id)),
    }
}

pub fn find_extra_group<'a>(
    forest: &'a [Arc<Maquette>],
    id: &NodeId,
) -> TreeResult<&'a ExtraGroup> {
    match locate(forest, NodeKind::ExtraGroup, id)?.node {
        NodeRef::ExtraGroup(group) => Ok(group),
        _ => Err(TreeError::not_found(NodeKind::ExtraGroup, id)),
    }
}

pub fn find_extra_item<'a>(
    forest: &'a [Arc<Maquette>],
    id: &NodeId,
) -> TreeResult<&'a ExtraItem> {
    match locate(forest, NodeKind::ExtraItem, id)?.node {
        NodeRef::ExtraItem(item) => Ok(item),
        _ => Err(TreeError::not_found(NodeKind::ExtraItem, id)),
    }
}
