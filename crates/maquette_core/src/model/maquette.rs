//! Curriculum document model.
//!
//! # Responsibility
//! - Define the document tree: years, semesters, modules, courses and extra
//!   activity groups.
//! - Provide default constructors used when the client creates new nodes.
//!
//! # Invariants
//! - Child collections keep insertion order.
//! - Children are held behind `Arc` so successive forests share every subtree
//!   that was not on the path of a mutation.
//! - Wire names are camelCase; unknown fields (such as the `_id` mirror) are
//!   ignored on read.

use crate::model::id::NodeId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reserved identifier of the in-progress, never-saved document.
pub const TRANSIENT_DOCUMENT_ID: &str = "new";

/// Ordered collection of root documents.
pub type Forest = Vec<Arc<Maquette>>;

/// One full curriculum plan ("maquette").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maquette {
    pub id: NodeId,
    /// Reference to the owning program/authority.
    #[serde(default)]
    pub master: String,
    /// Academic-year label, e.g. `2019-2020`.
    #[serde(default)]
    pub school_year: String,
    /// Production lock flag.
    #[serde(default)]
    pub in_production: bool,
    #[serde(default)]
    pub years: Vec<Arc<Year>>,
}

impl Maquette {
    /// Creates an empty, unlocked document.
    pub fn new(
        id: impl Into<NodeId>,
        master: impl Into<String>,
        school_year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            master: master.into(),
            school_year: school_year.into(),
            in_production: false,
            years: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Year {
    pub id: NodeId,
    /// Level label, e.g. `M1`.
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub semesters: Vec<Arc<Semester>>,
    #[serde(default)]
    pub extras: Vec<Arc<ExtraGroup>>,
}

impl Year {
    pub fn new(id: NodeId, level: impl Into<String>) -> Self {
        Self {
            id,
            level: level.into(),
            semesters: Vec::new(),
            extras: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: NodeId,
    /// 1-based position within the year, fixed at creation time.
    pub number: u32,
    /// Optional display label. Empty unless renamed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub modules: Vec<Arc<Module>>,
}

impl Semester {
    pub fn new(id: NodeId, number: u32) -> Self {
        Self {
            id,
            number,
            name: String::new(),
            modules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Arc<Course>>,
}

impl Module {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: String::new(),
            courses: Vec::new(),
        }
    }
}

/// One taught course with its academic attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub id: NodeId,
    pub name: String,
    pub teacher: String,
    /// Free text naming the programs sharing this course.
    pub commun: String,
    /// Number of tutorial (TD) groups.
    pub nmb_group_td: u32,
    pub nmb_amphi_hour: f64,
    pub nmb_td_hour: f64,
    pub nmb_ects: f64,
    #[serde(rename = "coefCC")]
    pub coef_cc: f64,
    pub coef_exam: f64,
    pub exam_type: String,
    pub length_exam: f64,
    pub course_english: bool,
    pub english_translation: String,
    /// Retake ("rattrapage") eligibility.
    pub ratrappage: bool,
}

impl Course {
    /// Creates a course with every attribute at its creation default.
    ///
    /// # Invariants
    /// - Numeric attributes are `0` except `nmb_group_td = 1`.
    /// - Flags are `false` except `ratrappage = true`.
    /// - Text attributes are empty.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: String::new(),
            teacher: String::new(),
            commun: String::new(),
            nmb_group_td: 1,
            nmb_amphi_hour: 0.0,
            nmb_td_hour: 0.0,
            nmb_ects: 0.0,
            coef_cc: 0.0,
            coef_exam: 0.0,
            exam_type: String::new(),
            length_exam: 0.0,
            course_english: false,
            english_translation: String::new(),
            ratrappage: true,
        }
    }
}

impl Default for Course {
    fn default() -> Self {
        Self::new(NodeId::new(""))
    }
}

/// Supplementary activity bucket attached to a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraGroup {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<Arc<ExtraItem>>,
}

impl ExtraGroup {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: String::new(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraItem {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hour: f64,
    /// Free-form date label as entered by the user.
    #[serde(default)]
    pub date: String,
}

impl ExtraItem {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: String::new(),
            hour: 0.0,
            date: String::new(),
        }
    }
}
