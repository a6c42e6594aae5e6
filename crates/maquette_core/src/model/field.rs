//! Editable leaf fields.
//!
//! # Responsibility
//! - Describe, per entity kind, the closed set of fields a UI may edit.
//! - Validate wire field names and value types before any tree mutation.
//!
//! # Invariants
//! - A parsed field always carries a value of the field's declared type.
//! - Unknown names and mismatched types are rejected, never written.

use crate::model::maquette::{Course, ExtraItem};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Untyped value as received from the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Flag(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Field edit validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field name is not part of the entity's attribute set.
    UnknownField {
        entity: &'static str,
        field: String,
    },
    /// Value type does not match the field's declared type.
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// Value has the right type but is outside the field's domain.
    OutOfRange { field: &'static str, value: f64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField { entity, field } => {
                write!(f, "unknown {entity} field `{field}`")
            }
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => write!(f, "field `{field}` expects {expected}, got {found}"),
            Self::OutOfRange { field, value } => {
                write!(f, "value {value} is out of range for field `{field}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// One validated course attribute assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseField {
    Name(String),
    Teacher(String),
    Commun(String),
    NmbGroupTd(u32),
    NmbAmphiHour(f64),
    NmbTdHour(f64),
    NmbEcts(f64),
    CoefCc(f64),
    CoefExam(f64),
    ExamType(String),
    LengthExam(f64),
    CourseEnglish(bool),
    EnglishTranslation(String),
    Ratrappage(bool),
}

impl CourseField {
    /// Wire names accepted by [`CourseField::parse`].
    pub const NAMES: &'static [&'static str] = &[
        "name",
        "teacher",
        "commun",
        "nmbGroupTd",
        "nmbAmphiHour",
        "nmbTdHour",
        "nmbEcts",
        "coefCC",
        "coefExam",
        "examType",
        "lengthExam",
        "courseEnglish",
        "englishTranslation",
        "ratrappage",
    ];

    /// Parses one wire field name and untyped value.
    ///
    /// # Errors
    /// - `UnknownField` when `name` is not a course attribute.
    /// - `TypeMismatch` when the value kind differs from the attribute type.
    /// - `OutOfRange` when `nmbGroupTd` is negative or not an integer.
    pub fn parse(name: &str, value: FieldValue) -> Result<Self, ValidationError> {
        let field = match name {
            "name" => Self::Name(text("name", value)?),
            "teacher" => Self::Teacher(text("teacher", value)?),
            "commun" => Self::Commun(text("commun", value)?),
            "nmbGroupTd" => Self::NmbGroupTd(count("nmbGroupTd", value)?),
            "nmbAmphiHour" => Self::NmbAmphiHour(number("nmbAmphiHour", value)?),
            "nmbTdHour" => Self::NmbTdHour(number("nmbTdHour", value)?),
            "nmbEcts" => Self::NmbEcts(number("nmbEcts", value)?),
            "coefCC" => Self::CoefCc(number("coefCC", value)?),
            "coefExam" => Self::CoefExam(number("coefExam", value)?),
            "examType" => Self::ExamType(text("examType", value)?),
            "lengthExam" => Self::LengthExam(number("lengthExam", value)?),
            "courseEnglish" => Self::CourseEnglish(flag("courseEnglish", value)?),
            "englishTranslation" => {
                Self::EnglishTranslation(text("englishTranslation", value)?)
            }
            "ratrappage" => Self::Ratrappage(flag("ratrappage", value)?),
            other => {
                return Err(ValidationError::UnknownField {
                    entity: "course",
                    field: other.to_string(),
                })
            }
        };
        Ok(field)
    }

    /// Wire name of this field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Teacher(_) => "teacher",
            Self::Commun(_) => "commun",
            Self::NmbGroupTd(_) => "nmbGroupTd",
            Self::NmbAmphiHour(_) => "nmbAmphiHour",
            Self::NmbTdHour(_) => "nmbTdHour",
            Self::NmbEcts(_) => "nmbEcts",
            Self::CoefCc(_) => "coefCC",
            Self::CoefExam(_) => "coefExam",
            Self::ExamType(_) => "examType",
            Self::LengthExam(_) => "lengthExam",
            Self::CourseEnglish(_) => "courseEnglish",
            Self::EnglishTranslation(_) => "englishTranslation",
            Self::Ratrappage(_) => "ratrappage",
        }
    }

    /// Writes this value into `course`.
    pub fn apply(self, course: &mut Course) {
        match self {
            Self::Name(value) => course.name = value,
            Self::Teacher(value) => course.teacher = value,
            Self::Commun(value) => course.commun = value,
            Self::NmbGroupTd(value) => course.nmb_group_td = value,
            Self::NmbAmphiHour(value) => course.nmb_amphi_hour = value,
            Self::NmbTdHour(value) => course.nmb_td_hour = value,
            Self::NmbEcts(value) => course.nmb_ects = value,
            Self::CoefCc(value) => course.coef_cc = value,
            Self::CoefExam(value) => course.coef_exam = value,
            Self::ExamType(value) => course.exam_type = value,
            Self::LengthExam(value) => course.length_exam = value,
            Self::CourseEnglish(value) => course.course_english = value,
            Self::EnglishTranslation(value) => course.english_translation = value,
            Self::Ratrappage(value) => course.ratrappage = value,
        }
    }
}

/// One validated extra-item attribute assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraItemField {
    Name(String),
    Hour(f64),
    Date(String),
}

impl ExtraItemField {
    /// Wire names accepted by [`ExtraItemField::parse`].
    pub const NAMES: &'static [&'static str] = &["name", "hour", "date"];

    /// Parses one wire field name and untyped value.
    pub fn parse(name: &str, value: FieldValue) -> Result<Self, ValidationError> {
        match name {
            "name" => Ok(Self::Name(text("name", value)?)),
            "hour" => Ok(Self::Hour(number("hour", value)?)),
            "date" => Ok(Self::Date(text("date", value)?)),
            other => Err(ValidationError::UnknownField {
                entity: "extra item",
                field: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Hour(_) => "hour",
            Self::Date(_) => "date",
        }
    }

    pub fn apply(self, item: &mut ExtraItem) {
        match self {
            Self::Name(value) => item.name = value,
            Self::Hour(value) => item.hour = value,
            Self::Date(value) => item.date = value,
        }
    }
}

fn text(field: &'static str, value: FieldValue) -> Result<String, ValidationError> {
    match value {
        FieldValue::Text(value) => Ok(value),
        other => Err(mismatch(field, "text", &other)),
    }
}

fn number(field: &'static str, value: FieldValue) -> Result<f64, ValidationError> {
    match value {
        FieldValue::Number(value) if value.is_finite() => Ok(value),
        FieldValue::Number(value) => Err(ValidationError::OutOfRange { field, value }),
        other => Err(mismatch(field, "number", &other)),
    }
}

fn count(field: &'static str, value: FieldValue) -> Result<u32, ValidationError> {
    let value = number(field, value)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(value as u32)
}

fn flag(field: &'static str, value: FieldValue) -> Result<bool, ValidationError> {
    match value {
        FieldValue::Flag(value) => Ok(value),
        other => Err(mismatch(field, "boolean", &other)),
    }
}

fn mismatch(field: &'static str, expected: &'static str, found: &FieldValue) -> ValidationError {
    ValidationError::TypeMismatch {
        field,
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::{CourseField, ExtraItemField, FieldValue, ValidationError};
    use crate::model::id::NodeId;
    use crate::model::maquette::Course;

    #[test]
    fn every_listed_course_name_parses_with_its_type() {
        for name in CourseField::NAMES {
            let candidates = [
                FieldValue::from("x"),
                FieldValue::from(2.0),
                FieldValue::from(true),
            ];
            let parsed = candidates
                .into_iter()
                .filter_map(|value| CourseField::parse(name, value).ok())
                .collect::<Vec<_>>();
            assert_eq!(parsed.len(), 1, "exactly one value kind fits `{name}`");
            assert_eq!(parsed[0].name(), *name);
        }
    }

    #[test]
    fn rejects_unknown_course_field() {
        let err = CourseField::parse("__proto__", FieldValue::from("x")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                entity: "course",
                field: "__proto__".to_string(),
            }
        );
    }

    #[test]
    fn rejects_wrong_value_type() {
        let err = CourseField::parse("nmbEcts", FieldValue::from("six")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch {
                field: "nmbEcts",
                expected: "number",
                found: "text",
            }
        ));
    }

    #[test]
    fn group_count_must_be_a_non_negative_integer() {
        assert!(matches!(
            CourseField::parse("nmbGroupTd", FieldValue::from(-1.0)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            CourseField::parse("nmbGroupTd", FieldValue::from(1.5)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            CourseField::parse("nmbGroupTd", FieldValue::from(3.0)).unwrap(),
            CourseField::NmbGroupTd(3)
        );
    }

    #[test]
    fn apply_writes_only_the_named_attribute() {
        let mut course = Course::new(NodeId::from("c1"));
        CourseField::CoefExam(0.6).apply(&mut course);

        let mut expected = Course::new(NodeId::from("c1"));
        expected.coef_exam = 0.6;
        assert_eq!(course, expected);
    }

    #[test]
    fn extra_item_fields_validate_types() {
        assert_eq!(
            ExtraItemField::parse("hour", FieldValue::from(4.0)).unwrap(),
            ExtraItemField::Hour(4.0)
        );
        assert!(ExtraItemField::parse("hour", FieldValue::from("4h")).is_err());
        assert!(ExtraItemField::parse("teacher", FieldValue::from("x")).is_err());
    }
}
