use maquette_core::{Course, Maquette, NodeId, Semester};
use serde_json::json;

#[test]
fn document_reads_camel_case_and_ignores_mirror_ids() {
    let document: Maquette = serde_json::from_value(json!({
        "_id": "5d1f0c",
        "id": "5d1f0c",
        "master": "informatique",
        "schoolYear": "2019-2020",
        "inProduction": true,
        "years": [{
            "id": "y1",
            "level": "M1",
            "semesters": [{
                "id": "s1",
                "number": 1,
                "modules": [{
                    "id": "mod1",
                    "name": "Fondamentaux",
                    "courses": [{
                        "id": "c1",
                        "name": "Analyse",
                        "coefCC": 0.4,
                        "coefExam": 0.6,
                        "nmbGroupTd": 3,
                        "courseEnglish": true
                    }]
                }]
            }],
            "extras": [{ "id": "e1", "name": "Stage", "items": [{ "id": "i1", "hour": 35 }] }]
        }]
    }))
    .unwrap();

    assert_eq!(document.id, "5d1f0c");
    assert_eq!(document.school_year, "2019-2020");
    assert!(document.in_production);

    let course = &document.years[0].semesters[0].modules[0].courses[0];
    assert_eq!(course.coef_cc, 0.4);
    assert_eq!(course.coef_exam, 0.6);
    assert_eq!(course.nmb_group_td, 3);
    assert!(course.course_english);
    // Absent attributes take creation defaults.
    assert!(course.ratrappage);
    assert!(course.teacher.is_empty());

    let item = &document.years[0].extras[0].items[0];
    assert_eq!(item.hour, 35.0);
    assert!(item.date.is_empty());
}

#[test]
fn course_writes_wire_names() {
    let mut course = Course::new(NodeId::from("c1"));
    course.coef_cc = 0.5;
    let value = serde_json::to_value(&course).unwrap();

    assert_eq!(value["coefCC"], json!(0.5));
    assert_eq!(value["nmbGroupTd"], json!(1));
    assert_eq!(value["ratrappage"], json!(true));
    assert!(value.get("coef_cc").is_none());
}

#[test]
fn unnamed_semester_omits_its_name() {
    let semester = Semester::new(NodeId::from("s1"), 2);
    let value = serde_json::to_value(&semester).unwrap();
    assert!(value.get("name").is_none());
    assert_eq!(value["number"], json!(2));
}

#[test]
fn minimal_document_fills_defaults() {
    let document: Maquette = serde_json::from_value(json!({ "id": "m1" })).unwrap();
    assert_eq!(document, Maquette::new("m1", "", ""));
}
