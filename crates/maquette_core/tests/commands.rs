use maquette_core::{
    Command, CommandOutcome, FieldValue, InMemoryGateway, MaquetteStore, NodeId,
    RecordingNavigator, StoreError, TreeError, ValidationError,
};
use serde_json::json;

fn store() -> MaquetteStore<InMemoryGateway, RecordingNavigator> {
    MaquetteStore::new(InMemoryGateway::new(), RecordingNavigator::new())
}

async fn created(
    store: &mut MaquetteStore<InMemoryGateway, RecordingNavigator>,
    command: Command,
) -> NodeId {
    match store.dispatch(command).await.unwrap() {
        CommandOutcome::Created(id) => id,
        other => panic!("expected a created node, got {other:?}"),
    }
}

#[test]
fn commands_deserialize_from_tagged_json() {
    let commands: Vec<Command> = serde_json::from_value(json!([
        { "type": "newMaquette", "master": "informatique", "schoolYear": "2019-2020" },
        { "type": "editCourseField", "courseId": "c1", "field": "nmbEcts", "value": 6 },
        { "type": "editCourseField", "courseId": "c1", "field": "courseEnglish", "value": true },
        { "type": "deleteExtraItem", "itemId": "i1" },
        { "type": "saveNewMaquette" }
    ]))
    .unwrap();

    assert_eq!(
        commands,
        vec![
            Command::NewMaquette {
                master: "informatique".to_string(),
                school_year: "2019-2020".to_string(),
            },
            Command::EditCourseField {
                course_id: NodeId::from("c1"),
                field: "nmbEcts".to_string(),
                value: FieldValue::Number(6.0),
            },
            Command::EditCourseField {
                course_id: NodeId::from("c1"),
                field: "courseEnglish".to_string(),
                value: FieldValue::Flag(true),
            },
            Command::DeleteExtraItem {
                item_id: NodeId::from("i1"),
            },
            Command::SaveNewMaquette,
        ]
    );
}

#[test]
fn wire_tag_matches_command_name() {
    let commands = [
        Command::FetchAll,
        Command::EditYearLevel {
            year_id: NodeId::from("y1"),
            level: "M1".to_string(),
        },
        Command::AddExtraGroup {
            year_id: NodeId::from("y1"),
        },
    ];
    for command in commands {
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["type"], command.name());
    }
}

#[test]
fn unknown_command_type_is_rejected() {
    let result = serde_json::from_value::<Command>(json!({ "type": "dropDatabase" }));
    assert!(result.is_err());
}

#[tokio::test]
async fn dispatch_builds_a_document_tree() {
    let mut store = store();
    let draft = created(
        &mut store,
        Command::NewMaquette {
            master: "informatique".to_string(),
            school_year: "2019-2020".to_string(),
        },
    )
    .await;
    let year = created(
        &mut store,
        Command::NewYear {
            maquette_id: draft.clone(),
            level: "M1".to_string(),
        },
    )
    .await;
    let semester = created(&mut store, Command::AddSemester { year_id: year }).await;
    let module = created(
        &mut store,
        Command::AddModule {
            semester_id: semester,
        },
    )
    .await;
    let course = created(
        &mut store,
        Command::AddCourse {
            module_id: module.clone(),
        },
    )
    .await;

    let outcome = store
        .dispatch(Command::EditCourseField {
            course_id: course.clone(),
            field: "name".to_string(),
            value: FieldValue::from("Compilation"),
        })
        .await
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Applied);

    let document = store.transient().unwrap();
    let module_node = &document.years[0].semesters[0].modules[0];
    assert_eq!(module_node.id, module);
    assert_eq!(module_node.courses.len(), 1);
    assert_eq!(module_node.courses[0].id, course);
    assert_eq!(module_node.courses[0].name, "Compilation");
    assert!(store.is_dirty(&draft));
}

#[tokio::test]
async fn rejected_field_edit_changes_nothing() {
    let mut store = store();
    let draft = store.begin_document("informatique", "2019-2020");
    let year = store.add_year(&draft, "M1").unwrap();
    let semester = store.add_semester(&year).unwrap();
    let module = store.add_module(&semester).unwrap();
    let course = store.add_course(&module).unwrap();
    let before = store.all().clone();

    let err = store
        .dispatch(Command::EditCourseField {
            course_id: course.clone(),
            field: "nmbGroupTd".to_string(),
            value: FieldValue::from(-1.0),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Tree(TreeError::Validation(ValidationError::OutOfRange { .. }))
    ));

    let err = store
        .dispatch(Command::EditCourseField {
            course_id: course,
            field: "__proto__".to_string(),
            value: FieldValue::from("x"),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Tree(TreeError::Validation(ValidationError::UnknownField { .. }))
    ));

    assert_eq!(store.all(), &before);
}

#[tokio::test]
async fn deleting_a_missing_child_reports_unchanged() {
    let mut store = store();
    let outcome = store
        .dispatch(Command::DeleteModule {
            module_id: NodeId::from("ghost"),
        })
        .await
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Unchanged);
    assert!(store.dirty().is_empty());
}

#[tokio::test]
async fn save_new_command_returns_the_assigned_id() {
    let mut store = store();
    store
        .dispatch(Command::NewMaquette {
            master: "informatique".to_string(),
            school_year: "2019-2020".to_string(),
        })
        .await
        .unwrap();

    let id = created(&mut store, Command::SaveNewMaquette).await;

    assert!(store.by_id(&id).is_some());
    assert!(store.transient().is_none());
    let route = store.navigator().last_route().unwrap();
    assert_eq!(route.last().map(String::as_str), Some(id.as_str()));
}
