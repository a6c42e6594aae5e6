use maquette_core::tree::locate::{
    find_deep, find_parent, locate, owning_document, path, reduce_chain, Collection,
};
use maquette_core::{Course, Forest, Maquette, Module, NodeId, NodeKind, Semester, Year};
use std::sync::Arc;

fn module(id: &str, courses: &[&str]) -> Arc<Module> {
    let mut module = Module::new(NodeId::from(id));
    module.courses = courses
        .iter()
        .map(|course| Arc::new(Course::new(NodeId::from(*course))))
        .collect();
    Arc::new(module)
}

fn forest() -> Forest {
    let mut s1 = Semester::new(NodeId::from("s1"), 1);
    s1.modules = vec![module("mod1", &["c1", "c2"]), module("mod2", &["c3"])];
    let mut y1 = Year::new(NodeId::from("y1"), "M1");
    y1.semesters.push(Arc::new(s1));
    let mut m1 = Maquette::new("m1", "informatique", "2019-2020");
    m1.years.push(Arc::new(y1));

    let mut s2 = Semester::new(NodeId::from("s2"), 1);
    // Same course id in another document: lookups return the first match.
    s2.modules = vec![module("mod3", &["c4", "c1"])];
    let mut y2 = Year::new(NodeId::from("y2"), "M2");
    y2.semesters.push(Arc::new(s2));
    let mut m2 = Maquette::new("m2", "physique", "2019-2020");
    m2.years.push(Arc::new(y2));

    vec![Arc::new(m1), Arc::new(m2)]
}

#[test]
fn reduce_chain_keeps_document_then_sibling_order() {
    let forest = forest();
    let ids = reduce_chain(&forest, path::COURSES)
        .into_iter()
        .map(|located| located.node.id().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["c1", "c2", "c3", "c4", "c1"]);

    let documents = reduce_chain(&forest, path::DOCUMENTS);
    assert_eq!(documents.len(), 2);
    assert!(reduce_chain(&[], path::COURSES).is_empty());
}

#[test]
fn find_deep_only_matches_at_the_requested_depth() {
    let forest = forest();
    assert!(find_deep(&forest, path::COURSES, &NodeId::from("mod1")).is_none());
    assert!(find_deep(&forest, path::MODULES, &NodeId::from("mod1")).is_some());
    assert!(find_deep(&forest, path::EXTRA_ITEMS, &NodeId::from("c1")).is_none());
}

#[test]
fn located_path_indexes_from_the_document() {
    let forest = forest();
    let located = locate(&forest, NodeKind::Course, &NodeId::from("c3")).unwrap();
    assert_eq!(located.path.indices(), &[0, 0, 0, 1, 0]);
    assert_eq!(located.path.document(), 0);
    assert_eq!(located.node.kind(), NodeKind::Course);

    let first = locate(&forest, NodeKind::Course, &NodeId::from("c1")).unwrap();
    assert_eq!(first.path.document(), 0);
}

#[test]
fn find_parent_reports_child_position() {
    let forest = forest();
    let (parent, index) = find_parent(
        &forest,
        NodeKind::Module,
        Collection::Courses,
        &NodeId::from("c2"),
    )
    .unwrap();
    assert_eq!(parent.node.id(), "mod1");
    assert_eq!(index, 1);

    assert!(find_parent(
        &forest,
        NodeKind::Semester,
        Collection::Modules,
        &NodeId::from("c2")
    )
    .is_none());
}

#[test]
fn owning_document_resolves_any_depth() {
    let forest = forest();
    assert_eq!(
        owning_document(&forest, &NodeId::from("c4")).map(NodeId::as_str),
        Some("m2")
    );
    assert_eq!(
        owning_document(&forest, &NodeId::from("y1")).map(NodeId::as_str),
        Some("m1")
    );
    assert_eq!(
        owning_document(&forest, &NodeId::from("m2")).map(NodeId::as_str),
        Some("m2")
    );
    assert!(owning_document(&forest, &NodeId::from("ghost")).is_none());
}
