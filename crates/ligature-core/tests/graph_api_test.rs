//! Integration tests for the graph builder and validator.

use ligature_core::{
    graph::{ElementKind, GraphBuilder, GraphError, validate},
    identifier::Id,
};

fn id(name: &str) -> Id {
    Id::new(name)
}

/// sheet: [ P(x), x, ~[ Q(x), ~[ R(x) ] ] ]
fn builder() -> GraphBuilder {
    let mut builder = GraphBuilder::new(id("sheet"));
    builder
        .add_vertex(id("x"), None)
        .add_predicate(id("p"), "P", vec![id("x")])
        .add_cut(id("outer"))
        .add_predicate(id("q"), "Q", vec![id("x")])
        .add_cut(id("inner"))
        .add_predicate(id("r"), "R", vec![id("x")])
        .place(id("sheet"), id("p"))
        .place(id("sheet"), id("x"))
        .place(id("sheet"), id("outer"))
        .place(id("outer"), id("q"))
        .place(id("outer"), id("inner"))
        .place(id("inner"), id("r"));
    builder
}

#[test]
fn test_queries_on_nested_graph() {
    let graph = builder().build().expect("valid graph");

    assert_eq!(graph.kind(id("sheet")), Some(ElementKind::Sheet));
    assert_eq!(graph.kind(id("inner")), Some(ElementKind::Cut));
    assert_eq!(graph.depth(id("inner")), 2);
    assert_eq!(
        graph.ancestors(id("r")).collect::<Vec<_>>(),
        vec![id("inner"), id("outer"), id("sheet")]
    );
    assert_eq!(
        graph.containers_by_depth(),
        vec![id("inner"), id("outer"), id("sheet")]
    );
    assert_eq!(graph.incidences(id("x")).len(), 3);
    assert!(graph.is_ancestor_or_self(id("outer"), id("inner")));
    assert!(!graph.is_ancestor_or_self(id("inner"), id("outer")));
}

#[test]
fn test_children_keep_creation_order() {
    let graph = builder().build().expect("valid graph");
    // `x` was declared before `p` even though `p` was placed first
    assert_eq!(
        graph.children(id("sheet")),
        &[id("x"), id("p"), id("outer")]
    );
}

#[test]
fn test_orphan_is_rejected() {
    let mut builder = builder();
    builder.add_vertex(id("lost"), None);
    assert_eq!(
        builder.build().unwrap_err(),
        GraphError::OrphanElement(id("lost"))
    );
}

#[test]
fn test_element_in_two_containers_is_rejected() {
    let mut builder = builder();
    builder.place(id("inner"), id("q"));
    assert_eq!(
        builder.build().unwrap_err(),
        GraphError::MultipleParents(id("q"))
    );
}

#[test]
fn test_containment_cycle_is_rejected() {
    let mut builder = GraphBuilder::new(id("sheet"));
    builder
        .add_cut(id("a"))
        .add_cut(id("b"))
        .place(id("a"), id("b"))
        .place(id("b"), id("a"));
    let error = validate(&builder.build_unchecked()).unwrap_err();
    assert!(matches!(error, GraphError::Cycle(_)));
}
