//! Containment validation of a layout against its graph.
//!
//! [`validate_layout`] is the acceptance test for any layout, whichever
//! phase or external tool produced the geometry. It checks, in graph
//! creation order:
//!
//! - every element lies strictly inside the box of its logical container
//! - no two direct children of one container overlap with positive area
//! - no two cuts partially overlap (one must strictly contain the other, or
//!   they must be disjoint)
//!
//! The checks only read geometry, so running them twice yields the same list.

use serde::Serialize;

use ligature_core::{geometry::Bounds, graph::Graph, identifier::Id};

use crate::layout::Layout;

/// Classification of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The element's box is not strictly inside its container's box.
    OutsideContainer,
    /// Two direct children of one container overlap.
    SiblingOverlap,
    /// Two cuts intersect without one strictly containing the other.
    ImproperCutOverlap,
    /// The element has no box at all.
    MissingGeometry,
}

/// A single containment or collision finding.
///
/// `expected` and `actual` carry the geometry that was compared: for
/// [`ViolationKind::OutsideContainer`] the container box and the element
/// box, for overlaps the boxes of `element` and `other`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    kind: ViolationKind,
    element: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    container: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<Bounds>,
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn element(&self) -> Id {
        self.element
    }

    /// The logical container of `element`, if it has one.
    pub fn container(&self) -> Option<Id> {
        self.container
    }

    /// The second element of an overlap.
    pub fn other(&self) -> Option<Id> {
        self.other
    }

    pub fn expected(&self) -> Option<Bounds> {
        self.expected
    }

    pub fn actual(&self) -> Option<Bounds> {
        self.actual
    }

    /// Returns true if `id` is the element or the other party of this finding.
    pub fn involves(&self, id: Id) -> bool {
        self.element == id || self.other == Some(id)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ViolationKind::OutsideContainer => match self.container {
                Some(container) => write!(
                    f,
                    "`{}` is not strictly inside its container `{container}`",
                    self.element
                ),
                None => write!(f, "`{}` is not strictly inside its container", self.element),
            },
            ViolationKind::SiblingOverlap | ViolationKind::ImproperCutOverlap => {
                let what = if self.kind == ViolationKind::SiblingOverlap {
                    "overlaps sibling"
                } else {
                    "partially overlaps cut"
                };
                match self.other {
                    Some(other) => write!(f, "`{}` {what} `{other}`", self.element),
                    None => write!(f, "`{}` {what}", self.element),
                }
            }
            ViolationKind::MissingGeometry => write!(f, "`{}` has no geometry", self.element),
        }
    }
}

/// Validates a finished layout against its graph.
pub fn validate_layout(layout: &Layout, graph: &Graph) -> Vec<Violation> {
    validate_boxes(graph, |id| layout.bounds(id))
}

/// Validates arbitrary per-element geometry against a graph.
///
/// `lookup` returns the box of an element (the sheet included), or `None`
/// when the element has none.
pub fn validate_boxes(graph: &Graph, lookup: impl Fn(Id) -> Option<Bounds>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for container in graph.containers() {
        let container_box = lookup(container);
        if container_box.is_none() {
            violations.push(missing(container, graph.parent(container)));
        }

        let children = graph.children(container);
        let mut placed: Vec<(Id, Bounds)> = Vec::with_capacity(children.len());
        for child in children {
            let Some(child_box) = lookup(*child) else {
                // Cuts report their own missing box while visiting containers
                if graph.cut(*child).is_none() {
                    violations.push(missing(*child, Some(container)));
                }
                continue;
            };
            if let Some(container_box) = container_box
                && !container_box.strictly_contains(&child_box)
            {
                violations.push(Violation {
                    kind: ViolationKind::OutsideContainer,
                    element: *child,
                    container: Some(container),
                    other: None,
                    expected: Some(container_box),
                    actual: Some(child_box),
                });
            }
            placed.push((*child, child_box));
        }

        for (i, (a, a_box)) in placed.iter().enumerate() {
            for (b, b_box) in &placed[i + 1..] {
                if a_box.overlaps(b_box) {
                    violations.push(Violation {
                        kind: ViolationKind::SiblingOverlap,
                        element: *a,
                        container: Some(container),
                        other: Some(*b),
                        expected: Some(*a_box),
                        actual: Some(*b_box),
                    });
                }
            }
        }
    }

    let cuts: Vec<(Id, Bounds)> = graph
        .cuts()
        .filter_map(|cut| lookup(cut.id()).map(|bounds| (cut.id(), bounds)))
        .collect();
    for (i, (a, a_box)) in cuts.iter().enumerate() {
        for (b, b_box) in &cuts[i + 1..] {
            let nested = a_box.strictly_contains(b_box) || b_box.strictly_contains(a_box);
            if a_box.overlaps(b_box) && !nested {
                violations.push(Violation {
                    kind: ViolationKind::ImproperCutOverlap,
                    element: *a,
                    container: graph.parent(*a),
                    other: Some(*b),
                    expected: Some(*a_box),
                    actual: Some(*b_box),
                });
            }
        }
    }

    violations
}

fn missing(element: Id, container: Option<Id>) -> Violation {
    Violation {
        kind: ViolationKind::MissingGeometry,
        element,
        container,
        other: None,
        expected: None,
        actual: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ligature_core::graph::GraphBuilder;

    use super::*;

    fn id(name: &str) -> Id {
        Id::new(name)
    }

    /// sheet: [ c1: [ p(x), x ], c2: [] ]
    fn graph() -> Graph {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_cut(id("c1"))
            .add_cut(id("c2"))
            .add_vertex(id("x"), None)
            .add_predicate(id("p"), "P", vec![id("x")])
            .place(id("sheet"), id("c1"))
            .place(id("sheet"), id("c2"))
            .place(id("c1"), id("x"))
            .place(id("c1"), id("p"));
        builder.build().expect("valid graph")
    }

    fn boxes() -> HashMap<Id, Bounds> {
        HashMap::from([
            (id("sheet"), Bounds::new(0.0, 0.0, 300.0, 200.0)),
            (id("c1"), Bounds::new(10.0, 10.0, 140.0, 190.0)),
            (id("c2"), Bounds::new(160.0, 10.0, 290.0, 190.0)),
            (id("p"), Bounds::new(20.0, 20.0, 60.0, 40.0)),
            (id("x"), Bounds::new(96.0, 96.0, 104.0, 104.0)),
        ])
    }

    #[test]
    fn test_valid_geometry_has_no_violations() {
        let boxes = boxes();
        assert!(validate_boxes(&graph(), |id| boxes.get(&id).copied()).is_empty());
    }

    #[test]
    fn test_touching_container_edge_is_outside() {
        let mut boxes = boxes();
        boxes.insert(id("p"), Bounds::new(10.0, 20.0, 60.0, 40.0));

        let violations = validate_boxes(&graph(), |id| boxes.get(&id).copied());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind(), ViolationKind::OutsideContainer);
        assert_eq!(violations[0].element(), id("p"));
        assert_eq!(violations[0].container(), Some(id("c1")));
    }

    #[test]
    fn test_sibling_overlap_and_improper_cut_overlap() {
        let mut boxes = boxes();
        boxes.insert(id("c2"), Bounds::new(100.0, 10.0, 290.0, 190.0));

        let violations = validate_boxes(&graph(), |id| boxes.get(&id).copied());
        let kinds: Vec<ViolationKind> = violations.iter().map(Violation::kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::SiblingOverlap, ViolationKind::ImproperCutOverlap]
        );
        assert!(violations[0].involves(id("c1")));
        assert!(violations[0].involves(id("c2")));
    }

    #[test]
    fn test_sharing_an_edge_is_not_an_overlap() {
        let mut boxes = boxes();
        boxes.insert(id("c2"), Bounds::new(140.0, 10.0, 290.0, 190.0));
        assert!(validate_boxes(&graph(), |id| boxes.get(&id).copied()).is_empty());
    }

    #[test]
    fn test_missing_geometry_is_reported_once() {
        let mut boxes = boxes();
        boxes.remove(&id("x"));
        boxes.remove(&id("c2"));

        let violations = validate_boxes(&graph(), |id| boxes.get(&id).copied());
        let missing: Vec<Id> = violations
            .iter()
            .filter(|v| v.kind() == ViolationKind::MissingGeometry)
            .map(Violation::element)
            .collect();
        assert_eq!(missing, vec![id("x"), id("c2")]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut boxes = boxes();
        boxes.insert(id("x"), Bounds::new(30.0, 30.0, 50.0, 50.0));
        let graph = graph();

        let first = validate_boxes(&graph, |id| boxes.get(&id).copied());
        let second = validate_boxes(&graph, |id| boxes.get(&id).copied());
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
