//! Immutable logical structure of an existential graph.
//!
//! A [`Graph`] is the tree of areas rooted at the sheet of assertion: every
//! cut, predicate and vertex is directly contained in exactly one container
//! (the sheet or a cut). Predicates reference vertices through an ordered
//! incidence sequence; each referenced vertex must live in the predicate's
//! own area or in an enclosing one.
//!
//! Graphs are assembled with [`GraphBuilder`] and never mutated afterwards.
//! All common queries are answered from indices computed at build time:
//!
//! - container → direct children, in creation order
//! - element → parent container
//! - vertex → incident predicates with argument positions
//!
//! # Examples
//!
//! ```
//! use ligature_core::{graph::GraphBuilder, identifier::Id};
//!
//! // ~[ P(x) ] with x declared inside the cut
//! let mut builder = GraphBuilder::new(Id::new("sheet"));
//! builder
//!     .add_cut(Id::new("c"))
//!     .add_vertex(Id::new("x"), None)
//!     .add_predicate(Id::new("p"), "P", vec![Id::new("x")])
//!     .place(Id::new("sheet"), Id::new("c"))
//!     .place(Id::new("c"), Id::new("x"))
//!     .place(Id::new("c"), Id::new("p"));
//!
//! let graph = builder.build().expect("valid graph");
//! assert_eq!(graph.parent(Id::new("p")), Some(Id::new("c")));
//! assert_eq!(graph.depth(Id::new("c")), 1);
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;

use crate::identifier::Id;

/// Structural invariant violations of a [`Graph`].
///
/// [`validate`] reports the first violation it finds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("element `{0}` is declared more than once")]
    DuplicateId(Id),

    #[error("unknown element `{0}`")]
    UnknownElement(Id),

    #[error("element `{0}` is not contained in any area")]
    OrphanElement(Id),

    #[error("element `{0}` is directly contained in more than one area")]
    MultipleParents(Id),

    #[error("containment cycle through `{0}`")]
    Cycle(Id),

    #[error("predicate `{0}` references vertex `{1}` declared in a deeper area")]
    ScopeViolation(Id, Id),
}

/// The kind of a graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Sheet,
    Cut,
    Predicate,
    Vertex,
}

impl ElementKind {
    /// Returns true for the sheet and cuts.
    pub fn is_container(self) -> bool {
        matches!(self, ElementKind::Sheet | ElementKind::Cut)
    }
}

/// An individual: a constant when labelled, otherwise a generic
/// (existentially quantified) vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: Id,
    constant: Option<String>,
}

impl Vertex {
    pub fn id(&self) -> Id {
        self.id
    }

    /// The constant label, or `None` for a generic vertex.
    pub fn constant(&self) -> Option<&str> {
        self.constant.as_deref()
    }

    pub fn is_generic(&self) -> bool {
        self.constant.is_none()
    }
}

/// An n-ary relation application.
///
/// The order of `arguments` is the argument order of the relation and is
/// significant.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    id: Id,
    relation: String,
    arguments: Vec<Id>,
}

impl Predicate {
    pub fn id(&self) -> Id {
        self.id
    }

    /// The relation name
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// The incidence sequence, one vertex per argument position
    pub fn arguments(&self) -> &[Id] {
        &self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

/// A negation boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Cut {
    id: Id,
}

impl Cut {
    pub fn id(&self) -> Id {
        self.id
    }
}

/// One argument slot of a predicate filled by a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incidence {
    predicate: Id,
    argument: usize,
}

impl Incidence {
    pub fn predicate(self) -> Id {
        self.predicate
    }

    /// Zero-based argument position
    pub fn argument(self) -> usize {
        self.argument
    }
}

/// Builder for [`Graph`].
///
/// Elements are declared first (`add_*`) and then placed into containers
/// (`place`). Declaration order becomes the creation index used for
/// deterministic layout.
#[derive(Debug)]
pub struct GraphBuilder {
    sheet: Id,
    vertices: IndexMap<Id, Vertex>,
    predicates: IndexMap<Id, Predicate>,
    cuts: IndexMap<Id, Cut>,
    placements: Vec<(Id, Id)>,
    creation: HashMap<Id, usize>,
    duplicates: Vec<Id>,
}

impl GraphBuilder {
    /// Creates a builder for a graph whose sheet of assertion is `sheet`.
    pub fn new(sheet: Id) -> Self {
        let mut creation = HashMap::new();
        creation.insert(sheet, 0);
        Self {
            sheet,
            vertices: IndexMap::new(),
            predicates: IndexMap::new(),
            cuts: IndexMap::new(),
            placements: Vec::new(),
            creation,
            duplicates: Vec::new(),
        }
    }

    /// Declares a vertex; `constant` is its constant label, if any.
    pub fn add_vertex(&mut self, id: Id, constant: Option<String>) -> &mut Self {
        if self.declare(id) {
            self.vertices.insert(id, Vertex { id, constant });
        }
        self
    }

    /// Declares a predicate with its ordered incidence sequence.
    pub fn add_predicate(
        &mut self,
        id: Id,
        relation: impl Into<String>,
        arguments: Vec<Id>,
    ) -> &mut Self {
        if self.declare(id) {
            self.predicates.insert(
                id,
                Predicate {
                    id,
                    relation: relation.into(),
                    arguments,
                },
            );
        }
        self
    }

    /// Declares a cut.
    pub fn add_cut(&mut self, id: Id) -> &mut Self {
        if self.declare(id) {
            self.cuts.insert(id, Cut { id });
        }
        self
    }

    /// Records that `container` directly contains `element`.
    pub fn place(&mut self, container: Id, element: Id) -> &mut Self {
        self.placements.push((container, element));
        self
    }

    /// Builds the graph and validates it.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found by [`validate`].
    pub fn build(self) -> Result<Graph, GraphError> {
        let graph = self.build_unchecked();
        validate(&graph)?;
        Ok(graph)
    }

    /// Builds the graph and its indices without validating it.
    ///
    /// Queries on an invalid graph are well defined but may be meaningless;
    /// pass the result through [`validate`] before laying it out.
    pub fn build_unchecked(self) -> Graph {
        let mut areas: IndexMap<Id, Vec<Id>> = IndexMap::new();
        areas.insert(self.sheet, Vec::new());
        for cut in self.cuts.keys() {
            areas.insert(*cut, Vec::new());
        }

        let mut parents = HashMap::new();
        let mut occurrences: HashMap<Id, usize> = HashMap::new();
        for (container, element) in &self.placements {
            areas.entry(*container).or_default().push(*element);
            parents.entry(*element).or_insert(*container);
            *occurrences.entry(*element).or_default() += 1;
        }

        let creation = &self.creation;
        for children in areas.values_mut() {
            children.sort_by_key(|id| creation.get(id).copied().unwrap_or(usize::MAX));
        }

        let mut incidences: HashMap<Id, Vec<Incidence>> = HashMap::new();
        for predicate in self.predicates.values() {
            for (argument, vertex) in predicate.arguments.iter().enumerate() {
                incidences.entry(*vertex).or_default().push(Incidence {
                    predicate: predicate.id,
                    argument,
                });
            }
        }

        debug!(
            vertices = self.vertices.len(),
            predicates = self.predicates.len(),
            cuts = self.cuts.len();
            "Graph built"
        );

        Graph {
            sheet: self.sheet,
            vertices: self.vertices,
            predicates: self.predicates,
            cuts: self.cuts,
            areas,
            parents,
            occurrences,
            incidences,
            creation: self.creation,
            duplicates: self.duplicates,
        }
    }

    /// Assigns the next creation index; returns false for a duplicate id.
    fn declare(&mut self, id: Id) -> bool {
        if self.creation.contains_key(&id) {
            self.duplicates.push(id);
            return false;
        }
        let index = self.creation.len();
        self.creation.insert(id, index);
        true
    }
}

/// The immutable logical graph: vertices, predicates, cuts and the area map.
#[derive(Debug, Clone)]
pub struct Graph {
    sheet: Id,
    vertices: IndexMap<Id, Vertex>,
    predicates: IndexMap<Id, Predicate>,
    cuts: IndexMap<Id, Cut>,
    areas: IndexMap<Id, Vec<Id>>,
    parents: HashMap<Id, Id>,
    occurrences: HashMap<Id, usize>,
    incidences: HashMap<Id, Vec<Incidence>>,
    creation: HashMap<Id, usize>,
    duplicates: Vec<Id>,
}

impl Graph {
    /// The sheet of assertion
    pub fn sheet(&self) -> Id {
        self.sheet
    }

    /// Returns the kind of the element with the given id.
    pub fn kind(&self, id: Id) -> Option<ElementKind> {
        if id == self.sheet {
            Some(ElementKind::Sheet)
        } else if self.cuts.contains_key(&id) {
            Some(ElementKind::Cut)
        } else if self.predicates.contains_key(&id) {
            Some(ElementKind::Predicate)
        } else if self.vertices.contains_key(&id) {
            Some(ElementKind::Vertex)
        } else {
            None
        }
    }

    pub fn vertex(&self, id: Id) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn predicate(&self, id: Id) -> Option<&Predicate> {
        self.predicates.get(&id)
    }

    pub fn cut(&self, id: Id) -> Option<&Cut> {
        self.cuts.get(&id)
    }

    /// Vertices in creation order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Predicates in creation order
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    /// Cuts in creation order
    pub fn cuts(&self) -> impl Iterator<Item = &Cut> {
        self.cuts.values()
    }

    /// Every element except the sheet, in creation order within each kind:
    /// cuts, then predicates, then vertices.
    pub fn elements(&self) -> impl Iterator<Item = Id> + '_ {
        self.cuts
            .keys()
            .chain(self.predicates.keys())
            .chain(self.vertices.keys())
            .copied()
    }

    /// Number of cuts, predicates and vertices.
    pub fn element_count(&self) -> usize {
        self.cuts.len() + self.predicates.len() + self.vertices.len()
    }

    /// The sheet followed by every cut, in creation order.
    pub fn containers(&self) -> impl Iterator<Item = Id> + '_ {
        std::iter::once(self.sheet).chain(self.cuts.keys().copied())
    }

    /// Containers ordered deepest first; ties keep creation order.
    ///
    /// This is the order for bottom-up passes over the area tree.
    pub fn containers_by_depth(&self) -> Vec<Id> {
        let mut containers: Vec<(usize, Id)> = self
            .containers()
            .map(|container| (self.depth(container), container))
            .collect();
        containers.sort_by(|a, b| b.0.cmp(&a.0));
        containers.into_iter().map(|(_, container)| container).collect()
    }

    /// Direct children of a container, in creation order.
    pub fn children(&self, container: Id) -> &[Id] {
        self.areas
            .get(&container)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The container that directly holds `element`; `None` for the sheet.
    pub fn parent(&self, element: Id) -> Option<Id> {
        self.parents.get(&element).copied()
    }

    /// Iterates over the enclosing containers of `element`, innermost first,
    /// ending with the sheet.
    pub fn ancestors(&self, element: Id) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            current: element,
            remaining: self.cuts.len() + 1,
        }
    }

    /// Nesting depth of a container: 0 for the sheet, 1 for cuts on the sheet.
    pub fn depth(&self, container: Id) -> usize {
        self.ancestors(container).count()
    }

    /// Returns true if `ancestor` is `container` or encloses it.
    pub fn is_ancestor_or_self(&self, ancestor: Id, container: Id) -> bool {
        ancestor == container || self.ancestors(container).any(|id| id == ancestor)
    }

    /// Incident predicates of a vertex with the argument positions it fills.
    pub fn incidences(&self, vertex: Id) -> &[Incidence] {
        self.incidences
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Arity of a predicate
    pub fn arity(&self, predicate: Id) -> Option<usize> {
        self.predicates.get(&predicate).map(Predicate::arity)
    }

    /// Incidence sequence of a predicate
    pub fn arguments(&self, predicate: Id) -> Option<&[Id]> {
        self.predicates.get(&predicate).map(Predicate::arguments)
    }

    /// Creation index of an element; the sheet has index 0.
    pub fn creation_index(&self, id: Id) -> Option<usize> {
        self.creation.get(&id).copied()
    }
}

/// Iterator over the enclosing containers of an element.
///
/// Bounded by the number of containers, so it terminates even on a graph
/// with a containment cycle.
pub struct Ancestors<'g> {
    graph: &'g Graph,
    current: Id,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        if self.remaining == 0 || self.current == self.graph.sheet {
            return None;
        }
        let parent = self.graph.parent(self.current)?;
        self.remaining -= 1;
        self.current = parent;
        Some(parent)
    }
}

/// Checks the area-tree and scope invariants of a graph.
///
/// Checks run in this order and the first violation is returned: duplicate
/// declarations, unknown references, orphan or multiply-placed elements,
/// containment cycles, scope.
///
/// # Errors
///
/// Returns the first [`GraphError`] found.
pub fn validate(graph: &Graph) -> Result<(), GraphError> {
    if let Some(&duplicate) = graph.duplicates.first() {
        return Err(GraphError::DuplicateId(duplicate));
    }

    for (container, children) in &graph.areas {
        if !graph.kind(*container).is_some_and(ElementKind::is_container) {
            return Err(GraphError::UnknownElement(*container));
        }
        for child in children {
            match graph.kind(*child) {
                Some(ElementKind::Sheet) => return Err(GraphError::Cycle(*child)),
                Some(_) => {}
                None => return Err(GraphError::UnknownElement(*child)),
            }
        }
    }
    for predicate in graph.predicates() {
        if let Some(unknown) = predicate
            .arguments()
            .iter()
            .find(|vertex| !graph.vertices.contains_key(*vertex))
        {
            return Err(GraphError::UnknownElement(*unknown));
        }
    }

    for element in graph.elements() {
        match graph.occurrences.get(&element).copied().unwrap_or(0) {
            0 => return Err(GraphError::OrphanElement(element)),
            1 => {}
            _ => return Err(GraphError::MultipleParents(element)),
        }
    }

    for cut in graph.cuts.keys() {
        if graph.ancestors(*cut).last() != Some(graph.sheet)
            || graph.ancestors(*cut).any(|ancestor| ancestor == *cut)
        {
            return Err(GraphError::Cycle(*cut));
        }
    }

    for predicate in graph.predicates() {
        let Some(predicate_area) = graph.parent(predicate.id()) else {
            return Err(GraphError::OrphanElement(predicate.id()));
        };
        for vertex in predicate.arguments() {
            let Some(vertex_area) = graph.parent(*vertex) else {
                return Err(GraphError::OrphanElement(*vertex));
            };
            if !graph.is_ancestor_or_self(vertex_area, predicate_area) {
                return Err(GraphError::ScopeViolation(predicate.id(), *vertex));
            }
        }
    }

    trace!(sheet:% = graph.sheet; "Graph validated");
    Ok(())
}

/// Side table of original display names for graph elements, as supplied by
/// a notation parser.
///
/// Vertices usually carry the variable name they were written with and
/// predicates a readable form of their relation. Names are never consulted
/// by the layout itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayNames(IndexMap<Id, String>);

impl DisplayNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: Id, name: impl Into<String>) {
        self.0.insert(id, name.into());
    }

    pub fn get(&self, id: Id) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &str)> {
        self.0.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Id {
        Id::new(name)
    }

    /// sheet: [ Q(y), cut c1: [ P(x, y), cut c2: [ R(x) ] ] ]
    fn nested_builder() -> GraphBuilder {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_vertex(id("y"), Some("a".to_string()))
            .add_predicate(id("q"), "Q", vec![id("y")])
            .add_cut(id("c1"))
            .add_vertex(id("x"), None)
            .add_predicate(id("p"), "P", vec![id("x"), id("y")])
            .add_cut(id("c2"))
            .add_predicate(id("r"), "R", vec![id("x")])
            .place(id("sheet"), id("y"))
            .place(id("sheet"), id("q"))
            .place(id("sheet"), id("c1"))
            .place(id("c1"), id("x"))
            .place(id("c1"), id("p"))
            .place(id("c1"), id("c2"))
            .place(id("c2"), id("r"));
        builder
    }

    #[test]
    fn test_build_valid_graph() {
        let graph = nested_builder().build().expect("graph should be valid");

        assert_eq!(graph.sheet(), id("sheet"));
        assert_eq!(graph.element_count(), 7);
        assert_eq!(graph.kind(id("c2")), Some(ElementKind::Cut));
        assert_eq!(graph.kind(id("p")), Some(ElementKind::Predicate));
        assert_eq!(graph.kind(id("x")), Some(ElementKind::Vertex));
        assert_eq!(graph.kind(id("sheet")), Some(ElementKind::Sheet));
        assert_eq!(graph.kind(id("missing")), None);
    }

    #[test]
    fn test_children_in_creation_order() {
        let mut builder = nested_builder();
        // Placement order differs from declaration order
        builder.add_cut(id("c3")).place(id("sheet"), id("c3"));
        let graph = builder.build().expect("graph should be valid");

        assert_eq!(
            graph.children(id("sheet")),
            &[id("y"), id("q"), id("c1"), id("c3")]
        );
        assert_eq!(graph.children(id("c1")), &[id("x"), id("p"), id("c2")]);
        assert!(graph.children(id("c3")).is_empty());
        assert!(graph.children(id("q")).is_empty());
    }

    #[test]
    fn test_ancestors_and_depth() {
        let graph = nested_builder().build().expect("graph should be valid");

        let ancestors: Vec<Id> = graph.ancestors(id("r")).collect();
        assert_eq!(ancestors, vec![id("c2"), id("c1"), id("sheet")]);

        assert_eq!(graph.depth(id("sheet")), 0);
        assert_eq!(graph.depth(id("c1")), 1);
        assert_eq!(graph.depth(id("c2")), 2);
        assert!(graph.is_ancestor_or_self(id("sheet"), id("c2")));
        assert!(graph.is_ancestor_or_self(id("c2"), id("c2")));
        assert!(!graph.is_ancestor_or_self(id("c2"), id("c1")));
    }

    #[test]
    fn test_containers_by_depth_is_deepest_first() {
        let graph = nested_builder().build().expect("graph should be valid");
        assert_eq!(
            graph.containers_by_depth(),
            vec![id("c2"), id("c1"), id("sheet")]
        );
    }

    #[test]
    fn test_incidences_preserve_argument_order() {
        let graph = nested_builder().build().expect("graph should be valid");

        let x_incidences = graph.incidences(id("x"));
        assert_eq!(x_incidences.len(), 2);
        assert_eq!(x_incidences[0].predicate(), id("p"));
        assert_eq!(x_incidences[0].argument(), 0);
        assert_eq!(x_incidences[1].predicate(), id("r"));

        let y_incidences = graph.incidences(id("y"));
        assert_eq!(y_incidences[0].predicate(), id("q"));
        assert_eq!(y_incidences[1].predicate(), id("p"));
        assert_eq!(y_incidences[1].argument(), 1);

        assert_eq!(graph.arity(id("p")), Some(2));
        assert_eq!(graph.arguments(id("p")), Some(&[id("x"), id("y")][..]));
        assert_eq!(graph.vertex(id("y")).and_then(Vertex::constant), Some("a"));
    }

    #[test]
    fn test_zero_arity_predicate_is_legal() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_predicate(id("rain"), "Rain", vec![])
            .place(id("sheet"), id("rain"));
        let graph = builder.build().expect("sentence letters are legal");
        assert_eq!(graph.arity(id("rain")), Some(0));
    }

    #[test]
    fn test_orphan_element() {
        let mut builder = nested_builder();
        builder.add_vertex(id("z"), None);
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::OrphanElement(id("z"))
        );
    }

    #[test]
    fn test_multiple_parents() {
        let mut builder = nested_builder();
        builder.place(id("c2"), id("x"));
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::MultipleParents(id("x"))
        );
    }

    #[test]
    fn test_cycle_between_cuts() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_cut(id("a"))
            .add_cut(id("b"))
            .place(id("a"), id("b"))
            .place(id("b"), id("a"));
        assert_eq!(builder.build().unwrap_err(), GraphError::Cycle(id("a")));
    }

    #[test]
    fn test_sheet_inside_cut_is_cycle() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_cut(id("a"))
            .place(id("sheet"), id("a"))
            .place(id("a"), id("sheet"));
        assert_eq!(builder.build().unwrap_err(), GraphError::Cycle(id("sheet")));
    }

    #[test]
    fn test_scope_violation() {
        // P on the sheet references x declared inside the cut
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_cut(id("c"))
            .add_vertex(id("x"), None)
            .add_predicate(id("p"), "P", vec![id("x")])
            .place(id("sheet"), id("c"))
            .place(id("c"), id("x"))
            .place(id("sheet"), id("p"));
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::ScopeViolation(id("p"), id("x"))
        );
    }

    #[test]
    fn test_unknown_references() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_predicate(id("p"), "P", vec![id("ghost")])
            .place(id("sheet"), id("p"));
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::UnknownElement(id("ghost"))
        );

        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_vertex(id("x"), None)
            .add_vertex(id("v"), None)
            .place(id("sheet"), id("x"))
            .place(id("x"), id("v"));
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::UnknownElement(id("x"))
        );
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_vertex(id("x"), None)
            .add_cut(id("x"))
            .place(id("sheet"), id("x"));
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::DuplicateId(id("x"))
        );
    }

    #[test]
    fn test_unchecked_build_then_validate() {
        let mut builder = nested_builder();
        builder.add_vertex(id("lonely"), None);
        let graph = builder.build_unchecked();

        assert_eq!(
            validate(&graph),
            Err(GraphError::OrphanElement(id("lonely")))
        );
        assert_eq!(graph.parent(id("lonely")), None);
    }

    #[test]
    fn test_display_names() {
        let mut names = DisplayNames::new();
        assert!(names.is_empty());
        names.insert(id("x"), "socrates");
        names.insert(id("p"), "is a man");

        assert_eq!(names.get(id("x")), Some("socrates"));
        assert_eq!(names.get(id("p")), Some("is a man"));
        assert_eq!(names.get(id("y")), None);
        assert_eq!(
            names.iter().collect::<Vec<_>>(),
            vec![(id("x"), "socrates"), (id("p"), "is a man")]
        );
    }
}
