//! Layout engine and its immutable result.
//!
//! The engine is a strict sequence of [`Phase`]s over one [`LayoutContext`].
//! Each phase publishes its own outputs and only reads what earlier phases
//! published; after the last phase the context is converted into a
//! [`Layout`].

mod context;
mod phase;
pub(crate) mod phases;
mod pipeline;

pub use context::{Arrangement, LayoutContext};
pub use phase::{Phase, PhaseFailure, PhaseName, PhaseStatus};
pub use pipeline::Pipeline;

use indexmap::IndexMap;
use serde::Serialize;

use ligature_core::{
    geometry::{Bounds, Point},
    graph::{DisplayNames, ElementKind},
    identifier::Id,
};

/// Final geometry of one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementBox {
    kind: ElementKind,
    bounds: Bounds,
    z_index: usize,
}

impl ElementBox {
    pub fn new(kind: ElementKind, bounds: Bounds, z_index: usize) -> Self {
        Self {
            kind,
            bounds,
            z_index,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Paint order: a cut at depth `d` has `2d`, its contents `2d + 1`.
    pub fn z_index(&self) -> usize {
        self.z_index
    }
}

/// Exact attachment point of a ligature on a predicate boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hook {
    predicate: Id,
    argument: usize,
    point: Point,
}

impl Hook {
    pub fn new(predicate: Id, argument: usize, point: Point) -> Self {
        Self {
            predicate,
            argument,
            point,
        }
    }

    pub fn predicate(&self) -> Id {
        self.predicate
    }

    /// Zero-based argument position this hook realizes.
    pub fn argument(&self) -> usize {
        self.argument
    }

    pub fn point(&self) -> Point {
        self.point
    }
}

/// How a branch path was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    /// The straight segment crosses nothing.
    Straight,
    /// Computed by the obstacle-avoiding router.
    Routed,
    /// Routing was needed but produced no path; the straight segment is used.
    Fallback,
}

/// Path from a ligature's origin (vertex or junction) to one hook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    hook: usize,
    points: Vec<Point>,
    routing: Routing,
}

impl Branch {
    pub fn new(hook: usize, points: Vec<Point>, routing: Routing) -> Self {
        Self {
            hook,
            points,
            routing,
        }
    }

    /// Index of the hook in [`Ligature::hooks`].
    pub fn hook(&self) -> usize {
        self.hook
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn routing(&self) -> Routing {
        self.routing
    }

    pub fn length(&self) -> f32 {
        ligature_core::geometry::path_length(&self.points)
    }
}

/// The identity line of one vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ligature {
    vertex: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    junction: Option<Point>,
    hooks: Vec<Hook>,
    branches: Vec<Branch>,
}

impl Ligature {
    pub fn new(
        vertex: Id,
        junction: Option<Point>,
        hooks: Vec<Hook>,
        branches: Vec<Branch>,
    ) -> Self {
        Self {
            vertex,
            junction,
            hooks,
            branches,
        }
    }

    pub fn vertex(&self) -> Id {
        self.vertex
    }

    /// The single branching point of a ligature with three or more hooks.
    pub fn junction(&self) -> Option<Point> {
        self.junction
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Sum of all branch lengths.
    pub fn length(&self) -> f32 {
        self.branches.iter().map(Branch::length).sum()
    }

    /// One continuous polyline through every hook.
    ///
    /// Starts at the first hook, runs to the origin and out to the second
    /// hook; every further hook is reached by returning along the previous
    /// branch to the origin.
    pub fn path(&self) -> Vec<Point> {
        let mut path: Vec<Point> = Vec::new();
        let mut extend = |points: &mut dyn Iterator<Item = Point>| {
            for point in points {
                if path.last() != Some(&point) {
                    path.push(point);
                }
            }
        };

        let Some((first, rest)) = self.branches.split_first() else {
            return Vec::new();
        };
        extend(&mut first.points.iter().rev().copied());
        for (index, branch) in rest.iter().enumerate() {
            if index > 0 {
                extend(&mut rest[index - 1].points.iter().rev().copied());
            }
            extend(&mut branch.points.iter().copied());
        }
        path
    }
}

/// The immutable result of laying out a graph.
///
/// Every sheet, cut, predicate and vertex of the input graph has exactly one
/// [`ElementBox`]; vertices with at least one incidence have a [`Ligature`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    sheet: Id,
    canvas: Bounds,
    elements: IndexMap<Id, ElementBox>,
    ligatures: IndexMap<Id, Ligature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_names: Option<DisplayNames>,
}

impl Layout {
    pub(crate) fn new(
        sheet: Id,
        canvas: Bounds,
        elements: IndexMap<Id, ElementBox>,
        ligatures: IndexMap<Id, Ligature>,
    ) -> Self {
        Self {
            sheet,
            canvas,
            elements,
            ligatures,
            display_names: None,
        }
    }

    pub fn sheet(&self) -> Id {
        self.sheet
    }

    /// The sheet box plus the outer margin.
    pub fn canvas(&self) -> Bounds {
        self.canvas
    }

    pub fn element(&self, id: Id) -> Option<&ElementBox> {
        self.elements.get(&id)
    }

    /// Bounds of an element; the sheet included.
    pub fn bounds(&self, id: Id) -> Option<Bounds> {
        self.elements.get(&id).map(ElementBox::bounds)
    }

    /// All element boxes: the sheet first, then cuts, predicates and
    /// vertices in creation order.
    pub fn elements(&self) -> impl Iterator<Item = (Id, &ElementBox)> {
        self.elements.iter().map(|(id, element)| (*id, element))
    }

    pub fn ligature(&self, vertex: Id) -> Option<&Ligature> {
        self.ligatures.get(&vertex)
    }

    pub fn ligatures(&self) -> impl Iterator<Item = &Ligature> {
        self.ligatures.values()
    }

    pub fn display_names(&self) -> Option<&DisplayNames> {
        self.display_names.as_ref()
    }

    /// Attaches the display-name side table; it is carried through untouched.
    pub fn with_display_names(mut self, names: DisplayNames) -> Self {
        self.display_names = Some(names);
        self
    }
}
