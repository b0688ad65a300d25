//! Hook Assignment: attachment points of ligatures on predicate boxes.

use indexmap::IndexMap;
use log::{debug, trace};

use ligature_core::{
    geometry::{Bounds, Point, predicate_periphery_point},
    graph::Graph,
};

use crate::layout::{Hook, LayoutContext, Phase, PhaseFailure, PhaseName, PhaseStatus};

/// Edge of a predicate box that faces a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The edge facing `point`; `None` when the point lies within the box.
    fn facing(bounds: Bounds, point: Point) -> Option<Self> {
        if point.y() < bounds.min_y() {
            Some(Self::Top)
        } else if point.y() > bounds.max_y() {
            Some(Self::Bottom)
        } else if point.x() < bounds.min_x() {
            Some(Self::Left)
        } else if point.x() > bounds.max_x() {
            Some(Self::Right)
        } else {
            None
        }
    }

    /// Point at `fraction` along the edge, left to right or top to bottom.
    fn slot(self, bounds: Bounds, fraction: f32) -> Point {
        let x = bounds.min_x() + fraction * bounds.width();
        let y = bounds.min_y() + fraction * bounds.height();
        match self {
            Self::Top => Point::new(x, bounds.min_y()),
            Self::Bottom => Point::new(x, bounds.max_y()),
            Self::Left => Point::new(bounds.min_x(), y),
            Self::Right => Point::new(bounds.max_x(), y),
        }
    }
}

/// Computes one hook per incidence.
///
/// A unary predicate is attached where the ray from its center toward the
/// vertex leaves the box. For higher arities the hook of argument `i` sits
/// at `(i + 1) / (arity + 1)` along the edge facing the vertex, so the
/// argument order stays readable around the box.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookAssignment;

impl HookAssignment {
    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let vertices = context.vertices()?;

        let mut hooks = IndexMap::new();
        for vertex in graph.vertices() {
            let incidences = graph.incidences(vertex.id());
            if incidences.is_empty() {
                continue;
            }
            let position = vertices
                .get(&vertex.id())
                .copied()
                .ok_or(PhaseFailure::MissingElement(vertex.id()))?;

            let mut vertex_hooks = Vec::with_capacity(incidences.len());
            for incidence in incidences {
                let bounds = context.predicate_bounds(incidence.predicate())?;
                let arity = graph
                    .arity(incidence.predicate())
                    .ok_or(PhaseFailure::MissingElement(incidence.predicate()))?;
                let point = hook_point(bounds, position, incidence.argument(), arity);
                trace!(
                    vertex:% = vertex.id(),
                    predicate:% = incidence.predicate(),
                    argument = incidence.argument();
                    "Hook assigned"
                );
                vertex_hooks.push(Hook::new(incidence.predicate(), incidence.argument(), point));
            }
            hooks.insert(vertex.id(), vertex_hooks);
        }

        debug!(ligatures = hooks.len(); "Hooks assigned");
        context.publish_hooks(hooks)
    }
}

impl Phase for HookAssignment {
    fn name(&self) -> PhaseName {
        PhaseName::HookAssignment
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}

/// Attachment point of argument `argument` of a predicate with the given
/// box and arity, for a vertex at `vertex`.
fn hook_point(bounds: Bounds, vertex: Point, argument: usize, arity: usize) -> Point {
    if arity <= 1 {
        return predicate_periphery_point(bounds, vertex);
    }
    let side = Side::facing(bounds, vertex).unwrap_or(Side::Top);
    let fraction = (argument + 1) as f32 / (arity + 1) as f32;
    side.slot(bounds, fraction)
}
