//! Branch Optimization: shortens ligatures by moving their vertices.

use log::{debug, trace};

use ligature_core::{
    geometry::{Insets, Point},
    graph::Graph,
    identifier::Id,
};

use super::ligatures::BranchRouter;
use crate::{
    layout::{LayoutContext, Ligature, Phase, PhaseFailure, PhaseName, PhaseStatus, Routing},
    route::Router,
};

const MEDIAN_ITERATIONS: usize = 32;
const CONVERGENCE: f32 = 1e-3;
/// Minimum length gain for a move to be kept.
const MIN_IMPROVEMENT: f32 = 1e-2;

/// Moves each connected vertex toward the geometric median of its hooks.
///
/// Only the vertex (and with it the junction) moves; the target is clamped
/// so the vertex dot stays inside its reserved cell. A move is kept when the
/// re-routed ligature is shorter and has no more fallback branches than
/// before.
#[derive(Debug, Clone)]
pub struct BranchOptimization {
    router: Router,
    radius: f32,
}

impl BranchOptimization {
    pub fn new(router: Router, radius: f32) -> Self {
        Self { router, radius }
    }

    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let moves = self.improvements(graph, context)?;
        debug!(moved = moves.len(); "Branches optimized");
        for (vertex, position, ligature) in moves {
            context.refine_vertex(vertex, position)?;
            context.refine_ligature(ligature)?;
        }
        Ok(())
    }

    fn improvements(
        &self,
        graph: &Graph,
        context: &LayoutContext,
    ) -> Result<Vec<(Id, Point, Ligature)>, PhaseFailure> {
        let arrangement = context.arrangement()?;
        let branch_router =
            BranchRouter::new(graph, arrangement, context.predicates()?, &self.router);

        let mut moves = Vec::new();
        for (vertex, current) in context.ligatures()? {
            let position = context.vertex_position(*vertex)?;
            let hook_points: Vec<Point> =
                current.hooks().iter().map(|hook| hook.point()).collect();
            let area = arrangement
                .cell(*vertex)?
                .shrink(Insets::uniform(self.radius));
            let target = area.clamp_point(geometric_median(&hook_points, position));
            if target.approx_eq(position, CONVERGENCE) {
                continue;
            }

            let candidate = branch_router.ligature(*vertex, target, current.hooks().to_vec())?;
            let shorter = candidate.length() + MIN_IMPROVEMENT < current.length();
            if shorter && fallbacks(&candidate) <= fallbacks(current) {
                trace!(
                    vertex:% = vertex,
                    before = current.length(),
                    after = candidate.length();
                    "Vertex moved"
                );
                moves.push((*vertex, target, candidate));
            }
        }
        Ok(moves)
    }
}

impl Phase for BranchOptimization {
    fn name(&self) -> PhaseName {
        PhaseName::BranchOptimization
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}

fn fallbacks(ligature: &Ligature) -> usize {
    ligature
        .branches()
        .iter()
        .filter(|branch| branch.routing() == Routing::Fallback)
        .count()
}

/// Weiszfeld iteration for the point minimizing the summed distance to
/// `points`, starting from `start`.
fn geometric_median(points: &[Point], start: Point) -> Point {
    if points.is_empty() {
        return start;
    }

    let mut current = start;
    for _ in 0..MEDIAN_ITERATIONS {
        let mut weighted = Point::default();
        let mut total_weight = 0.0;
        for point in points {
            let distance = current.distance(*point);
            if distance < CONVERGENCE {
                // The iteration is undefined on a sample point
                return *point;
            }
            weighted = weighted.add_point(point.scale(1.0 / distance));
            total_weight += 1.0 / distance;
        }
        let next = weighted.scale(1.0 / total_weight);
        let converged = next.approx_eq(current, CONVERGENCE);
        current = next;
        if converged {
            break;
        }
    }
    current
}
