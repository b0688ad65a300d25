//! Ligature Routing: connects every vertex to its hooks.

use indexmap::IndexMap;
use log::{debug, warn};

use ligature_core::{
    geometry::{Bounds, Point, branching_junction, straight_path},
    graph::Graph,
    identifier::Id,
};

use crate::{
    layout::{
        Arrangement, Branch, Hook, LayoutContext, Ligature, Phase, PhaseFailure, PhaseName,
        PhaseStatus, Routing,
    },
    route::Router,
};

/// Builds ligature branches for one frozen arrangement of cuts and
/// predicates.
///
/// A branch runs from the ligature's origin (the vertex, or the junction of
/// a ligature with three or more hooks) to one hook. It is straight unless
/// the straight segment crosses a cut boundary or a predicate other than
/// its target, in which case it is routed around the cuts that enclose
/// neither endpoint and around every other predicate.
pub(super) struct BranchRouter<'a> {
    graph: &'a Graph,
    arrangement: &'a Arrangement,
    predicates: &'a IndexMap<Id, Bounds>,
    router: &'a Router,
}

impl<'a> BranchRouter<'a> {
    pub(super) fn new(
        graph: &'a Graph,
        arrangement: &'a Arrangement,
        predicates: &'a IndexMap<Id, Bounds>,
        router: &'a Router,
    ) -> Self {
        Self {
            graph,
            arrangement,
            predicates,
            router,
        }
    }

    /// The ligature of `vertex` placed at `position`.
    pub(super) fn ligature(
        &self,
        vertex: Id,
        position: Point,
        hooks: Vec<Hook>,
    ) -> Result<Ligature, PhaseFailure> {
        let junction = if hooks.len() >= 3 {
            let points: Vec<Point> = hooks.iter().map(Hook::point).collect();
            Some(branching_junction(position, &points))
        } else {
            None
        };
        let origin = junction.unwrap_or(position);

        let branches = hooks
            .iter()
            .enumerate()
            .map(|(index, hook)| self.branch(vertex, origin, index, hook))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Ligature::new(vertex, junction, hooks, branches))
    }

    fn branch(
        &self,
        vertex: Id,
        origin: Point,
        index: usize,
        hook: &Hook,
    ) -> Result<Branch, PhaseFailure> {
        let end = hook.point();
        if !self.needs_routing(hook.predicate(), origin, end) {
            return Ok(Branch::new(index, straight_path(origin, end), Routing::Straight));
        }

        let obstacles = self.obstacles(vertex, hook.predicate())?;
        let points = self.router.route(origin, end, &obstacles);
        if points.is_empty() {
            warn!(
                vertex:% = vertex,
                predicate:% = hook.predicate(),
                obstacles = obstacles.len();
                "No route found, using a straight branch"
            );
            return Ok(Branch::new(index, straight_path(origin, end), Routing::Fallback));
        }
        Ok(Branch::new(index, points, Routing::Routed))
    }

    /// Returns true if the straight segment crosses a cut boundary or the
    /// interior of a predicate other than `target`.
    fn needs_routing(&self, target: Id, start: Point, end: Point) -> bool {
        let crosses_cut = self.graph.cuts().any(|cut| {
            self.arrangement
                .containers()
                .get(&cut.id())
                .is_some_and(|bounds| bounds.segment_crosses_boundary(start, end))
        });
        crosses_cut
            || self
                .predicates
                .iter()
                .any(|(id, bounds)| *id != target && bounds.segment_crosses_interior(start, end))
    }

    fn obstacles(&self, vertex: Id, predicate: Id) -> Result<Vec<Bounds>, PhaseFailure> {
        let vertex_area = self
            .graph
            .parent(vertex)
            .ok_or(PhaseFailure::MissingElement(vertex))?;
        let predicate_area = self
            .graph
            .parent(predicate)
            .ok_or(PhaseFailure::MissingElement(predicate))?;

        let mut obstacles = Vec::new();
        for cut in self.graph.cuts() {
            let encloses_endpoint = self.graph.is_ancestor_or_self(cut.id(), vertex_area)
                || self.graph.is_ancestor_or_self(cut.id(), predicate_area);
            if !encloses_endpoint {
                obstacles.push(self.arrangement.container(cut.id())?);
            }
        }
        obstacles.extend(
            self.predicates
                .iter()
                .filter(|(id, _)| **id != predicate)
                .map(|(_, bounds)| *bounds),
        );
        Ok(obstacles)
    }
}

/// Routes the ligature of every vertex that has hooks.
#[derive(Debug, Clone)]
pub struct LigatureRouting {
    router: Router,
}

impl LigatureRouting {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let branch_router = BranchRouter::new(
            graph,
            context.arrangement()?,
            context.predicates()?,
            &self.router,
        );

        let mut ligatures = IndexMap::new();
        for (vertex, hooks) in context.hooks()? {
            let position = context.vertex_position(*vertex)?;
            let ligature = branch_router.ligature(*vertex, position, hooks.clone())?;
            ligatures.insert(*vertex, ligature);
        }

        let routed = ligatures
            .values()
            .flat_map(Ligature::branches)
            .filter(|branch| branch.routing() != Routing::Straight)
            .count();
        debug!(ligatures = ligatures.len(), routed = routed; "Ligatures routed");
        context.publish_ligatures(ligatures)
    }
}

impl Phase for LigatureRouting {
    fn name(&self) -> PhaseName {
        PhaseName::LigatureRouting
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}

#[cfg(test)]
mod tests {
    use ligature_core::graph::GraphBuilder;

    use super::*;

    fn id(name: &str) -> Id {
        Id::new(name)
    }

    /// sheet: [ x, outside, wall, cut: [ inside ] ]
    struct Fixture {
        graph: Graph,
        arrangement: Arrangement,
        predicates: IndexMap<Id, Bounds>,
    }

    fn fixture() -> Fixture {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_cut(id("cut"))
            .add_vertex(id("x"), None)
            .add_predicate(id("outside"), "O", vec![id("x")])
            .add_predicate(id("inside"), "I", vec![id("x")])
            .add_predicate(id("wall"), "W", vec![])
            .place(id("sheet"), id("x"))
            .place(id("sheet"), id("outside"))
            .place(id("sheet"), id("wall"))
            .place(id("sheet"), id("cut"))
            .place(id("cut"), id("inside"));
        let graph = builder.build().expect("valid graph");

        let arrangement = Arrangement::new(
            10.0,
            IndexMap::new(),
            IndexMap::from([
                (id("sheet"), Bounds::new(0.0, 0.0, 400.0, 200.0)),
                (id("cut"), Bounds::new(200.0, 50.0, 300.0, 150.0)),
            ]),
        );
        let predicates = IndexMap::from([
            (id("outside"), Bounds::new(10.0, 90.0, 40.0, 110.0)),
            (id("inside"), Bounds::new(230.0, 90.0, 270.0, 110.0)),
            (id("wall"), Bounds::new(100.0, 20.0, 120.0, 180.0)),
        ]);
        Fixture {
            graph,
            arrangement,
            predicates,
        }
    }

    #[test]
    fn test_straight_branch_when_unobstructed() {
        let fixture = fixture();
        let router = Router::default();
        let branch_router = BranchRouter::new(
            &fixture.graph,
            &fixture.arrangement,
            &fixture.predicates,
            &router,
        );

        let hook = Hook::new(id("outside"), 0, Point::new(40.0, 100.0));
        let ligature = branch_router
            .ligature(id("x"), Point::new(70.0, 100.0), vec![hook])
            .expect("ligature");
        assert_eq!(ligature.junction(), None);
        assert_eq!(ligature.branches()[0].routing(), Routing::Straight);
        assert_eq!(
            ligature.branches()[0].points(),
            &[Point::new(70.0, 100.0), Point::new(40.0, 100.0)]
        );
    }

    #[test]
    fn test_crossing_predicate_and_cut_is_routed() {
        let fixture = fixture();
        let router = Router::default();
        let branch_router = BranchRouter::new(
            &fixture.graph,
            &fixture.arrangement,
            &fixture.predicates,
            &router,
        );

        // The straight line crosses the wall and the cut boundary
        let hook = Hook::new(id("inside"), 0, Point::new(230.0, 100.0));
        let ligature = branch_router
            .ligature(id("x"), Point::new(70.0, 100.0), vec![hook])
            .expect("ligature");
        let branch = &ligature.branches()[0];
        assert_eq!(branch.routing(), Routing::Routed);
        assert_eq!(branch.points().first(), Some(&Point::new(70.0, 100.0)));
        assert_eq!(branch.points().last(), Some(&Point::new(230.0, 100.0)));
        let wall = fixture.predicates[&id("wall")];
        assert!(
            branch
                .points()
                .windows(2)
                .all(|pair| !wall.segment_crosses_interior(pair[0], pair[1]))
        );
    }

    #[test]
    fn test_fallback_without_router() {
        let fixture = fixture();
        let router = Router::unavailable();
        let branch_router = BranchRouter::new(
            &fixture.graph,
            &fixture.arrangement,
            &fixture.predicates,
            &router,
        );

        let hook = Hook::new(id("inside"), 0, Point::new(230.0, 100.0));
        let ligature = branch_router
            .ligature(id("x"), Point::new(70.0, 100.0), vec![hook])
            .expect("ligature");
        assert_eq!(ligature.branches()[0].routing(), Routing::Fallback);
        assert_eq!(ligature.branches()[0].points().len(), 2);
    }

    #[test]
    fn test_three_hooks_share_a_junction() {
        let fixture = fixture();
        let router = Router::default();
        let branch_router = BranchRouter::new(
            &fixture.graph,
            &fixture.arrangement,
            &fixture.predicates,
            &router,
        );

        let position = Point::new(70.0, 100.0);
        let hooks = vec![
            Hook::new(id("outside"), 0, Point::new(40.0, 100.0)),
            Hook::new(id("outside"), 0, Point::new(25.0, 90.0)),
            Hook::new(id("inside"), 0, Point::new(230.0, 100.0)),
        ];
        let ligature = branch_router
            .ligature(id("x"), position, hooks)
            .expect("ligature");
        assert_eq!(ligature.junction(), Some(position));
        assert_eq!(ligature.branches().len(), 3);
        assert!(
            ligature
                .branches()
                .iter()
                .all(|branch| branch.points().first() == Some(&position))
        );
    }
}
