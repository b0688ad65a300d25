//! Vertex Positioning: places every vertex inside its reserved cell.

use indexmap::IndexMap;
use log::debug;

use ligature_core::{
    geometry::{Bounds, Insets, Point, Size, predicate_periphery_point},
    graph::Graph,
    identifier::Id,
};

use super::check_placement;
use crate::layout::{LayoutContext, Phase, PhaseFailure, PhaseName, PhaseStatus};

/// Pulls each vertex toward the predicates it is attached to.
///
/// The target is the centroid of the attachment points on the incident
/// predicates' boundaries, as seen from the center of the vertex's cell.
/// The dot is then clamped so that it stays fully inside the cell.
#[derive(Debug, Clone, Copy)]
pub struct VertexPositioning {
    radius: f32,
}

impl VertexPositioning {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let arrangement = context.arrangement()?;
        let predicates = context.predicates()?;

        let mut positions = IndexMap::new();
        for vertex in graph.vertices() {
            let cell = arrangement.cell(vertex.id())?;
            let target = attraction_target(graph, predicates, vertex.id(), cell.center())?;
            let position = cell.shrink(Insets::uniform(self.radius)).clamp_point(target);
            positions.insert(vertex.id(), position);
        }

        let dot = Size::new(2.0 * self.radius, 2.0 * self.radius);
        let placed: IndexMap<Id, Bounds> = positions
            .iter()
            .map(|(id, position)| (*id, Bounds::new_from_center(*position, dot)))
            .collect();
        check_placement(
            graph,
            arrangement,
            context.seed_violations()?,
            &placed,
            predicates,
        )?;

        debug!(vertices = positions.len(); "Vertices positioned");
        context.publish_vertices(positions)
    }
}

impl Phase for VertexPositioning {
    fn name(&self) -> PhaseName {
        PhaseName::VertexPositioning
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}

/// Centroid of the attachment points of a vertex, or `origin` for a vertex
/// without incidences.
fn attraction_target(
    graph: &Graph,
    predicates: &IndexMap<Id, Bounds>,
    vertex: Id,
    origin: Point,
) -> Result<Point, PhaseFailure> {
    let incidences = graph.incidences(vertex);
    if incidences.is_empty() {
        return Ok(origin);
    }

    let mut sum = Point::default();
    for incidence in incidences {
        let bounds = predicates
            .get(&incidence.predicate())
            .copied()
            .ok_or(PhaseFailure::MissingElement(incidence.predicate()))?;
        sum = sum.add_point(predicate_periphery_point(bounds, origin));
    }
    Ok(sum.scale(1.0 / incidences.len() as f32))
}

#[cfg(test)]
mod tests {
    use ligature_core::graph::GraphBuilder;

    use super::*;
    use crate::{
        config::LayoutConfig,
        layout::phases::{CollisionDetection, ContainerSizing, ElementSizing, PredicatePositioning},
    };

    fn id(name: &str) -> Id {
        Id::new(name)
    }

    fn position(graph: &Graph, config: &LayoutConfig) -> LayoutContext {
        let mut context = LayoutContext::new(None);
        let phases: [&dyn Phase; 5] = [
            &ElementSizing::new(config.clone()),
            &ContainerSizing::new(config.clone()),
            &CollisionDetection::new(config.clone()),
            &PredicatePositioning,
            &VertexPositioning::new(config.vertex_radius()),
        ];
        for phase in phases {
            assert_eq!(phase.execute(graph, &mut context), PhaseStatus::Completed);
        }
        context
    }

    #[test]
    fn test_vertex_stays_inside_its_cell() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_vertex(id("x"), None)
            .add_vertex(id("lonely"), None)
            .add_predicate(id("p"), "P", vec![id("x")])
            .add_predicate(id("q"), "Q", vec![id("x")])
            .place(id("sheet"), id("p"))
            .place(id("sheet"), id("x"))
            .place(id("sheet"), id("lonely"))
            .place(id("sheet"), id("q"));
        let graph = builder.build().expect("valid graph");
        let config = LayoutConfig::default();
        let context = position(&graph, &config);

        let arrangement = context.arrangement().expect("arranged");
        for vertex in ["x", "lonely"].map(Id::new) {
            let cell = arrangement
                .cell(vertex)
                .expect("cell")
                .add_padding(Insets::uniform(1e-3));
            let position = context.vertex_position(vertex).expect("positioned");
            let dot = Bounds::new_from_center(
                position,
                Size::new(2.0 * config.vertex_radius(), 2.0 * config.vertex_radius()),
            );
            assert!(cell.contains_point(Point::new(dot.min_x(), dot.min_y())));
            assert!(cell.contains_point(Point::new(dot.max_x(), dot.max_y())));
        }

        let lonely = arrangement.cell(id("lonely")).expect("cell");
        assert_eq!(context.vertex_position(id("lonely")), Ok(lonely.center()));
    }

    #[test]
    fn test_vertex_leans_toward_its_predicate() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_predicate(id("p"), "P", vec![id("x")])
            .add_vertex(id("x"), None)
            .place(id("sheet"), id("p"))
            .place(id("sheet"), id("x"));
        let graph = builder.build().expect("valid graph");
        let context = position(&graph, &LayoutConfig::default());

        // Two children share one row: P on the left, x on the right
        let cell = context
            .arrangement()
            .and_then(|arrangement| arrangement.cell(id("x")))
            .expect("cell");
        let position = context.vertex_position(id("x")).expect("positioned");
        assert!(position.x() < cell.center().x());
    }

    #[test]
    fn test_attraction_target_averages_attachments() {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_vertex(id("x"), None)
            .add_predicate(id("left"), "L", vec![id("x")])
            .add_predicate(id("right"), "R", vec![id("x")])
            .place(id("sheet"), id("x"))
            .place(id("sheet"), id("left"))
            .place(id("sheet"), id("right"));
        let graph = builder.build().expect("valid graph");
        let predicates = IndexMap::from([
            (id("left"), Bounds::new(0.0, 0.0, 20.0, 20.0)),
            (id("right"), Bounds::new(80.0, 0.0, 100.0, 20.0)),
        ]);

        let target = attraction_target(&graph, &predicates, id("x"), Point::new(50.0, 10.0))
            .expect("target");
        assert_eq!(target, Point::new(50.0, 10.0));
    }
}
