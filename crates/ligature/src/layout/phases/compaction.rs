//! Area Compaction: shrinks containers around their final contents.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use ligature_core::{
    geometry::{Bounds, Insets, Size},
    graph::{ElementKind, Graph},
    identifier::Id,
};

use crate::layout::{LayoutContext, Phase, PhaseFailure, PhaseName, PhaseStatus};

/// Tightens every container to the bounding box of its children plus the
/// padding used by Container Sizing.
///
/// Runs deepest containers first so that a cut is tightened around its
/// already compacted child cuts. A box never grows, and a container with no
/// children keeps its arranged size.
#[derive(Debug, Clone, Copy)]
pub struct AreaCompaction {
    vertex_radius: f32,
}

impl AreaCompaction {
    pub fn new(vertex_radius: f32) -> Self {
        Self { vertex_radius }
    }

    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let arrangement = context.arrangement()?;
        let predicates = context.predicates()?;
        let vertices = context.vertices()?;
        let dot = Size::new(2.0 * self.vertex_radius, 2.0 * self.vertex_radius);
        let padding = Insets::uniform(arrangement.padding());

        let mut compacted: HashMap<Id, Bounds> = HashMap::new();
        for container in graph.containers_by_depth() {
            let original = arrangement.container(container)?;
            let mut content: Option<Bounds> = None;
            for child in graph.children(container) {
                let bounds = match graph.kind(*child) {
                    Some(ElementKind::Predicate) => predicates.get(child).copied(),
                    Some(ElementKind::Vertex) => vertices
                        .get(child)
                        .map(|position| Bounds::new_from_center(*position, dot)),
                    Some(ElementKind::Cut) => compacted.get(child).copied(),
                    Some(ElementKind::Sheet) | None => None,
                }
                .ok_or(PhaseFailure::MissingElement(*child))?;
                content = Some(match content {
                    Some(content) => content.merge(&bounds),
                    None => bounds,
                });
            }

            let tightened = content.map_or(original, |content| {
                content.add_padding(padding).intersection(&original)
            });
            compacted.insert(container, tightened);
        }

        let before: f32 = arrangement.containers().values().map(|bounds| bounds.area()).sum();
        let containers = graph
            .containers()
            .map(|id| {
                compacted
                    .get(&id)
                    .map(|bounds| (id, *bounds))
                    .ok_or(PhaseFailure::MissingElement(id))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        let after: f32 = containers.values().map(|bounds| bounds.area()).sum();

        debug!(area_before = before, area_after = after; "Containers compacted");
        context.publish_compacted(containers)
    }
}

impl Phase for AreaCompaction {
    fn name(&self) -> PhaseName {
        PhaseName::AreaCompaction
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}
