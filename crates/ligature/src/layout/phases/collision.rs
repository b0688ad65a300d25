//! Collision Detection: checks the seed geometry before anything is placed.
//!
//! The seed is the oracle's advice where it exists and the arrangement
//! everywhere else. Violations found here are not fatal; later phases must
//! resolve every one that involves an element they place.

use indexmap::IndexMap;
use log::{debug, info};

use ligature_core::{
    geometry::{Bounds, Size},
    graph::{ElementKind, Graph},
    identifier::Id,
};

use crate::{
    config::LayoutConfig,
    layout::{Arrangement, LayoutContext, Phase, PhaseFailure, PhaseName, PhaseStatus},
    oracle::AdvisoryLayout,
    validate::validate_boxes,
};

/// Validates seed boxes and records their violations.
#[derive(Debug, Clone)]
pub struct CollisionDetection {
    config: LayoutConfig,
}

impl CollisionDetection {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let arrangement = context.arrangement()?;
        let sizes = context.sizes()?;
        let seed = seed_boxes(graph, arrangement, sizes, context.advice(), &self.config);

        let violations = validate_boxes(graph, |id| seed.get(&id).copied());
        if violations.is_empty() {
            debug!(elements = seed.len(); "Seed geometry is consistent");
        } else {
            info!(violations = violations.len(); "Seed geometry has violations");
            for violation in &violations {
                debug!(violation:% = violation; "Seed violation");
            }
        }
        context.publish_seed_violations(violations)
    }
}

impl Phase for CollisionDetection {
    fn name(&self) -> PhaseName {
        PhaseName::CollisionDetection
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}

/// Seed box of every element that has one.
fn seed_boxes(
    graph: &Graph,
    arrangement: &Arrangement,
    sizes: &IndexMap<Id, Size>,
    advice: Option<&AdvisoryLayout>,
    config: &LayoutConfig,
) -> IndexMap<Id, Bounds> {
    let mut seed = IndexMap::with_capacity(graph.element_count() + 1);
    for container in graph.containers() {
        let advised = advice.and_then(|advice| match graph.kind(container) {
            Some(ElementKind::Sheet) => advice.canvas(),
            _ => advice.cluster(container),
        });
        if let Some(bounds) = advised.or_else(|| arrangement.containers().get(&container).copied())
        {
            seed.insert(container, bounds);
        }
    }

    for element in graph.elements() {
        if graph.cut(element).is_some() {
            continue;
        }
        let size = match graph.kind(element) {
            Some(ElementKind::Vertex) => {
                let diameter = 2.0 * config.vertex_radius();
                Size::new(diameter, diameter)
            }
            _ => match sizes.get(&element) {
                Some(size) => *size,
                None => continue,
            },
        };
        let center = advice
            .and_then(|advice| advice.node(element))
            .or_else(|| arrangement.cells().get(&element).map(|cell| cell.center()));
        if let Some(center) = center {
            seed.insert(element, Bounds::new_from_center(center, size));
        }
    }
    seed
}
