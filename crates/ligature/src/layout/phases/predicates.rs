//! Predicate Positioning: final boxes of all predicates.

use indexmap::IndexMap;
use log::debug;

use ligature_core::{geometry::Bounds, graph::Graph};

use super::check_placement;
use crate::layout::{LayoutContext, Phase, PhaseFailure, PhaseName, PhaseStatus};

/// Centers every predicate in its reserved cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicatePositioning;

impl PredicatePositioning {
    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let arrangement = context.arrangement()?;

        let mut placed = IndexMap::new();
        for predicate in graph.predicates() {
            let cell = arrangement.cell(predicate.id())?;
            let size = context.size(predicate.id())?;
            placed.insert(predicate.id(), Bounds::new_from_center(cell.center(), size));
        }

        check_placement(
            graph,
            arrangement,
            context.seed_violations()?,
            &placed,
            &IndexMap::new(),
        )?;

        debug!(predicates = placed.len(); "Predicates positioned");
        context.publish_predicates(placed)
    }
}

impl Phase for PredicatePositioning {
    fn name(&self) -> PhaseName {
        PhaseName::PredicatePositioning
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}
