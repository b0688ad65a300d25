//! Element Sizing: intrinsic sizes of vertices and predicates.

use indexmap::IndexMap;
use log::debug;
use unicode_width::UnicodeWidthStr;

use ligature_core::{
    geometry::Size,
    graph::{Graph, Predicate},
};

use crate::{
    config::LayoutConfig,
    layout::{LayoutContext, Phase, PhaseFailure, PhaseName, PhaseStatus},
};

/// Size of the dot drawn for a vertex.
pub(crate) fn vertex_size(config: &LayoutConfig) -> Size {
    let diameter = 2.0 * config.vertex_radius();
    Size::new(diameter, diameter)
}

/// Text-fitted box of a predicate.
///
/// The width covers the relation name plus padding and leaves room for one
/// hook per argument; both dimensions respect the minimum predicate size.
pub(crate) fn predicate_size(predicate: &Predicate, config: &LayoutConfig) -> Size {
    let padding = 2.0 * config.predicate_padding();
    let text_width = config.char_width() * predicate.relation().width() as f32;
    let hooks_width = (predicate.arity() + 1) as f32 * config.hook_spacing();

    let width = (text_width + padding)
        .max(hooks_width)
        .max(config.min_predicate_size());
    let height = (config.line_height() + padding).max(config.min_predicate_size());
    Size::new(width, height)
}

/// Computes a non-zero size for every vertex and predicate.
#[derive(Debug, Clone)]
pub struct ElementSizing {
    config: LayoutConfig,
}

impl ElementSizing {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        self.config
            .validate()
            .map_err(PhaseFailure::InvalidConfiguration)?;

        let mut sizes = IndexMap::with_capacity(graph.element_count());
        for vertex in graph.vertices() {
            sizes.insert(vertex.id(), vertex_size(&self.config));
        }
        for predicate in graph.predicates() {
            sizes.insert(predicate.id(), predicate_size(predicate, &self.config));
        }

        debug!(elements = sizes.len(); "Element sizes computed");
        context.publish_sizes(sizes)
    }
}

impl Phase for ElementSizing {
    fn name(&self) -> PhaseName {
        PhaseName::ElementSizing
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}
