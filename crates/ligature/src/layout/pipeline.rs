use log::{debug, info};

use ligature_core::graph::Graph;

use super::{Layout, LayoutContext, Phase, PhaseName, PhaseStatus, phases};
use crate::{config::LayoutConfig, error::LigatureError, oracle::AdvisoryLayout, route::Router};

/// The fixed sequence of layout phases.
///
/// Phases run strictly in order over one [`LayoutContext`]; the first
/// failing phase aborts the run and no partial layout is produced.
pub struct Pipeline {
    config: LayoutConfig,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new(config: LayoutConfig, router: Router) -> Self {
        let phases = phases::standard(&config, &router);
        Self { config, phases }
    }

    /// Names of the phases in execution order.
    pub fn phases(&self) -> Vec<PhaseName> {
        self.phases.iter().map(|phase| phase.name()).collect()
    }

    /// Runs every phase and converts the result into a [`Layout`].
    ///
    /// # Errors
    ///
    /// Returns [`LigatureError::PhaseFailed`] naming the first phase that
    /// could not establish its invariant.
    pub fn run(
        &self,
        graph: &Graph,
        advice: Option<AdvisoryLayout>,
    ) -> Result<Layout, LigatureError> {
        info!(
            elements = graph.element_count(),
            advised = advice.is_some();
            "Starting layout"
        );
        let mut context = LayoutContext::new(advice);

        for phase in &self.phases {
            debug!(phase:% = phase.name(); "Running phase");
            if let PhaseStatus::Failed(reason) = phase.execute(graph, &mut context) {
                return Err(LigatureError::PhaseFailed {
                    phase: phase.name(),
                    reason,
                });
            }
        }

        let layout = context
            .into_layout(graph, self.config.vertex_radius(), self.config.canvas_margin())
            .map_err(|reason| LigatureError::PhaseFailed {
                phase: PhaseName::Finalization,
                reason,
            })?;
        info!(
            width = layout.canvas().width(),
            height = layout.canvas().height();
            "Layout finished"
        );
        Ok(layout)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("phases", &self.phases())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ligature_core::{graph::GraphBuilder, identifier::Id};

    use super::*;
    use crate::layout::PhaseFailure;

    #[test]
    fn test_phase_order() {
        let pipeline = Pipeline::new(LayoutConfig::default(), Router::default());
        assert_eq!(
            pipeline.phases(),
            vec![
                PhaseName::ElementSizing,
                PhaseName::ContainerSizing,
                PhaseName::CollisionDetection,
                PhaseName::PredicatePositioning,
                PhaseName::VertexPositioning,
                PhaseName::HookAssignment,
                PhaseName::LigatureRouting,
                PhaseName::BranchOptimization,
                PhaseName::AreaCompaction,
            ]
        );
    }

    #[test]
    fn test_empty_sheet() {
        let graph = GraphBuilder::new(Id::new("sheet"))
            .build()
            .expect("empty graph");
        let pipeline = Pipeline::new(LayoutConfig::default(), Router::default());

        let layout = pipeline.run(&graph, None).expect("layout");
        assert_eq!(layout.elements().count(), 1);
        assert!(layout.canvas().strictly_contains(&layout.bounds(graph.sheet()).expect("sheet")));
    }

    #[test]
    fn test_failure_names_phase() {
        let graph = GraphBuilder::new(Id::new("sheet"))
            .build()
            .expect("empty graph");
        let config = LayoutConfig::default().with_max_extent(10.0);
        let pipeline = Pipeline::new(config, Router::default());

        let error = pipeline.run(&graph, None).unwrap_err();
        assert!(matches!(
            error,
            LigatureError::PhaseFailed {
                phase: PhaseName::ContainerSizing,
                reason: PhaseFailure::PaddingExceedsAvailableSpace { .. },
            }
        ));
    }
}
