//! Ligature - containment-correct layout for Peirce existential graphs.
//!
//! Given a validated [`graph::Graph`] of nested cuts, predicates and vertices,
//! the engine computes non-overlapping boxes for every element and routes
//! each vertex's ligature to exact attachment points on its predicates. The
//! result is checked against the graph's nesting before it is returned.
//!
//! An optional [`oracle::LayoutOracle`] (Graphviz, behind the `graphviz`
//! feature) may seed the ordering of elements; its output is advisory only.

pub mod config;
pub mod layout;
pub mod oracle;
pub mod route;
pub mod validate;

mod error;

pub use ligature_core::{geometry, graph, identifier};

pub use error::LigatureError;

use log::{debug, info, warn};
use serde::Serialize;

use config::AppConfig;
use graph::{DisplayNames, Graph};
use layout::{Layout, Pipeline};
use oracle::LayoutOracle;
use route::{Router, VisibilityRouter};
use validate::Violation;

/// Builder for laying out existential graphs.
///
/// # Examples
///
/// ```rust
/// use ligature::{LayoutBuilder, config::AppConfig};
/// use ligature::graph::GraphBuilder;
/// use ligature::identifier::Id;
///
/// let mut graph = GraphBuilder::new(Id::new("sheet"));
/// graph
///     .add_cut(Id::new("c"))
///     .add_vertex(Id::new("x"), None)
///     .add_predicate(Id::new("p"), "Man", vec![Id::new("x")])
///     .place(Id::new("sheet"), Id::new("c"))
///     .place(Id::new("c"), Id::new("x"))
///     .place(Id::new("c"), Id::new("p"));
/// let graph = graph.build().expect("valid graph");
///
/// let outcome = LayoutBuilder::new(AppConfig::default())
///     .without_oracle()
///     .layout(&graph)
///     .expect("layout");
/// assert!(outcome.is_compliant());
/// ```
#[derive(Debug)]
pub struct LayoutBuilder {
    config: AppConfig,
    router: Router,
    oracle: Option<Box<dyn LayoutOracle>>,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// Routing uses the visibility-graph router unless disabled. The Graphviz
    /// oracle is attached when the `graphviz` feature is enabled and the
    /// configuration asks for it.
    pub fn new(config: AppConfig) -> Self {
        let router = if config.routing().enabled() {
            Router::new(VisibilityRouter::new(config.routing().obstacle_padding()))
        } else {
            Router::unavailable()
        };
        let oracle = default_oracle(&config);
        Self {
            config,
            router,
            oracle,
        }
    }

    /// Replace the routing backend.
    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    /// Use `oracle` for advisory placement.
    pub fn with_oracle(mut self, oracle: impl LayoutOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Lay out without advisory placement.
    pub fn without_oracle(mut self) -> Self {
        self.oracle = None;
        self
    }

    /// Lay out a graph.
    ///
    /// The graph is validated first. Oracle failures are logged and the
    /// layout proceeds without advice. The finished layout is validated
    /// against the graph; violations are returned alongside it.
    ///
    /// # Errors
    ///
    /// Returns [`LigatureError::GraphInvalid`] for a malformed graph and
    /// [`LigatureError::PhaseFailed`] when a phase cannot complete.
    pub fn layout(&self, graph: &Graph) -> Result<LayoutOutcome, LigatureError> {
        graph::validate(graph)?;
        info!(
            cuts = graph.cuts().count(),
            predicates = graph.predicates().count(),
            vertices = graph.vertices().count();
            "Laying out graph"
        );

        let advice = self.oracle.as_ref().and_then(|oracle| {
            match oracle.advisory_layout(graph) {
                Ok(advice) => {
                    debug!(
                        oracle = oracle.name(),
                        clusters = advice.cluster_count(),
                        nodes = advice.node_count();
                        "Oracle advice received"
                    );
                    Some(advice)
                }
                Err(err) => {
                    warn!(oracle = oracle.name(), err:%; "Oracle failed, continuing without advice");
                    None
                }
            }
        });

        let pipeline = Pipeline::new(self.config.layout().clone(), self.router.clone());
        let layout = pipeline.run(graph, advice)?;

        let violations = validate::validate_layout(&layout, graph);
        if violations.is_empty() {
            info!("Layout is compliant");
        } else {
            warn!(violations = violations.len(); "Layout violates containment rules");
        }
        Ok(LayoutOutcome { layout, violations })
    }

    /// Lay out a graph and attach its display names to the result.
    ///
    /// # Errors
    ///
    /// See [`layout`](Self::layout).
    pub fn layout_with_names(
        &self,
        graph: &Graph,
        names: DisplayNames,
    ) -> Result<LayoutOutcome, LigatureError> {
        let outcome = self.layout(graph)?;
        Ok(LayoutOutcome {
            layout: outcome.layout.with_display_names(names),
            violations: outcome.violations,
        })
    }
}

#[cfg(feature = "graphviz")]
fn default_oracle(config: &AppConfig) -> Option<Box<dyn LayoutOracle>> {
    config.oracle().enabled().then(|| {
        Box::new(oracle::GraphvizOracle::new(config.layout().clone())) as Box<dyn LayoutOracle>
    })
}

#[cfg(not(feature = "graphviz"))]
fn default_oracle(config: &AppConfig) -> Option<Box<dyn LayoutOracle>> {
    if config.oracle().enabled() {
        warn!("Oracle requested but the `graphviz` feature is disabled");
    }
    None
}

/// A finished layout with the containment violations found in it.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutOutcome {
    layout: Layout,
    violations: Vec<Violation>,
}

impl LayoutOutcome {
    /// Returns true if the layout satisfies every containment rule.
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_parts(self) -> (Layout, Vec<Violation>) {
        (self.layout, self.violations)
    }

    /// The layout, or [`LigatureError::LayoutNonCompliant`] if it has
    /// violations.
    pub fn into_compliant(self) -> Result<Layout, LigatureError> {
        if self.violations.is_empty() {
            Ok(self.layout)
        } else {
            Err(LigatureError::LayoutNonCompliant {
                violations: self.violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        geometry::{Bounds, Point},
        graph::GraphBuilder,
        identifier::Id,
        oracle::{AdvisoryLayout, OracleError},
    };

    #[derive(Debug)]
    struct Broken;

    impl LayoutOracle for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn advisory_layout(&self, _graph: &Graph) -> Result<AdvisoryLayout, OracleError> {
            Err(OracleError::Malformed("no output".to_string()))
        }
    }

    #[derive(Debug, Default)]
    struct Counting {
        calls: Cell<usize>,
    }

    impl LayoutOracle for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn advisory_layout(&self, graph: &Graph) -> Result<AdvisoryLayout, OracleError> {
            self.calls.set(self.calls.get() + 1);
            let mut advice = AdvisoryLayout::new();
            // Reverse reading order of the sheet's children
            for (i, child) in graph.children(graph.sheet()).iter().rev().enumerate() {
                advice.insert_node(*child, Point::new(i as f32 * 100.0, 10.0));
            }
            advice.set_canvas(Bounds::new(0.0, 0.0, 1000.0, 100.0));
            Ok(advice)
        }
    }

    fn graph() -> Graph {
        let mut builder = GraphBuilder::new(Id::new("sheet"));
        builder
            .add_vertex(Id::new("x"), None)
            .add_predicate(Id::new("p"), "P", vec![Id::new("x")])
            .add_predicate(Id::new("q"), "Q", vec![Id::new("x")])
            .place(Id::new("sheet"), Id::new("p"))
            .place(Id::new("sheet"), Id::new("x"))
            .place(Id::new("sheet"), Id::new("q"));
        builder.build().expect("valid graph")
    }

    #[test]
    fn test_oracle_failure_is_not_fatal() {
        let outcome = LayoutBuilder::default()
            .with_oracle(Broken)
            .layout(&graph())
            .expect("layout without advice");
        assert!(outcome.is_compliant());
    }

    #[test]
    fn test_advice_changes_order_not_validity() {
        let graph = graph();
        let plain = LayoutBuilder::default()
            .without_oracle()
            .layout(&graph)
            .expect("layout")
            .into_compliant()
            .expect("compliant");
        let advised = LayoutBuilder::default()
            .with_oracle(Counting::default())
            .layout(&graph)
            .expect("layout")
            .into_compliant()
            .expect("compliant");

        // Three children wrap into two columns. Creation order reads
        // [x, p | q]; the advice reads [q, p | x].
        let center = |layout: &Layout, id: &str| {
            layout.bounds(Id::new(id)).expect("placed").center()
        };
        assert!(center(&plain, "x").x() < center(&plain, "p").x());
        assert!(center(&plain, "p").y() < center(&plain, "q").y());
        assert!(center(&advised, "q").x() < center(&advised, "p").x());
        assert!(center(&advised, "p").y() < center(&advised, "x").y());
    }

    #[test]
    fn test_invalid_graph_is_rejected() {
        let mut builder = GraphBuilder::new(Id::new("sheet"));
        builder
            .add_predicate(Id::new("p"), "P", vec![Id::new("ghost")])
            .place(Id::new("sheet"), Id::new("p"));
        let graph = builder.build_unchecked();

        let error = LayoutBuilder::default().layout(&graph).unwrap_err();
        assert!(matches!(error, LigatureError::GraphInvalid(_)));
    }

    #[test]
    fn test_display_names_are_carried() {
        let mut names = DisplayNames::new();
        names.insert(Id::new("p"), "is happy");
        let outcome = LayoutBuilder::default()
            .layout_with_names(&graph(), names)
            .expect("layout");
        assert_eq!(
            outcome
                .layout()
                .display_names()
                .and_then(|names| names.get(Id::new("p"))),
            Some("is happy")
        );
    }
}
