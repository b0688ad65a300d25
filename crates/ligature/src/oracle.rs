//! Advisory placement from an external layout tool.
//!
//! An oracle receives a hierarchical-cluster description of the graph (one
//! nested cluster per cut, one node per vertex and predicate) and returns
//! approximate cluster boxes and node centers. Its output is a hint only:
//! it may put predicates outside their cut, overlap boxes or drop nodes
//! entirely. The engine uses it to seed collision detection and to order
//! children, and the final geometry is always re-validated.

mod cluster;
#[cfg(feature = "graphviz")]
mod graphviz;
mod json;

pub use cluster::{Cluster, ClusterNode, ClusterTree};
#[cfg(feature = "graphviz")]
pub use graphviz::GraphvizOracle;
pub use json::parse_graphviz_json;

use std::io;

use indexmap::IndexMap;
use thiserror::Error;

use ligature_core::{
    geometry::{Bounds, Point},
    graph::Graph,
    identifier::Id,
};

/// Errors raised while obtaining advice.
///
/// None of them is fatal to a layout; the engine continues without advice.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to run layout tool: {0}")]
    Io(#[from] io::Error),

    #[error("malformed layout tool output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed layout tool output: {0}")]
    Malformed(String),
}

/// Approximate placement suggested by an oracle, in diagram coordinates
/// (origin top left, y down).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisoryLayout {
    canvas: Option<Bounds>,
    clusters: IndexMap<Id, Bounds>,
    nodes: IndexMap<Id, Point>,
}

impl AdvisoryLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overall drawing box, used as the sheet seed.
    pub fn set_canvas(&mut self, canvas: Bounds) {
        self.canvas = Some(canvas);
    }

    /// Records the suggested box of a cut.
    pub fn insert_cluster(&mut self, cut: Id, bounds: Bounds) {
        self.clusters.insert(cut, bounds);
    }

    /// Records the suggested center of a vertex or predicate.
    pub fn insert_node(&mut self, node: Id, center: Point) {
        self.nodes.insert(node, center);
    }

    pub fn canvas(&self) -> Option<Bounds> {
        self.canvas
    }

    pub fn cluster(&self, cut: Id) -> Option<Bounds> {
        self.clusters.get(&cut).copied()
    }

    pub fn node(&self, node: Id) -> Option<Point> {
        self.nodes.get(&node).copied()
    }

    /// Suggested reading position of any element: the node center, or the
    /// center of the cluster box.
    pub fn anchor(&self, element: Id) -> Option<Point> {
        self.node(element)
            .or_else(|| self.cluster(element).map(Bounds::center))
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.nodes.is_empty()
    }
}

/// A provider of advisory placement.
pub trait LayoutOracle: std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Computes advice for a validated graph.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] when the tool cannot be run or its output
    /// cannot be read.
    fn advisory_layout(&self, graph: &Graph) -> Result<AdvisoryLayout, OracleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_prefers_node_then_cluster_center() {
        let mut advice = AdvisoryLayout::new();
        assert!(advice.is_empty());

        advice.insert_cluster(Id::new("c"), Bounds::new(0.0, 0.0, 100.0, 50.0));
        advice.insert_node(Id::new("p"), Point::new(10.0, 10.0));

        assert_eq!(advice.anchor(Id::new("p")), Some(Point::new(10.0, 10.0)));
        assert_eq!(advice.anchor(Id::new("c")), Some(Point::new(50.0, 25.0)));
        assert_eq!(advice.anchor(Id::new("missing")), None);
        assert_eq!(advice.cluster_count(), 1);
        assert_eq!(advice.node_count(), 1);
    }
}
