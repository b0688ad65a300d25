//! Hierarchical-cluster description of a graph handed to an oracle.

use ligature_core::{
    geometry::Size,
    graph::{ElementKind, Graph},
    identifier::Id,
};

use crate::{config::LayoutConfig, layout::phases::sizing};

/// A vertex or predicate as seen by an oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterNode {
    id: Id,
    kind: ElementKind,
    label: String,
    size: Size,
}

impl ClusterNode {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Relation name of a predicate, constant label of a vertex, or empty.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Intrinsic size as computed by element sizing.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// A container (the sheet or a cut) with its direct nodes and nested clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    nodes: Vec<ClusterNode>,
    clusters: Vec<Cluster>,
}

impl Cluster {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn nodes(&self) -> &[ClusterNode] {
        &self.nodes
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }
}

/// The cluster hierarchy of a graph plus one edge per incidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterTree {
    root: Cluster,
    edges: Vec<(Id, Id)>,
}

impl ClusterTree {
    /// Derives the cluster tree of a validated graph.
    ///
    /// The root cluster is the sheet; every cut becomes a nested cluster in
    /// creation order. Edges run from each vertex to each predicate that
    /// references it, in predicate creation and argument order.
    pub fn from_graph(graph: &Graph, config: &LayoutConfig) -> Self {
        let root = build_cluster(graph, graph.sheet(), config);
        let edges = graph
            .predicates()
            .flat_map(|predicate| {
                predicate
                    .arguments()
                    .iter()
                    .map(move |vertex| (*vertex, predicate.id()))
            })
            .collect();
        Self { root, edges }
    }

    /// The cluster of the sheet
    pub fn root(&self) -> &Cluster {
        &self.root
    }

    /// `(vertex, predicate)` pairs, one per incidence.
    pub fn edges(&self) -> &[(Id, Id)] {
        &self.edges
    }
}

fn build_cluster(graph: &Graph, container: Id, config: &LayoutConfig) -> Cluster {
    let mut nodes = Vec::new();
    let mut clusters = Vec::new();
    for child in graph.children(container) {
        if let Some(predicate) = graph.predicate(*child) {
            nodes.push(ClusterNode {
                id: *child,
                kind: ElementKind::Predicate,
                label: predicate.relation().to_string(),
                size: sizing::predicate_size(predicate, config),
            });
        } else if let Some(vertex) = graph.vertex(*child) {
            nodes.push(ClusterNode {
                id: *child,
                kind: ElementKind::Vertex,
                label: vertex.constant().unwrap_or_default().to_string(),
                size: sizing::vertex_size(config),
            });
        } else if graph.cut(*child).is_some() {
            clusters.push(build_cluster(graph, *child, config));
        }
    }
    Cluster {
        id: container,
        nodes,
        clusters,
    }
}
