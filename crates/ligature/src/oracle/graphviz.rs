//! Graphviz-backed layout oracle.
//!
//! The cluster tree is emitted as an undirected DOT graph in which every cut
//! is a `cluster_<id>` subgraph and every vertex and predicate is a fixed
//! size node. `dot -Tjson` is run on it and the JSON output is parsed by
//! [`parse_graphviz_json`].

use dot_generator::{attr, id};
use dot_structures::{
    Attribute, Edge, EdgeTy, Graph as DotGraph, GraphAttributes, Id, Node, NodeId, Stmt, Subgraph,
    Vertex,
};
use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec,
    printer::PrinterContext,
};
use log::{debug, trace};

use ligature_core::{graph::Graph, identifier::Id as ElementId};

use super::{
    AdvisoryLayout, Cluster, ClusterTree, LayoutOracle, OracleError, json::CLUSTER_PREFIX,
    parse_graphviz_json,
};
use crate::config::LayoutConfig;

/// Graphviz node sizes are given in inches.
const POINTS_PER_INCH: f32 = 72.0;

/// Layout oracle that runs the Graphviz `dot` program.
#[derive(Debug, Clone, Default)]
pub struct GraphvizOracle {
    config: LayoutConfig,
}

impl GraphvizOracle {
    /// Creates an oracle that sizes nodes with `config`.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Builds the DOT graph for a cluster tree.
    fn to_dot(&self, tree: &ClusterTree) -> DotGraph {
        let nodesep = self.config.sibling_spacing() / POINTS_PER_INCH;
        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(vec![
                attr!("compound", "true"),
                attr!("nodesep", nodesep),
            ])),
            Stmt::GAttribute(GraphAttributes::Node(vec![
                attr!("shape", "box"),
                attr!("fixedsize", "true"),
            ])),
        ];
        stmts.extend(cluster_stmts(tree.root(), &self.config));
        for (vertex, predicate) in tree.edges() {
            stmts.push(Stmt::Edge(Edge {
                ty: EdgeTy::Pair(Vertex::N(node_id(*vertex)), Vertex::N(node_id(*predicate))),
                attributes: vec![],
            }));
        }

        DotGraph::Graph {
            id: id!("ligature"),
            strict: false,
            stmts,
        }
    }
}

impl LayoutOracle for GraphvizOracle {
    fn name(&self) -> &'static str {
        "graphviz"
    }

    fn advisory_layout(&self, graph: &Graph) -> Result<AdvisoryLayout, OracleError> {
        let tree = ClusterTree::from_graph(graph, &self.config);
        let dot = self.to_dot(&tree);
        trace!(dot:?; "Running graphviz");

        let output = exec(
            dot,
            &mut PrinterContext::default(),
            vec![CommandArg::Format(Format::Json)],
        )?;
        let advice = parse_graphviz_json(&output)?;

        debug!(
            clusters = advice.cluster_count(),
            nodes = advice.node_count();
            "Graphviz advice received"
        );
        Ok(advice)
    }
}

/// Statements of the nodes and nested clusters directly inside `cluster`.
fn cluster_stmts(cluster: &Cluster, config: &LayoutConfig) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    for node in cluster.nodes() {
        let label = escape(node.label());
        let width = node.size().width() / POINTS_PER_INCH;
        let height = node.size().height() / POINTS_PER_INCH;
        stmts.push(Stmt::Node(Node {
            id: node_id(node.id()),
            attributes: vec![
                attr!("label", esc label),
                attr!("width", width),
                attr!("height", height),
            ],
        }));
    }
    for child in cluster.clusters() {
        let margin = config.cut_padding();
        let name = escape(&format!("{CLUSTER_PREFIX}{}", child.id()));
        let mut child_stmts = vec![Stmt::Attribute(attr!("margin", margin))];
        child_stmts.extend(cluster_stmts(child, config));
        stmts.push(Stmt::Subgraph(Subgraph {
            id: id!(esc name),
            stmts: child_stmts,
        }));
    }
    stmts
}

fn node_id(element: ElementId) -> NodeId {
    let name = escape(&element.to_name());
    NodeId(id!(esc name), None)
}

/// Escapes a string for use inside a quoted DOT identifier.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
