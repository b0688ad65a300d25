//! Visibility-graph routing backend.

use log::trace;
use petgraph::{
    algo::astar,
    graph::{NodeIndex, UnGraph},
};

use ligature_core::geometry::{Bounds, Insets, Point};

use super::RoutingStrategy;

/// Shortest obstacle-avoiding paths over a visibility graph.
///
/// Nodes are the endpoints plus the corners of every (padded) obstacle;
/// two nodes are connected when the segment between them does not pass
/// through any obstacle interior. Paths are found with A* using Euclidean
/// distance as edge weight and heuristic, so the result is the shortest
/// polyline that touches obstacles only at corners and along edges.
#[derive(Debug, Clone, Default)]
pub struct VisibilityRouter {
    padding: f32,
}

impl VisibilityRouter {
    /// Creates a router that keeps `padding` clearance around obstacles.
    pub fn new(padding: f32) -> Self {
        Self {
            padding: padding.max(0.0),
        }
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Pads obstacles, relaxing the ones that would swallow an endpoint.
    ///
    /// An obstacle whose padded box contains an endpoint is used unpadded;
    /// one whose raw box already contains an endpoint is ignored, since no
    /// path could leave it.
    fn effective_obstacles(&self, start: Point, end: Point, obstacles: &[Bounds]) -> Vec<Bounds> {
        let swallows = |bounds: &Bounds| {
            bounds.contains_point_strictly(start) || bounds.contains_point_strictly(end)
        };
        obstacles
            .iter()
            .filter_map(|raw| {
                let padded = raw.add_padding(Insets::uniform(self.padding));
                if !swallows(&padded) {
                    Some(padded)
                } else if !swallows(raw) {
                    Some(*raw)
                } else {
                    None
                }
            })
            .collect()
    }
}

impl RoutingStrategy for VisibilityRouter {
    fn name(&self) -> &'static str {
        "visibility"
    }

    fn shortest_path(&self, start: Point, end: Point, obstacles: &[Bounds]) -> Option<Vec<Point>> {
        let obstacles = self.effective_obstacles(start, end, obstacles);
        let visible = |a: Point, b: Point| {
            !obstacles
                .iter()
                .any(|obstacle| obstacle.segment_crosses_interior(a, b))
        };

        if visible(start, end) {
            return Some(vec![start, end]);
        }

        let mut graph: UnGraph<Point, f32> = UnGraph::default();
        let source = graph.add_node(start);
        let target = graph.add_node(end);
        for (index, obstacle) in obstacles.iter().enumerate() {
            for corner in obstacle.corners() {
                let blocked = obstacles
                    .iter()
                    .enumerate()
                    .any(|(other, bounds)| {
                        other != index && bounds.contains_point_strictly(corner)
                    });
                if !blocked {
                    graph.add_node(corner);
                }
            }
        }

        let nodes: Vec<NodeIndex> = graph.node_indices().collect();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                let (pa, pb) = (graph[*a], graph[*b]);
                if visible(pa, pb) {
                    graph.add_edge(*a, *b, pa.distance(pb));
                }
            }
        }
        trace!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Visibility graph built"
        );

        let (_, path) = astar(
            &graph,
            source,
            |node| node == target,
            |edge| *edge.weight(),
            |node| graph[node].distance(end),
        )?;
        Some(path.into_iter().map(|node| graph[node]).collect())
    }
}
