//! Single-source shortest paths over the negative part of element weights.
//!
//! Walking through an element costs `-min(weight, 0)`: nothing for
//! non-negative elements and the weight deficit otherwise. Leaving an
//! intermediate node `u` along edge `e` costs the largest of the deficits of
//! `u + e`, `e`, and `u`; positive weight never discounts a step. Leaving the
//! source costs only the edge's deficit; the source's own deficit is added
//! when distances are reported.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::graph::{EdgeId, Element, Graph, NodeId};

/// Tolerance used whenever two path costs are compared.
pub const TOLERANCE: f64 = 1e-10;

/// Deficit of a single weight.
pub(crate) fn deficit(weight: f64) -> f64 {
    -weight.min(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Frontier {
    distance: f64,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-path bound oracle rooted at one source node.
///
/// The search is lazy and resumable: each query settles only as many nodes
/// as it needs, and later queries from the same oracle continue where the
/// previous one stopped.
///
/// # Examples
/// ```
/// use gmwcs_core::{BoundOracle, Graph};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(0.0);
/// let b = graph.add_node(-2.0);
/// let c = graph.add_node(0.0);
/// graph.add_edge(a, b, -1.0)?;
/// graph.add_edge(b, c, 0.0)?;
///
/// let mut oracle = BoundOracle::new(&graph, a);
/// let distances = oracle.negative_distances(&[c]);
/// assert_eq!(distances, vec![(c, -3.0)]);
/// # Ok::<(), gmwcs_core::GraphError>(())
/// ```
#[derive(Debug)]
pub struct BoundOracle<'g> {
    graph: &'g Graph,
    from: NodeId,
    excluded: Option<NodeId>,
    distance: Vec<f64>,
    settled: Vec<bool>,
    queue: BinaryHeap<Reverse<Frontier>>,
    started: bool,
}

impl<'g> BoundOracle<'g> {
    /// Creates an oracle rooted at `from`.
    #[must_use]
    pub fn new(graph: &'g Graph, from: NodeId) -> Self {
        let bound = graph.node_bound();
        Self {
            graph,
            from,
            excluded: None,
            distance: vec![f64::INFINITY; bound],
            settled: vec![false; bound],
            queue: BinaryHeap::new(),
            started: false,
        }
    }

    /// Creates an oracle that treats `excluded` as if it were not in the
    /// graph.
    #[must_use]
    pub fn avoiding(graph: &'g Graph, from: NodeId, excluded: NodeId) -> Self {
        let mut oracle = Self::new(graph, from);
        oracle.excluded = Some(excluded);
        oracle
    }

    /// Returns the source node.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> NodeId { self.from }

    /// Settles nodes until every target has a final distance or the reachable
    /// part of the graph is exhausted.
    pub fn solve(&mut self, targets: &[NodeId]) {
        if !self.started {
            self.started = true;
            if let Some(slot) = self.distance.get_mut(self.from.index()) {
                *slot = 0.0;
                self.queue.push(Reverse(Frontier {
                    distance: 0.0,
                    node: self.from,
                }));
            }
        }
        if self.all_settled(targets) {
            return;
        }

        while let Some(Reverse(Frontier { distance, node })) = self.queue.pop() {
            if self.is_settled(node) || distance > self.distance_to(node) {
                continue;
            }
            if let Some(flag) = self.settled.get_mut(node.index()) {
                *flag = true;
            }
            self.relax(node, distance);
            if targets.contains(&node) && self.all_settled(targets) {
                break;
            }
        }
    }

    fn relax(&mut self, current: NodeId, distance: f64) {
        let graph = self.graph;
        let node_weight = graph[current].weight();
        for adjacent in graph.neighbors(current) {
            if self.excluded == Some(adjacent) || self.is_settled(adjacent) {
                continue;
            }
            let Some(edge) = graph.best_edge_between(current, adjacent) else {
                continue;
            };
            let edge_weight = graph[edge].weight();
            let step = if current == self.from {
                deficit(edge_weight)
            } else {
                deficit(edge_weight + node_weight)
                    .max(deficit(edge_weight))
                    .max(deficit(node_weight))
            };
            let candidate = distance + step;
            if candidate < self.distance_to(adjacent) {
                if let Some(slot) = self.distance.get_mut(adjacent.index()) {
                    *slot = candidate;
                }
                self.queue.push(Reverse(Frontier {
                    distance: candidate,
                    node: adjacent,
                }));
            }
        }
    }

    /// Returns the tentative (or final, once settled) distance to `node`.
    #[must_use]
    pub fn distance_to(&self, node: NodeId) -> f64 {
        self.distance
            .get(node.index())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    fn is_settled(&self, node: NodeId) -> bool {
        self.settled.get(node.index()).copied().unwrap_or(false)
    }

    fn all_settled(&self, targets: &[NodeId]) -> bool {
        targets.iter().all(|&target| self.is_settled(target))
    }

    fn source_deficit(&self) -> f64 {
        deficit(self.graph[self.from].weight())
    }

    /// Returns, for each target, the negated path cost including the source's
    /// own deficit. Unreachable targets map to negative infinity.
    pub fn negative_distances(&mut self, targets: &[NodeId]) -> Vec<(NodeId, f64)> {
        self.solve(targets);
        let source = self.source_deficit();
        targets
            .iter()
            .map(|&target| (target, -(self.distance_to(target) + source)))
            .collect()
    }

    /// Returns the negative edges at the source that are never required
    /// because a strictly cheaper route to their far endpoint exists.
    pub fn negative_edges(&mut self, targets: &[NodeId]) -> Vec<EdgeId> {
        self.solve(targets);
        let graph = self.graph;
        graph
            .incident_edges(self.from)
            .iter()
            .copied()
            .filter(|&edge| {
                let weight = graph[edge].weight();
                let Some(end) = graph.opposite(self.from, edge) else {
                    return false;
                };
                weight < 0.0 && deficit(weight) > self.distance_to(end) + TOLERANCE
            })
            .collect()
    }

    /// Returns `true` when `candidate`, a neighbour of `dest`, can be dropped
    /// because routing through it is strictly worse than the best route from
    /// the source to `dest`.
    pub fn negative_vertex(&mut self, dest: NodeId, candidate: NodeId) -> bool {
        self.solve(&[dest, candidate]);
        let graph = self.graph;
        let Some(edge) = graph.best_edge_between(candidate, dest) else {
            return false;
        };
        let through_candidate = self.distance_to(candidate)
            + deficit(graph[edge].weight())
            + deficit(graph[candidate].weight());
        let best = self.distance_to(dest);
        best.is_finite() && (best - through_candidate).abs() > TOLERANCE
    }
}
