//! Prim's algorithm over a weight-biased edge cost.

use std::{
    cmp::{Ordering, Reverse},
    collections::{BTreeSet, BinaryHeap, HashSet},
};

use crate::graph::{EdgeId, Element, Graph, NodeId};

/// Maps an edge weight to a positive cost that falls as the weight grows.
pub(crate) fn edge_cost(weight: f64) -> f64 {
    1.0 / (1.0 + weight.exp())
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    cost: f64,
    edge: EdgeId,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.edge.cmp(&other.edge))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns the edges of a minimum spanning tree of the component containing
/// `root`. Cost ties are broken by the lower edge identifier.
pub(crate) fn spanning_tree(graph: &Graph, root: NodeId) -> BTreeSet<EdgeId> {
    let mut reached = HashSet::new();
    let mut tree = BTreeSet::new();
    let mut heap = BinaryHeap::new();
    if !graph.contains_node(root) {
        return tree;
    }
    reach(graph, root, &mut reached, &mut heap);
    while let Some(Reverse(Candidate { edge, .. })) = heap.pop() {
        let Some((source, target)) = graph.endpoints(edge) else {
            continue;
        };
        let next = match (reached.contains(&source), reached.contains(&target)) {
            (true, false) => target,
            (false, true) => source,
            _ => continue,
        };
        tree.insert(edge);
        reach(graph, next, &mut reached, &mut heap);
    }
    tree
}

fn reach(
    graph: &Graph,
    node: NodeId,
    reached: &mut HashSet<NodeId>,
    heap: &mut BinaryHeap<Reverse<Candidate>>,
) {
    reached.insert(node);
    for &edge in graph.incident_edges(node) {
        let Some(other) = graph.opposite(node, edge) else {
            continue;
        };
        if reached.contains(&other) {
            continue;
        }
        heap.push(Reverse(Candidate {
            cost: edge_cost(graph[edge].weight()),
            edge,
        }));
    }
}
