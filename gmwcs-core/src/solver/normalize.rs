//! Simple-graph view required by spanning-tree sampling.

use crate::graph::{EdgeId, Graph};

/// Keeps only the heaviest edge between each pair of nodes and drops every
/// self-loop. Returns the number of removed edges.
pub(crate) fn normalize(graph: &mut Graph) -> usize {
    let mut removed = 0;
    let nodes: Vec<_> = graph.node_ids().collect();
    for node in nodes {
        for other in graph.neighbors(node) {
            if other < node {
                continue;
            }
            let Some(kept) = graph.best_edge_between(node, other) else {
                continue;
            };
            for edge in graph.edges_between(node, other) {
                if edge != kept && graph.remove_edge(edge).is_some() {
                    removed += 1;
                }
            }
        }
    }
    let loops: Vec<EdgeId> = graph
        .edge_ids()
        .filter(|&edge| graph[edge].is_loop())
        .collect();
    for edge in loops {
        if graph.remove_edge(edge).is_some() {
            removed += 1;
        }
    }
    removed
}
