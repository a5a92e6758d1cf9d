use gmwcs_core::{Graph, NodeId};
use proptest::prelude::*;

fn assemble(node_weights: &[f64], edges: &[(usize, usize, f64)]) -> Graph {
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = node_weights
        .iter()
        .map(|&weight| graph.add_node(weight))
        .collect();
    for &(source, target, weight) in edges {
        graph
            .add_edge(ids[source], ids[target], weight)
            .expect("endpoints exist");
    }
    graph
}

/// Small multigraphs with integer weights, including loops and parallel
/// edges.
pub fn arbitrary_graph(max_nodes: usize, max_edges: usize) -> impl Strategy<Value = Graph> {
    (1..=max_nodes).prop_flat_map(move |nodes| {
        (
            prop::collection::vec(-6i32..=6, nodes),
            prop::collection::vec((0..nodes, 0..nodes, -6i32..=6), 0..=max_edges),
        )
            .prop_map(|(node_weights, edges)| {
                let node_weights: Vec<f64> = node_weights.into_iter().map(f64::from).collect();
                let edges: Vec<_> = edges
                    .into_iter()
                    .map(|(source, target, weight)| (source, target, f64::from(weight)))
                    .collect();
                assemble(&node_weights, &edges)
            })
    })
}

/// Small multigraphs with arbitrary finite weights in `[-6, 6)`, including
/// loops and parallel edges.
pub fn arbitrary_float_graph(max_nodes: usize, max_edges: usize) -> impl Strategy<Value = Graph> {
    (1..=max_nodes).prop_flat_map(move |nodes| {
        (
            prop::collection::vec(-6.0f64..6.0, nodes),
            prop::collection::vec((0..nodes, 0..nodes, -6.0f64..6.0), 0..=max_edges),
        )
            .prop_map(|(node_weights, edges)| assemble(&node_weights, &edges))
    })
}
