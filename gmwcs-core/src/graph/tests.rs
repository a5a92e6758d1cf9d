//! Unit tests for the arena multigraph.

use std::collections::BTreeSet;

use rstest::rstest;

use crate::error::GraphError;

use super::{EdgeId, Element, ElementId, Graph, NodeId, element_order};

fn path(weights: &[f64], edges: &[f64]) -> (Graph, Vec<NodeId>, Vec<EdgeId>) {
    let mut graph = Graph::new();
    let nodes: Vec<NodeId> = weights.iter().map(|&w| graph.add_node(w)).collect();
    let edge_ids = edges
        .iter()
        .enumerate()
        .map(|(index, &w)| {
            graph
                .add_edge(nodes[index], nodes[index + 1], w)
                .expect("endpoints exist")
        })
        .collect();
    (graph, nodes, edge_ids)
}

#[test]
fn add_edge_rejects_missing_endpoint() {
    let mut graph = Graph::new();
    let a = graph.add_node(1.0);
    let ghost = NodeId::new(7);
    let err = graph.add_edge(a, ghost, 0.0).expect_err("endpoint is missing");
    assert_eq!(err, GraphError::MissingNode { node: ghost });
    assert_eq!(err.code().as_str(), "GRAPH_MISSING_NODE");
}

#[test]
fn removing_a_node_drops_incident_edges() {
    let (mut graph, nodes, edges) = path(&[1.0, 2.0, 3.0], &[0.5, 0.5]);
    let removed = graph.remove_node(nodes[1]).expect("node is present");
    assert_eq!(removed.weight(), 2.0);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.contains_edge(edges[0]));
    assert_eq!(graph.degree(nodes[0]), 0);
    assert!(graph.remove_node(nodes[1]).is_none());
}

#[test]
fn identifiers_are_never_reused() {
    let mut graph = Graph::new();
    let a = graph.add_node(1.0);
    graph.remove_node(a);
    let b = graph.add_node(1.0);
    assert_ne!(a, b);
    assert_eq!(graph.node_bound(), 2);
}

#[test]
fn parallel_edges_and_loops_are_kept() {
    let mut graph = Graph::new();
    let a = graph.add_node(0.0);
    let b = graph.add_node(0.0);
    let light = graph.add_edge(a, b, -2.0).expect("endpoints exist");
    let heavy = graph.add_edge(b, a, 3.0).expect("endpoints exist");
    let tie = graph.add_edge(a, b, 3.0).expect("endpoints exist");
    let looped = graph.add_edge(a, a, 1.0).expect("endpoints exist");

    assert_eq!(graph.degree(a), 4);
    assert_eq!(graph.neighbors(a), vec![b]);
    assert_eq!(graph.edges_between(a, b), vec![light, heavy, tie]);
    assert_eq!(graph.best_edge_between(a, b), Some(heavy));
    assert_eq!(graph.opposite(a, looped), Some(a));
    assert!(graph[looped].is_loop());
}

#[test]
fn rewire_moves_edge_and_keeps_history() {
    let (mut graph, nodes, edges) = path(&[1.0, 2.0, 3.0], &[0.5, 0.5]);
    graph
        .rewire_edge(edges[0], nodes[0], nodes[2])
        .expect("all endpoints exist");
    assert_eq!(graph.endpoints(edges[0]), Some((nodes[0], nodes[2])));
    assert_eq!(graph.degree(nodes[1]), 1);
    assert_eq!(graph.neighbors(nodes[2]), vec![nodes[1], nodes[0]]);

    let err = graph
        .rewire_edge(EdgeId::new(9), nodes[0], nodes[1])
        .expect_err("edge is missing");
    assert_eq!(err, GraphError::MissingEdge { edge: EdgeId::new(9) });
}

#[test]
fn absorb_preserves_total_weight_and_history() {
    let (mut graph, nodes, edges) = path(&[-1.0, 5.0], &[2.0]);
    let edge = graph.remove_edge(edges[0]).expect("edge is present");
    let leaf = graph.remove_node(nodes[1]).expect("node is present");
    let anchor = &mut graph[nodes[0]];
    anchor.absorb(leaf);
    anchor.absorb(edge);

    assert_eq!(anchor.weight(), 6.0);
    assert_eq!(
        anchor.unit().absorbed(),
        &[ElementId::Node(nodes[1]), ElementId::Edge(edges[0])]
    );
}

#[test]
fn absorb_carries_nested_history() {
    let mut graph = Graph::new();
    let a = graph.add_node(1.0);
    let b = graph.add_node(1.0);
    let c = graph.add_node(1.0);
    let inner = graph.remove_node(c).expect("node is present");
    graph[b].absorb(inner);
    let outer = graph.remove_node(b).expect("node is present");
    graph[a].absorb(outer);
    assert_eq!(graph[a].weight(), 3.0);
    assert_eq!(
        graph[a].unit().absorbed(),
        &[ElementId::Node(c), ElementId::Node(b)]
    );
}

#[test]
fn subgraph_keeps_identifiers_and_filters_edges() {
    let (graph, nodes, edges) = path(&[1.0, 2.0, 3.0, 4.0], &[0.1, 0.2, 0.3]);
    let keep: BTreeSet<NodeId> = [nodes[1], nodes[2], nodes[3]].into_iter().collect();

    let induced = graph.subgraph(&keep, None);
    assert_eq!(induced.node_count(), 3);
    assert_eq!(induced.edge_ids().collect::<Vec<_>>(), vec![edges[1], edges[2]]);
    assert_eq!(induced.weight_of(ElementId::Edge(edges[2])), Some(0.3));

    let allowed: BTreeSet<EdgeId> = [edges[0], edges[2]].into_iter().collect();
    let restricted = graph.subgraph(&keep, Some(&allowed));
    assert_eq!(restricted.edge_ids().collect::<Vec<_>>(), vec![edges[2]]);
    assert_eq!(restricted.degree(nodes[1]), 0);
}

#[test]
fn elements_list_nodes_before_edges() {
    let (graph, nodes, edges) = path(&[1.0, 2.0], &[0.5]);
    let elements: Vec<ElementId> = graph.elements().into_iter().collect();
    assert_eq!(
        elements,
        vec![
            ElementId::Node(nodes[0]),
            ElementId::Node(nodes[1]),
            ElementId::Edge(edges[0]),
        ]
    );
    assert_eq!(elements[2].to_string(), "E0");
}

#[rstest]
#[case::isolated(vec![], 3)]
#[case::chain(vec![(0, 1), (1, 2)], 1)]
#[case::pair(vec![(2, 0)], 2)]
fn components_follow_edges(#[case] links: Vec<(usize, usize)>, #[case] expected: usize) {
    let mut graph = Graph::new();
    let nodes: Vec<NodeId> = (0..3).map(|_| graph.add_node(0.0)).collect();
    for (source, target) in links {
        graph
            .add_edge(nodes[source], nodes[target], 0.0)
            .expect("endpoints exist");
    }
    let components = graph.connected_components();
    assert_eq!(components.len(), expected);
    assert_eq!(graph.is_connected(), expected == 1);
    assert!(components[0].contains(&nodes[0]));
}

#[test]
fn element_order_ranks_lightest_lowest_id_highest() {
    let mut graph = Graph::new();
    let heavy = graph.add_node(5.0);
    let light = graph.add_node(-1.0);
    let light_twin = graph.add_node(-1.0);
    let top = graph
        .node_ids()
        .max_by(|&l, &r| element_order(graph[l].unit(), graph[r].unit()));
    assert_eq!(top, Some(light));
    assert_ne!(top, Some(light_twin));
    assert_ne!(top, Some(heavy));
}
