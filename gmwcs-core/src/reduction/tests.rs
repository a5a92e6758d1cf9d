//! Unit tests for the reduction rules and the fixed-point driver.

use std::collections::BTreeSet;

use rstest::rstest;

use crate::{
    error::{GmwcsError, GraphError},
    graph::{EdgeId, Element, ElementId, Graph, NodeId},
};

use super::{
    Reducer, ReductionRule, bounded, local, parallel::Workers, remove_edges, remove_nodes,
};

fn graph_from(nodes: &[f64], edges: &[(usize, usize, f64)]) -> (Graph, Vec<NodeId>, Vec<EdgeId>) {
    let mut graph = Graph::new();
    let node_ids: Vec<NodeId> = nodes.iter().map(|&w| graph.add_node(w)).collect();
    let edge_ids = edges
        .iter()
        .map(|&(source, target, w)| {
            graph
                .add_edge(node_ids[source], node_ids[target], w)
                .expect("endpoints exist")
        })
        .collect();
    (graph, node_ids, edge_ids)
}

fn reducer(rules: impl IntoIterator<Item = ReductionRule>) -> Reducer {
    Reducer::new(1, 4, rules.into_iter().collect()).expect("configuration is valid")
}

#[rstest]
#[case(ReductionRule::Isolated, "isolated")]
#[case(ReductionRule::MergeNegative, "merge-negative")]
#[case(ReductionRule::MergePositive, "merge-positive")]
#[case(ReductionRule::Leaves, "leaves")]
#[case(ReductionRule::ConnectedNegativeSum, "connected-negative-sum")]
#[case(ReductionRule::NegativeEdges, "negative-edges")]
#[case(ReductionRule::NegativeVertices, "negative-vertices")]
#[case(ReductionRule::BoundedDegreeVertices, "bounded-degree-vertices")]
fn rule_names_are_stable(#[case] rule: ReductionRule, #[case] name: &str) {
    assert_eq!(rule.as_str(), name);
    assert_eq!(rule.to_string(), name);
}

#[test]
fn isolated_keeps_positive_and_connected_nodes() {
    let (graph, nodes, _) = graph_from(&[-1.0, 0.0, 2.0, -3.0, 1.0], &[(3, 4, 0.0)]);
    let isolated = local::isolated_vertices(&graph);
    assert_eq!(isolated, BTreeSet::from([nodes[0], nodes[1]]));
}

#[test]
fn removal_helpers_count_only_live_elements() {
    let (mut graph, nodes, edges) = graph_from(&[1.0, 1.0], &[(0, 1, 0.0)]);
    assert_eq!(remove_edges(&mut graph, &BTreeSet::from([edges[0]])), 1);
    assert_eq!(remove_edges(&mut graph, &BTreeSet::from([edges[0]])), 0);
    assert_eq!(
        remove_nodes(&mut graph, &BTreeSet::from([nodes[0], NodeId::new(9)])),
        1
    );
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn positive_leaf_folds_into_lighter_anchor() {
    let (mut graph, nodes, edges) = graph_from(&[-1.0, 5.0], &[(0, 1, 2.0)]);
    assert_eq!(local::fold_leaves(&mut graph), 1);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph[nodes[0]].weight(), 6.0);
    assert_eq!(graph.degree(nodes[0]), 0);
    assert_eq!(
        graph[nodes[0]].unit().absorbed(),
        &[ElementId::Node(nodes[1]), ElementId::Edge(edges[0])]
    );
}

#[rstest]
#[case::link_outweighs_leaf(&[3.0, 4.0], -5.0)]
#[case::neighbour_side_is_worse(&[-10.0, 5.0], 0.0)]
#[case::neighbour_and_link_both_negative(&[-10.0, 5.0], -1.0)]
fn positive_leaf_is_kept_when_it_may_stand_alone(#[case] weights: &[f64], #[case] link: f64) {
    let (mut graph, _, _) = graph_from(weights, &[(0, 1, link)]);
    assert_eq!(local::fold_leaves(&mut graph), 0);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn pendant_stays_the_optimum_when_folding_would_lose_it() {
    let (mut graph, nodes, edges) = graph_from(&[-10.0, 5.0], &[(0, 1, -1.0)]);
    assert_eq!(local::fold_leaves(&mut graph), 0);
    assert_eq!(graph[nodes[1]].weight(), 5.0);
    assert!(graph[nodes[1]].unit().absorbed().is_empty());
    assert!(graph.contains_edge(edges[0]));
    assert_eq!(graph[nodes[0]].weight(), -10.0);
}

#[test]
fn negative_leaf_is_dropped_or_folded() {
    let (mut dropping, nodes, _) = graph_from(&[-3.0, 4.0, -2.0], &[(0, 1, 1.0), (1, 2, -1.0)]);
    assert_eq!(local::fold_leaves(&mut dropping), 1);
    assert!(!dropping.contains_node(nodes[2]));
    assert_eq!(dropping[nodes[1]].weight(), 4.0);

    let (mut folding, nodes, _) = graph_from(&[-3.0, 4.0, -1.0], &[(0, 1, 1.0), (1, 2, 2.0)]);
    assert_eq!(local::fold_leaves(&mut folding), 1);
    assert!(!folding.contains_node(nodes[2]));
    assert_eq!(folding[nodes[1]].weight(), 5.0);
}

#[test]
fn merge_negative_rewires_first_edge() {
    let (mut graph, nodes, edges) = graph_from(&[2.0, -1.0, 3.0], &[(0, 1, -1.0), (1, 2, -2.0)]);
    assert_eq!(local::merge_negative(&mut graph).expect("graph is consistent"), 1);
    assert!(!graph.contains_node(nodes[1]));
    assert!(!graph.contains_edge(edges[1]));
    assert_eq!(graph.endpoints(edges[0]), Some((nodes[0], nodes[2])));
    assert_eq!(graph[edges[0]].weight(), -4.0);
    assert_eq!(
        graph[edges[0]].unit().absorbed(),
        &[ElementId::Node(nodes[1]), ElementId::Edge(edges[1])]
    );
}

#[test]
fn merge_negative_drops_node_between_parallel_edges() {
    let (mut graph, nodes, _) = graph_from(&[5.0, -1.0], &[(0, 1, -1.0), (0, 1, -2.0)]);
    assert_eq!(local::merge_negative(&mut graph).expect("graph is consistent"), 1);
    assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![nodes[0]]);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph[nodes[0]].weight(), 5.0);
}

#[test]
fn merge_negative_ignores_positive_edges() {
    let (mut graph, _, _) = graph_from(&[2.0, -1.0, 3.0], &[(0, 1, 1.0), (1, 2, -2.0)]);
    assert_eq!(local::merge_negative(&mut graph).expect("graph is consistent"), 0);
    assert_eq!(graph.node_count(), 3);
}

#[test]
fn merge_positive_contracts_profitable_edge() {
    let (mut graph, nodes, edges) = graph_from(&[1.0, 2.0], &[(0, 1, 0.5)]);
    assert_eq!(local::merge_positive(&mut graph).expect("graph is consistent"), 2);
    assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![nodes[0]]);
    assert_eq!(graph[nodes[0]].weight(), 3.5);
    assert_eq!(
        graph[nodes[0]].unit().absorbed(),
        &[ElementId::Node(nodes[1]), ElementId::Edge(edges[0])]
    );
}

#[test]
fn merge_positive_folds_positive_loops_and_drops_others() {
    let (mut graph, nodes, _) = graph_from(&[1.0], &[(0, 0, 2.0), (0, 0, -1.0)]);
    assert_eq!(local::merge_positive(&mut graph).expect("graph is consistent"), 2);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph[nodes[0]].weight(), 3.0);
}

#[test]
fn merge_positive_skips_edges_an_endpoint_cannot_afford() {
    let (mut graph, _, _) = graph_from(&[1.0, -3.0], &[(0, 1, 2.0)]);
    assert_eq!(local::merge_positive(&mut graph).expect("graph is consistent"), 0);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn contract_merges_non_negative_parallel_edges() {
    let (mut graph, nodes, edges) =
        graph_from(&[1.0, 1.0, -5.0], &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)]);
    assert_eq!(local::contract(&mut graph, edges[0]).expect("edge exists"), 3);
    assert_eq!(graph[nodes[0]].weight(), 3.0);
    assert_eq!(graph.edge_ids().collect::<Vec<_>>(), vec![edges[2]]);
    assert_eq!(graph[edges[2]].weight(), 5.0);
    assert_eq!(graph[edges[2]].unit().absorbed(), &[ElementId::Edge(edges[1])]);
}

#[rstest]
#[case::moved_edge_is_heavier(-1.0, -3.0, 1)]
#[case::kept_edge_is_heavier(-3.0, -1.0, 2)]
fn contract_keeps_heavier_negative_edge(
    #[case] moving: f64,
    #[case] existing: f64,
    #[case] survivor: usize,
) {
    let (mut graph, nodes, edges) =
        graph_from(&[1.0, 1.0, -5.0], &[(0, 1, 1.0), (1, 2, moving), (0, 2, existing)]);
    assert_eq!(local::contract(&mut graph, edges[0]).expect("edge exists"), 3);
    assert_eq!(graph.edge_ids().collect::<Vec<_>>(), vec![edges[survivor]]);
    assert_eq!(graph.endpoints(edges[survivor]), Some((nodes[0], nodes[2])));
    assert_eq!(graph[edges[survivor]].weight(), moving.max(existing));
}

#[test]
fn contract_rejects_missing_edge() {
    let (mut graph, _, _) = graph_from(&[1.0], &[]);
    let err = local::contract(&mut graph, EdgeId::new(3)).expect_err("edge is missing");
    assert_eq!(err, GraphError::MissingEdge { edge: EdgeId::new(3) });
}

#[rstest]
#[case::cheaper_bypass(-0.5, true)]
#[case::dearer_bypass(-7.0, false)]
fn negative_vertices_need_strictly_cheaper_bypass(#[case] bypass: f64, #[case] removed: bool) {
    let (graph, nodes, _) =
        graph_from(&[2.0, -1.0, 2.0], &[(0, 1, -1.0), (1, 2, -1.0), (0, 2, bypass)]);
    let expected = if removed {
        BTreeSet::from([nodes[1]])
    } else {
        BTreeSet::new()
    };
    assert_eq!(bounded::negative_vertices(&graph), expected);
}

#[test]
fn negative_vertices_skip_nodes_with_positive_edges() {
    let (graph, _, _) = graph_from(&[2.0, -1.0, 2.0], &[(0, 1, 1.0), (1, 2, -1.0), (0, 2, 0.0)]);
    assert!(bounded::negative_vertices(&graph).is_empty());
}

/// A heavy negative hub joined to three free nodes, optionally linked to each
/// other by cheap edges.
fn hub(linked: bool) -> (Graph, Vec<NodeId>) {
    let mut edges = vec![(0, 1, 0.0), (0, 2, 0.0), (0, 3, 0.0)];
    if linked {
        edges.extend([(1, 2, -1.0), (2, 3, -1.0), (1, 3, -1.0)]);
    }
    let (graph, nodes, _) = graph_from(&[-10.0, 0.0, 0.0, 0.0], &edges);
    (graph, nodes)
}

#[test]
fn bounded_degree_drops_hub_with_cheaper_links() {
    let (graph, nodes) = hub(true);
    let removable = bounded::bounded_degree_vertices(&graph, 4).expect("bounds are valid");
    assert_eq!(removable, BTreeSet::from([nodes[0]]));
}

#[test]
fn bounded_degree_keeps_hub_that_is_a_cut_vertex() {
    let (graph, _) = hub(false);
    let removable = bounded::bounded_degree_vertices(&graph, 4).expect("bounds are valid");
    assert!(removable.is_empty());
}

#[test]
fn bounded_degree_respects_the_degree_bound() {
    let (graph, _) = hub(true);
    assert!(
        bounded::bounded_degree_vertices(&graph, 2)
            .expect("bounds are valid")
            .is_empty()
    );
}

#[test]
fn connected_negative_sum_marks_dominated_fringe() {
    let (graph, nodes, _) =
        graph_from(&[5.0, 0.0, -10.0], &[(0, 1, 0.0), (0, 2, -1.0), (1, 2, -1.0)]);
    assert_eq!(
        bounded::connected_negative_sum(&graph),
        BTreeSet::from([nodes[2]])
    );
}

#[test]
fn connected_negative_sum_keeps_bridges_to_positive_nodes() {
    let (graph, _, _) = graph_from(&[5.0, -1.0, 10.0], &[(0, 1, -1.0), (1, 2, 0.0)]);
    assert!(bounded::connected_negative_sum(&graph).is_empty());
}

#[rstest]
#[case::single_worker(1)]
#[case::several_workers(3)]
fn negative_edges_flags_dominated_edges(#[case] threads: usize) {
    let (graph, _, edges) =
        graph_from(&[0.0, 0.0, 0.0], &[(0, 1, -1.0), (1, 2, -1.0), (0, 2, -5.0)]);
    let workers = Workers::new(threads).expect("thread count is valid");
    assert_eq!(workers.threads(), threads);
    assert_eq!(workers.negative_edges(&graph), BTreeSet::from([edges[2]]));
}

#[test]
fn workers_reject_zero_threads() {
    let err = Workers::new(0).expect_err("zero threads are invalid");
    assert_eq!(err, GmwcsError::InvalidThreadCount { got: 0 });
}

#[rstest]
#[case::isolated(ReductionRule::Isolated, 2)]
#[case::leaves(ReductionRule::Leaves, 1)]
#[case::merge_positive(ReductionRule::MergePositive, 2)]
fn apply_runs_a_single_rule(#[case] rule: ReductionRule, #[case] expected: usize) {
    let (mut graph, _, _) = graph_from(&[-1.0, 0.0, -2.0, 4.0], &[(2, 3, 3.0)]);
    let changed = reducer([rule]).apply(rule, &mut graph).expect("rule succeeds");
    assert_eq!(changed, expected);
}

#[test]
fn preprocess_reaches_a_fixed_point() {
    let (mut graph, nodes, _) = graph_from(&[-1.0, 5.0], &[(0, 1, 2.0)]);
    let engine = reducer(ReductionRule::DEFAULT_ORDER);
    let summary = engine.preprocess(&mut graph).expect("preprocessing succeeds");

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph[nodes[0]].weight(), 6.0);
    assert_eq!(summary.passes(), 2);
    assert_eq!(summary.changes(), 2);
    assert_eq!(summary.changes_for(ReductionRule::MergePositive), 2);
    assert_eq!(
        summary.per_rule().iter().map(|(_, n)| n).sum::<usize>(),
        summary.changes()
    );
    assert_eq!((summary.nodes_before(), summary.edges_before()), (2, 1));
    assert_eq!((summary.nodes_after(), summary.edges_after()), (1, 0));

    let again = engine.preprocess(&mut graph).expect("preprocessing succeeds");
    assert_eq!(again.passes(), 1);
    assert_eq!(again.changes(), 0);
}

#[test]
fn preprocess_without_rules_leaves_graph_untouched() {
    let (mut graph, _, _) = graph_from(&[-1.0, -1.0], &[(0, 1, -1.0)]);
    let summary = reducer([]).preprocess(&mut graph).expect("preprocessing succeeds");
    assert_eq!(summary.passes(), 1);
    assert_eq!(summary.changes(), 0);
    assert!(summary.per_rule().is_empty());
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn preprocess_empties_an_all_negative_graph() {
    let (mut graph, _, _) = graph_from(&[-1.0, -2.0, -3.0], &[(0, 1, -1.0), (1, 2, -1.0)]);
    reducer(ReductionRule::DEFAULT_ORDER)
        .preprocess(&mut graph)
        .expect("preprocessing succeeds");
    assert!(graph.is_empty());
}
