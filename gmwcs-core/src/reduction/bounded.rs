//! Reductions backed by shortest-path and spanning-tree bounds.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    bounds::{BoundOracle, DistanceMatrix, MstLowerBound},
    error::BoundError,
    graph::{Element, Graph, NodeId},
};

/// Non-positive degree-2 nodes with non-positive edges whose neighbours are
/// joined by a strictly cheaper route.
pub(crate) fn negative_vertices(graph: &Graph) -> BTreeSet<NodeId> {
    graph
        .node_ids()
        .filter(|&node| is_bypassed(graph, node))
        .collect()
}

fn is_bypassed(graph: &Graph, node: NodeId) -> bool {
    if graph[node].weight() > 0.0 || graph.degree(node) != 2 {
        return false;
    }
    if graph
        .incident_edges(node)
        .iter()
        .any(|&edge| graph[edge].weight() > 0.0 || graph[edge].is_loop())
    {
        return false;
    }
    let &[first, second] = graph.neighbors(node).as_slice() else {
        return false;
    };
    BoundOracle::new(graph, first).negative_vertex(second, node)
}

/// Non-positive nodes with between three and `max_degree` incident edges that
/// never pay for the connections they offer.
///
/// A degree bound of two falls back to [`negative_vertices`].
pub(crate) fn bounded_degree_vertices(
    graph: &Graph,
    max_degree: usize,
) -> Result<BTreeSet<NodeId>, BoundError> {
    if max_degree <= 2 {
        return Ok(negative_vertices(graph));
    }
    let mut removable = BTreeSet::new();
    for node in graph.node_ids() {
        let degree = graph.degree(node);
        if graph[node].weight() <= 0.0
            && (3..=max_degree).contains(&degree)
            && is_dominated(graph, node)?
        {
            removable.insert(node);
        }
    }
    Ok(removable)
}

/// Best case local gain of `node`: its weight, every positive edge, and the
/// heaviest edge when none is positive.
fn local_gain(graph: &Graph, node: NodeId) -> f64 {
    let weights = graph
        .incident_edges(node)
        .iter()
        .map(|&edge| graph[edge].weight());
    let positive: f64 = weights.clone().map(|weight| weight.max(0.0)).sum();
    let heaviest = weights.fold(f64::NEG_INFINITY, f64::max);
    graph[node].weight() + positive + heaviest.min(0.0)
}

fn is_dominated(graph: &Graph, node: NodeId) -> Result<bool, BoundError> {
    let gain = local_gain(graph, node);
    if gain >= 0.0 {
        return Ok(false);
    }
    let around = graph.neighbors(node);
    let mut distances: DistanceMatrix<NodeId> = BTreeMap::new();
    for &from in &around {
        let mut oracle = BoundOracle::avoiding(graph, from, node);
        distances.insert(from, oracle.negative_distances(&around).into_iter().collect());
    }

    let subsets: u32 = 1 << around.len();
    for mask in 0..subsets {
        if mask.count_ones() < 2 {
            continue;
        }
        let members: Vec<NodeId> = around
            .iter()
            .enumerate()
            .filter(|(position, _)| mask & (1 << position) != 0)
            .map(|(_, &member)| member)
            .collect();
        let restricted: DistanceMatrix<NodeId> = members
            .iter()
            .filter_map(|member| {
                let row = distances.get(member)?;
                let kept = row
                    .iter()
                    .filter(|(other, _)| members.contains(other))
                    .map(|(&other, &distance)| (other, distance))
                    .collect();
                Some((*member, kept))
            })
            .collect();
        if MstLowerBound::new(&restricted).solve()? <= gain {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Fringe nodes dominated by a small non-negative cluster grown around each
/// node.
///
/// Nodes already marked are skipped both as cluster seeds and as cluster
/// members.
pub(crate) fn connected_negative_sum(graph: &Graph) -> BTreeSet<NodeId> {
    let mut marked = BTreeSet::new();
    for node in graph.node_ids() {
        if !marked.contains(&node) {
            mark_dominated(graph, node, &mut marked);
        }
    }
    marked
}

struct Cluster {
    members: BTreeSet<NodeId>,
    bound: f64,
    fringe: BTreeSet<NodeId>,
}

const GROWTH_ROUNDS: usize = 2;

fn grow_cluster(graph: &Graph, seed: NodeId, marked: &BTreeSet<NodeId>) -> Cluster {
    let mut bound = graph[seed].weight().min(0.0);
    let mut members = BTreeSet::from([seed]);
    for _ in 0..GROWTH_ROUNDS {
        let frontier: Vec<NodeId> = members.iter().copied().collect();
        for member in frontier {
            for next in graph.neighbors(member) {
                if marked.contains(&next) || members.contains(&next) {
                    continue;
                }
                let Some(edge) = graph.best_edge_between(member, next) else {
                    continue;
                };
                let edge_weight = graph[edge].weight();
                let next_weight = graph[next].weight();
                if edge_weight + next_weight >= 0.0 {
                    bound += edge_weight.min(0.0) + next_weight.min(0.0);
                    members.insert(next);
                }
            }
        }
    }

    let mut fringe = BTreeSet::new();
    for &member in &members {
        for next in graph.neighbors(member) {
            if members.contains(&next) || marked.contains(&next) {
                continue;
            }
            fringe.insert(next);
            if let Some(edge) = graph.best_edge_between(next, member) {
                bound += graph[edge].weight().min(0.0);
            }
        }
    }
    Cluster {
        members,
        bound,
        fringe,
    }
}

fn mark_dominated(graph: &Graph, seed: NodeId, marked: &mut BTreeSet<NodeId>) {
    let Cluster {
        members,
        bound,
        fringe,
    } = grow_cluster(graph, seed, marked);
    for &member in &members {
        for candidate in graph.neighbors(member) {
            if members.contains(&candidate) {
                continue;
            }
            let best: f64 = graph[candidate].weight()
                + graph
                    .incident_edges(candidate)
                    .iter()
                    .map(|&edge| graph[edge].weight().max(0.0))
                    .sum::<f64>();
            if best >= 0.0 || best >= bound {
                continue;
            }
            let covered = graph
                .neighbors(candidate)
                .into_iter()
                .filter(|other| !members.contains(other))
                .all(|other| fringe.contains(&other));
            if covered {
                marked.insert(candidate);
            }
        }
    }
}
