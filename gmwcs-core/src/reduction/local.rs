//! Reductions that only inspect a node's immediate surroundings.

use std::collections::BTreeSet;

use crate::{
    error::GraphError,
    graph::{EdgeId, Element, Graph, NodeId, element_order},
};

/// Non-positive nodes without incident edges.
pub(crate) fn isolated_vertices(graph: &Graph) -> BTreeSet<NodeId> {
    graph
        .node_ids()
        .filter(|&node| graph[node].weight() <= 0.0 && graph.degree(node) == 0)
        .collect()
}

/// Folds every pendant node except the anchor into its neighbour when the
/// pendant and its edge are jointly non-negative, and drops it otherwise.
///
/// The anchor is the greatest node under [`element_order`]: the lightest node,
/// lowest identifier first. A positive pendant is only touched when the
/// neighbour side still offers at least its own weight on its own, since the
/// pendant alone may be the best answer. Folds are applied as they are found,
/// so degrees are re-checked for every pendant.
pub(crate) fn fold_leaves(graph: &mut Graph) -> usize {
    let anchor = graph
        .node_ids()
        .max_by(|&left, &right| element_order(graph[left].unit(), graph[right].unit()));
    let leaves: Vec<NodeId> = graph
        .node_ids()
        .filter(|&node| graph.degree(node) == 1)
        .collect();

    let mut changes = 0;
    for leaf in leaves {
        if Some(leaf) == anchor || graph.degree(leaf) != 1 {
            continue;
        }
        let Some(&edge) = graph.incident_edges(leaf).first() else {
            continue;
        };
        let Some(neighbour) = graph.opposite(leaf, edge).filter(|&other| other != leaf) else {
            continue;
        };
        let own = graph[leaf].weight();
        let link = graph[edge].weight();
        let folds = own + link >= 0.0;
        if own > 0.0 && !(folds && graph[neighbour].weight() + link >= 0.0) {
            continue;
        }
        let (Some(edge_record), Some(leaf_record)) =
            (graph.remove_edge(edge), graph.remove_node(leaf))
        else {
            continue;
        };
        if folds {
            let target = &mut graph[neighbour];
            target.absorb(leaf_record);
            target.absorb(edge_record);
        }
        changes += 1;
    }
    changes
}

/// Collapses each non-positive degree-2 node whose edges are both
/// non-positive.
///
/// With distinct neighbours the first edge is rewired between them and
/// absorbs the node and the second edge; otherwise the node and both edges
/// are dropped.
pub(crate) fn merge_negative(graph: &mut Graph) -> Result<usize, GraphError> {
    let mut changes = 0;
    let candidates: Vec<NodeId> = graph.node_ids().collect();
    for node in candidates {
        let Some(record) = graph.node(node) else {
            continue;
        };
        if record.weight() > 0.0 || graph.degree(node) != 2 {
            continue;
        }
        let &[first, second] = graph.incident_edges(node) else {
            continue;
        };
        if graph[first].weight() > 0.0
            || graph[second].weight() > 0.0
            || graph[first].is_loop()
            || graph[second].is_loop()
        {
            continue;
        }
        let (Some(left), Some(right)) = (graph.opposite(node, first), graph.opposite(node, second))
        else {
            continue;
        };
        if left == right {
            graph.remove_node(node);
        } else {
            let Some(second_record) = graph.remove_edge(second) else {
                continue;
            };
            graph.rewire_edge(first, left, right)?;
            let Some(node_record) = graph.remove_node(node) else {
                continue;
            };
            let merged = &mut graph[first];
            merged.absorb(node_record);
            merged.absorb(second_record);
        }
        changes += 1;
    }
    Ok(changes)
}

/// Folds positive self-loops, drops the rest, and contracts every edge whose
/// inclusion never lowers either endpoint's total.
pub(crate) fn merge_positive(graph: &mut Graph) -> Result<usize, GraphError> {
    let mut changes = 0;
    let candidates: Vec<EdgeId> = graph.edge_ids().collect();
    for edge in candidates {
        let Some(record) = graph.edge(edge) else {
            continue;
        };
        let weight = record.weight();
        let (source, target) = record.ends();
        if source == target {
            if let Some(looped) = graph.remove_edge(edge)
                && weight > 0.0
            {
                graph[source].absorb(looped);
            }
            changes += 1;
        } else if weight >= 0.0
            && weight + graph[source].weight() >= 0.0
            && weight + graph[target].weight() >= 0.0
        {
            changes += contract(graph, edge)?;
        }
    }
    Ok(changes)
}

/// Contracts `edge`, merging its second endpoint into the first.
///
/// Edges of the absorbed endpoint move to the surviving one. When the
/// surviving endpoint already reaches the same neighbour, two non-negative
/// edges merge; otherwise only the heavier edge is kept. Edges that would
/// become self-loops are folded in when non-negative and dropped otherwise.
/// Returns the number of elements removed; self-loops are left untouched.
pub(crate) fn contract(graph: &mut Graph, edge: EdgeId) -> Result<usize, GraphError> {
    let (main, aux) = graph.endpoints(edge).ok_or(GraphError::MissingEdge { edge })?;
    if main == aux {
        return Ok(0);
    }
    let mut removed = 2;
    let moving: Vec<EdgeId> = graph
        .incident_edges(aux)
        .iter()
        .copied()
        .filter(|&other| other != edge)
        .collect();
    for other in moving {
        let Some(opposite) = graph.opposite(aux, other) else {
            continue;
        };
        let weight = graph[other].weight();
        if opposite == aux || opposite == main {
            if let Some(record) = graph.remove_edge(other)
                && weight >= 0.0
            {
                graph[main].absorb(record);
            }
            removed += 1;
            continue;
        }
        match graph.best_edge_between(main, opposite) {
            None => graph.rewire_edge(other, main, opposite)?,
            Some(kept) if weight >= 0.0 && graph[kept].weight() >= 0.0 => {
                if let Some(record) = graph.remove_edge(other) {
                    graph[kept].absorb(record);
                }
                removed += 1;
            }
            Some(kept) if graph[kept].weight() <= weight => {
                graph.remove_edge(kept);
                graph.rewire_edge(other, main, opposite)?;
                removed += 1;
            }
            Some(_) => {
                graph.remove_edge(other);
                removed += 1;
            }
        }
    }
    let contracted = graph
        .remove_edge(edge)
        .ok_or(GraphError::MissingEdge { edge })?;
    let absorbed = graph
        .remove_node(aux)
        .ok_or(GraphError::MissingNode { node: aux })?;
    let survivor = &mut graph[main];
    survivor.absorb(absorbed);
    survivor.absorb(contracted);
    Ok(removed)
}
