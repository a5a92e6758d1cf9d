//! Exact maximum weight connected subgraph on a tree.
//!
//! Every node gets two values: `with_root`, the best connected set that must
//! contain the node and otherwise lies in its subtree, and `best`, the best
//! connected set anywhere in the subtree (possibly empty). A child branch is
//! attached to `with_root` only when it does not lower the total. The
//! traversal uses an explicit stack, so deep trees cannot overflow the call
//! stack.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::graph::{EdgeId, Element, ElementId, Graph, NodeId};

#[derive(Clone, Debug, Default)]
struct Record {
    with_root: f64,
    attached: Vec<(EdgeId, NodeId)>,
    best: f64,
    best_anchor: Option<NodeId>,
}

/// The optimum found on one tree.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TreeSolution {
    value: f64,
    elements: BTreeSet<ElementId>,
}

impl TreeSolution {
    #[rustfmt::skip]
    pub(crate) fn value(&self) -> f64 { self.value }

    pub(crate) fn into_elements(self) -> BTreeSet<ElementId> {
        self.elements
    }

    #[cfg(test)]
    pub(crate) fn nodes(&self) -> BTreeSet<NodeId> {
        self.elements.iter().filter_map(|id| id.as_node()).collect()
    }

    #[cfg(test)]
    pub(crate) fn edges(&self) -> BTreeSet<EdgeId> {
        self.elements.iter().filter_map(|id| id.as_edge()).collect()
    }
}

/// Solves the tree formed by the `tree` edges of `graph` around `root`.
///
/// `tree` must be acyclic on the component of `root`; edges outside it and
/// other components are ignored. Work and memory scale with the tree, not
/// with the whole graph.
pub(crate) fn solve_tree(graph: &Graph, root: NodeId, tree: &BTreeSet<EdgeId>) -> TreeSolution {
    if !graph.contains_node(root) {
        return TreeSolution {
            value: 0.0,
            elements: BTreeSet::new(),
        };
    }
    let (order, parent_edge) = preorder(graph, root, tree);
    let mut records: HashMap<NodeId, Record> = HashMap::with_capacity(order.len());

    for &node in order.iter().rev() {
        let mut record = Record {
            with_root: graph[node].weight(),
            ..Record::default()
        };
        let mut best_child = (0.0, None);
        for &edge in graph.incident_edges(node) {
            let Some(child) = graph
                .opposite(node, edge)
                .filter(|child| parent_edge.get(child) == Some(&edge))
            else {
                continue;
            };
            let Some(child_record) = records.get(&child) else {
                continue;
            };
            if child_record.best > best_child.0 {
                best_child = (child_record.best, child_record.best_anchor);
            }
            let branch = child_record.with_root + graph[edge].weight();
            if branch >= 0.0 {
                record.with_root += branch;
                record.attached.push((edge, child));
            }
        }
        (record.best, record.best_anchor) = if best_child.0 > record.with_root {
            best_child
        } else {
            (record.with_root, Some(node))
        };
        records.insert(node, record);
    }

    let (value, anchor) = records
        .get(&root)
        .map_or((0.0, None), |record| (record.best, record.best_anchor));
    TreeSolution {
        value,
        elements: collect_rooted(&records, anchor),
    }
}

/// Nodes reachable from `root` over `tree` edges in depth-first preorder,
/// plus the edge leading to each node's parent.
fn preorder(
    graph: &Graph,
    root: NodeId,
    tree: &BTreeSet<EdgeId>,
) -> (Vec<NodeId>, HashMap<NodeId, EdgeId>) {
    let mut parent_edge = HashMap::new();
    let mut visited = HashSet::from([root]);
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        order.push(node);
        for &edge in graph.incident_edges(node) {
            if !tree.contains(&edge) {
                continue;
            }
            let Some(next) = graph.opposite(node, edge) else {
                continue;
            };
            if !visited.insert(next) {
                continue;
            }
            parent_edge.insert(next, edge);
            stack.push(next);
        }
    }
    (order, parent_edge)
}

fn collect_rooted(records: &HashMap<NodeId, Record>, anchor: Option<NodeId>) -> BTreeSet<ElementId> {
    let mut elements = BTreeSet::new();
    let mut pending: Vec<NodeId> = anchor.into_iter().collect();
    while let Some(node) = pending.pop() {
        elements.insert(ElementId::Node(node));
        let Some(record) = records.get(&node) else {
            continue;
        };
        for &(edge, child) in &record.attached {
            elements.insert(ElementId::Edge(edge));
            pending.push(child);
        }
    }
    elements
}
