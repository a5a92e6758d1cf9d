//! Arena multigraph with node and edge weights.
//!
//! Nodes and edges live in slot vectors addressed by stable identifiers.
//! Removing an element empties its slot; identifiers are never reused, and
//! [`Graph::subgraph`] keeps them unchanged so element sets computed on a
//! subgraph still name elements of the parent graph. Parallel edges and
//! self-loops are allowed.

mod components;
mod element;
mod union_find;

#[cfg(test)]
mod tests;

use std::{
    collections::BTreeSet,
    ops::{Index, IndexMut},
};

use crate::error::GraphError;

pub use self::element::{Edge, Element, ElementId, Node, Unit};
pub(crate) use self::element::element_order;

/// Stable identifier of a node slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Stable identifier of an edge slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Wraps a raw slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Undirected, weighted multigraph.
///
/// # Examples
/// ```
/// use gmwcs_core::{Element, Graph};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(-1.0);
/// let b = graph.add_node(5.0);
/// let e = graph.add_edge(a, b, 2.0)?;
/// assert_eq!(graph.degree(a), 1);
/// assert_eq!(graph.opposite(a, e), Some(b));
/// assert_eq!(graph[b].weight(), 5.0);
/// # Ok::<(), gmwcs_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    node_count: usize,
    edge_count: usize,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with the given weight and returns its identifier.
    pub fn add_node(&mut self, weight: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(id, weight)));
        self.node_count += 1;
        id
    }

    /// Adds an edge between `source` and `target`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingNode`] when either endpoint is absent.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: f64,
    ) -> Result<EdgeId, GraphError> {
        self.require_node(source)?;
        self.require_node(target)?;
        let id = EdgeId(self.edges.len());
        self.edges
            .push(Some(Edge::new(id, weight, (source, target))));
        self.edge_count += 1;
        self.attach(id, source, target);
        Ok(id)
    }

    /// Returns the number of live nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of live edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns one past the largest node index ever allocated.
    #[must_use]
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Returns the node record for `id` if it is still present.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable variant of [`Self::node`].
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns the edge record for `id` if it is still present.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable variant of [`Self::edge`].
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns `true` when the node is present.
    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns `true` when the edge is present.
    #[must_use]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Iterates live node identifiers in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeId(index))
    }

    /// Iterates live edge identifiers in ascending order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| EdgeId(index))
    }

    /// Returns every live element, nodes first.
    #[must_use]
    pub fn elements(&self) -> BTreeSet<ElementId> {
        self.node_ids()
            .map(ElementId::from)
            .chain(self.edge_ids().map(ElementId::from))
            .collect()
    }

    /// Returns the weight of a live element, or `None` if it was removed.
    #[must_use]
    pub fn weight_of(&self, id: ElementId) -> Option<f64> {
        match id {
            ElementId::Node(node) => self.node(node).map(Element::weight),
            ElementId::Edge(edge) => self.edge(edge).map(Element::weight),
        }
    }

    /// Returns the payload of a live element.
    #[must_use]
    pub fn unit_of(&self, id: ElementId) -> Option<&Unit> {
        match id {
            ElementId::Node(node) => self.node(node).map(Element::unit),
            ElementId::Edge(edge) => self.edge(edge).map(Element::unit),
        }
    }

    /// Returns the edges incident to `node`; self-loops appear once.
    #[must_use]
    pub fn incident_edges(&self, node: NodeId) -> &[EdgeId] {
        self.node(node).map_or(&[], |record| record.incident.as_slice())
    }

    /// Returns the number of incident edges, counting parallel edges.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.incident_edges(node).len()
    }

    /// Returns the endpoints of `edge`.
    #[must_use]
    pub fn endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edge(edge).map(Edge::ends)
    }

    /// Returns the endpoint of `edge` that is not `node`.
    ///
    /// For a self-loop the opposite endpoint is `node` itself.
    #[must_use]
    pub fn opposite(&self, node: NodeId, edge: EdgeId) -> Option<NodeId> {
        let (source, target) = self.endpoints(edge)?;
        if source == node {
            Some(target)
        } else if target == node {
            Some(source)
        } else {
            None
        }
    }

    /// Returns the distinct neighbours of `node` in first-seen order,
    /// excluding `node` itself.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let mut seen = Vec::new();
        for &edge in self.incident_edges(node) {
            if let Some(other) = self.opposite(node, edge)
                && other != node
                && !seen.contains(&other)
            {
                seen.push(other);
            }
        }
        seen
    }

    /// Returns every edge joining `left` and `right`.
    #[must_use]
    pub fn edges_between(&self, left: NodeId, right: NodeId) -> Vec<EdgeId> {
        self.incident_edges(left)
            .iter()
            .copied()
            .filter(|&edge| self.opposite(left, edge) == Some(right))
            .collect()
    }

    /// Returns the heaviest edge joining `left` and `right`, preferring the
    /// lowest identifier on ties.
    #[must_use]
    pub fn best_edge_between(&self, left: NodeId, right: NodeId) -> Option<EdgeId> {
        self.edges_between(left, right)
            .into_iter()
            .filter_map(|edge| self.edge(edge).map(|record| (edge, record.weight())))
            .reduce(|best, candidate| {
                if candidate.1 > best.1 || (candidate.1 == best.1 && candidate.0 < best.0) {
                    candidate
                } else {
                    best
                }
            })
            .map(|(edge, _)| edge)
    }

    /// Removes `node` and all edges incident to it, returning the node record.
    pub fn remove_node(&mut self, node: NodeId) -> Option<Node> {
        let incident = self.node(node)?.incident.clone();
        for edge in incident {
            self.remove_edge(edge);
        }
        let record = self.nodes.get_mut(node.0).and_then(Option::take)?;
        self.node_count -= 1;
        Some(record)
    }

    /// Removes `edge`, returning its record.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Option<Edge> {
        let record = self.edges.get_mut(edge.0).and_then(Option::take)?;
        self.edge_count -= 1;
        let (source, target) = record.ends;
        self.detach(edge, source);
        if target != source {
            self.detach(edge, target);
        }
        Some(record)
    }

    /// Moves `edge` so that it joins `source` and `target`, keeping its
    /// identifier, weight, and history.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingEdge`] or [`GraphError::MissingNode`]
    /// when the edge or either endpoint is absent.
    pub fn rewire_edge(
        &mut self,
        edge: EdgeId,
        source: NodeId,
        target: NodeId,
    ) -> Result<(), GraphError> {
        self.require_node(source)?;
        self.require_node(target)?;
        let (old_source, old_target) = self
            .endpoints(edge)
            .ok_or(GraphError::MissingEdge { edge })?;
        self.detach(edge, old_source);
        if old_target != old_source {
            self.detach(edge, old_target);
        }
        if let Some(record) = self.edge_mut(edge) {
            record.ends = (source, target);
        }
        self.attach(edge, source, target);
        Ok(())
    }

    /// Builds the subgraph induced by `nodes`, optionally restricted to the
    /// given `edges`. Identifiers, weights, and histories are preserved.
    #[must_use]
    pub fn subgraph(&self, nodes: &BTreeSet<NodeId>, edges: Option<&BTreeSet<EdgeId>>) -> Self {
        let mut graph = Self {
            nodes: vec![None; self.nodes.len()],
            edges: vec![None; self.edges.len()],
            node_count: 0,
            edge_count: 0,
        };
        for &id in nodes {
            if let (Some(record), Some(slot)) = (self.node(id), graph.nodes.get_mut(id.0)) {
                *slot = Some(Node {
                    unit: record.unit.clone(),
                    incident: Vec::new(),
                });
                graph.node_count += 1;
            }
        }
        for id in self.edge_ids() {
            if edges.is_some_and(|allowed| !allowed.contains(&id)) {
                continue;
            }
            let Some(record) = self.edge(id) else {
                continue;
            };
            let (source, target) = record.ends;
            if !graph.contains_node(source) || !graph.contains_node(target) {
                continue;
            }
            if let Some(slot) = graph.edges.get_mut(id.0) {
                *slot = Some(record.clone());
                graph.edge_count += 1;
                graph.attach(id, source, target);
            }
        }
        graph
    }

    fn require_node(&self, node: NodeId) -> Result<(), GraphError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(GraphError::MissingNode { node })
        }
    }

    fn attach(&mut self, edge: EdgeId, source: NodeId, target: NodeId) {
        if let Some(record) = self.node_mut(source) {
            record.incident.push(edge);
        }
        if target != source
            && let Some(record) = self.node_mut(target)
        {
            record.incident.push(edge);
        }
    }

    fn detach(&mut self, edge: EdgeId, node: NodeId) {
        if let Some(record) = self.node_mut(node) {
            record.incident.retain(|&incident| incident != edge);
        }
    }
}

impl Index<NodeId> for Graph {
    type Output = Node;

    /// # Panics
    /// Panics when the node has been removed.
    fn index(&self, id: NodeId) -> &Node {
        match self.node(id) {
            Some(node) => node,
            None => panic!("node {} is not present in the graph", id.0),
        }
    }
}

impl IndexMut<NodeId> for Graph {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.node_mut(id) {
            Some(node) => node,
            None => panic!("node {} is not present in the graph", id.0),
        }
    }
}

impl Index<EdgeId> for Graph {
    type Output = Edge;

    /// # Panics
    /// Panics when the edge has been removed.
    fn index(&self, id: EdgeId) -> &Edge {
        match self.edge(id) {
            Some(edge) => edge,
            None => panic!("edge {} is not present in the graph", id.0),
        }
    }
}

impl IndexMut<EdgeId> for Graph {
    fn index_mut(&mut self, id: EdgeId) -> &mut Edge {
        match self.edge_mut(id) {
            Some(edge) => edge,
            None => panic!("edge {} is not present in the graph", id.0),
        }
    }
}
