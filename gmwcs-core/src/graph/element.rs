//! Weighted graph elements.
//!
//! Nodes and edges share a [`Unit`] payload carrying the element's identifier,
//! its current weight, and the identifiers of every element folded into it by
//! a reduction. The [`Element`] trait gives both kinds a common surface so
//! reductions can merge a node into an edge, or the reverse, without caring
//! which kind they hold.

use std::fmt;

use super::{EdgeId, NodeId};

/// Identifies a node or an edge of a [`crate::Graph`].
///
/// Nodes order before edges; within a kind, identifiers order numerically.
///
/// # Examples
/// ```
/// use gmwcs_core::{EdgeId, ElementId, NodeId};
///
/// let node = ElementId::from(NodeId::new(3));
/// let edge = ElementId::from(EdgeId::new(0));
/// assert!(node < edge);
/// assert_eq!(node.as_node(), Some(NodeId::new(3)));
/// assert_eq!(edge.as_node(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    /// A node identifier.
    Node(NodeId),
    /// An edge identifier.
    Edge(EdgeId),
}

impl ElementId {
    /// Returns the node identifier when this element is a node.
    #[must_use]
    pub const fn as_node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Edge(_) => None,
        }
    }

    /// Returns the edge identifier when this element is an edge.
    #[must_use]
    pub const fn as_edge(self) -> Option<EdgeId> {
        match self {
            Self::Node(_) => None,
            Self::Edge(id) => Some(id),
        }
    }
}

impl From<NodeId> for ElementId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<EdgeId> for ElementId {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "N{}", id.index()),
            Self::Edge(id) => write!(f, "E{}", id.index()),
        }
    }
}

/// Weight and provenance shared by nodes and edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: ElementId,
    weight: f64,
    absorbed: Vec<ElementId>,
}

impl Unit {
    pub(crate) fn new(id: ElementId, weight: f64) -> Self {
        Self {
            id,
            weight,
            absorbed: Vec::new(),
        }
    }

    /// Returns the identifier of the element carrying this unit.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> ElementId { self.id }

    /// Returns the current weight, including everything absorbed so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }

    /// Returns the elements folded into this one, oldest first.
    #[must_use]
    #[rustfmt::skip]
    pub fn absorbed(&self) -> &[ElementId] { &self.absorbed }

    /// Folds `other` into this unit.
    ///
    /// The weight grows by the total weight of `other` and the history gains
    /// `other` together with everything `other` had absorbed.
    pub fn absorb(&mut self, other: Self) {
        let Self {
            id,
            weight,
            absorbed,
        } = other;
        self.weight += weight;
        self.absorbed.extend(absorbed);
        self.absorbed.push(id);
    }
}

/// Capability shared by [`Node`] and [`Edge`].
pub trait Element {
    /// Borrows the element's payload.
    fn unit(&self) -> &Unit;

    /// Mutably borrows the element's payload.
    fn unit_mut(&mut self) -> &mut Unit;

    /// Returns the element's current weight.
    fn weight(&self) -> f64 {
        self.unit().weight()
    }

    /// Returns the element's identifier.
    fn id(&self) -> ElementId {
        self.unit().id()
    }

    /// Returns the element's numeric identifier.
    fn num(&self) -> usize {
        match self.id() {
            ElementId::Node(id) => id.index(),
            ElementId::Edge(id) => id.index(),
        }
    }

    /// Folds another (already detached) element into this one.
    fn absorb(&mut self, other: impl Element + Into<Unit>)
    where
        Self: Sized,
    {
        self.unit_mut().absorb(other.into());
    }
}

/// A weighted node record.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(super) unit: Unit,
    pub(super) incident: Vec<EdgeId>,
}

impl Node {
    pub(super) fn new(id: NodeId, weight: f64) -> Self {
        Self {
            unit: Unit::new(ElementId::Node(id), weight),
            incident: Vec::new(),
        }
    }
}

impl Element for Node {
    fn unit(&self) -> &Unit {
        &self.unit
    }

    fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }
}

impl From<Node> for Unit {
    fn from(node: Node) -> Self {
        node.unit
    }
}

/// A weighted, undirected edge record.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub(super) unit: Unit,
    pub(super) ends: (NodeId, NodeId),
}

impl Edge {
    pub(super) fn new(id: EdgeId, weight: f64, ends: (NodeId, NodeId)) -> Self {
        Self {
            unit: Unit::new(ElementId::Edge(id), weight),
            ends,
        }
    }

    /// Returns the endpoints in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn ends(&self) -> (NodeId, NodeId) { self.ends }

    /// Returns `true` when both endpoints are the same node.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.ends.0 == self.ends.1
    }
}

impl Element for Edge {
    fn unit(&self) -> &Unit {
        &self.unit
    }

    fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }
}

impl From<Edge> for Unit {
    fn from(edge: Edge) -> Self {
        edge.unit
    }
}

/// Orders elements heaviest first, breaking ties by descending identifier.
///
/// The greatest element under this ordering is therefore the lightest one
/// with the lowest identifier.
pub(crate) fn element_order(left: &Unit, right: &Unit) -> std::cmp::Ordering {
    right
        .weight
        .total_cmp(&left.weight)
        .then_with(|| right.id.cmp(&left.id))
}
