//! Graph-shrinking reduction rules and the fixed-point driver that runs them.
//!
//! Every rule preserves the best connected subgraph value reachable in the
//! graph it is given: it only removes elements that are never strictly needed
//! or merges elements that an optimal solution takes together.

mod bounded;
mod engine;
mod local;
mod parallel;

#[cfg(test)]
mod tests;

use std::{collections::BTreeSet, fmt};

use tracing::trace;

use crate::graph::{EdgeId, Graph, NodeId};

pub use self::engine::{Reducer, ReductionSummary};

/// A single reduction rule.
///
/// # Examples
/// ```
/// use gmwcs_core::ReductionRule;
///
/// assert_eq!(ReductionRule::DEFAULT_ORDER.len(), 8);
/// assert_eq!(ReductionRule::Leaves.as_str(), "leaves");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum ReductionRule {
    /// Drops non-positive nodes without incident edges.
    Isolated,
    /// Collapses non-positive degree-2 nodes with non-positive edges into a
    /// single edge between their neighbours.
    MergeNegative,
    /// Contracts edges whose endpoints always profit from each other and folds
    /// self-loops.
    MergePositive,
    /// Folds or drops pendant nodes.
    Leaves,
    /// Drops fringe nodes dominated by a locally grown non-negative cluster.
    ConnectedNegativeSum,
    /// Drops negative edges for which a strictly cheaper bypass exists.
    NegativeEdges,
    /// Drops negative degree-2 nodes for which a strictly cheaper bypass
    /// exists.
    NegativeVertices,
    /// Drops negative nodes of bounded degree whose neighbours can always be
    /// connected more cheaply without them.
    BoundedDegreeVertices,
}

impl ReductionRule {
    /// The order in which [`Reducer`] runs rules unless configured otherwise.
    pub const DEFAULT_ORDER: [Self; 8] = [
        Self::Isolated,
        Self::MergeNegative,
        Self::MergePositive,
        Self::Leaves,
        Self::ConnectedNegativeSum,
        Self::NegativeEdges,
        Self::NegativeVertices,
        Self::BoundedDegreeVertices,
    ];

    /// Returns the stable short name used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::MergeNegative => "merge-negative",
            Self::MergePositive => "merge-positive",
            Self::Leaves => "leaves",
            Self::ConnectedNegativeSum => "connected-negative-sum",
            Self::NegativeEdges => "negative-edges",
            Self::NegativeVertices => "negative-vertices",
            Self::BoundedDegreeVertices => "bounded-degree-vertices",
        }
    }
}

impl fmt::Display for ReductionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Removes the given nodes and reports how many were present.
pub(crate) fn remove_nodes(graph: &mut Graph, nodes: &BTreeSet<NodeId>) -> usize {
    trace!(count = nodes.len(), "nodes to remove");
    nodes
        .iter()
        .filter(|&&node| graph.remove_node(node).is_some())
        .count()
}

/// Removes the given edges and reports how many were present.
pub(crate) fn remove_edges(graph: &mut Graph, edges: &BTreeSet<EdgeId>) -> usize {
    trace!(count = edges.len(), "edges to remove");
    edges
        .iter()
        .filter(|&&edge| graph.remove_edge(edge).is_some())
        .count()
}
