//! Connected subgraph selected by the solver.

use std::collections::BTreeSet;

use crate::graph::{EdgeId, ElementId, Graph, NodeId};

/// A connected set of nodes and edges with its total weight.
///
/// Besides the selected elements, a solution records its provenance: the
/// selected identifiers together with every identifier that reductions folded
/// into them, so results can be traced back to the unreduced input.
///
/// # Examples
/// ```
/// use gmwcs_core::Solution;
///
/// let empty = Solution::empty();
/// assert!(empty.is_empty());
/// assert_eq!(empty.weight(), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    elements: BTreeSet<ElementId>,
    weight: f64,
    provenance: BTreeSet<ElementId>,
}

impl Solution {
    /// Returns the solution that selects nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a solution from `elements` of `graph`, ignoring identifiers the
    /// graph does not hold.
    pub(crate) fn from_elements(graph: &Graph, elements: BTreeSet<ElementId>) -> Self {
        let elements: BTreeSet<ElementId> = elements
            .into_iter()
            .filter(|&id| graph.unit_of(id).is_some())
            .collect();
        let mut weight = 0.0;
        let mut provenance = BTreeSet::new();
        for &id in &elements {
            if let Some(unit) = graph.unit_of(id) {
                weight += unit.weight();
                provenance.extend(unit.absorbed().iter().copied());
            }
            provenance.insert(id);
        }
        Self {
            elements,
            weight,
            provenance,
        }
    }

    /// Returns the selected elements.
    #[must_use]
    #[rustfmt::skip]
    pub fn elements(&self) -> &BTreeSet<ElementId> { &self.elements }

    /// Returns the total weight of the selected elements.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }

    /// Returns the selected elements and everything folded into them.
    #[must_use]
    #[rustfmt::skip]
    pub fn provenance(&self) -> &BTreeSet<ElementId> { &self.provenance }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates the selected nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.elements.iter().filter_map(|id| id.as_node())
    }

    /// Iterates the selected edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.elements.iter().filter_map(|id| id.as_edge())
    }
}
