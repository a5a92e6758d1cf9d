//! Connected-component decomposition.

use std::collections::{BTreeMap, BTreeSet};

use super::{Graph, NodeId, union_find::DisjointSet};

impl Graph {
    /// Splits the live nodes into connected components.
    ///
    /// Components are returned in order of their smallest node identifier.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_core::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let a = graph.add_node(1.0);
    /// let b = graph.add_node(1.0);
    /// let c = graph.add_node(1.0);
    /// graph.add_edge(a, b, 0.0)?;
    /// let components = graph.connected_components();
    /// assert_eq!(components.len(), 2);
    /// assert!(components[1].contains(&c));
    /// # Ok::<(), gmwcs_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn connected_components(&self) -> Vec<BTreeSet<NodeId>> {
        let mut sets = DisjointSet::new(self.node_bound());
        for edge in self.edge_ids() {
            if let Some((source, target)) = self.endpoints(edge) {
                sets.join(source, target);
            }
        }

        let mut by_root: BTreeMap<usize, BTreeSet<NodeId>> = BTreeMap::new();
        for node in self.node_ids() {
            by_root
                .entry(sets.root(node))
                .or_default()
                .insert(node);
        }

        let mut components: Vec<_> = by_root.into_values().collect();
        components.sort_by_key(|component| component.first().copied());
        components
    }

    /// Returns `true` when every live node is reachable from every other.
    ///
    /// The empty graph counts as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }
}
