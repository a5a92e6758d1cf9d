//! Fixed-point driver for the reduction rules.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{error::Result, graph::Graph};

use super::{ReductionRule, bounded, local, parallel::Workers, remove_edges, remove_nodes};

/// Applies a configured rule list until a full pass changes nothing.
///
/// Built through [`crate::GmwcsBuilder`]; cloning shares the worker pool.
#[derive(Clone, Debug)]
pub struct Reducer {
    rules: Vec<ReductionRule>,
    max_vertex_degree: usize,
    workers: Arc<Workers>,
}

impl Reducer {
    pub(crate) fn new(
        threads: usize,
        max_vertex_degree: usize,
        rules: Vec<ReductionRule>,
    ) -> Result<Self> {
        Ok(Self {
            rules,
            max_vertex_degree,
            workers: Arc::new(Workers::new(threads)?),
        })
    }

    /// Returns the rules in the order they run.
    #[must_use]
    #[rustfmt::skip]
    pub fn rules(&self) -> &[ReductionRule] { &self.rules }

    /// Returns the degree bound of [`ReductionRule::BoundedDegreeVertices`].
    #[must_use]
    #[rustfmt::skip]
    pub fn max_vertex_degree(&self) -> usize { self.max_vertex_degree }

    /// Returns the size of the worker pool used by
    /// [`ReductionRule::NegativeEdges`].
    #[must_use]
    pub fn threads(&self) -> usize {
        self.workers.threads()
    }

    /// Runs a single rule once and returns the number of elements it changed.
    ///
    /// # Errors
    /// Returns [`crate::GmwcsError::Graph`] when a contraction meets an
    /// inconsistent graph and [`crate::GmwcsError::LowerBound`] when the
    /// spanning-tree bound rejects its input.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_core::{GmwcsBuilder, Graph, ReductionRule};
    ///
    /// let mut graph = Graph::new();
    /// graph.add_node(-1.0);
    /// graph.add_node(2.0);
    ///
    /// let gmwcs = GmwcsBuilder::new().build()?;
    /// let changed = gmwcs.reducer().apply(ReductionRule::Isolated, &mut graph)?;
    /// assert_eq!(changed, 1);
    /// assert_eq!(graph.node_count(), 1);
    /// # Ok::<(), gmwcs_core::GmwcsError>(())
    /// ```
    pub fn apply(&self, rule: ReductionRule, graph: &mut Graph) -> Result<usize> {
        let changed = match rule {
            ReductionRule::Isolated => {
                let isolated = local::isolated_vertices(graph);
                remove_nodes(graph, &isolated)
            }
            ReductionRule::MergeNegative => local::merge_negative(graph)?,
            ReductionRule::MergePositive => local::merge_positive(graph)?,
            ReductionRule::Leaves => local::fold_leaves(graph),
            ReductionRule::ConnectedNegativeSum => {
                let dominated = bounded::connected_negative_sum(graph);
                remove_nodes(graph, &dominated)
            }
            ReductionRule::NegativeEdges => {
                let dominated = self.workers.negative_edges(graph);
                remove_edges(graph, &dominated)
            }
            ReductionRule::NegativeVertices => {
                let bypassed = bounded::negative_vertices(graph);
                remove_nodes(graph, &bypassed)
            }
            ReductionRule::BoundedDegreeVertices => {
                let dominated = bounded::bounded_degree_vertices(graph, self.max_vertex_degree)?;
                remove_nodes(graph, &dominated)
            }
        };
        Ok(changed)
    }

    /// Shrinks `graph` in place to the fixed point of the configured rules.
    ///
    /// # Errors
    /// Propagates the first error raised by [`Self::apply`]; the graph keeps
    /// every change made before it.
    #[instrument(
        name = "core.preprocess",
        err,
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            threads = self.threads(),
        ),
    )]
    pub fn preprocess(&self, graph: &mut Graph) -> Result<ReductionSummary> {
        let mut summary = ReductionSummary {
            passes: 0,
            changes: 0,
            per_rule: self.rules.iter().map(|&rule| (rule, 0)).collect(),
            nodes_before: graph.node_count(),
            edges_before: graph.edge_count(),
            nodes_after: 0,
            edges_after: 0,
        };
        loop {
            summary.passes += 1;
            let mut pass_changes = 0;
            for (rule, total) in &mut summary.per_rule {
                let changed = self.apply(*rule, graph)?;
                debug!(
                    pass = summary.passes,
                    rule = %rule,
                    changed,
                    nodes = graph.node_count(),
                    edges = graph.edge_count(),
                    "reduction rule applied"
                );
                *total += changed;
                pass_changes += changed;
            }
            summary.changes += pass_changes;
            if pass_changes == 0 {
                break;
            }
        }
        summary.nodes_after = graph.node_count();
        summary.edges_after = graph.edge_count();
        info!(
            passes = summary.passes,
            changes = summary.changes,
            nodes = summary.nodes_after,
            edges = summary.edges_after,
            "preprocessing reached a fixed point"
        );
        Ok(summary)
    }
}

/// Outcome of [`Reducer::preprocess`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReductionSummary {
    passes: usize,
    changes: usize,
    per_rule: Vec<(ReductionRule, usize)>,
    nodes_before: usize,
    edges_before: usize,
    nodes_after: usize,
    edges_after: usize,
}

impl ReductionSummary {
    /// Returns the number of passes, including the final pass that changed
    /// nothing.
    #[must_use]
    #[rustfmt::skip]
    pub fn passes(&self) -> usize { self.passes }

    /// Returns the total number of changed elements over all passes.
    #[must_use]
    #[rustfmt::skip]
    pub fn changes(&self) -> usize { self.changes }

    /// Returns the changes attributed to each configured rule, in run order.
    #[must_use]
    #[rustfmt::skip]
    pub fn per_rule(&self) -> &[(ReductionRule, usize)] { &self.per_rule }

    /// Returns the changes attributed to `rule`.
    #[must_use]
    pub fn changes_for(&self, rule: ReductionRule) -> usize {
        self.per_rule
            .iter()
            .filter(|(candidate, _)| *candidate == rule)
            .map(|(_, changed)| changed)
            .sum()
    }

    /// Returns the node count before preprocessing.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes_before(&self) -> usize { self.nodes_before }

    /// Returns the edge count before preprocessing.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges_before(&self) -> usize { self.edges_before }

    /// Returns the node count after preprocessing.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes_after(&self) -> usize { self.nodes_after }

    /// Returns the edge count after preprocessing.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges_after(&self) -> usize { self.edges_after }
}
