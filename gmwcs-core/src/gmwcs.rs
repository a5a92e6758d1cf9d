//! Pipeline orchestration: reduce, split into components, sample each one.

use tracing::{info, instrument};

use crate::{
    Result,
    graph::Graph,
    reduction::{Reducer, ReductionRule, ReductionSummary},
    solution::Solution,
    solver::Sampler,
};

/// Entry point for preprocessing and solving weighted graphs.
///
/// # Examples
/// ```
/// use gmwcs_core::{GmwcsBuilder, Graph};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(3.0);
/// let b = graph.add_node(-1.0);
/// let c = graph.add_node(4.0);
/// graph.add_edge(a, b, 0.0)?;
/// graph.add_edge(b, c, 0.0)?;
///
/// let gmwcs = GmwcsBuilder::new().build()?;
/// let solution = gmwcs.solve(&mut graph)?;
/// assert_eq!(solution.weight(), 6.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Gmwcs {
    reducer: Reducer,
    sampler: Sampler,
}

impl Gmwcs {
    pub(crate) fn new(
        threads: usize,
        max_vertex_degree: usize,
        rules: Vec<ReductionRule>,
        trials: usize,
        seed: u64,
    ) -> Result<Self> {
        Ok(Self {
            reducer: Reducer::new(threads, max_vertex_degree, rules)?,
            sampler: Sampler::new(trials, seed),
        })
    }

    /// Returns the reduction engine.
    #[must_use]
    #[rustfmt::skip]
    pub fn reducer(&self) -> &Reducer { &self.reducer }

    /// Returns the number of spanning trees sampled per component.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.sampler.trials()
    }

    /// Returns the sampler seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    /// Shrinks `graph` in place to the fixed point of the configured rules.
    ///
    /// # Errors
    /// See [`Reducer::preprocess`].
    pub fn preprocess(&self, graph: &mut Graph) -> Result<ReductionSummary> {
        self.reducer.preprocess(graph)
    }

    /// Preprocesses `graph` in place and returns the best connected subgraph
    /// found in any of its components.
    ///
    /// # Errors
    /// See [`Reducer::preprocess`].
    #[instrument(
        name = "core.solve",
        err,
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            trials = self.trials(),
            seed = self.seed(),
        ),
    )]
    pub fn solve(&self, graph: &mut Graph) -> Result<Solution> {
        self.preprocess(graph)?;
        let solution = self.solve_components(graph);
        info!(
            weight = solution.weight(),
            elements = solution.elements().len(),
            "solve completed"
        );
        Ok(solution)
    }

    /// Solves every connected component of `graph` separately and keeps the
    /// heaviest result; the earliest component wins ties.
    ///
    /// An empty graph yields [`Solution::empty`].
    #[must_use]
    pub fn solve_components(&self, graph: &Graph) -> Solution {
        self.sampler.solve_components(graph)
    }

    /// Runs the spanning-tree sampler on `graph` without preprocessing.
    #[must_use]
    pub fn solve_component(&self, graph: &Graph) -> Solution {
        self.sampler.solve(graph)
    }
}
