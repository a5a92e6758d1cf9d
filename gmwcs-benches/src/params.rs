//! Benchmark parameter types.

use std::fmt;

/// Size of a synthetic instance.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges, including the backbone path.
    pub edge_count: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.node_count, self.edge_count)
    }
}

/// Parameters for a solver benchmark run.
#[derive(Clone, Debug)]
pub struct SolverBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Spanning trees sampled per component.
    pub trials: usize,
}

impl fmt::Display for SolverBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},trials={}", self.node_count, self.trials)
    }
}
