//! Seeded synthetic instances.
//!
//! Every generated graph contains a backbone path through all nodes so the
//! instance is connected before extra edges are scattered at random. Node
//! weights lean negative so that the reduction rules have work to do.

use std::ops::RangeInclusive;

use gmwcs_core::{Graph, GraphError, NodeId};
use rand::{Rng, SeedableRng, rngs::SmallRng};

const NODE_WEIGHTS: RangeInclusive<i32> = -10..=5;
const EDGE_WEIGHTS: RangeInclusive<i32> = -3..=1;

/// Errors that may occur while generating synthetic instances.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested node count was zero.
    #[error("node count must be greater than zero")]
    ZeroNodes,
    /// Fewer edges were requested than the backbone path needs.
    #[error("edge count ({edge_count}) must be at least {minimum} to connect every node")]
    TooFewEdges {
        /// Number of edges requested.
        edge_count: usize,
        /// Length of the backbone path.
        minimum: usize,
    },
    /// Inserting an edge failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Configuration for [`SyntheticGraph::generate`].
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Total number of edges, including the backbone path.
    pub edge_count: usize,
    /// Seed of the generator.
    pub seed: u64,
}

/// Generator for connected weighted multigraphs.
#[derive(Clone, Debug)]
pub struct SyntheticGraph;

impl SyntheticGraph {
    /// Generates a connected graph with integer-valued weights.
    ///
    /// Extra edges join distinct nodes chosen uniformly, so parallel edges
    /// may occur but loops never do.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Graph, SyntheticError> {
        let SyntheticGraphConfig {
            node_count,
            edge_count,
            seed,
        } = *config;
        if node_count == 0 {
            return Err(SyntheticError::ZeroNodes);
        }
        let minimum = node_count - 1;
        if edge_count < minimum {
            return Err(SyntheticError::TooFewEdges {
                edge_count,
                minimum,
            });
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut graph = Graph::new();
        for _ in 0..node_count {
            graph.add_node(f64::from(rng.gen_range(NODE_WEIGHTS)));
        }
        for index in 1..node_count {
            let weight = f64::from(rng.gen_range(EDGE_WEIGHTS));
            graph.add_edge(NodeId::new(index - 1), NodeId::new(index), weight)?;
        }
        if node_count > 1 {
            for _ in minimum..edge_count {
                let source = rng.gen_range(0..node_count);
                let mut target = rng.gen_range(0..node_count - 1);
                if target >= source {
                    target += 1;
                }
                let weight = f64::from(rng.gen_range(EDGE_WEIGHTS));
                graph.add_edge(NodeId::new(source), NodeId::new(target), weight)?;
            }
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn config(node_count: usize, edge_count: usize) -> SyntheticGraphConfig {
        SyntheticGraphConfig {
            node_count,
            edge_count,
            seed: 7,
        }
    }

    #[rstest]
    #[case(1, 0)]
    #[case(1, 3)]
    #[case(10, 9)]
    #[case(50, 120)]
    fn generates_requested_sizes(#[case] node_count: usize, #[case] edge_count: usize) {
        let graph = SyntheticGraph::generate(&config(node_count, edge_count))
            .expect("configuration is valid");
        assert_eq!(graph.node_count(), node_count);
        let expected_edges = if node_count == 1 { 0 } else { edge_count };
        assert_eq!(graph.edge_count(), expected_edges);
    }

    #[test]
    fn generated_graphs_have_no_loops() {
        let graph = SyntheticGraph::generate(&config(6, 40)).expect("configuration is valid");
        for edge in graph.edge_ids() {
            let (source, target) = graph.endpoints(edge).expect("edge is live");
            assert_ne!(source, target);
        }
    }

    #[test]
    fn generation_is_seeded() {
        let first = SyntheticGraph::generate(&config(30, 60)).expect("configuration is valid");
        let second = SyntheticGraph::generate(&config(30, 60)).expect("configuration is valid");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(5, 3)]
    fn rejects_invalid_configurations(#[case] node_count: usize, #[case] edge_count: usize) {
        let err = SyntheticGraph::generate(&config(node_count, edge_count))
            .expect_err("configuration must be rejected");
        assert!(matches!(
            err,
            SyntheticError::ZeroNodes | SyntheticError::TooFewEdges { .. }
        ));
    }
}
