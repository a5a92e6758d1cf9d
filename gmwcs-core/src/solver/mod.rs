//! Spanning-tree sampling solver.
//!
//! Each trial roots a minimum spanning tree at a random node, using a cost
//! that favours heavy edges, and solves the tree exactly. The best trial is
//! read back from the simple graph it was sampled from.

mod normalize;
mod spanning;
mod tree_dp;


use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::debug;

use crate::{
    graph::{Graph, NodeId},
    solution::Solution,
};

use self::tree_dp::TreeSolution;

pub(crate) use self::{normalize::normalize, spanning::spanning_tree, tree_dp::solve_tree};

/// Trial count and seed of the sampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Sampler {
    trials: usize,
    seed: u64,
}

impl Sampler {
    pub(crate) fn new(trials: usize, seed: u64) -> Self {
        Self { trials, seed }
    }

    #[rustfmt::skip]
    pub(crate) fn trials(&self) -> usize { self.trials }

    #[rustfmt::skip]
    pub(crate) fn seed(&self) -> u64 { self.seed }

    /// Runs the configured trials on a normalized copy of `graph`.
    pub(crate) fn solve(&self, graph: &Graph) -> Solution {
        let mut simple = graph.clone();
        normalize(&mut simple);
        let nodes: Vec<NodeId> = simple.node_ids().collect();
        self.sample(&simple, &nodes)
    }

    /// Normalizes `graph` once and samples every connected component on it,
    /// keeping the heaviest result; the earliest component wins ties.
    pub(crate) fn solve_components(&self, graph: &Graph) -> Solution {
        let mut simple = graph.clone();
        normalize(&mut simple);
        simple
            .connected_components()
            .into_iter()
            .map(|component| {
                let nodes: Vec<NodeId> = component.into_iter().collect();
                self.sample(&simple, &nodes)
            })
            .fold(None, |best: Option<Solution>, candidate| match best {
                Some(current) if current.weight() >= candidate.weight() => Some(current),
                _ => Some(candidate),
            })
            .unwrap_or_default()
    }

    /// Samples spanning trees rooted at `nodes` of the simple graph `simple`.
    ///
    /// `nodes` must lie in one connected component; each call reseeds the
    /// generator, so a component gets the same roots however it is reached.
    fn sample(&self, simple: &Graph, nodes: &[NodeId]) -> Solution {
        if nodes.is_empty() {
            return Solution::empty();
        }
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut best: Option<TreeSolution> = None;
        for trial in 0..self.trials {
            let root = nodes[rng.gen_range(0..nodes.len())];
            let edges = spanning_tree(simple, root);
            let candidate = solve_tree(simple, root, &edges);
            debug!(
                trial,
                root = root.index(),
                value = candidate.value(),
                "spanning tree sampled"
            );
            if best
                .as_ref()
                .is_none_or(|current| candidate.value() > current.value())
            {
                best = Some(candidate);
            }
        }

        best.map_or_else(Solution::empty, |winner| {
            Solution::from_elements(simple, winner.into_elements())
        })
    }
}
