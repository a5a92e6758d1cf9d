//! Data-parallel negative edge reduction.
//!
//! Each node checks the non-positive edges it owns against a shortest-path
//! search rooted at itself. Tasks only read the graph and write into one
//! shared set; removal happens after every task has finished.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use dashmap::DashSet;
#[cfg(feature = "parallel")]
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::{
    bounds::BoundOracle,
    error::GmwcsError,
    graph::{EdgeId, Element, Graph, NodeId},
};

/// Worker pool running the negative edge search.
#[derive(Debug)]
pub(crate) struct Workers {
    threads: usize,
    #[cfg(feature = "parallel")]
    pool: ThreadPool,
}

impl Workers {
    /// Builds a pool with `threads` workers.
    pub(crate) fn new(threads: usize) -> Result<Self, GmwcsError> {
        if threads == 0 {
            return Err(GmwcsError::InvalidThreadCount { got: threads });
        }
        #[cfg(feature = "parallel")]
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("gmwcs-reduce-{index}"))
            .build()
            .map_err(|err| GmwcsError::ThreadPool {
                message: err.to_string().into(),
            })?;
        Ok(Self {
            threads,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    #[rustfmt::skip]
    pub(crate) fn threads(&self) -> usize { self.threads }

    /// Negative edges, anywhere in the graph, that a strictly cheaper route
    /// makes unnecessary.
    #[cfg(feature = "parallel")]
    pub(crate) fn negative_edges(&self, graph: &Graph) -> BTreeSet<EdgeId> {
        let found = DashSet::new();
        let nodes: Vec<NodeId> = graph.node_ids().collect();
        self.pool.install(|| {
            nodes.par_iter().for_each(|&node| {
                for edge in dominated_at(graph, node) {
                    found.insert(edge);
                }
            });
        });
        found.into_iter().collect()
    }

    /// Negative edges, anywhere in the graph, that a strictly cheaper route
    /// makes unnecessary.
    #[cfg(not(feature = "parallel"))]
    pub(crate) fn negative_edges(&self, graph: &Graph) -> BTreeSet<EdgeId> {
        graph
            .node_ids()
            .flat_map(|node| dominated_at(graph, node))
            .collect()
    }
}

/// Far endpoints of the non-positive edges owned by `node`. The endpoint with
/// the lower identifier owns an edge.
fn owned_targets(graph: &Graph, node: NodeId) -> Vec<NodeId> {
    let mut targets: Vec<NodeId> = graph
        .incident_edges(node)
        .iter()
        .filter(|&&edge| graph[edge].weight() <= 0.0)
        .filter_map(|&edge| graph.opposite(node, edge))
        .filter(|&other| other > node)
        .collect();
    targets.sort_unstable();
    targets.dedup();
    targets
}

fn dominated_at(graph: &Graph, node: NodeId) -> Vec<EdgeId> {
    let targets = owned_targets(graph, node);
    if targets.is_empty() {
        return Vec::new();
    }
    BoundOracle::new(graph, node).negative_edges(&targets)
}
