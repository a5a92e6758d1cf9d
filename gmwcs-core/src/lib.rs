//! GMWCS core library.
//!
//! Reduces node- and edge-weighted multigraphs with a fixed-point rule engine
//! and searches the reduced graph for a heavy connected subgraph by sampling
//! spanning trees and solving each tree exactly.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bounds;
mod builder;
mod error;
mod gmwcs;
mod graph;
mod reduction;
mod solution;
mod solver;

pub use crate::{
    bounds::{BoundOracle, DistanceMatrix, MstLowerBound, TOLERANCE},
    builder::{
        DEFAULT_MAX_VERTEX_DEGREE, DEFAULT_SEED, DEFAULT_THREADS, DEFAULT_TRIALS, GmwcsBuilder,
    },
    error::{
        BoundError, BoundErrorCode, GmwcsError, GmwcsErrorCode, GraphError, GraphErrorCode, Result,
    },
    gmwcs::Gmwcs,
    graph::{Edge, EdgeId, Element, ElementId, Graph, Node, NodeId, Unit},
    reduction::{Reducer, ReductionRule, ReductionSummary},
    solution::Solution,
};

/// Shrinks `graph` in place using the default configuration.
///
/// # Errors
/// See [`Reducer::preprocess`].
///
/// # Examples
/// ```
/// use gmwcs_core::{Element, Graph, preprocess};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(-1.0);
/// let b = graph.add_node(5.0);
/// graph.add_edge(a, b, 2.0)?;
///
/// let summary = preprocess(&mut graph)?;
/// assert_eq!(graph.node_count(), 1);
/// assert_eq!(graph[a].weight(), 6.0);
/// assert_eq!(summary.nodes_after(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn preprocess(graph: &mut Graph) -> Result<ReductionSummary> {
    GmwcsBuilder::new().build()?.preprocess(graph)
}

/// Preprocesses `graph` in place and solves it using the default
/// configuration.
///
/// # Errors
/// See [`Reducer::preprocess`].
pub fn solve(graph: &mut Graph) -> Result<Solution> {
    GmwcsBuilder::new().build()?.solve(graph)
}
