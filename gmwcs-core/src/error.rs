//! Error types for the GMWCS core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by structural [`crate::Graph`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The referenced node is not present.
    #[error("node {} is not present in the graph", node.index())]
    MissingNode {
        /// Identifier of the missing node.
        node: NodeId,
    },
    /// The referenced edge is not present.
    #[error("edge {} is not present in the graph", edge.index())]
    MissingEdge {
        /// Identifier of the missing edge.
        edge: EdgeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The referenced node is not present.
        MissingNode => MissingNode { .. } => "GRAPH_MISSING_NODE",
        /// The referenced edge is not present.
        MissingEdge => MissingEdge { .. } => "GRAPH_MISSING_EDGE",
    }
}

/// Contract violations raised by the MST lower bound.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BoundError {
    /// A spanning tree needs at least two nodes.
    #[error("MST lower bound needs at least 2 nodes (got {nodes})")]
    TooFewNodes {
        /// Number of nodes supplied.
        nodes: usize,
    },
    /// A row of the distance matrix lacks an entry for another node.
    #[error("distance matrix is not a clique: row {row} has no entry for column {missing}")]
    NotAClique {
        /// Position of the incomplete row.
        row: usize,
        /// Position of the node the row does not mention.
        missing: usize,
    },
    /// A distance was NaN.
    #[error("distance between rows {row} and {column} is NaN")]
    NanDistance {
        /// Position of the source row.
        row: usize,
        /// Position of the target column.
        column: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`BoundError`] variants.
    enum BoundErrorCode for BoundError {
        /// A spanning tree needs at least two nodes.
        TooFewNodes => TooFewNodes { .. } => "BOUND_TOO_FEW_NODES",
        /// A row of the distance matrix lacks an entry for another node.
        NotAClique => NotAClique { .. } => "BOUND_NOT_A_CLIQUE",
        /// A distance was NaN.
        NanDistance => NanDistance { .. } => "BOUND_NAN_DISTANCE",
    }
}

/// Error type produced when configuring or running [`crate::Gmwcs`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GmwcsError {
    /// The worker pool for the parallel reduction must have at least one thread.
    #[error("thread count must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The invalid thread count supplied by the caller.
        got: usize,
    },
    /// The degree bound of the generalized vertex reduction is out of range.
    #[error("max vertex degree must be between 2 and 16 (got {got})")]
    InvalidDegreeBound {
        /// The invalid degree bound supplied by the caller.
        got: usize,
    },
    /// The spanning-tree sampler needs at least one trial.
    #[error("trial count must be at least 1 (got {got})")]
    InvalidTrialCount {
        /// The invalid trial count supplied by the caller.
        got: usize,
    },
    /// The worker pool could not be created.
    #[error("failed to build reduction worker pool: {message}")]
    ThreadPool {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
    /// A structural graph operation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The MST lower bound rejected its input.
    #[error("lower bound failed: {0}")]
    LowerBound(#[from] BoundError),
}

define_error_codes! {
    /// Stable codes describing [`GmwcsError`] variants.
    enum GmwcsErrorCode for GmwcsError {
        /// The worker pool must have at least one thread.
        InvalidThreadCount => InvalidThreadCount { .. } => "GMWCS_INVALID_THREAD_COUNT",
        /// The degree bound is out of range.
        InvalidDegreeBound => InvalidDegreeBound { .. } => "GMWCS_INVALID_DEGREE_BOUND",
        /// The sampler needs at least one trial.
        InvalidTrialCount => InvalidTrialCount { .. } => "GMWCS_INVALID_TRIAL_COUNT",
        /// The worker pool could not be created.
        ThreadPool => ThreadPool { .. } => "GMWCS_THREAD_POOL",
        /// A structural graph operation failed.
        GraphFailure => Graph(..) => "GMWCS_GRAPH_FAILURE",
        /// The MST lower bound rejected its input.
        LowerBoundFailure => LowerBound(..) => "GMWCS_LOWER_BOUND_FAILURE",
    }
}

impl GmwcsError {
    /// Returns `true` for errors caused by invalid configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidThreadCount { .. }
                | Self::InvalidDegreeBound { .. }
                | Self::InvalidTrialCount { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GmwcsError>;
