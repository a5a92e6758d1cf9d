//! Bound computations backing the reduction rules.
//!
//! [`BoundOracle`] answers shortest-path questions over element deficits and
//! [`MstLowerBound`] turns pairwise bypass distances into a connectivity cost.

mod dijkstra;
mod mst;


pub use self::{
    dijkstra::{BoundOracle, TOLERANCE},
    mst::{DistanceMatrix, MstLowerBound},
};
