//! Benchmark support crate for gmwcs.
//!
//! Provides seeded synthetic instances and parameter types used by the
//! Criterion benchmarks for the reduction engine and the tree-sampling
//! solver.

pub mod error;
pub mod params;
pub mod source;
