//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` instead of `.expect()`.

use gmwcs_core::GmwcsError;

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic instance generation failed.
    #[error("synthetic instance generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Engine configuration, reduction or solving failed.
    #[error("gmwcs operation failed: {0}")]
    Core(#[from] GmwcsError),
}
