//! Builder utilities for configuring the reduction engine and the solver.
//!
//! Validation happens once in [`GmwcsBuilder::build`]; the resulting [`Gmwcs`]
//! is immutable.

use crate::{Result, error::GmwcsError, gmwcs::Gmwcs, reduction::ReductionRule};

/// Default size of the negative edge worker pool.
pub const DEFAULT_THREADS: usize = 1;
/// Default degree bound of [`ReductionRule::BoundedDegreeVertices`].
pub const DEFAULT_MAX_VERTEX_DEGREE: usize = 4;
/// Default number of spanning-tree samples per component.
pub const DEFAULT_TRIALS: usize = 11;
/// Default seed of the spanning-tree sampler.
pub const DEFAULT_SEED: u64 = 1337;

const MIN_VERTEX_DEGREE: usize = 2;
const MAX_VERTEX_DEGREE: usize = 16;

/// Configures and constructs [`Gmwcs`] instances.
///
/// # Examples
/// ```
/// use gmwcs_core::GmwcsBuilder;
///
/// let gmwcs = GmwcsBuilder::new()
///     .with_threads(4)
///     .with_trials(3)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(gmwcs.reducer().threads(), 4);
/// assert_eq!(gmwcs.trials(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GmwcsBuilder {
    threads: usize,
    max_vertex_degree: usize,
    trials: usize,
    seed: u64,
    rules: Vec<ReductionRule>,
}

impl Default for GmwcsBuilder {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            max_vertex_degree: DEFAULT_MAX_VERTEX_DEGREE,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            rules: ReductionRule::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl GmwcsBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_core::GmwcsBuilder;
    ///
    /// let builder = GmwcsBuilder::new();
    /// assert_eq!(builder.threads(), 1);
    /// assert_eq!(builder.max_vertex_degree(), 4);
    /// assert_eq!(builder.trials(), 11);
    /// assert_eq!(builder.seed(), 1337);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the negative edge worker pool.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Returns the configured worker pool size.
    #[must_use]
    #[rustfmt::skip]
    pub fn threads(&self) -> usize { self.threads }

    /// Sets the largest degree examined by
    /// [`ReductionRule::BoundedDegreeVertices`].
    ///
    /// # Examples
    /// ```
    /// use gmwcs_core::GmwcsBuilder;
    ///
    /// let builder = GmwcsBuilder::new().with_max_vertex_degree(6);
    /// assert_eq!(builder.max_vertex_degree(), 6);
    /// ```
    #[must_use]
    pub fn with_max_vertex_degree(mut self, degree: usize) -> Self {
        self.max_vertex_degree = degree;
        self
    }

    /// Returns the configured degree bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_vertex_degree(&self) -> usize { self.max_vertex_degree }

    /// Sets the number of spanning trees sampled per component.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured trial count.
    #[must_use]
    #[rustfmt::skip]
    pub fn trials(&self) -> usize { self.trials }

    /// Sets the seed of the spanning-tree sampler.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Replaces the reduction rules and their order.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_core::{GmwcsBuilder, ReductionRule};
    ///
    /// let gmwcs = GmwcsBuilder::new()
    ///     .with_rules([ReductionRule::Isolated, ReductionRule::Leaves])
    ///     .build()
    ///     .expect("configuration is valid");
    /// assert_eq!(gmwcs.reducer().rules().len(), 2);
    /// ```
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = ReductionRule>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    /// Returns the configured rules.
    #[must_use]
    #[rustfmt::skip]
    pub fn rules(&self) -> &[ReductionRule] { &self.rules }

    /// Validates the configuration and constructs a [`Gmwcs`] instance.
    ///
    /// # Errors
    /// Returns [`GmwcsError::InvalidThreadCount`] for zero threads,
    /// [`GmwcsError::InvalidDegreeBound`] for a degree bound outside
    /// `2..=16`, [`GmwcsError::InvalidTrialCount`] for zero trials, and
    /// [`GmwcsError::ThreadPool`] when the worker pool cannot start.
    ///
    /// # Examples
    /// ```
    /// use gmwcs_core::{GmwcsBuilder, GmwcsError};
    ///
    /// let err = GmwcsBuilder::new().with_threads(0).build().unwrap_err();
    /// assert!(matches!(err, GmwcsError::InvalidThreadCount { got: 0 }));
    /// ```
    pub fn build(self) -> Result<Gmwcs> {
        if self.threads == 0 {
            return Err(GmwcsError::InvalidThreadCount { got: self.threads });
        }
        if !(MIN_VERTEX_DEGREE..=MAX_VERTEX_DEGREE).contains(&self.max_vertex_degree) {
            return Err(GmwcsError::InvalidDegreeBound {
                got: self.max_vertex_degree,
            });
        }
        if self.trials == 0 {
            return Err(GmwcsError::InvalidTrialCount { got: self.trials });
        }
        Gmwcs::new(
            self.threads,
            self.max_vertex_degree,
            self.rules,
            self.trials,
            self.seed,
        )
    }
}
