//! Error types for the MOEA/D engine.
//!
//! Configuration problems are reported as [`ConfigError`] before any
//! objective evaluation happens. Everything that can go wrong once the
//! run has started is a [`MoeadError`].

/// A configuration that cannot be run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The number of objectives is zero.
    #[error("n_obj must be at least 1")]
    ZeroObjectives,

    /// The number of decision variables is zero.
    #[error("n_var must be at least 1")]
    ZeroVariables,

    /// The simplex-lattice partition count is zero.
    #[error("n_partitions must be at least 1")]
    ZeroPartitions,

    /// The bound vectors do not match the number of decision variables.
    #[error("bounds dimension mismatch: expected {expected} variables, got lower={lower}, upper={upper}")]
    BoundsDimension {
        /// Configured number of decision variables.
        expected: usize,
        /// Length of the lower-bound vector.
        lower: usize,
        /// Length of the upper-bound vector.
        upper: usize,
    },

    /// A lower bound exceeds its upper bound, or a bound is not finite.
    #[error("invalid bounds for variable {index}: lower ({lower}) must be finite and <= upper ({upper})")]
    InvalidBounds {
        /// Variable index.
        index: usize,
        /// Lower bound value.
        lower: f64,
        /// Upper bound value.
        upper: f64,
    },

    /// The weight lattice has more vectors than `usize` can count.
    #[error("weight lattice for n_obj={n_obj}, n_partitions={n_partitions} is too large")]
    LatticeTooLarge {
        /// Configured number of objectives.
        n_obj: usize,
        /// Configured partition count.
        n_partitions: usize,
    },

    /// The neighborhood size is zero or exceeds the population size.
    #[error("neighborhood_size ({t}) must be in [1, {n_pop}]")]
    NeighborhoodSize {
        /// Requested neighborhood size.
        t: usize,
        /// Population size implied by the lattice.
        n_pop: usize,
    },

    /// The neighborhood selection probability is outside `[0, 1]`.
    #[error("delta ({0}) must be in [0, 1]")]
    Delta(f64),

    /// The per-offspring replacement cap is zero.
    #[error("max_replacements must be at least 1")]
    ZeroReplacements,

    /// The Levy stability parameter is outside `(0, 2)`.
    #[error("levy_beta ({0}) must be in (0, 2)")]
    LevyBeta(f64),

    /// The Levy scale factor is negative or not finite.
    #[error("levy_alpha ({0}) must be finite and non-negative")]
    LevyAlpha(f64),

    /// The polynomial mutation index is negative or not finite.
    #[error("mutation_eta ({0}) must be finite and non-negative")]
    MutationEta(f64),

    /// The per-variable polynomial mutation probability is outside `[0, 1]`.
    #[error("mutation_prob ({0}) must be in [0, 1]")]
    MutationProb(f64),

    /// The priority strategy name is not known.
    #[error("unknown priority strategy '{0}'")]
    UnknownPriority(String),

    /// A priority value is outside `(0, 1]`.
    #[error("priority value ({0}) must be in (0, 1]")]
    PriorityValue(f64),

    /// The problem name is not registered.
    #[error("unknown problem '{0}'")]
    UnknownProblem(String),

    /// The problem cannot be evaluated with the configured dimensions.
    #[error("problem '{name}' is incompatible with n_obj={n_obj}, n_var={n_var}: {reason}")]
    IncompatibleProblem {
        /// Problem name.
        name: String,
        /// Configured number of objectives.
        n_obj: usize,
        /// Configured number of decision variables.
        n_var: usize,
        /// What the problem requires.
        reason: String,
    },
}

/// Errors returned by [`MoeadRunner`](super::MoeadRunner).
#[derive(Debug, thiserror::Error)]
pub enum MoeadError {
    /// The configuration was rejected before the run started.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The objective function returned a NaN or infinite value.
    #[error("objective returned non-finite values {values:?} (generation {generation}, evaluations {evaluations})")]
    NonFiniteObjective {
        /// The offending objective vector.
        values: Vec<f64>,
        /// Generation counter when the evaluation happened.
        generation: usize,
        /// Evaluation counter when the evaluation happened.
        evaluations: usize,
    },

    /// The objective function returned the wrong number of objectives.
    #[error("objective dimension mismatch: expected {expected} values, got {got} (generation {generation}, evaluations {evaluations})")]
    ObjectiveDimension {
        /// Configured number of objectives.
        expected: usize,
        /// Number of values returned.
        got: usize,
        /// Generation counter when the evaluation happened.
        generation: usize,
        /// Evaluation counter when the evaluation happened.
        evaluations: usize,
    },

    /// The report sink failed to record a snapshot.
    #[error("report sink error: {0}")]
    Report(#[from] std::io::Error),
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, MoeadError>;
