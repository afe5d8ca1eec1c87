//! MOEA/D-DRA configuration.
//!
//! [`MoeadConfig`] holds every parameter of the decomposition, the
//! variation operators, resource allocation, and termination.

use super::decomposition::lattice_size;
use super::error::ConfigError;
use super::operators::LevyPolynomialMutation;
use super::priority::PriorityStrategy;
use super::types::Bounds;

/// Configuration for MOEA/D with dynamic resource allocation.
///
/// The population size is not set directly: it is the number of
/// Das-Dennis weight vectors for `n_obj` objectives and `n_partitions`
/// divisions, see [`population_size`](Self::population_size).
///
/// # Defaults
///
/// ```
/// use u_moead::moead::MoeadConfig;
///
/// let config = MoeadConfig::default();
/// assert_eq!(config.n_obj, 2);
/// assert_eq!(config.population_size(), Some(100));
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moead::moead::{MoeadConfig, PriorityStrategy};
///
/// let config = MoeadConfig::new(3, 12)
///     .with_bounds(0.0, 1.0)
///     .with_partitions(12)
///     .with_max_evaluations(50_000)
///     .with_neighborhood_size(10)
///     .with_priority(PriorityStrategy::Fixed(0.8))
///     .with_seed(42);
///
/// assert_eq!(config.population_size(), Some(91));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoeadConfig {
    /// Number of objectives.
    pub n_obj: usize,

    /// Number of decision variables.
    pub n_var: usize,

    /// Box constraints on the decision variables.
    pub bounds: Bounds,

    /// Simplex-lattice partition count. Fixes the population size.
    pub n_partitions: usize,

    /// Evaluation budget. The run stops at the first generation boundary
    /// where the evaluation counter has reached this value.
    pub max_evaluations: usize,

    /// Neighborhood size `T`, in `[1, population_size]`.
    pub neighborhood_size: usize,

    /// Probability of mating and replacing within the neighborhood rather
    /// than the whole population (0.0–1.0).
    pub delta: f64,

    /// Maximum number of subproblems one offspring may replace (`nr`).
    pub max_replacements: usize,

    /// Lévy-flight step scale.
    pub levy_alpha: f64,

    /// Lévy-flight stability index, in `(0, 2)`.
    pub levy_beta: f64,

    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,

    /// Per-variable polynomial mutation probability.
    ///
    /// `None` uses `1 / n_var`.
    pub mutation_prob: Option<f64>,

    /// Resource-allocation priority strategy.
    pub priority: PriorityStrategy,

    /// Whether to evaluate the initial population in parallel.
    ///
    /// Only takes effect with the `parallel` feature. The generational loop
    /// is always sequential.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed per run, so unseeded runs differ.
    pub seed: Option<u64>,
}

impl Default for MoeadConfig {
    fn default() -> Self {
        Self {
            n_obj: 2,
            n_var: 30,
            bounds: Bounds::uniform(30, 0.0, 1.0),
            n_partitions: 99,
            max_evaluations: 25_000,
            neighborhood_size: 20,
            delta: 0.9,
            max_replacements: 2,
            levy_alpha: 1.0,
            levy_beta: 1.5,
            mutation_eta: 20.0,
            mutation_prob: None,
            priority: PriorityStrategy::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl MoeadConfig {
    /// Creates a configuration for `n_obj` objectives and `n_var`
    /// variables in `[0, 1]`, with default operator parameters.
    pub fn new(n_obj: usize, n_var: usize) -> Self {
        Self {
            n_obj,
            n_var,
            bounds: Bounds::uniform(n_var, 0.0, 1.0),
            ..Self::default()
        }
    }

    /// Sets the same bounds for every variable.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Bounds::uniform(self.n_var, lower, upper);
        self
    }

    /// Sets per-variable bounds.
    pub fn with_variable_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the simplex-lattice partition count.
    pub fn with_partitions(mut self, n: usize) -> Self {
        self.n_partitions = n;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Sets the neighborhood size `T`.
    pub fn with_neighborhood_size(mut self, t: usize) -> Self {
        self.neighborhood_size = t;
        self
    }

    /// Sets the neighborhood selection probability.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the per-offspring replacement cap `nr`.
    pub fn with_max_replacements(mut self, nr: usize) -> Self {
        self.max_replacements = nr;
        self
    }

    /// Sets the Lévy-flight parameters.
    pub fn with_levy(mut self, alpha: f64, beta: f64) -> Self {
        self.levy_alpha = alpha;
        self.levy_beta = beta;
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Sets the per-variable polynomial mutation probability.
    pub fn with_mutation_prob(mut self, prob: f64) -> Self {
        self.mutation_prob = Some(prob);
        self
    }

    /// Sets the priority strategy.
    pub fn with_priority(mut self, priority: PriorityStrategy) -> Self {
        self.priority = priority;
        self
    }

    /// Resolves and sets the priority strategy from its configuration name.
    pub fn with_priority_named(mut self, name: &str, value: f64) -> Result<Self, ConfigError> {
        self.priority = PriorityStrategy::from_name(name, value)?;
        Ok(self)
    }

    /// Enables or disables parallel evaluation of the initial population.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of subproblems: `C(n_obj + n_partitions - 1, n_obj - 1)`.
    ///
    /// `None` if the count overflows `usize`.
    pub fn population_size(&self) -> Option<usize> {
        lattice_size(self.n_obj, self.n_partitions)
    }

    /// Effective per-variable polynomial mutation probability.
    pub fn effective_mutation_prob(&self) -> f64 {
        self.mutation_prob
            .unwrap_or_else(|| 1.0 / self.n_var.max(1) as f64)
    }

    /// The variation pipeline described by this configuration.
    pub fn mutation(&self) -> LevyPolynomialMutation {
        LevyPolynomialMutation::new(
            self.levy_alpha,
            self.levy_beta,
            self.mutation_eta,
            self.effective_mutation_prob(),
        )
    }

    /// Validates the configuration.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_obj == 0 {
            return Err(ConfigError::ZeroObjectives);
        }
        if self.n_var == 0 {
            return Err(ConfigError::ZeroVariables);
        }
        if self.n_partitions == 0 {
            return Err(ConfigError::ZeroPartitions);
        }
        self.bounds.validate(self.n_var)?;

        let n_pop = self.population_size().ok_or(ConfigError::LatticeTooLarge {
            n_obj: self.n_obj,
            n_partitions: self.n_partitions,
        })?;
        if self.neighborhood_size == 0 || self.neighborhood_size > n_pop {
            return Err(ConfigError::NeighborhoodSize {
                t: self.neighborhood_size,
                n_pop,
            });
        }
        if !(0.0..=1.0).contains(&self.delta) {
            return Err(ConfigError::Delta(self.delta));
        }
        if self.max_replacements == 0 {
            return Err(ConfigError::ZeroReplacements);
        }
        if !(self.levy_beta > 0.0 && self.levy_beta < 2.0) {
            return Err(ConfigError::LevyBeta(self.levy_beta));
        }
        if !self.levy_alpha.is_finite() || self.levy_alpha < 0.0 {
            return Err(ConfigError::LevyAlpha(self.levy_alpha));
        }
        if !self.mutation_eta.is_finite() || self.mutation_eta < 0.0 {
            return Err(ConfigError::MutationEta(self.mutation_eta));
        }
        if let Some(prob) = self.mutation_prob {
            if !(0.0..=1.0).contains(&prob) {
                return Err(ConfigError::MutationProb(prob));
            }
        }
        self.priority.validate()
    }
}
