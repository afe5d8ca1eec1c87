//! Priority strategies for dynamic resource allocation.
//!
//! Once per generation, every subproblem receives a priority in `(0, 1]`.
//! The runner then visits subproblem `i` only if a uniform draw falls at
//! or below `priority[i]`, so higher-priority subproblems consume more of
//! the evaluation budget while no subproblem is ever retired for good.
//!
//! # References
//!
//! - Zhang, Liu & Li (2009), "The Performance of a New Version of MOEA/D on
//!   CEC09 Unconstrained MOP Test Instances"

use super::error::ConfigError;

/// Strategy assigning a resource-allocation priority to each subproblem.
///
/// Strategies are pure functions of `(index, n_pop)`; the parameter is
/// carried in the variant.
///
/// # Examples
///
/// ```
/// use u_moead::moead::PriorityStrategy;
///
/// // Every subproblem is evolved every generation (plain MOEA/D).
/// let all = PriorityStrategy::Fixed(1.0);
/// assert_eq!(all.values(4), vec![1.0; 4]);
///
/// // Resolved from a configuration name.
/// let half = PriorityStrategy::from_name("fixed", 0.5).unwrap();
/// assert_eq!(half, PriorityStrategy::Fixed(0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriorityStrategy {
    /// Every subproblem gets the same fixed probability.
    Fixed(f64),
}

impl Default for PriorityStrategy {
    fn default() -> Self {
        PriorityStrategy::Fixed(1.0)
    }
}

impl PriorityStrategy {
    /// Resolves a strategy from its configuration name and parameter.
    ///
    /// Names are matched case-insensitively. `"fixed"` (alias
    /// `"fixed_value"`) maps to [`Fixed`](Self::Fixed).
    pub fn from_name(name: &str, value: f64) -> Result<Self, ConfigError> {
        let strategy = match name.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed_value" => PriorityStrategy::Fixed(value),
            _ => return Err(ConfigError::UnknownPriority(name.to_string())),
        };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Configuration name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            PriorityStrategy::Fixed(_) => "fixed",
        }
    }

    /// Priority of subproblem `index` in a population of `n_pop`.
    pub fn priority(&self, _index: usize, _n_pop: usize) -> f64 {
        match *self {
            PriorityStrategy::Fixed(value) => value,
        }
    }

    /// Priority vector for the whole population.
    pub fn values(&self, n_pop: usize) -> Vec<f64> {
        (0..n_pop).map(|i| self.priority(i, n_pop)).collect()
    }

    /// Checks that the strategy yields usable probabilities.
    ///
    /// A zero priority is rejected: a population where no subproblem can
    /// pass the gate never consumes budget and never terminates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            PriorityStrategy::Fixed(value) => {
                if !(value > 0.0 && value <= 1.0) {
                    return Err(ConfigError::PriorityValue(value));
                }
            }
        }
        Ok(())
    }
}
