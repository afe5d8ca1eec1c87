//! Core trait and value types shared by the engine.
//!
//! [`Objective`] is the contract between the generic MOEA/D engine and a
//! concrete multi-objective problem; [`Bounds`] describes the box the
//! decision vectors live in.

use super::error::ConfigError;
use rand::Rng;

/// A vector-valued objective function.
///
/// Maps a decision vector of length `n_var` to an objective vector of
/// length `n_obj`. All objectives are **minimized**.
///
/// Implementations must be deterministic: the same input always yields the
/// same output. Any `Fn(&[f64]) -> Vec<f64>` closure is an `Objective`.
///
/// ```
/// use u_moead::moead::Objective;
///
/// let identity = |x: &[f64]| x.to_vec();
/// assert_eq!(identity.evaluate(&[0.25, 0.5]), vec![0.25, 0.5]);
/// ```
pub trait Objective: Send + Sync {
    /// Evaluates a decision vector.
    fn evaluate(&self, x: &[f64]) -> Vec<f64>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        self(x)
    }
}

/// Per-variable box constraints `lower[i] <= x[i] <= upper[i]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Lower bound of each decision variable.
    pub lower: Vec<f64>,
    /// Upper bound of each decision variable.
    pub upper: Vec<f64>,
}

impl Bounds {
    /// Creates per-variable bounds.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self { lower, upper }
    }

    /// Broadcasts scalar bounds to `n_var` variables.
    pub fn uniform(n_var: usize, lower: f64, upper: f64) -> Self {
        Self {
            lower: vec![lower; n_var],
            upper: vec![upper; n_var],
        }
    }

    /// Number of variables covered.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Whether no variables are covered.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Whether `x` lies inside the box.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.len()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| lo <= v && v <= hi)
    }

    /// Draws a point uniformly from the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| lo + rng.random_range(0.0..1.0) * (hi - lo))
            .collect()
    }

    /// Checks the bounds against the expected number of variables.
    pub fn validate(&self, n_var: usize) -> Result<(), ConfigError> {
        if self.lower.len() != n_var || self.upper.len() != n_var {
            return Err(ConfigError::BoundsDimension {
                expected: n_var,
                lower: self.lower.len(),
                upper: self.upper.len(),
            });
        }
        for (index, (&lower, &upper)) in self.lower.iter().zip(&self.upper).enumerate() {
            if !lower.is_finite() || !upper.is_finite() || lower > upper {
                return Err(ConfigError::InvalidBounds {
                    index,
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_closure_is_objective() {
        let f = |x: &[f64]| vec![x[0] * 2.0, x[1] + 1.0];
        assert_eq!(f.evaluate(&[1.0, 2.0]), vec![2.0, 3.0]);
    }

    #[test]
    fn test_uniform_bounds() {
        let b = Bounds::uniform(3, -1.0, 1.0);
        assert_eq!(b.len(), 3);
        assert_eq!(b.lower, vec![-1.0; 3]);
        assert_eq!(b.upper, vec![1.0; 3]);
        assert!(b.validate(3).is_ok());
    }

    #[test]
    fn test_validate_length_mismatch() {
        let b = Bounds::new(vec![0.0, 0.0], vec![1.0]);
        assert!(matches!(
            b.validate(2),
            Err(ConfigError::BoundsDimension { expected: 2, lower: 2, upper: 1 })
        ));
    }

    #[test]
    fn test_validate_inverted() {
        let b = Bounds::new(vec![0.0, 2.0], vec![1.0, 1.0]);
        assert!(matches!(
            b.validate(2),
            Err(ConfigError::InvalidBounds { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_non_finite() {
        let b = Bounds::new(vec![f64::NEG_INFINITY], vec![1.0]);
        assert!(b.validate(1).is_err());
    }

    #[test]
    fn test_degenerate_interval_is_valid() {
        let b = Bounds::uniform(2, 0.5, 0.5);
        assert!(b.validate(2).is_ok());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(b.sample(&mut rng), vec![0.5, 0.5]);
    }

    #[test]
    fn test_sample_within_bounds() {
        let b = Bounds::new(vec![-5.0, 0.0, 10.0], vec![5.0, 1.0, 20.0]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let x = b.sample(&mut rng);
            assert!(b.contains(&x), "{x:?} outside bounds");
        }
    }
}
