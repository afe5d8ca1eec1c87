//! Real-coded variation operators.
//!
//! The offspring of a subproblem is produced by a two-stage pipeline,
//! each stage followed by bound repair:
//!
//! 1. [`levy_flight`]: heavy-tailed step along the difference between the
//!    current individual and a mate
//! 2. [`polynomial_mutation`]: bounded, symmetric per-variable perturbation
//!
//! [`LevyPolynomialMutation`] bundles both stages with their parameters.
//!
//! # References
//!
//! - Mantegna (1994), "Fast, accurate algorithm for numerical simulation of
//!   Lévy stable stochastic processes"
//! - Yang & Deb (2009), "Cuckoo Search via Lévy Flights"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design"

use super::types::Bounds;
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// Mantegna's scale `sigma_u` for a Lévy-stable step with index `beta`.
///
/// `sigma_u = [Γ(1+β)·sin(πβ/2) / (Γ((1+β)/2)·β·2^((β-1)/2))]^(1/β)`
pub fn mantegna_sigma(beta: f64) -> f64 {
    let numerator = libm::tgamma(1.0 + beta) * (PI * beta / 2.0).sin();
    let denominator = libm::tgamma((1.0 + beta) / 2.0) * beta * 2f64.powf((beta - 1.0) / 2.0);
    (numerator / denominator).powf(1.0 / beta)
}

/// Draws one Lévy-distributed step length with Mantegna's algorithm.
///
/// `step = u / |v|^(1/β)` with `u ~ N(0, sigma_u²)` and `v ~ N(0, 1)`.
/// Most steps are small; a few are very large.
pub fn levy_step<R: Rng>(sigma_u: f64, beta: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.sample::<f64, _>(StandardNormal) * sigma_u;
    let v: f64 = rng.sample(StandardNormal);
    u / v.abs().powf(1.0 / beta)
}

/// Lévy-flight move of `xi` relative to its mate `xj`.
///
/// Each variable moves by `alpha * step * (xi - xj)` with an independent
/// Lévy step, so the search is biased along the line between the two
/// individuals. Variables where `xi` and `xj` coincide do not move.
/// The result is **not** repaired; see [`repair_bounds`].
///
/// # Panics
/// Panics if `xi` and `xj` have different lengths.
pub fn levy_flight<R: Rng>(xi: &[f64], xj: &[f64], alpha: f64, beta: f64, rng: &mut R) -> Vec<f64> {
    assert_eq!(xi.len(), xj.len(), "parents must have equal length");

    let sigma_u = mantegna_sigma(beta);
    xi.iter()
        .zip(xj)
        .map(|(&a, &b)| {
            let moved = a + alpha * levy_step(sigma_u, beta, rng) * (a - b);
            // 0 * inf when |v| underflows
            if moved.is_nan() {
                a
            } else {
                moved
            }
        })
        .collect()
}

/// Polynomial mutation (Deb & Goyal, 1996), applied in place.
///
/// Each variable is perturbed with probability `prob`. The perturbation
/// is drawn from a polynomial distribution with index `eta`: symmetric
/// around zero, confined to the variable's range, and narrower as `eta`
/// grows. Variables with an empty range are left untouched.
pub fn polynomial_mutation<R: Rng>(x: &mut [f64], bounds: &Bounds, eta: f64, prob: f64, rng: &mut R) {
    debug_assert_eq!(x.len(), bounds.len(), "decision/bounds length mismatch");

    for ((v, &low), &high) in x.iter_mut().zip(&bounds.lower).zip(&bounds.upper) {
        if rng.random_range(0.0..1.0) >= prob {
            continue;
        }
        let range = high - low;
        if range <= 0.0 {
            continue;
        }

        let u: f64 = rng.random_range(0.0..1.0);
        let delta1 = (*v - low) / range;
        let delta2 = (high - *v) / range;
        let exponent = 1.0 / (eta + 1.0);

        let delta_q = if u < 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };

        *v += delta_q * range;
    }
}

/// Clamps every component of `x` into `[lower, upper]`.
///
/// Returns the number of components that were out of range.
pub fn repair_bounds(x: &mut [f64], bounds: &Bounds) -> usize {
    debug_assert_eq!(x.len(), bounds.len(), "decision/bounds length mismatch");

    let mut repaired = 0;
    for ((v, &low), &high) in x.iter_mut().zip(&bounds.lower).zip(&bounds.upper) {
        if *v < low {
            *v = low;
            repaired += 1;
        } else if *v > high {
            *v = high;
            repaired += 1;
        }
    }
    repaired
}

/// Lévy-flight followed by polynomial mutation, with bound repair after
/// each stage.
///
/// ```
/// use rand::SeedableRng;
/// use u_moead::moead::operators::LevyPolynomialMutation;
/// use u_moead::moead::Bounds;
///
/// let op = LevyPolynomialMutation::new(1.0, 1.5, 20.0, 0.5);
/// let bounds = Bounds::uniform(2, 0.0, 1.0);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
///
/// let child = op.apply(&[0.2, 0.8], &[0.6, 0.4], &bounds, &mut rng);
/// assert!(bounds.contains(&child));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LevyPolynomialMutation {
    /// Lévy step scale `alpha`.
    pub alpha: f64,
    /// Lévy stability index `beta`, in `(0, 2)`.
    pub beta: f64,
    /// Polynomial mutation distribution index `eta`.
    pub eta: f64,
    /// Per-variable polynomial mutation probability.
    pub prob: f64,
}

impl LevyPolynomialMutation {
    /// Creates the pipeline.
    pub fn new(alpha: f64, beta: f64, eta: f64, prob: f64) -> Self {
        Self {
            alpha,
            beta,
            eta,
            prob,
        }
    }

    /// Produces one repaired offspring from `xi` and its mate `xj`.
    pub fn apply<R: Rng>(&self, xi: &[f64], xj: &[f64], bounds: &Bounds, rng: &mut R) -> Vec<f64> {
        let mut child = levy_flight(xi, xj, self.alpha, self.beta, rng);
        repair_bounds(&mut child, bounds);
        polynomial_mutation(&mut child, bounds, self.eta, self.prob, rng);
        repair_bounds(&mut child, bounds);
        child
    }
}
