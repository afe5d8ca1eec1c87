//! Problem decomposition: weight vectors, neighborhoods, and scalarization.
//!
//! MOEA/D turns one multi-objective problem into `n_pop` scalar
//! subproblems. Each subproblem owns a weight vector on the unit simplex,
//! a neighborhood of nearby subproblems, and is scored with the
//! Tchebycheff aggregate relative to the running ideal point.
//!
//! # Functions
//!
//! - [`das_dennis`]: Simplex-lattice weight vectors
//! - [`neighborhoods`]: T nearest weight vectors per subproblem
//! - [`tchebycheff`]: Weighted worst-component distance to the ideal point
//! - [`IdealPoint`]: Running componentwise minimum of evaluated objectives
//!
//! # References
//!
//! - Das & Dennis (1998), "Normal-Boundary Intersection"
//! - Zhang & Li (2007), "MOEA/D: A Multiobjective Evolutionary Algorithm
//!   Based on Decomposition"
//! - Zhang, Liu & Li (2009), "The Performance of a New Version of MOEA/D on
//!   CEC09 Unconstrained MOP Test Instances" (dynamic resource allocation)

/// Floor substituted for tiny weight components in [`tchebycheff`].
pub const WEIGHT_FLOOR: f64 = 1e-6;

/// Binomial coefficient `C(n, k)`.
///
/// Computed multiplicatively, so intermediate values stay exact. Returns
/// `None` if an intermediate product overflows `usize`.
pub fn n_combinations(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result = 1usize;
    for i in 0..k {
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

/// Number of Das-Dennis weight vectors for `n_obj` objectives and
/// `n_partitions` divisions: `C(n_obj + n_partitions - 1, n_obj - 1)`.
///
/// Returns `Some(0)` when `n_obj` is 0, and `None` when the count does not
/// fit in `usize`.
pub fn lattice_size(n_obj: usize, n_partitions: usize) -> Option<usize> {
    if n_obj == 0 {
        return Some(0);
    }
    n_combinations(n_obj.checked_add(n_partitions)? - 1, n_obj - 1)
}

/// Generates the Das-Dennis simplex-lattice design.
///
/// Enumerates every vector of `n_obj` non-negative integers summing to
/// `n_partitions`, divided by `n_partitions`. The first component varies
/// slowest and ascends, so the order is fixed:
///
/// ```
/// use u_moead::moead::decomposition::das_dennis;
///
/// let w = das_dennis(2, 2);
/// assert_eq!(w, vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]]);
/// ```
///
/// # Panics
/// Panics if `n_obj` or `n_partitions` is zero. [`MoeadConfig::validate`]
/// rejects both before this is reached.
///
/// [`MoeadConfig::validate`]: super::MoeadConfig::validate
pub fn das_dennis(n_obj: usize, n_partitions: usize) -> Vec<Vec<f64>> {
    assert!(n_obj > 0, "n_obj must be at least 1");
    assert!(n_partitions > 0, "n_partitions must be at least 1");

    let mut points = Vec::with_capacity(lattice_size(n_obj, n_partitions).unwrap_or(0));
    let mut point = vec![0.0_f64; n_obj];
    das_dennis_recursive(n_partitions, 0, n_partitions, &mut point, &mut points);
    points
}

fn das_dennis_recursive(
    divisions: usize,
    depth: usize,
    remaining: usize,
    current: &mut Vec<f64>,
    result: &mut Vec<Vec<f64>>,
) {
    if depth == current.len() - 1 {
        current[depth] = remaining as f64 / divisions as f64;
        result.push(current.clone());
        return;
    }

    for i in 0..=remaining {
        current[depth] = i as f64 / divisions as f64;
        das_dennis_recursive(divisions, depth + 1, remaining - i, current, result);
    }
}

/// Computes the `t` nearest weight vectors of every weight vector.
///
/// Rows are ordered by ascending Euclidean distance, ties broken by
/// ascending index. Every subproblem is its own nearest neighbor: with
/// distinct weight vectors, row `i` always starts with `i`.
///
/// # Panics
/// Panics if `t` is zero or larger than `weights.len()`.
pub fn neighborhoods(weights: &[Vec<f64>], t: usize) -> Vec<Vec<usize>> {
    let n = weights.len();
    assert!(t >= 1 && t <= n, "neighborhood size {t} out of range [1, {n}]");

    weights
        .iter()
        .map(|wi| {
            let mut distances: Vec<(usize, f64)> = weights
                .iter()
                .enumerate()
                .map(|(j, wj)| (j, euclidean(wi, wj)))
                .collect();
            distances.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
            distances.into_iter().take(t).map(|(j, _)| j).collect()
        })
        .collect()
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Tchebycheff scalarization: `max_j w_j * |f_j - z_j|`.
///
/// Weight components below [`WEIGHT_FLOOR`] are raised to it, so a zero
/// weight still contributes and the aggregate never collapses to zero
/// for a point that differs from the ideal point.
///
/// ```
/// use u_moead::moead::decomposition::tchebycheff;
///
/// // max(0.5 * |3 - 1|, 0.5 * |2 - 1|) = 1.0
/// let cost = tchebycheff(&[3.0, 2.0], &[0.5, 0.5], &[1.0, 1.0]);
/// assert!((cost - 1.0).abs() < 1e-12);
/// ```
pub fn tchebycheff(f: &[f64], w: &[f64], z: &[f64]) -> f64 {
    debug_assert_eq!(f.len(), w.len(), "objective/weight length mismatch");
    debug_assert_eq!(f.len(), z.len(), "objective/ideal length mismatch");

    f.iter()
        .zip(w)
        .zip(z)
        .map(|((&fj, &wj), &zj)| wj.max(WEIGHT_FLOOR) * (fj - zj).abs())
        .fold(0.0, f64::max)
}

/// The ideal (reference) point `z`: the componentwise minimum of every
/// objective vector observed so far.
///
/// Components only ever decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealPoint {
    values: Vec<f64>,
}

impl IdealPoint {
    /// Initializes `z` from a set of objective vectors.
    ///
    /// # Panics
    /// Panics if `objectives` is empty.
    pub fn from_objectives(objectives: &[Vec<f64>]) -> Self {
        let first = objectives
            .first()
            .expect("ideal point needs at least one objective vector");
        let mut ideal = Self {
            values: first.clone(),
        };
        for f in &objectives[1..] {
            ideal.update(f);
        }
        ideal
    }

    /// Lowers each component of `z` to `min(z_j, f_j)`.
    ///
    /// Returns `true` when any component moved.
    pub fn update(&mut self, f: &[f64]) -> bool {
        debug_assert_eq!(f.len(), self.values.len(), "objective length mismatch");
        let mut moved = false;
        for (z, &v) in self.values.iter_mut().zip(f) {
            if v < *z {
                *z = v;
                moved = true;
            }
        }
        moved
    }

    /// Current ideal point values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the tracker and returns the ideal point.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
