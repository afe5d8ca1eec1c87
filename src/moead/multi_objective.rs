//! Pareto dominance utilities for reporting on a finished population.
//!
//! MOEA/D itself never ranks solutions by dominance; these helpers are used
//! to pull the non-dominated subset out of the final population.
//!
//! # Algorithms
//!
//! - [`dominates`]: Pareto dominance test (minimization)
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

/// Ranks and fronts produced by [`non_dominated_sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Pareto rank of each solution (0 = non-dominated).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` holds every rank-0 index.
    pub fronts: Vec<Vec<usize>>,
}

/// Whether `a` Pareto-dominates `b`: no worse in every objective and
/// strictly better in at least one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len(), "objective vectors must have equal length");

    let mut strictly_better = false;
    for (&va, &vb) in a.iter().zip(b) {
        if va > vb {
            return false;
        }
        if va < vb {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting. All objectives are minimized.
///
/// Duplicate objective vectors do not dominate each other and share a rank.
/// An empty input yields empty ranks and no fronts.
///
/// # Complexity
///
/// O(m · n²) for n solutions with m objectives.
///
/// # Example
///
/// ```
/// use u_moead::moead::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
///     vec![4.0, 4.0], // dominated by [3, 3]
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.fronts[0], vec![0, 1, 2]);
/// assert_eq!(result.ranks[3], 1);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult {
            ranks: Vec::new(),
            fronts: Vec::new(),
        };
    }

    let mut dominated_count = vec![0usize; n];
    let mut dominates_list: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&objectives[i], &objectives[j]) {
                dominates_list[i].push(j);
                dominated_count[j] += 1;
            } else if dominates(&objectives[j], &objectives[i]) {
                dominates_list[j].push(i);
                dominated_count[i] += 1;
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut current: Vec<usize> = (0..n).filter(|&i| dominated_count[i] == 0).collect();
    let mut fronts = Vec::new();

    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominates_list[i] {
                dominated_count[j] -= 1;
                if dominated_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next.push(j);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    NondominatedSortResult { ranks, fronts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominates() {
        assert!(dominates(&[1.0, 2.0], &[2.0, 2.0]));
        assert!(!dominates(&[2.0, 2.0], &[1.0, 2.0]));
        assert!(!dominates(&[1.0, 3.0], &[2.0, 2.0]));
        assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0]));
    }

    #[test]
    fn test_sort_chain() {
        let objectives = vec![vec![3.0, 3.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let result = non_dominated_sort(&objectives);
        assert_eq!(result.ranks, vec![2, 0, 1]);
        assert_eq!(result.fronts, vec![vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn test_sort_duplicates_share_rank() {
        let objectives = vec![vec![1.0, 2.0], vec![1.0, 2.0], vec![2.0, 3.0]];
        let result = non_dominated_sort(&objectives);
        assert_eq!(result.ranks, vec![0, 0, 1]);
        assert_eq!(result.fronts[0], vec![0, 1]);
    }

    #[test]
    fn test_sort_empty() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
    }

    #[test]
    fn test_every_index_in_exactly_one_front() {
        let objectives: Vec<Vec<f64>> = (0..20)
            .map(|i| {
                let t = i as f64;
                vec![(t * 7.0) % 11.0, (t * 3.0) % 13.0]
            })
            .collect();
        let result = non_dominated_sort(&objectives);
        let mut seen: Vec<usize> = result.fronts.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
        for (rank, front) in result.fronts.iter().enumerate() {
            for &i in front {
                assert_eq!(result.ranks[i], rank);
            }
        }
    }
}
