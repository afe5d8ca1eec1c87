//! Index-aligned population storage.

/// Decision vectors `X` and objective vectors `Y`, one row per subproblem.
///
/// Row `i` belongs to subproblem `i` for the whole run. Rows are only
/// overwritten through [`replace`](Population::replace); the population
/// never grows or shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    decisions: Vec<Vec<f64>>,
    objectives: Vec<Vec<f64>>,
}

impl Population {
    /// Builds a population from evaluated rows.
    ///
    /// # Panics
    /// Panics if the two arrays have different lengths.
    pub fn new(decisions: Vec<Vec<f64>>, objectives: Vec<Vec<f64>>) -> Self {
        assert_eq!(
            decisions.len(),
            objectives.len(),
            "decision and objective arrays must be index-aligned"
        );
        Self {
            decisions,
            objectives,
        }
    }

    /// Number of subproblems.
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Decision vector of subproblem `i`.
    pub fn decision(&self, i: usize) -> &[f64] {
        &self.decisions[i]
    }

    /// Objective vector of subproblem `i`.
    pub fn objective(&self, i: usize) -> &[f64] {
        &self.objectives[i]
    }

    /// All decision vectors.
    pub fn decisions(&self) -> &[Vec<f64>] {
        &self.decisions
    }

    /// All objective vectors.
    pub fn objectives(&self) -> &[Vec<f64>] {
        &self.objectives
    }

    /// Overwrites row `k` with an offspring and its objectives.
    pub fn replace(&mut self, k: usize, x: &[f64], f: &[f64]) {
        self.decisions[k].copy_from_slice(x);
        self.objectives[k].copy_from_slice(f);
    }

    /// Row `i` as `[objectives..., decisions...]`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.objectives[i].len() + self.decisions[i].len());
        row.extend_from_slice(&self.objectives[i]);
        row.extend_from_slice(&self.decisions[i]);
        row
    }

    /// Splits the population into `(decisions, objectives)`.
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (self.decisions, self.objectives)
    }
}
