//! MOEA/D-DRA generational loop.
//!
//! [`MoeadRunner`] drives the run: decomposition → initial population →
//! repeated generations of gated offspring production and bounded
//! replacement → final report. [`MoeadState`] holds everything that
//! changes during a run and exposes one generation at a time.

use super::config::MoeadConfig;
use super::decomposition::{das_dennis, neighborhoods, tchebycheff, IdealPoint};
use super::error::{MoeadError, Result};
use super::multi_objective::non_dominated_sort;
use super::operators::LevyPolynomialMutation;
use super::population::Population;
use super::report::{GenerationInfo, NullSink, ReportSink, Snapshot};
use super::types::Objective;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, error, info, instrument};

/// Result of a MOEA/D run.
#[derive(Debug, Clone)]
pub struct MoeadResult {
    /// Final decision vectors, one per subproblem.
    pub decisions: Vec<Vec<f64>>,

    /// Final objective vectors, index-aligned with `decisions`.
    pub objectives: Vec<Vec<f64>>,

    /// Weight vector of each subproblem.
    pub weights: Vec<Vec<f64>>,

    /// Ideal point: componentwise minimum over every evaluation.
    pub ideal_point: Vec<f64>,

    /// Total number of objective evaluations.
    pub evaluations: usize,

    /// Final generation counter.
    pub generations: usize,

    /// Counters reported at the start of each generation, then at termination.
    pub history: Vec<GenerationInfo>,

    /// Per-generation statistics.
    pub generation_stats: Vec<GenerationStats>,
}

impl MoeadResult {
    /// Indices of the non-dominated members of the final population.
    pub fn pareto_front(&self) -> Vec<usize> {
        non_dominated_sort(&self.objectives)
            .fronts
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

/// What happened during one generation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// Generation counter during the sweep.
    pub generation: usize,

    /// Subproblems that passed the priority gate (one evaluation each).
    pub evolved: usize,

    /// Subproblems skipped by the priority gate.
    pub skipped: usize,

    /// Total population slots overwritten by offspring.
    pub replacements: usize,

    /// Largest number of slots a single offspring overwrote.
    pub max_replacements_per_offspring: usize,
}

/// Mutable state of a run.
///
/// Created by [`initialize`](Self::initialize), advanced by
/// [`evolve_generation`](Self::evolve_generation). The weight vectors and
/// neighborhoods never change after initialization.
#[derive(Debug, Clone)]
pub struct MoeadState {
    weights: Vec<Vec<f64>>,
    neighborhoods: Vec<Vec<usize>>,
    population: Population,
    ideal: IdealPoint,
    priorities: Vec<f64>,
    evaluations: usize,
    generation: usize,
}

impl MoeadState {
    /// Builds the decomposition and the evaluated initial population.
    ///
    /// The configuration must already be valid.
    pub fn initialize<P, R>(problem: &P, config: &MoeadConfig, rng: &mut R) -> Result<Self>
    where
        P: Objective + ?Sized,
        R: Rng,
    {
        let weights = das_dennis(config.n_obj, config.n_partitions);
        let neighborhoods = neighborhoods(&weights, config.neighborhood_size);
        let n_pop = weights.len();

        let decisions: Vec<Vec<f64>> = (0..n_pop).map(|_| config.bounds.sample(rng)).collect();
        let objectives = evaluate_initial(problem, &decisions, config)?;

        let ideal = IdealPoint::from_objectives(&objectives);
        let priorities = config.priority.values(n_pop);

        Ok(Self {
            weights,
            neighborhoods,
            population: Population::new(decisions, objectives),
            ideal,
            priorities,
            evaluations: n_pop,
            generation: 1,
        })
    }

    /// Runs one sweep over the population in random order.
    ///
    /// Each subproblem passes the priority gate with probability
    /// `priority[i]`. A passing subproblem picks its mating pool
    /// (neighborhood with probability `delta`, else the whole population),
    /// produces and evaluates one offspring, updates the ideal point, and
    /// lets the offspring replace at most `max_replacements` pool members
    /// it does not scalarize worse than.
    pub fn evolve_generation<P, R>(
        &mut self,
        problem: &P,
        config: &MoeadConfig,
        mutation: &LevyPolynomialMutation,
        rng: &mut R,
    ) -> Result<GenerationStats>
    where
        P: Objective + ?Sized,
        R: Rng,
    {
        let n_pop = self.population.len();
        let whole_population: Vec<usize> = (0..n_pop).collect();
        let mut order = whole_population.clone();
        order.shuffle(rng);

        let mut stats = GenerationStats {
            generation: self.generation,
            evolved: 0,
            skipped: 0,
            replacements: 0,
            max_replacements_per_offspring: 0,
        };

        for &i in &order {
            if self.priorities[i] < rng.random_range(0.0..1.0) {
                stats.skipped += 1;
                continue;
            }
            self.evaluations += 1;
            stats.evolved += 1;

            let pool: &[usize] = if rng.random_range(0.0..1.0) < config.delta {
                &self.neighborhoods[i]
            } else {
                &whole_population
            };
            let j = pool[rng.random_range(0..pool.len())];

            let child = mutation.apply(
                self.population.decision(i),
                self.population.decision(j),
                &config.bounds,
                rng,
            );
            let f = evaluate(problem, &child, config.n_obj, self.generation, self.evaluations)?;
            self.ideal.update(&f);

            let replaced = replace_in_pool(
                &mut self.population,
                &self.weights,
                &self.ideal,
                pool,
                &child,
                &f,
                config.max_replacements,
                rng,
            );
            stats.replacements += replaced;
            stats.max_replacements_per_offspring = stats.max_replacements_per_offspring.max(replaced);
        }

        self.generation += 1;
        Ok(stats)
    }

    /// Recomputes the priority vector for the next generation.
    pub fn refresh_priorities(&mut self, config: &MoeadConfig) {
        self.priorities = config.priority.values(self.population.len());
    }

    /// Current counters.
    pub fn info(&self) -> GenerationInfo {
        GenerationInfo {
            evaluations: self.evaluations,
            generation: self.generation,
        }
    }

    /// Borrowed snapshot for reporting.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            population: &self.population,
            info: self.info(),
        }
    }

    /// Weight vectors.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Neighborhood index lists.
    pub fn neighborhoods(&self) -> &[Vec<usize>] {
        &self.neighborhoods
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Current ideal point.
    pub fn ideal_point(&self) -> &[f64] {
        self.ideal.values()
    }

    /// Current priority vector.
    pub fn priorities(&self) -> &[f64] {
        &self.priorities
    }

    /// Evaluation counter `n_fe`.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Generation counter `c_gen`.
    pub fn generation(&self) -> usize {
        self.generation
    }

    fn into_result(self, history: Vec<GenerationInfo>, generation_stats: Vec<GenerationStats>) -> MoeadResult {
        let (decisions, objectives) = self.population.into_parts();
        MoeadResult {
            decisions,
            objectives,
            weights: self.weights,
            ideal_point: self.ideal.into_values(),
            evaluations: self.evaluations,
            generations: self.generation,
            history,
            generation_stats,
        }
    }
}

/// Executes MOEA/D-DRA.
///
/// # Usage
///
/// ```
/// use u_moead::moead::{MoeadConfig, MoeadRunner};
///
/// let config = MoeadConfig::new(2, 2)
///     .with_partitions(5)
///     .with_neighborhood_size(3)
///     .with_max_evaluations(60)
///     .with_seed(42);
///
/// let result = MoeadRunner::run(&|x: &[f64]| x.to_vec(), &config).unwrap();
/// assert_eq!(result.objectives.len(), 6);
/// assert!(result.evaluations >= 60);
/// ```
pub struct MoeadRunner;

impl MoeadRunner {
    /// Runs the optimization without reporting.
    pub fn run<P>(problem: &P, config: &MoeadConfig) -> Result<MoeadResult>
    where
        P: Objective + ?Sized,
    {
        Self::run_with_sink(problem, config, &mut NullSink)
    }

    /// Runs the optimization, reporting snapshots to `sink`.
    ///
    /// The random source is seeded from `config.seed`, or randomly when
    /// no seed is set.
    pub fn run_with_sink<P, S>(problem: &P, config: &MoeadConfig, sink: &mut S) -> Result<MoeadResult>
    where
        P: Objective + ?Sized,
        S: ReportSink + ?Sized,
    {
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Self::run_with_rng(problem, config, &mut rng, sink)
    }

    /// Runs the optimization with a caller-provided random source.
    ///
    /// Every random draw of the run comes from `rng`, in a fixed order, so
    /// equal seeds give bit-identical runs. `config.seed` is ignored.
    #[instrument(
        level = "info",
        skip_all,
        fields(n_obj = config.n_obj, n_var = config.n_var, budget = config.max_evaluations)
    )]
    pub fn run_with_rng<P, R, S>(
        problem: &P,
        config: &MoeadConfig,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<MoeadResult>
    where
        P: Objective + ?Sized,
        R: Rng,
        S: ReportSink + ?Sized,
    {
        config.validate().inspect_err(|e| error!(error = %e, "invalid configuration"))?;
        let mutation = config.mutation();

        let mut state = MoeadState::initialize(problem, config, rng)?;
        info!(
            n_pop = state.population.len(),
            neighborhood_size = config.neighborhood_size,
            priority = config.priority.name(),
            "initialized population"
        );

        let mut history = Vec::new();
        let mut generation_stats = Vec::new();

        while state.evaluations < config.max_evaluations {
            history.push(state.info());
            sink.record_generation(&state.snapshot())?;

            if state.generation > 1 {
                state.refresh_priorities(config);
            }

            let stats = state.evolve_generation(problem, config, &mutation, rng)?;
            debug!(
                generation = stats.generation,
                evaluations = state.evaluations,
                evolved = stats.evolved,
                replacements = stats.replacements,
                ideal = ?state.ideal.values(),
                "generation complete"
            );
            generation_stats.push(stats);
        }

        history.push(state.info());
        sink.record_final(&state.snapshot())?;
        info!(
            evaluations = state.evaluations,
            generations = state.generation,
            "optimization finished"
        );

        Ok(state.into_result(history, generation_stats))
    }
}

/// Offers `child` to the members of `pool` in random order.
///
/// A member is overwritten when the child's Tchebycheff cost under that
/// member's weight vector is no worse than the member's own. Stops after
/// `max_replacements` overwrites. Returns the number of overwrites.
#[allow(clippy::too_many_arguments)]
fn replace_in_pool<R: Rng>(
    population: &mut Population,
    weights: &[Vec<f64>],
    ideal: &IdealPoint,
    pool: &[usize],
    child: &[f64],
    f: &[f64],
    max_replacements: usize,
    rng: &mut R,
) -> usize {
    let mut visit = pool.to_vec();
    visit.shuffle(rng);

    let z = ideal.values();
    let mut replaced = 0;
    for k in visit {
        let w = &weights[k];
        if tchebycheff(f, w, z) <= tchebycheff(population.objective(k), w, z) {
            population.replace(k, child, f);
            replaced += 1;
        }
        if replaced >= max_replacements {
            break;
        }
    }
    replaced
}

/// Evaluates one decision vector and checks the result.
fn evaluate<P>(problem: &P, x: &[f64], n_obj: usize, generation: usize, evaluations: usize) -> Result<Vec<f64>>
where
    P: Objective + ?Sized,
{
    let f = problem.evaluate(x);
    check_objectives(f, n_obj, generation, evaluations)
}

fn check_objectives(f: Vec<f64>, n_obj: usize, generation: usize, evaluations: usize) -> Result<Vec<f64>> {
    if f.len() != n_obj {
        error!(generation, evaluations, expected = n_obj, got = f.len(), "objective dimension mismatch");
        return Err(MoeadError::ObjectiveDimension {
            expected: n_obj,
            got: f.len(),
            generation,
            evaluations,
        });
    }
    if f.iter().any(|v| !v.is_finite()) {
        error!(generation, evaluations, values = ?f, "objective returned non-finite values");
        return Err(MoeadError::NonFiniteObjective {
            values: f,
            generation,
            evaluations,
        });
    }
    Ok(f)
}

/// Evaluates the initial population, in parallel when enabled.
fn evaluate_initial<P>(problem: &P, decisions: &[Vec<f64>], config: &MoeadConfig) -> Result<Vec<Vec<f64>>>
where
    P: Objective + ?Sized,
{
    #[cfg(feature = "parallel")]
    let raw: Vec<Vec<f64>> = if config.parallel {
        decisions.par_iter().map(|x| problem.evaluate(x)).collect()
    } else {
        decisions.iter().map(|x| problem.evaluate(x)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let raw: Vec<Vec<f64>> = decisions.iter().map(|x| problem.evaluate(x)).collect();

    raw.into_iter()
        .enumerate()
        .map(|(i, f)| check_objectives(f, config.n_obj, 1, i + 1))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moead::problems::{Zdt1, Zdt2};
    use crate::moead::report::MemorySink;
    use crate::moead::{ConfigError, PriorityStrategy};

    fn identity(x: &[f64]) -> Vec<f64> {
        x.to_vec()
    }

    fn small_config() -> MoeadConfig {
        MoeadConfig::new(2, 2)
            .with_partitions(5)
            .with_neighborhood_size(3)
            .with_max_evaluations(12)
            .with_seed(42)
    }

    #[test]
    fn test_identity_end_to_end() {
        let config = small_config();
        let mut sink = MemorySink::new();
        let result = MoeadRunner::run_with_sink(&identity, &config, &mut sink).unwrap();

        assert_eq!(result.objectives.len(), 6);
        assert_eq!(result.decisions.len(), 6);
        // Full priority: one generation evaluates every subproblem once.
        assert_eq!(result.evaluations, 12);
        assert_eq!(result.generations, 2);
        for (x, f) in result.decisions.iter().zip(&result.objectives) {
            assert_eq!(x, f);
            assert!(f.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
        assert_eq!(sink.generations.len(), 1);
        assert_eq!(
            sink.final_record.as_ref().unwrap().info,
            GenerationInfo {
                evaluations: 12,
                generation: 2
            }
        );
    }

    #[test]
    fn test_ideal_point_is_minimum_of_all_evaluations() {
        let config = small_config();
        let seen = std::sync::Mutex::new(Vec::new());
        let problem = |x: &[f64]| {
            seen.lock().unwrap().push(x.to_vec());
            x.to_vec()
        };
        let result = MoeadRunner::run(&problem, &config).unwrap();
        let seen = seen.into_inner().unwrap();

        assert_eq!(seen.len(), 12);
        for j in 0..2 {
            let min = seen.iter().map(|f| f[j]).fold(f64::INFINITY, f64::min);
            assert_eq!(result.ideal_point[j], min);
        }
    }

    #[test]
    fn test_invalid_config_fails_before_evaluation() {
        let config = small_config().with_neighborhood_size(10);
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let problem = |x: &[f64]| {
            calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            x.to_vec()
        };
        let err = MoeadRunner::run(&problem, &config).unwrap_err();
        assert!(matches!(
            err,
            MoeadError::Config(ConfigError::NeighborhoodSize { t: 10, n_pop: 6 })
        ));
        assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn test_non_finite_objective_is_fatal() {
        let config = small_config().with_max_evaluations(100);
        let problem = |x: &[f64]| {
            if x[0] > 0.5 {
                vec![f64::NAN, x[1]]
            } else {
                x.to_vec()
            }
        };
        let err = MoeadRunner::run(&problem, &config).unwrap_err();
        assert!(matches!(err, MoeadError::NonFiniteObjective { .. }));
    }

    #[test]
    fn test_wrong_objective_count_is_fatal() {
        let config = small_config();
        let err = MoeadRunner::run(&|x: &[f64]| vec![x[0]], &config).unwrap_err();
        assert!(matches!(
            err,
            MoeadError::ObjectiveDimension {
                expected: 2,
                got: 1,
                generation: 1,
                evaluations: 1
            }
        ));
    }

    #[test]
    fn test_budget_not_above_population_runs_no_generation() {
        let config = small_config().with_max_evaluations(6);
        let mut sink = MemorySink::new();
        let result = MoeadRunner::run_with_sink(&identity, &config, &mut sink).unwrap();
        assert_eq!(result.evaluations, 6);
        assert_eq!(result.generations, 1);
        assert!(sink.generations.is_empty());
        assert!(sink.final_record.is_some());
        assert!(result.generation_stats.is_empty());
    }

    #[test]
    fn test_evaluations_match_gate_passes() {
        let config = small_config()
            .with_max_evaluations(200)
            .with_priority(PriorityStrategy::Fixed(0.5));
        let result = MoeadRunner::run(&identity, &config).unwrap();

        assert_eq!(result.history.len(), result.generation_stats.len() + 1);
        for (window, stats) in result.history.windows(2).zip(&result.generation_stats) {
            assert_eq!(window[1].evaluations - window[0].evaluations, stats.evolved);
            assert_eq!(window[1].generation, window[0].generation + 1);
            assert_eq!(stats.evolved + stats.skipped, 6);
        }
        let skipped: usize = result.generation_stats.iter().map(|s| s.skipped).sum();
        assert!(skipped > 0, "half priority should skip some subproblems");
    }

    #[test]
    fn test_replacement_cap_respected() {
        for nr in 1..=3 {
            let config = MoeadConfig::new(2, 10)
                .with_partitions(19)
                .with_neighborhood_size(5)
                .with_max_replacements(nr)
                .with_max_evaluations(600)
                .with_seed(7);
            let result = MoeadRunner::run(&Zdt1, &config).unwrap();
            for stats in &result.generation_stats {
                assert!(stats.max_replacements_per_offspring <= nr);
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let config = MoeadConfig::new(2, 6)
            .with_partitions(9)
            .with_neighborhood_size(4)
            .with_max_evaluations(300)
            .with_priority(PriorityStrategy::Fixed(0.7))
            .with_seed(123);

        let a = MoeadRunner::run(&Zdt2, &config).unwrap();
        let b = MoeadRunner::run(&Zdt2, &config).unwrap();
        assert_eq!(a.decisions, b.decisions);
        assert_eq!(a.objectives, b.objectives);
        assert_eq!(a.history, b.history);
        assert_eq!(a.ideal_point, b.ideal_point);
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = MoeadConfig::new(2, 6)
            .with_partitions(9)
            .with_neighborhood_size(4)
            .with_max_evaluations(100);
        let a = MoeadRunner::run(&Zdt1, &config.clone().with_seed(1)).unwrap();
        let b = MoeadRunner::run(&Zdt1, &config.with_seed(2)).unwrap();
        assert_ne!(a.decisions, b.decisions);
    }

    #[test]
    fn test_zdt1_distance_to_front_shrinks() {
        let config = MoeadConfig::new(2, 10)
            .with_partitions(29)
            .with_neighborhood_size(10)
            .with_max_evaluations(6_000)
            .with_seed(42);
        let mut sink = MemorySink::new();
        let result = MoeadRunner::run_with_sink(&Zdt1, &config, &mut sink).unwrap();

        // g = 1 on the true front; rows are [f1, f2, x1, ..., x10].
        let mean_g = |rows: &[Vec<f64>]| {
            rows.iter()
                .map(|row| 1.0 + row[3..].iter().sum::<f64>())
                .sum::<f64>()
                / rows.len() as f64
        };
        let initial = mean_g(&sink.generations[0].rows);
        let last = mean_g(&sink.final_record.as_ref().unwrap().rows);
        assert!(last < initial, "mean g went from {initial} to {last}");
        assert!(!result.pareto_front().is_empty());
    }

    #[test]
    fn test_state_step_by_step() {
        let config = small_config().with_max_evaluations(1000);
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = MoeadState::initialize(&identity, &config, &mut rng).unwrap();

        assert_eq!(state.evaluations(), 6);
        assert_eq!(state.generation(), 1);
        assert_eq!(state.weights().len(), 6);
        assert_eq!(state.neighborhoods()[2][0], 2);
        assert_eq!(state.priorities(), &[1.0; 6]);

        let mut previous_ideal = state.ideal_point().to_vec();
        for _ in 0..5 {
            let stats = state
                .evolve_generation(&identity, &config, &config.mutation(), &mut rng)
                .unwrap();
            assert_eq!(stats.evolved, 6);
            for (now, before) in state.ideal_point().iter().zip(&previous_ideal) {
                assert!(now <= before);
            }
            previous_ideal = state.ideal_point().to_vec();
            for x in state.population().decisions() {
                assert!(config.bounds.contains(x));
            }
        }
        assert_eq!(state.evaluations(), 36);
        assert_eq!(state.generation(), 6);
    }

    #[test]
    fn test_replace_in_pool_prefers_better_offspring() {
        let weights = vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]];
        let mut population = Population::new(
            vec![vec![0.9, 0.9]; 3],
            vec![vec![0.9, 0.9]; 3],
        );
        let ideal = IdealPoint::from_objectives(&[vec![0.0, 0.0]]);
        let mut rng = StdRng::seed_from_u64(1);

        let replaced = replace_in_pool(
            &mut population,
            &weights,
            &ideal,
            &[0, 1, 2],
            &[0.1, 0.1],
            &[0.1, 0.1],
            2,
            &mut rng,
        );
        assert_eq!(replaced, 2);
        let improved = population
            .objectives()
            .iter()
            .filter(|f| f.as_slice() == [0.1, 0.1])
            .count();
        assert_eq!(improved, 2);
    }

    #[test]
    fn test_replace_in_pool_rejects_worse_offspring() {
        let weights = vec![vec![0.5, 0.5], vec![0.5, 0.5]];
        let mut population = Population::new(
            vec![vec![0.1, 0.1]; 2],
            vec![vec![0.1, 0.1]; 2],
        );
        let ideal = IdealPoint::from_objectives(&[vec![0.0, 0.0]]);
        let mut rng = StdRng::seed_from_u64(1);

        let replaced = replace_in_pool(
            &mut population,
            &weights,
            &ideal,
            &[0, 1],
            &[0.8, 0.8],
            &[0.8, 0.8],
            2,
            &mut rng,
        );
        assert_eq!(replaced, 0);
        assert!(population.objectives().iter().all(|f| f == &vec![0.1, 0.1]));
    }
}
