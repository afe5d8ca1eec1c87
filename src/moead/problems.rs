//! Named objective-function registry and classic benchmark problems.
//!
//! A [`ProblemRegistry`] maps a problem name to a factory that builds an
//! [`Objective`] for the configured dimensions. Names are resolved once,
//! before the run starts; an unknown name is a configuration error.
//!
//! # Built-in problems
//!
//! | Name | Objectives | Variables | Domain |
//! |------|-----------|-----------|--------|
//! | `zdt1` | 2 | ≥ 2 | `[0, 1]` |
//! | `zdt2` | 2 | ≥ 2 | `[0, 1]` |
//! | `zdt3` | 2 | ≥ 2 | `[0, 1]` |
//! | `dtlz1` | ≥ 2 | ≥ n_obj | `[0, 1]` |
//! | `dtlz2` | ≥ 2 | ≥ n_obj | `[0, 1]` |
//!
//! # References
//!
//! - Zitzler, Deb & Thiele (2000), "Comparison of Multiobjective
//!   Evolutionary Algorithms: Empirical Results"
//! - Deb, Thiele, Laumanns & Zitzler (2002), "Scalable Multi-Objective
//!   Optimization Test Problems"

use super::error::ConfigError;
use super::types::Objective;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

type Factory = Box<dyn Fn(usize, usize) -> Result<Arc<dyn Objective>, ConfigError> + Send + Sync>;

/// Name → objective-function registry.
///
/// ```
/// use u_moead::moead::ProblemRegistry;
///
/// let registry = ProblemRegistry::with_builtins()
///     .register("sum_and_max", |x: &[f64]| {
///         vec![x.iter().sum(), x.iter().cloned().fold(f64::MIN, f64::max)]
///     });
///
/// let zdt1 = registry.resolve("ZDT1", 2, 30).unwrap();
/// assert_eq!(zdt1.evaluate(&[0.0; 30]), vec![0.0, 1.0]);
///
/// assert!(registry.resolve("sum_and_max", 2, 3).is_ok());
/// assert!(registry.resolve("nope", 2, 3).is_err());
/// ```
pub struct ProblemRegistry {
    factories: HashMap<String, Factory>,
}

impl Default for ProblemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProblemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProblemRegistry")
            .field("problems", &self.names())
            .finish()
    }
}

impl ProblemRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry holding the ZDT and DTLZ benchmark problems.
    pub fn with_builtins() -> Self {
        Self::new()
            .register_factory("zdt1", |n_obj, n_var| {
                check_zdt("zdt1", n_obj, n_var)?;
                Ok(Arc::new(Zdt1) as Arc<dyn Objective>)
            })
            .register_factory("zdt2", |n_obj, n_var| {
                check_zdt("zdt2", n_obj, n_var)?;
                Ok(Arc::new(Zdt2) as Arc<dyn Objective>)
            })
            .register_factory("zdt3", |n_obj, n_var| {
                check_zdt("zdt3", n_obj, n_var)?;
                Ok(Arc::new(Zdt3) as Arc<dyn Objective>)
            })
            .register_factory("dtlz1", |n_obj, n_var| {
                check_dtlz("dtlz1", n_obj, n_var)?;
                Ok(Arc::new(Dtlz1 { n_obj }) as Arc<dyn Objective>)
            })
            .register_factory("dtlz2", |n_obj, n_var| {
                check_dtlz("dtlz2", n_obj, n_var)?;
                Ok(Arc::new(Dtlz2 { n_obj }) as Arc<dyn Objective>)
            })
    }

    /// Registers a fixed objective function under `name`.
    ///
    /// The function is used as-is for any dimensions; a mismatch in the
    /// number of returned objectives surfaces at evaluation time.
    pub fn register<O>(self, name: &str, objective: O) -> Self
    where
        O: Objective + 'static,
    {
        let shared: Arc<dyn Objective> = Arc::new(objective);
        self.register_factory(name, move |_, _| Ok(Arc::clone(&shared)))
    }

    /// Registers a factory that builds an objective for `(n_obj, n_var)`.
    pub fn register_factory<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(usize, usize) -> Result<Arc<dyn Objective>, ConfigError> + Send + Sync + 'static,
    {
        self.factories.insert(normalize(name), Box::new(factory));
        self
    }

    /// Resolves `name` into an objective for the given dimensions.
    pub fn resolve(&self, name: &str, n_obj: usize, n_var: usize) -> Result<Arc<dyn Objective>, ConfigError> {
        let factory = self
            .factories
            .get(&normalize(name))
            .ok_or_else(|| ConfigError::UnknownProblem(name.to_string()))?;
        factory(n_obj, n_var)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&normalize(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn check_zdt(name: &str, n_obj: usize, n_var: usize) -> Result<(), ConfigError> {
    if n_obj != 2 || n_var < 2 {
        return Err(ConfigError::IncompatibleProblem {
            name: name.to_string(),
            n_obj,
            n_var,
            reason: "requires n_obj = 2 and n_var >= 2".into(),
        });
    }
    Ok(())
}

fn check_dtlz(name: &str, n_obj: usize, n_var: usize) -> Result<(), ConfigError> {
    if n_obj < 2 || n_var < n_obj {
        return Err(ConfigError::IncompatibleProblem {
            name: name.to_string(),
            n_obj,
            n_var,
            reason: "requires n_obj >= 2 and n_var >= n_obj".into(),
        });
    }
    Ok(())
}

/// ZDT `g` function: `1 + 9 * mean(x[1..])`.
fn zdt_g(x: &[f64]) -> f64 {
    assert!(x.len() >= 2, "ZDT problems need at least 2 variables, got {}", x.len());
    let tail = &x[1..];
    1.0 + 9.0 * tail.iter().sum::<f64>() / tail.len() as f64
}

/// ZDT1: convex Pareto front `f2 = 1 - sqrt(f1)`.
///
/// # Panics
/// Panics if `x` has fewer than 2 variables.
/// [`ProblemRegistry::resolve`] rejects such dimensions up front.
#[derive(Debug, Clone, Copy)]
pub struct Zdt1;

impl Objective for Zdt1 {
    fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        let g = zdt_g(x);
        let f1 = x[0];
        vec![f1, g * (1.0 - (f1 / g).sqrt())]
    }
}

/// ZDT2: concave Pareto front `f2 = 1 - f1²`.
///
/// # Panics
/// Panics if `x` has fewer than 2 variables.
/// [`ProblemRegistry::resolve`] rejects such dimensions up front.
#[derive(Debug, Clone, Copy)]
pub struct Zdt2;

impl Objective for Zdt2 {
    fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        let g = zdt_g(x);
        let f1 = x[0];
        vec![f1, g * (1.0 - (f1 / g).powi(2))]
    }
}

/// ZDT3: disconnected Pareto front.
///
/// # Panics
/// Panics if `x` has fewer than 2 variables.
/// [`ProblemRegistry::resolve`] rejects such dimensions up front.
#[derive(Debug, Clone, Copy)]
pub struct Zdt3;

impl Objective for Zdt3 {
    fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        let g = zdt_g(x);
        let f1 = x[0];
        let r = f1 / g;
        vec![f1, g * (1.0 - r.sqrt() - r * (10.0 * PI * f1).sin())]
    }
}

/// DTLZ1: linear Pareto front `Σ f = 0.5`, highly multimodal `g`.
///
/// # Panics
/// Panics if `x` has fewer than `n_obj` variables.
/// [`ProblemRegistry::resolve`] rejects such dimensions up front.
#[derive(Debug, Clone, Copy)]
pub struct Dtlz1 {
    /// Number of objectives.
    pub n_obj: usize,
}

impl Objective for Dtlz1 {
    fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        let m = self.n_obj;
        assert!(x.len() >= m, "DTLZ with {m} objectives needs at least {m} variables, got {}", x.len());
        let x_m = &x[m - 1..];
        let g = 100.0
            * (x_m.len() as f64
                + x_m
                    .iter()
                    .map(|&v| (v - 0.5).powi(2) - (20.0 * PI * (v - 0.5)).cos())
                    .sum::<f64>());

        (0..m)
            .map(|i| {
                let mut f = 0.5 * (1.0 + g);
                f *= x[..m - 1 - i].iter().product::<f64>();
                if i > 0 {
                    f *= 1.0 - x[m - 1 - i];
                }
                f
            })
            .collect()
    }
}

/// DTLZ2: spherical Pareto front `Σ f² = 1`.
///
/// # Panics
/// Panics if `x` has fewer than `n_obj` variables.
/// [`ProblemRegistry::resolve`] rejects such dimensions up front.
#[derive(Debug, Clone, Copy)]
pub struct Dtlz2 {
    /// Number of objectives.
    pub n_obj: usize,
}

impl Objective for Dtlz2 {
    fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        let m = self.n_obj;
        assert!(x.len() >= m, "DTLZ with {m} objectives needs at least {m} variables, got {}", x.len());
        let g: f64 = x[m - 1..].iter().map(|&v| (v - 0.5).powi(2)).sum();

        (0..m)
            .map(|i| {
                let mut f = 1.0 + g;
                f *= x[..m - 1 - i]
                    .iter()
                    .map(|&v| (v * PI / 2.0).cos())
                    .product::<f64>();
                if i > 0 {
                    f *= (x[m - 1 - i] * PI / 2.0).sin();
                }
                f
            })
            .collect()
    }
}
