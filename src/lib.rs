//! Decomposition-based multi-objective evolutionary optimization.
//!
//! Provides a generic implementation of MOEA/D-DRA:
//!
//! - **Decomposition**: Das-Dennis weight lattice, Euclidean neighborhoods,
//!   and Tchebycheff scalarization against a running ideal point.
//! - **Variation**: Mantegna Levy-flight mutation followed by polynomial
//!   mutation, with clamp repair into the variable bounds.
//! - **Resource allocation**: Per-subproblem priorities gate which
//!   subproblems produce offspring each generation.
//! - **Reporting**: Pluggable sinks for per-generation snapshots.
//!
//! # Architecture
//!
//! The engine contains no problem-specific concepts. Objective functions
//! are supplied by the caller as an [`Objective`](moead::Objective), or
//! looked up by name in a [`ProblemRegistry`](moead::ProblemRegistry).
//!
//! ```
//! use u_moead::moead::{MoeadConfig, MoeadRunner, ProblemRegistry};
//!
//! let registry = ProblemRegistry::with_builtins();
//! let zdt1 = registry.resolve("zdt1", 2, 10).unwrap();
//!
//! let config = MoeadConfig::new(2, 10)
//!     .with_partitions(19)
//!     .with_neighborhood_size(5)
//!     .with_max_evaluations(500)
//!     .with_seed(7);
//!
//! let result = MoeadRunner::run(zdt1.as_ref(), &config).unwrap();
//! assert_eq!(result.objectives.len(), 20);
//! ```

pub mod moead;
