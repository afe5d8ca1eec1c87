//! MOEA/D with dynamic resource allocation and Levy-flight mutation.
//!
//! A decomposition-based multi-objective evolutionary algorithm. The
//! objective space is split into scalar subproblems by a lattice of
//! weight vectors; each subproblem keeps one solution and cooperates
//! with the subproblems whose weights lie closest to its own.
//!
//! # Core Traits
//!
//! - [`Objective`]: Vector-valued function to minimize
//! - [`ReportSink`]: Receives population snapshots during a run
//!
//! # Key Types
//!
//! - [`MoeadConfig`]: Algorithm parameters (decomposition, operators, budget)
//! - [`MoeadRunner`]: Executes the generational loop
//! - [`MoeadResult`]: Final population, ideal point, and run history
//! - [`PriorityStrategy`]: Per-subproblem selection probability
//! - [`ProblemRegistry`]: Name → objective-function lookup
//!
//! # Submodules
//!
//! - [`decomposition`]: Das-Dennis weights, neighborhoods, Tchebycheff scalarization
//! - [`operators`]: Mantegna Levy flight, polynomial mutation, bound repair
//! - [`multi_objective`]: Pareto dominance and non-dominated sorting
//! - [`problems`]: ZDT and DTLZ benchmark problems
//! - [`report`]: Snapshot sinks (in-memory, whitespace-delimited history files)
//!
//! # References
//!
//! - Zhang & Li (2007), "MOEA/D: A Multiobjective Evolutionary Algorithm
//!   Based on Decomposition"
//! - Zhang, Liu & Li (2009), "The Performance of a New Version of MOEA/D
//!   on CEC09 Unconstrained MOP Test Instances"
//! - Das & Dennis (1998), "Normal-Boundary Intersection"
//! - Mantegna (1994), "Fast, accurate algorithm for numerical simulation
//!   of Lévy stable stochastic processes"

mod config;
pub mod decomposition;
mod error;
pub mod multi_objective;
pub mod operators;
mod population;
mod priority;
pub mod problems;
pub mod report;
mod runner;
mod types;

pub use config::MoeadConfig;
pub use decomposition::IdealPoint;
pub use error::{ConfigError, MoeadError, Result};
pub use operators::LevyPolynomialMutation;
pub use population::Population;
pub use priority::PriorityStrategy;
pub use problems::ProblemRegistry;
pub use report::{CsvHistorySink, GenerationInfo, MemorySink, NullSink, ReportSink, Snapshot};
pub use runner::{GenerationStats, MoeadResult, MoeadRunner, MoeadState};
pub use types::{Bounds, Objective};
