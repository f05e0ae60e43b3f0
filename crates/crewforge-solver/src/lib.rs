//! CrewForge Solver Engine
//!
//! This crate provides the solver side of the assignment pipeline:
//! - [`CpModel`]: bounded integer variables, linear constraints and a
//!   maximized linear objective
//! - [`SolverEngine`]: the contract any engine implements
//! - [`BranchAndBoundSolver`]: the built-in exact engine
//! - Termination conditions and search statistics
//!
//! # Example
//!
//! ```
//! use crewforge_config::SolverConfig;
//! use crewforge_solver::{BranchAndBoundSolver, Comparison, CpModel, EngineStatus, SolverEngine, VarKind};
//!
//! let mut model = CpModel::new("pick-one");
//! let a = model.new_bool("a", VarKind::Decision);
//! let b = model.new_bool("b", VarKind::Decision);
//! model.add_linear("exactly_one", [(a, 1), (b, 1)], Comparison::Eq, 1);
//! model.add_objective_term(b, 2.0);
//!
//! let outcome = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());
//! assert_eq!(outcome.status, EngineStatus::Optimal);
//! let valuation = outcome.valuation.unwrap();
//! assert!(valuation.is_true(b));
//! assert_eq!(outcome.objective, Some(2.0));
//! ```

pub mod engine;
pub mod model;
pub mod search;
pub mod statistics;
pub mod termination;

pub use engine::{EngineStatus, SolveOutcome, SolverEngine};
pub use model::{Comparison, CpModel, IntVar, LinearConstraint, Objective, Valuation, VarId, VarKind};
pub use search::BranchAndBoundSolver;
pub use statistics::{ObjectiveImprovement, SolverStatistics};
pub use termination::{
    NodeCountTermination, OrTermination, SearchProgress, Termination, TimeTermination,
};
