//! The contract between the model and a constraint-solving engine.

use std::fmt::{self, Debug};

use crewforge_config::SolverConfig;

use crate::model::{CpModel, Valuation};
use crate::statistics::SolverStatistics;

/// Terminal state of one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineStatus {
    /// A solution was found and proven best.
    Optimal,
    /// A solution was found but the budget ran out before the proof.
    Feasible,
    /// The search space was exhausted without a solution.
    Infeasible,
    /// The budget ran out before any solution was found.
    TimeoutNoSolution,
}

impl EngineStatus {
    /// Returns true if the outcome carries a valuation.
    pub fn has_solution(self) -> bool {
        matches!(self, EngineStatus::Optimal | EngineStatus::Feasible)
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStatus::Optimal => write!(f, "Optimal"),
            EngineStatus::Feasible => write!(f, "Feasible"),
            EngineStatus::Infeasible => write!(f, "Infeasible"),
            EngineStatus::TimeoutNoSolution => write!(f, "TimeoutNoSolution"),
        }
    }
}

/// What an engine returns.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: EngineStatus,
    /// One value per model variable, present when a solution was found.
    pub valuation: Option<Valuation>,
    /// Objective value of `valuation`.
    pub objective: Option<f64>,
    pub statistics: SolverStatistics,
}

/// A constraint-solving engine.
///
/// Engines are stateless between calls: every `solve` runs on the caller's
/// thread against an immutable model and returns a fresh outcome.
pub trait SolverEngine: Send + Sync + Debug {
    /// Maximizes the model objective subject to its constraints within the
    /// budget described by `config`.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> SolveOutcome;

    /// Returns the engine name for logging.
    fn engine_name(&self) -> &'static str;
}
