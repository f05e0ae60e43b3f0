//! What a successful assignment run returns.

use std::fmt;

use crewforge_core::{Assignment, SolveStatus};
use crewforge_scoring::ScoreReport;
use crewforge_solver::SolverStatistics;

/// An assignment that passed extraction, validation and the objective
/// check, with its score and the engine statistics.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// [`SolveStatus::Optimal`] or [`SolveStatus::FeasibleNonOptimal`].
    pub status: SolveStatus,
    pub assignment: Assignment,
    pub report: ScoreReport,
    /// Objective value reported by the engine.
    pub objective: f64,
    pub statistics: SolverStatistics,
}

impl AssignmentResult {
    /// Returns true if the engine proved the assignment optimal.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

impl fmt::Display for AssignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} assignment of {} people, objective {:.3}",
            self.status,
            self.assignment.len(),
            self.objective
        )?;
        for crew in &self.report.crews {
            let youths: Vec<&str> = crew.youths.iter().map(|id| id.as_str()).collect();
            writeln!(
                f,
                "  {}/{} ({} + {} staff): {}",
                crew.center,
                crew.crew,
                crew.youths.len(),
                crew.staff,
                youths.join(", ")
            )?;
        }
        write!(f, "{}", self.report)
    }
}
