//! Terminal solve status.

use std::fmt;

/// Outcome of one assignment run as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// The engine proved the assignment optimal.
    Optimal,
    /// A feasible assignment was found but the budget ran out before
    /// optimality was proven.
    FeasibleNonOptimal,
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// The input was rejected before or while building the model.
    ModelConstructionError,
    /// The budget ran out before any feasible assignment was found.
    Timeout,
}

impl SolveStatus {
    /// Returns true if the status carries a usable assignment.
    pub fn has_assignment(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::FeasibleNonOptimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::FeasibleNonOptimal => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::ModelConstructionError => "MODEL_INVALID",
            SolveStatus::Timeout => "TIMEOUT",
        };
        f.write_str(s)
    }
}
