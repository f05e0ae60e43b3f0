//! Error types for CrewForge

use thiserror::Error;

use crate::status::SolveStatus;

/// Main error type for CrewForge operations.
///
/// The variants follow the order in which a solve can fail: integrity
/// checks run before any model is built, construction errors before the
/// engine is invoked, and consistency errors after it returns.
#[derive(Debug, Error)]
pub enum CrewForgeError {
    /// The roster references unknown people or is otherwise unusable.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// The roster is self-contradictory under the hard rules.
    #[error("Model construction error: {0}")]
    ModelConstruction(String),

    /// The engine proved that the hard constraints admit no solution.
    #[error("No assignment satisfies the hard constraints")]
    Infeasible,

    /// The solve budget elapsed before any feasible assignment was found.
    #[error("Solve budget elapsed before a feasible assignment was found")]
    Timeout,

    /// The engine returned a valuation that breaks an invariant the model
    /// was supposed to enforce.
    #[error("Internal consistency error: {}", .0.join("; "))]
    InternalConsistency(Vec<String>),

    /// Error in configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CrewForgeError {
    /// Maps the error to the terminal status reported to callers.
    ///
    /// Integrity failures surface as [`SolveStatus::ModelConstructionError`]
    /// since no model was built. Internal consistency failures have no
    /// status: they abort the run.
    pub fn status(&self) -> Option<SolveStatus> {
        match self {
            CrewForgeError::DataIntegrity(_) | CrewForgeError::ModelConstruction(_) => {
                Some(SolveStatus::ModelConstructionError)
            }
            CrewForgeError::Infeasible => Some(SolveStatus::Infeasible),
            CrewForgeError::Timeout => Some(SolveStatus::Timeout),
            CrewForgeError::InternalConsistency(_) | CrewForgeError::Config(_) => None,
        }
    }

    /// Returns true for errors raised before the engine is invoked.
    pub fn is_pre_solve(&self) -> bool {
        matches!(
            self,
            CrewForgeError::DataIntegrity(_)
                | CrewForgeError::ModelConstruction(_)
                | CrewForgeError::Config(_)
        )
    }
}

/// Result type alias for CrewForge operations
pub type Result<T> = std::result::Result<T, CrewForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CrewForgeError::DataIntegrity("x".into()).status(),
            Some(SolveStatus::ModelConstructionError)
        );
        assert_eq!(CrewForgeError::Infeasible.status(), Some(SolveStatus::Infeasible));
        assert_eq!(CrewForgeError::Timeout.status(), Some(SolveStatus::Timeout));
        assert_eq!(CrewForgeError::InternalConsistency(vec![]).status(), None);
    }

    #[test]
    fn test_internal_consistency_display_joins_violations() {
        let err = CrewForgeError::InternalConsistency(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Internal consistency error: a; b");
    }

    #[test]
    fn test_pre_solve() {
        assert!(CrewForgeError::ModelConstruction("x".into()).is_pre_solve());
        assert!(!CrewForgeError::Infeasible.is_pre_solve());
    }
}
