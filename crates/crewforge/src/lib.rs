//! CrewForge - crew assignment as a constraint model
//!
//! Places every youth of a roster on a (center, crew) pair so that crew
//! sizes, family rules, friend separation and historical leadership all
//! hold, while maximizing a weighted mix of friend satisfaction and crew
//! diversity.
//!
//! The pipeline runs in one call:
//! 1. [`CrewModelBuilder`] checks the roster and emits indicators and hard
//!    constraints
//! 2. [`ObjectiveComposer`] adds the weighted objective
//! 3. a [`SolverEngine`] maximizes it
//! 4. [`extract`] decodes the valuation, [`validate`] re-checks every
//!    invariant and [`ScoreCalculator`] recomputes the score
//!
//! # Example
//!
//! ```
//! use crewforge::prelude::*;
//!
//! let roster = Roster::builder()
//!     .person(PersonRecord::youth("y1", "Ann Lee", Gender::Female, YearLevel::Junior, History::New))
//!     .person(PersonRecord::youth("y2", "Bo Chen", Gender::Male, YearLevel::Junior, History::New))
//!     .crew(CrewRecord::new("F01", "Fayette"))
//!     .crew(CrewRecord::new("K01", "Kanawha"))
//!     .build()
//!     .unwrap();
//!
//! let config = CrewForgeConfig::new()
//!     .with_assignment(AssignmentConfig::new().with_crew_size(1, 1));
//! let result = CrewAssigner::new(config).solve(&roster).unwrap();
//! assert!(result.is_optimal());
//! assert_eq!(result.assignment.members_of("F01").count(), 1);
//! ```

pub mod assigner;
#[cfg(feature = "console")]
pub mod console;
pub mod extract;
pub mod result;
pub mod validate;

pub use assigner::{assign, CrewAssigner, OBJECTIVE_TOLERANCE};
pub use extract::extract;
pub use result::AssignmentResult;
pub use validate::{validate, violations};

pub use crewforge_config::{
    AssignmentConfig, ConfigError, CrewForgeConfig, ObjectiveWeights, SolverConfig,
    TerminationConfig,
};
pub use crewforge_core::{
    Assignment, CrewForgeError, CrewRecord, Gender, History, PersonId, PersonRecord, Placement,
    Result, Roster, SolveStatus, YearLevel,
};
pub use crewforge_model::{CrewModel, CrewModelBuilder, IndicatorLayout, ObjectiveComposer};
pub use crewforge_scoring::{ScoreCalculator, ScoreReport};
pub use crewforge_solver::{
    BranchAndBoundSolver, EngineStatus, SolveOutcome, SolverEngine, SolverStatistics,
};

pub mod prelude {
    pub use super::{
        AssignmentConfig, AssignmentResult, CrewAssigner, CrewForgeConfig, CrewForgeError,
        CrewRecord, Gender, History, ObjectiveWeights, PersonRecord, Roster, SolveStatus,
        SolverConfig, YearLevel,
    };
}
