//! The end-to-end assignment pipeline.

use std::time::Instant;

use crewforge_config::CrewForgeConfig;
use crewforge_core::{CrewForgeError, Result, Roster, SolveStatus};
use crewforge_model::{CrewModel, CrewModelBuilder, ObjectiveComposer};
use crewforge_scoring::ScoreCalculator;
use crewforge_solver::{BranchAndBoundSolver, EngineStatus, SolveOutcome, SolverEngine};
use tracing::{error, info};

use crate::extract::extract;
use crate::result::AssignmentResult;
use crate::validate::violations;

/// Largest amount by which the engine's objective may exceed the score
/// recomputed from the assignment.
pub const OBJECTIVE_TOLERANCE: f64 = 1e-6;

/// Runs roster → model → engine → validated assignment.
///
/// # Example
///
/// ```
/// use crewforge::{CrewAssigner, SolveStatus};
/// use crewforge_config::{AssignmentConfig, CrewForgeConfig};
/// use crewforge_core::{CrewRecord, Gender, History, PersonRecord, Roster, YearLevel};
///
/// let roster = Roster::builder()
///     .person(PersonRecord::youth("y1", "Ann Lee", Gender::Female, YearLevel::Junior, History::New))
///     .person(PersonRecord::youth("y2", "Bo Chen", Gender::Male, YearLevel::Senior, History::Veteran))
///     .crew(CrewRecord::new("F01", "Fayette"))
///     .build()
///     .unwrap();
///
/// let config = CrewForgeConfig::new()
///     .with_assignment(AssignmentConfig::new().with_crew_size(1, 2));
/// let result = CrewAssigner::new(config).solve(&roster).unwrap();
///
/// assert_eq!(result.status, SolveStatus::Optimal);
/// assert_eq!(result.assignment.len(), 2);
/// assert_eq!(result.report.total(), 4.0);
/// ```
#[derive(Debug)]
pub struct CrewAssigner {
    config: CrewForgeConfig,
    engine: Box<dyn SolverEngine>,
}

impl CrewAssigner {
    /// Creates an assigner using the built-in branch-and-bound engine.
    pub fn new(config: CrewForgeConfig) -> Self {
        Self {
            config,
            engine: Box::new(BranchAndBoundSolver::new()),
        }
    }

    /// Replaces the engine.
    pub fn with_engine(mut self, engine: impl SolverEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn config(&self) -> &CrewForgeConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn SolverEngine {
        self.engine.as_ref()
    }

    /// Builds the complete model (constraints and objective) for a roster.
    pub fn build(&self, roster: &Roster) -> Result<CrewModel> {
        let assignment = &self.config.assignment;
        let mut built = CrewModelBuilder::new(roster, assignment).build()?;
        ObjectiveComposer::new(roster, assignment).compose(&mut built);
        Ok(built)
    }

    /// Assigns every decidable person of the roster.
    ///
    /// # Errors
    ///
    /// - [`CrewForgeError::Config`] for an invalid configuration
    /// - [`CrewForgeError::DataIntegrity`] or
    ///   [`CrewForgeError::ModelConstruction`] for unusable input
    /// - [`CrewForgeError::Infeasible`] when no assignment exists
    /// - [`CrewForgeError::Timeout`] when the budget ran out first
    /// - [`CrewForgeError::InternalConsistency`] when the engine's answer
    ///   fails validation
    pub fn solve(&self, roster: &Roster) -> Result<AssignmentResult> {
        let start = Instant::now();
        self.config.validate()?;
        info!(
            event = "assignment_start",
            people = roster.people().len(),
            decidable = roster.decidable_count(),
            centers = roster.centers().len(),
            crews = roster.crews().len(),
            engine = self.engine.engine_name(),
        );

        let result = self.build(roster).and_then(|built| {
            let outcome = self.engine.solve(built.model(), &self.config.solver);
            self.finish(roster, &built, outcome)
        });

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(result) => info!(
                event = "assignment_end",
                status = %result.status,
                objective = result.objective,
                assigned = result.assignment.len(),
                duration_ms,
            ),
            Err(err) => info!(
                event = "assignment_end",
                status = %err.status().map_or_else(|| "ERROR".to_string(), |s| s.to_string()),
                error = %err,
                duration_ms,
            ),
        }
        result
    }

    /// Turns an engine outcome for `built` into a validated result.
    ///
    /// Exposed so callers running their own engine loop get the same
    /// extraction, validation and objective check as [`solve`](Self::solve).
    /// An engine objective above the recomputed score is an
    /// [`CrewForgeError::InternalConsistency`] error; one below it is
    /// accepted, since auxiliaries left under their maximum are still a
    /// valid valuation.
    pub fn finish(
        &self,
        roster: &Roster,
        built: &CrewModel,
        outcome: SolveOutcome,
    ) -> Result<AssignmentResult> {
        let status = match outcome.status {
            EngineStatus::Optimal => SolveStatus::Optimal,
            EngineStatus::Feasible => SolveStatus::FeasibleNonOptimal,
            EngineStatus::Infeasible => return Err(CrewForgeError::Infeasible),
            EngineStatus::TimeoutNoSolution => return Err(CrewForgeError::Timeout),
        };
        let Some(valuation) = outcome.valuation else {
            return Err(CrewForgeError::InternalConsistency(vec![format!(
                "engine reported {} without a valuation",
                outcome.status
            )]));
        };

        let assignment = extract(roster, built.layout(), &valuation)?;

        let found = violations(roster, &self.config.assignment, &assignment);
        if !found.is_empty() {
            for violation in &found {
                error!(event = "validation_failed", violation = %violation);
            }
            return Err(CrewForgeError::InternalConsistency(found));
        }

        let report = ScoreCalculator::new(roster, &self.config.assignment).calculate(&assignment)?;
        let objective = outcome
            .objective
            .unwrap_or_else(|| built.model().objective().evaluate(&valuation));
        // Auxiliaries are only bounded from above, so a valid valuation may
        // under-report its score. Reporting more than the assignment earns
        // means the encoding rewards something it should not.
        if objective > report.total() + OBJECTIVE_TOLERANCE {
            let drift = format!(
                "objective drift: engine reported {objective}, the assignment scores {}",
                report.total()
            );
            error!(event = "validation_failed", violation = %drift);
            return Err(CrewForgeError::InternalConsistency(vec![drift]));
        }

        Ok(AssignmentResult {
            status,
            assignment,
            report,
            objective,
            statistics: outcome.statistics,
        })
    }
}

/// Assigns a roster under the given configuration with the built-in engine.
pub fn assign(roster: &Roster, config: CrewForgeConfig) -> Result<AssignmentResult> {
    CrewAssigner::new(config).solve(roster)
}
