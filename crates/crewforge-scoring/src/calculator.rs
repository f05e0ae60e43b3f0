//! Score recomputation from an assignment.

use crewforge_config::{AssignmentConfig, ObjectiveWeights};
use crewforge_core::{
    Assignment, ChoiceRank, CrewForgeError, Gender, History, ResolvedAssignment, Result, Roster,
};
use tracing::debug;

use crate::divisor::FriendDivisors;
use crate::report::{CenterFriendScore, CrewComposition, FriendChoiceStats, ScoreReport, SubScore};

/// Recomputes the score of an assignment from roster facts.
///
/// # Example
///
/// ```
/// use crewforge_config::AssignmentConfig;
/// use crewforge_core::{Assignment, CrewRecord, Gender, History, PersonId, PersonRecord, Placement, Roster, YearLevel};
/// use crewforge_scoring::ScoreCalculator;
///
/// let roster = Roster::builder()
///     .person(PersonRecord::youth("y1", "Ann Lee", Gender::Female, YearLevel::Junior, History::New))
///     .person(PersonRecord::youth("y2", "Bo Chen", Gender::Male, YearLevel::Senior, History::Veteran))
///     .crew(CrewRecord::new("F01", "Fayette"))
///     .build()
///     .unwrap();
///
/// let assignment = Assignment::from_placements([
///     (PersonId::new("y1"), Placement::new("Fayette", "F01")),
///     (PersonId::new("y2"), Placement::new("Fayette", "F01")),
/// ])
/// .unwrap();
///
/// let report = ScoreCalculator::new(&roster, &AssignmentConfig::default())
///     .calculate(&assignment)
///     .unwrap();
///
/// assert_eq!(report.gender.raw, 1.0);
/// assert_eq!(report.year.raw, 2.0);
/// assert_eq!(report.history.raw, 1.0);
/// assert_eq!(report.total(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreCalculator<'r> {
    roster: &'r Roster,
    weights: ObjectiveWeights,
    divisors: FriendDivisors,
}

impl<'r> ScoreCalculator<'r> {
    pub fn new(roster: &'r Roster, config: &AssignmentConfig) -> Self {
        Self {
            roster,
            weights: config.weights,
            divisors: FriendDivisors::from_roster(roster),
        }
    }

    pub fn divisors(&self) -> &FriendDivisors {
        &self.divisors
    }

    /// Scores an assignment.
    ///
    /// # Errors
    ///
    /// Returns [`CrewForgeError::InternalConsistency`] if the assignment
    /// does not resolve against the roster.
    pub fn calculate(&self, assignment: &Assignment) -> Result<ScoreReport> {
        let resolved = assignment
            .resolve(self.roster)
            .map_err(CrewForgeError::InternalConsistency)?;
        Ok(self.calculate_resolved(&resolved))
    }

    /// Scores an assignment already resolved against the roster.
    pub fn calculate_resolved(&self, resolved: &ResolvedAssignment) -> ScoreReport {
        let roster = self.roster;

        // Friend points per center and choice statistics.
        let mut points = vec![0u32; roster.centers().len()];
        let mut placed = vec![0u32; roster.centers().len()];
        let mut stats = FriendChoiceStats::default();
        for chooser in roster.friend_choosers() {
            stats.choosers += 1;
            let Some(center) = resolved.center(roster, chooser) else {
                continue;
            };
            placed[center.get()] += 1;
            let mut satisfied = 0;
            for (rank, friend) in roster.person(chooser).resolved_friends() {
                if resolved.center(roster, friend) != Some(center) {
                    continue;
                }
                points[center.get()] += rank.points();
                satisfied += 1;
                match rank {
                    ChoiceRank::First => stats.first += 1,
                    ChoiceRank::Second => stats.second += 1,
                    ChoiceRank::Third => stats.third += 1,
                }
            }
            if satisfied > 1 {
                stats.multiple += 1;
            }
        }

        let centers: Vec<CenterFriendScore> = roster
            .center_indices()
            .map(|k| CenterFriendScore {
                center: roster.center(k).id().clone(),
                points: points[k.get()],
                divisor: self.divisors.get(k),
                choosers: placed[k.get()],
            })
            .collect();
        let friend_raw: f64 = centers.iter().map(CenterFriendScore::normalized).sum();

        // Crew composition over decided youths.
        let crews: Vec<CrewComposition> = roster
            .crew_indices()
            .map(|c| {
                let crew = roster.crew(c);
                let mut composition = CrewComposition {
                    crew: crew.id().clone(),
                    center: roster.center(crew.center()).id().clone(),
                    staff: crew.fixed_count(),
                    youths: Vec::new(),
                    males: 0,
                    females: 0,
                    years: [0; 4],
                    veterans: 0,
                    new: 0,
                };
                for member in resolved.members(c) {
                    let person = roster.person(member);
                    if !person.is_decidable() {
                        continue;
                    }
                    composition.youths.push(person.id().clone());
                    match person.gender() {
                        Gender::Male => composition.males += 1,
                        Gender::Female => composition.females += 1,
                    }
                    composition.years[person.year() as usize] += 1;
                    match person.history() {
                        History::Veteran => composition.veterans += 1,
                        History::New => composition.new += 1,
                    }
                }
                composition
            })
            .collect();

        let gender_raw: u32 = crews.iter().map(CrewComposition::gender_balance).sum();
        let year_raw: u32 = crews.iter().map(CrewComposition::years_represented).sum();
        let history_raw: u32 = crews.iter().map(CrewComposition::history_balance).sum();

        let report = ScoreReport {
            friend: SubScore::new(friend_raw, self.weights.friend),
            gender: SubScore::new(f64::from(gender_raw), self.weights.gender),
            year: SubScore::new(f64::from(year_raw), self.weights.year),
            history: SubScore::new(f64::from(history_raw), self.weights.history),
            centers,
            crews,
            friend_choices: stats,
        };
        debug!(
            event = "score_calculated",
            total = report.total(),
            friend = report.friend.raw,
            gender = report.gender.raw,
            year = report.year.raw,
            history = report.history.raw,
        );
        report
    }
}
