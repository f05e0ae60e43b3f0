//! The weighted objective over the indicator layout.

use crewforge_config::{AssignmentConfig, ObjectiveWeights};
use crewforge_core::{CenterIndex, Gender, History, PersonIndex, Roster, YearLevel};
use crewforge_scoring::FriendDivisors;
use crewforge_solver::{Comparison, CpModel, VarId, VarKind};
use tracing::debug;

use crate::builder::CrewModel;
use crate::layout::IndicatorLayout;

/// What the composer added to a model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObjectiveSummary {
    /// Same-center auxiliaries for friend choices.
    pub friend_terms: usize,
    /// Per-crew gender balance auxiliaries.
    pub gender_terms: usize,
    /// Per-crew, per-year-level presence auxiliaries.
    pub year_terms: usize,
    /// Per-crew veteran/new balance auxiliaries.
    pub history_terms: usize,
    /// Friend points already earned by pre-assigned pairs.
    pub constant: f64,
}

impl ObjectiveSummary {
    /// Number of auxiliary variables added.
    pub fn auxiliary_count(&self) -> usize {
        self.friend_terms + self.gender_terms + self.year_terms + self.history_terms
    }
}

/// Whether one side of a friend choice sits in a given center.
enum Presence {
    Always,
    Never,
    When(Vec<VarId>),
}

/// Adds the maximized, weighted objective to a built model.
///
/// The objective is `friend·F + gender·G + year·Y + history·H`, where
/// - `F` sums, per center, the 3/2/1 points of satisfied choices divided by
///   the center's [`FriendDivisors`] entry, each choice through a boolean
///   that is at most each side's presence in the center
/// - `G` and `H` sum per-crew integers bounded by both counts of the
///   male/female and veteran/new split
/// - `Y` sums per-crew, per-year booleans bounded by the year's count
///
/// Only decided youths are counted in the diversity terms. Terms with a
/// zero weight are left out.
///
/// Each auxiliary also gets rows that no optimal valuation needs but that
/// keep the engine's bound close: a choice is satisfied in at most one
/// center, and a crew term is capped by the room left on the crew, e.g.
/// `gender + females ≤ capacity`.
#[derive(Debug, Clone)]
pub struct ObjectiveComposer<'r> {
    roster: &'r Roster,
    config: AssignmentConfig,
    divisors: FriendDivisors,
}

impl<'r> ObjectiveComposer<'r> {
    pub fn new(roster: &'r Roster, config: &AssignmentConfig) -> Self {
        Self {
            roster,
            config: config.clone(),
            divisors: FriendDivisors::from_roster(roster),
        }
    }

    fn weights(&self) -> &ObjectiveWeights {
        &self.config.weights
    }

    pub fn divisors(&self) -> &FriendDivisors {
        &self.divisors
    }

    /// Adds auxiliaries, their bounding constraints and the objective terms.
    pub fn compose(&self, built: &mut CrewModel) -> ObjectiveSummary {
        let CrewModel { model, layout } = built;
        let mut summary = ObjectiveSummary::default();

        if self.weights().friend > 0.0 {
            self.add_friend_terms(model, layout, &mut summary);
        }
        self.add_crew_terms(model, layout, &mut summary);

        debug!(
            event = "objective_composed",
            friend_terms = summary.friend_terms,
            gender_terms = summary.gender_terms,
            year_terms = summary.year_terms,
            history_terms = summary.history_terms,
            constant = summary.constant,
        );
        summary
    }

    fn presence(&self, layout: &IndicatorLayout, person: PersonIndex, center: CenterIndex) -> Presence {
        if let Some(fixed) = self.roster.fixed_center(person) {
            return if fixed == center {
                Presence::Always
            } else {
                Presence::Never
            };
        }
        let vars = layout.in_center(self.roster, person, center);
        if vars.is_empty() {
            Presence::Never
        } else {
            Presence::When(vars)
        }
    }

    fn add_friend_terms(
        &self,
        model: &mut CpModel,
        layout: &IndicatorLayout,
        summary: &mut ObjectiveSummary,
    ) {
        let roster = self.roster;
        for chooser in roster.friend_choosers() {
            for (rank, friend) in roster.person(chooser).resolved_friends() {
                let mut per_center = Vec::new();
                for (center, divisor) in self.divisors.iter() {
                    let coef =
                        self.weights().friend * f64::from(rank.points()) / f64::from(divisor);
                    let sides = [
                        self.presence(layout, chooser, center),
                        self.presence(layout, friend, center),
                    ];
                    if sides.iter().any(|s| matches!(s, Presence::Never)) {
                        continue;
                    }
                    if sides.iter().all(|s| matches!(s, Presence::Always)) {
                        model.add_objective_constant(coef);
                        summary.constant += coef;
                        continue;
                    }

                    let label = format!(
                        "{},{},{}",
                        roster.person(chooser).id(),
                        roster.person(friend).id(),
                        roster.center(center).id()
                    );
                    let same = model.new_bool(format!("same_center[{label}]"), VarKind::Auxiliary);
                    for side in sides {
                        if let Presence::When(vars) = side {
                            bound_by_sum(model, format!("same_center_le[{label}]"), same, &vars);
                        }
                    }
                    model.add_objective_term(same, coef);
                    summary.friend_terms += 1;
                    per_center.push(same);
                }
                if per_center.len() > 1 {
                    model.add_linear(
                        format!(
                            "same_center_once[{},{}]",
                            roster.person(chooser).id(),
                            roster.person(friend).id()
                        ),
                        per_center.into_iter().map(|var| (var, 1)),
                        Comparison::Le,
                        1,
                    );
                }
            }
        }
    }

    fn add_crew_terms(
        &self,
        model: &mut CpModel,
        layout: &IndicatorLayout,
        summary: &mut ObjectiveSummary,
    ) {
        let roster = self.roster;
        for c in roster.crew_indices() {
            let crew = roster.crew(c);
            let crew_id = crew.id();
            let (_, max) = crew.size_bounds(self.config.min_crew_size, self.config.max_crew_size);
            let capacity = i64::from(max.saturating_sub(crew.fixed_count()));
            let members: Vec<(PersonIndex, VarId)> = layout.on_crew(c).collect();
            let select = |keep: &dyn Fn(PersonIndex) -> bool| -> Vec<VarId> {
                members
                    .iter()
                    .filter(|(p, _)| keep(*p))
                    .map(|&(_, var)| var)
                    .collect()
            };

            if self.weights().gender > 0.0 {
                let males = select(&|p| roster.person(p).gender() == Gender::Male);
                let females = select(&|p| roster.person(p).gender() == Gender::Female);
                if add_min_of_two(
                    model,
                    &format!("gender[{crew_id}]"),
                    (&males, &females),
                    capacity,
                    self.weights().gender,
                ) {
                    summary.gender_terms += 1;
                }
            }

            if self.weights().year > 0.0 {
                for year in YearLevel::ALL {
                    let vars = select(&|p| roster.person(p).year() == year);
                    if vars.is_empty() {
                        continue;
                    }
                    let others = select(&|p| roster.person(p).year() != year);
                    let name = format!("year[{crew_id},{}]", year.code());
                    let present = model.new_bool(name.clone(), VarKind::Auxiliary);
                    bound_by_sum(model, format!("{name}_le"), present, &vars);
                    cap_by_room(model, format!("{name}_cap"), present, &others, capacity);
                    model.add_objective_term(present, self.weights().year);
                    summary.year_terms += 1;
                }
            }

            if self.weights().history > 0.0 {
                let veterans = select(&|p| roster.person(p).history() == History::Veteran);
                let new = select(&|p| roster.person(p).history() == History::New);
                if add_min_of_two(
                    model,
                    &format!("history[{crew_id}]"),
                    (&veterans, &new),
                    capacity,
                    self.weights().history,
                ) {
                    summary.history_terms += 1;
                }
            }
        }
    }
}

/// `aux − Σ vars ≤ 0`.
fn bound_by_sum(model: &mut CpModel, name: String, aux: VarId, vars: &[VarId]) {
    model.add_linear(
        name,
        std::iter::once((aux, 1)).chain(vars.iter().map(|&v| (v, -1))),
        Comparison::Le,
        0,
    );
}

/// `aux + Σ others ≤ capacity`: the term needs one free place on the crew
/// for each unit it counts.
fn cap_by_room(model: &mut CpModel, name: String, aux: VarId, others: &[VarId], capacity: i64) {
    model.add_linear(
        name,
        std::iter::once((aux, 1)).chain(others.iter().map(|&v| (v, 1))),
        Comparison::Le,
        capacity,
    );
}

/// Adds an integer bounded by both sums and rewards it. The integer is at
/// most half the crew's capacity, and each side's count leaves room for at
/// most `capacity − count` of the other. Returns false when either side is
/// empty, since the term is then always zero.
fn add_min_of_two(
    model: &mut CpModel,
    name: &str,
    (a, b): (&[VarId], &[VarId]),
    capacity: i64,
    weight: f64,
) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let hi = (a.len().min(b.len()) as i64).min(capacity / 2);
    let aux = model.new_int(name, 0, hi, VarKind::Auxiliary);
    bound_by_sum(model, format!("{name}_le_a"), aux, a);
    bound_by_sum(model, format!("{name}_le_b"), aux, b);
    cap_by_room(model, format!("{name}_cap_a"), aux, b, capacity);
    cap_by_room(model, format!("{name}_cap_b"), aux, a, capacity);
    model.add_objective_term(aux, weight);
    true
}
