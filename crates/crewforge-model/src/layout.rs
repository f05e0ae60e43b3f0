//! Where the assignment indicators live in the model.

use crewforge_core::{CenterIndex, CrewIndex, PersonIndex, Roster};
use crewforge_solver::VarId;

/// Map from (decidable person, crew) to the boolean indicator `x(p, c)`.
///
/// A person has one indicator per crew in their domain, in crew order.
/// Pre-assigned people and crews excluded by historical leadership have
/// none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorLayout {
    indicators: Vec<Vec<(CrewIndex, VarId)>>,
}

impl IndicatorLayout {
    pub(crate) fn new(person_count: usize) -> Self {
        Self {
            indicators: vec![Vec::new(); person_count],
        }
    }

    pub(crate) fn push(&mut self, person: PersonIndex, crew: CrewIndex, var: VarId) {
        self.indicators[person.get()].push((crew, var));
    }

    /// Indicators of a person, in crew order.
    #[inline]
    pub fn indicators(&self, person: PersonIndex) -> &[(CrewIndex, VarId)] {
        &self.indicators[person.get()]
    }

    /// The indicator of placing `person` on `crew`, if it exists.
    pub fn indicator(&self, person: PersonIndex, crew: CrewIndex) -> Option<VarId> {
        self.indicators(person)
            .iter()
            .find(|(c, _)| *c == crew)
            .map(|&(_, var)| var)
    }

    /// Indicators of a person on crews of the given center.
    pub fn in_center(&self, roster: &Roster, person: PersonIndex, center: CenterIndex) -> Vec<VarId> {
        self.indicators(person)
            .iter()
            .filter(|(c, _)| roster.crew(*c).center() == center)
            .map(|&(_, var)| var)
            .collect()
    }

    /// Indicators of a person on crews outside the given center.
    pub fn outside_center(
        &self,
        roster: &Roster,
        person: PersonIndex,
        center: CenterIndex,
    ) -> Vec<VarId> {
        self.indicators(person)
            .iter()
            .filter(|(c, _)| roster.crew(*c).center() != center)
            .map(|&(_, var)| var)
            .collect()
    }

    /// Every (person, indicator) pair on a crew, in roster order.
    pub fn on_crew(&self, crew: CrewIndex) -> impl Iterator<Item = (PersonIndex, VarId)> + '_ {
        self.indicators.iter().enumerate().filter_map(move |(p, vars)| {
            vars.iter()
                .find(|(c, _)| *c == crew)
                .map(|&(_, var)| (PersonIndex::new(p), var))
        })
    }

    /// Total number of indicators.
    pub fn len(&self) -> usize {
        self.indicators.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
