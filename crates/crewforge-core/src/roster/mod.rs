//! Roster model: people, families, friend choices, historical leadership,
//! centers and crews.
//!
//! A [`Roster`] is built once through [`RosterBuilder`], which validates and
//! resolves every cross-reference, and is immutable afterwards. All
//! downstream stages read the roster through the queries defined here.

mod builder;
mod ids;
mod names;
mod person;
mod topology;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

pub use builder::RosterBuilder;
pub use ids::{CenterId, CrewId, PersonId};
pub use person::{ChoiceRank, FriendChoice, Gender, History, Person, PersonRecord, Role, YearLevel};
pub use topology::{Center, Crew, CrewRecord};

use crate::index::{CenterIndex, CrewIndex, PersonIndex};

/// Validated, immutable roster.
#[derive(Debug, Clone)]
pub struct Roster {
    people: Vec<Person>,
    centers: Vec<Center>,
    crews: Vec<Crew>,
    person_ids: HashMap<PersonId, PersonIndex>,
    center_ids: HashMap<CenterId, CenterIndex>,
    crew_ids: HashMap<CrewId, CrewIndex>,
}

impl Roster {
    /// Returns a builder for a new roster.
    pub fn builder() -> RosterBuilder {
        RosterBuilder::new()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, index: PersonIndex) -> &Person {
        &self.people[index.get()]
    }

    pub fn person_index(&self, id: &str) -> Option<PersonIndex> {
        self.person_ids.get(id).copied()
    }

    pub fn centers(&self) -> &[Center] {
        &self.centers
    }

    pub fn center(&self, index: CenterIndex) -> &Center {
        &self.centers[index.get()]
    }

    pub fn center_index(&self, id: &str) -> Option<CenterIndex> {
        self.center_ids.get(id).copied()
    }

    pub fn crews(&self) -> &[Crew] {
        &self.crews
    }

    pub fn crew(&self, index: CrewIndex) -> &Crew {
        &self.crews[index.get()]
    }

    pub fn crew_index(&self, id: &str) -> Option<CrewIndex> {
        self.crew_ids.get(id).copied()
    }

    /// Iterates over all person indices.
    pub fn person_indices(&self) -> impl Iterator<Item = PersonIndex> {
        (0..self.people.len()).map(PersonIndex::new)
    }

    /// Iterates over all crew indices.
    pub fn crew_indices(&self) -> impl Iterator<Item = CrewIndex> {
        (0..self.crews.len()).map(CrewIndex::new)
    }

    /// Iterates over all center indices.
    pub fn center_indices(&self) -> impl Iterator<Item = CenterIndex> {
        (0..self.centers.len()).map(CenterIndex::new)
    }

    /// People whose crew is decided by the model, in roster order.
    pub fn decidable(&self) -> impl Iterator<Item = PersonIndex> + '_ {
        self.person_indices()
            .filter(move |&p| self.person(p).is_decidable())
    }

    /// Number of decidable people.
    pub fn decidable_count(&self) -> usize {
        self.people.iter().filter(|p| p.is_decidable()).count()
    }

    /// Center of a person whose crew is given as input.
    pub fn fixed_center(&self, person: PersonIndex) -> Option<CenterIndex> {
        self.person(person)
            .fixed_crew
            .map(|crew| self.crew(crew).center)
    }

    /// Returns true if the crew is led by one of the person's past leaders.
    pub fn is_historically_excluded(&self, person: PersonIndex, crew: CrewIndex) -> bool {
        let past = &self.person(person).past_leaders;
        !past.is_empty() && self.crew(crew).staff().any(|s| past.contains(&s))
    }

    /// Crews the person may be placed on under the historical-leadership
    /// rule alone. This is the domain of the person's decision variable.
    pub fn allowed_crews(&self, person: PersonIndex) -> Vec<CrewIndex> {
        self.crew_indices()
            .filter(|&c| !self.is_historically_excluded(person, c))
            .collect()
    }

    /// Crews the person may be placed on once the parent's placement is
    /// also taken into account: inside the parent's center and never on the
    /// parent's own crew.
    pub fn eligible_crews(&self, person: PersonIndex) -> Vec<CrewIndex> {
        let parent_crew = self
            .person(person)
            .parent
            .and_then(|parent| self.person(parent).fixed_crew);
        let mut crews = self.allowed_crews(person);
        if let Some(parent_crew) = parent_crew {
            let parent_center = self.crew(parent_crew).center;
            crews.retain(|&c| c != parent_crew && self.crew(c).center == parent_center);
        }
        crews
    }

    /// Centers that contain at least one eligible crew for the person, or
    /// the fixed center of a pre-assigned person.
    pub fn eligible_centers(&self, person: PersonIndex) -> Vec<CenterIndex> {
        if let Some(center) = self.fixed_center(person) {
            return vec![center];
        }
        let mut centers: Vec<CenterIndex> = self
            .eligible_crews(person)
            .into_iter()
            .map(|c| self.crew(c).center)
            .collect();
        centers.sort();
        centers.dedup();
        centers
    }

    /// People with at least one resolved friend choice.
    pub fn friend_choosers(&self) -> impl Iterator<Item = PersonIndex> + '_ {
        self.person_indices()
            .filter(move |&p| self.person(p).has_resolved_friend())
    }
}
