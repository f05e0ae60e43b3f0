//! The decision artifact produced by one solve.

use std::collections::BTreeMap;

use crate::index::{CenterIndex, CrewIndex, PersonIndex};
use crate::roster::{CenterId, CrewId, PersonId, Roster};

/// Where one decidable person was placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub center: CenterId,
    pub crew: CrewId,
}

impl Placement {
    pub fn new(center: impl Into<CenterId>, crew: impl Into<CrewId>) -> Self {
        Self {
            center: center.into(),
            crew: crew.into(),
        }
    }
}

/// Mapping from each decidable person to exactly one (center, crew) pair.
///
/// Entries are ordered by person id, so two assignments with the same
/// placements compare and serialize identically. An assignment is never
/// mutated after extraction; re-solving produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Assignment {
    placements: BTreeMap<PersonId, Placement>,
}

impl Assignment {
    /// Creates an assignment from (person, placement) pairs.
    ///
    /// Returns the ids that appear more than once as the error, so callers
    /// can surface duplicates instead of silently keeping the last one.
    pub fn from_placements<I>(pairs: I) -> Result<Self, Vec<PersonId>>
    where
        I: IntoIterator<Item = (PersonId, Placement)>,
    {
        let mut placements = BTreeMap::new();
        let mut duplicates = Vec::new();
        for (person, placement) in pairs {
            if placements.contains_key(&person) {
                duplicates.push(person);
            } else {
                placements.insert(person, placement);
            }
        }
        if duplicates.is_empty() {
            Ok(Self { placements })
        } else {
            Err(duplicates)
        }
    }

    /// Returns the placement of a person.
    pub fn get(&self, person: &str) -> Option<&Placement> {
        self.placements.get(person)
    }

    /// Iterates over placements in person-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &Placement)> {
        self.placements.iter()
    }

    /// People placed on the given crew, in id order.
    pub fn members_of<'a>(&'a self, crew: &'a str) -> impl Iterator<Item = &'a PersonId> + 'a {
        self.placements
            .iter()
            .filter(move |(_, p)| p.crew.as_str() == crew)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Resolves the assignment against a roster into per-person crews.
    ///
    /// Pre-assigned members take their roster crew. Every entry that names
    /// an unknown person or crew, a person who is not decidable, or a center
    /// other than the crew's own is reported; decidable people without an
    /// entry are left unplaced for the caller to judge.
    pub fn resolve(&self, roster: &Roster) -> Result<ResolvedAssignment, Vec<String>> {
        let mut crews: Vec<Option<CrewIndex>> =
            roster.people().iter().map(|p| p.fixed_crew()).collect();
        let mut problems = Vec::new();

        for (person_id, placement) in &self.placements {
            let Some(person) = roster.person_index(person_id.as_str()) else {
                problems.push(format!("assignment names unknown person '{person_id}'"));
                continue;
            };
            if !roster.person(person).is_decidable() {
                problems.push(format!(
                    "{} is pre-assigned and cannot be placed by an assignment",
                    roster.person(person).name()
                ));
                continue;
            }
            let Some(crew) = roster.crew_index(placement.crew.as_str()) else {
                problems.push(format!(
                    "{} is placed on unknown crew '{}'",
                    roster.person(person).name(),
                    placement.crew
                ));
                continue;
            };
            let center = roster.center(roster.crew(crew).center()).id();
            if *center != placement.center {
                problems.push(format!(
                    "{} is placed on crew {} under center {}, but the crew belongs to {}",
                    roster.person(person).name(),
                    placement.crew,
                    placement.center,
                    center
                ));
                continue;
            }
            crews[person.get()] = Some(crew);
        }

        if problems.is_empty() {
            Ok(ResolvedAssignment { crews })
        } else {
            Err(problems)
        }
    }
}

/// An assignment resolved to roster indices, covering every person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment {
    crews: Vec<Option<CrewIndex>>,
}

impl ResolvedAssignment {
    /// Crew of a person, or `None` for a decidable person left unplaced.
    #[inline]
    pub fn crew(&self, person: PersonIndex) -> Option<CrewIndex> {
        self.crews[person.get()]
    }

    /// Center of a person.
    pub fn center(&self, roster: &Roster, person: PersonIndex) -> Option<CenterIndex> {
        self.crew(person).map(|c| roster.crew(c).center())
    }

    /// People on a crew, staff included, in roster order.
    pub fn members(&self, crew: CrewIndex) -> impl Iterator<Item = PersonIndex> + '_ {
        self.crews
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == Some(crew))
            .map(|(i, _)| PersonIndex::new(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_placements_orders_by_id() {
        let a = Assignment::from_placements([
            (PersonId::new("y2"), Placement::new("F", "F01")),
            (PersonId::new("y1"), Placement::new("F", "F02")),
        ])
        .unwrap();
        let ids: Vec<&str> = a.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["y1", "y2"]);
        assert_eq!(a.get("y1").unwrap().crew.as_str(), "F02");
        assert_eq!(a.members_of("F01").count(), 1);
    }

    #[test]
    fn test_duplicate_people_are_reported() {
        let err = Assignment::from_placements([
            (PersonId::new("y1"), Placement::new("F", "F01")),
            (PersonId::new("y1"), Placement::new("F", "F02")),
        ])
        .unwrap_err();
        assert_eq!(err, vec![PersonId::new("y1")]);
    }

    fn roster() -> Roster {
        use crate::roster::{CrewRecord, Gender, History, PersonRecord, YearLevel};
        Roster::builder()
            .person(PersonRecord::adult("a1", "Dana Moss", Gender::Female))
            .person(PersonRecord::youth("y1", "Ann Lee", Gender::Female, YearLevel::Junior, History::New))
            .person(PersonRecord::youth("y2", "Bo Chen", Gender::Male, YearLevel::Junior, History::New))
            .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
            .crew(CrewRecord::new("K01", "Kanawha"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_includes_staff() {
        let roster = roster();
        let a = Assignment::from_placements([(PersonId::new("y1"), Placement::new("Fayette", "F01"))])
            .unwrap();
        let resolved = a.resolve(&roster).unwrap();

        let f01 = roster.crew_index("F01").unwrap();
        let y1 = roster.person_index("y1").unwrap();
        let y2 = roster.person_index("y2").unwrap();
        assert_eq!(resolved.crew(y1), Some(f01));
        assert_eq!(resolved.crew(y2), None);
        assert_eq!(resolved.members(f01).count(), 2);
        assert_eq!(resolved.center(&roster, y1), roster.center_index("Fayette"));
    }

    #[test]
    fn test_resolve_reports_every_problem() {
        let roster = roster();
        let a = Assignment::from_placements([
            (PersonId::new("ghost"), Placement::new("Fayette", "F01")),
            (PersonId::new("a1"), Placement::new("Fayette", "F01")),
            (PersonId::new("y1"), Placement::new("Fayette", "K01")),
            (PersonId::new("y2"), Placement::new("Fayette", "Z99")),
        ])
        .unwrap();
        let problems = a.resolve(&roster).unwrap_err();
        assert_eq!(problems.len(), 4);
        assert!(problems.iter().any(|p| p.contains("belongs to Kanawha")));
    }
}
