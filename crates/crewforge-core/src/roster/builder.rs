//! Validating roster construction.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::ids::{CenterId, CrewId, PersonId};
use super::names::NameResolver;
use super::person::{ChoiceRank, FriendChoice, Person, PersonRecord, Role};
use super::topology::{Center, Crew, CrewRecord};
use super::Roster;
use crate::error::{CrewForgeError, Result};
use crate::index::{CenterIndex, CrewIndex, PersonIndex};

/// Builds a [`Roster`] from typed input records.
///
/// Centers are registered explicitly with [`center`](Self::center) or
/// implicitly by the first crew that names them. Every reference is
/// resolved in [`build`](Self::build); see the module docs of
/// [`roster`](super) for the rules.
///
/// # Example
///
/// ```
/// use crewforge_core::{CrewRecord, Gender, History, PersonRecord, RosterBuilder, YearLevel};
///
/// let roster = RosterBuilder::new()
///     .person(PersonRecord::adult("a1", "Dana Moss", Gender::Female))
///     .person(PersonRecord::youth("y1", "Eli Moss", Gender::Male, YearLevel::Junior, History::New)
///         .with_parent("a1"))
///     .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
///     .crew(CrewRecord::new("F02", "Fayette"))
///     .build()
///     .unwrap();
///
/// assert_eq!(roster.decidable_count(), 1);
/// assert_eq!(roster.centers().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    centers: Vec<CenterId>,
    crews: Vec<CrewRecord>,
    people: Vec<PersonRecord>,
    past_leaders: Vec<(String, Vec<String>)>,
}

impl RosterBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a center.
    pub fn center(mut self, id: impl Into<CenterId>) -> Self {
        self.centers.push(id.into());
        self
    }

    /// Adds a crew with its pre-assigned members.
    pub fn crew(mut self, record: CrewRecord) -> Self {
        self.crews.push(record);
        self
    }

    /// Adds several crews.
    pub fn crews(mut self, records: impl IntoIterator<Item = CrewRecord>) -> Self {
        self.crews.extend(records);
        self
    }

    /// Adds a person.
    pub fn person(mut self, record: PersonRecord) -> Self {
        self.people.push(record);
        self
    }

    /// Adds several people.
    pub fn people(mut self, records: impl IntoIterator<Item = PersonRecord>) -> Self {
        self.people.extend(records);
        self
    }

    /// Records leaders a youth had in prior years. Both the youth and the
    /// leaders may be given by id or name; names that do not resolve to
    /// anyone on the current roster are dropped.
    pub fn past_leaders<I, S>(mut self, youth: impl Into<String>, leaders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.past_leaders
            .push((youth.into(), leaders.into_iter().map(Into::into).collect()));
        self
    }

    /// Validates all records and resolves references.
    ///
    /// # Errors
    ///
    /// Returns [`CrewForgeError::DataIntegrity`] for duplicate ids, unknown
    /// parent, sibling or crew-member references, misplaced roles, and
    /// unplaced parents or young adults.
    pub fn build(self) -> Result<Roster> {
        let RosterBuilder {
            centers: center_records,
            crews: crew_records,
            people: person_records,
            past_leaders,
        } = self;

        // Centers
        let mut centers: Vec<Center> = Vec::new();
        let mut center_ids: HashMap<CenterId, CenterIndex> = HashMap::new();
        for id in center_records {
            if center_ids.contains_key(&id) {
                return Err(integrity(format!("duplicate center id '{id}'")));
            }
            center_ids.insert(id.clone(), CenterIndex::new(centers.len()));
            centers.push(Center { id, crews: Vec::new() });
        }

        // People
        let mut resolver = NameResolver::default();
        let mut person_ids: HashMap<PersonId, PersonIndex> = HashMap::new();
        for (i, record) in person_records.iter().enumerate() {
            if person_ids.contains_key(&record.id) {
                return Err(integrity(format!("duplicate person id '{}'", record.id)));
            }
            if record.friend_choices.len() > ChoiceRank::ALL.len() {
                return Err(integrity(format!(
                    "{} lists {} friend choices, at most {} are allowed",
                    record.name,
                    record.friend_choices.len(),
                    ChoiceRank::ALL.len()
                )));
            }
            let index = PersonIndex::new(i);
            person_ids.insert(record.id.clone(), index);
            resolver.insert(record.id.as_str(), &record.name, index);
        }

        let mut people: Vec<Person> = person_records
            .iter()
            .map(|r| Person {
                id: r.id.clone(),
                name: r.name.clone(),
                role: r.role,
                gender: r.gender,
                year: r.year,
                history: r.history,
                friend_choices: Vec::new(),
                parent: None,
                siblings: BTreeSet::new(),
                past_leaders: BTreeSet::new(),
                fixed_crew: None,
            })
            .collect();

        // Crews and their pre-assigned members
        let mut crews: Vec<Crew> = Vec::new();
        let mut crew_ids: HashMap<CrewId, CrewIndex> = HashMap::new();
        for record in crew_records {
            if crew_ids.contains_key(&record.id) {
                return Err(integrity(format!("duplicate crew id '{}'", record.id)));
            }
            let crew_index = CrewIndex::new(crews.len());
            let center = match center_ids.get(&record.center) {
                Some(&c) => c,
                None => {
                    let c = CenterIndex::new(centers.len());
                    center_ids.insert(record.center.clone(), c);
                    centers.push(Center {
                        id: record.center.clone(),
                        crews: Vec::new(),
                    });
                    c
                }
            };

            let leaders = place_members(
                &resolver,
                &mut people,
                &record.id,
                &record.leaders,
                Role::Adult,
                crew_index,
            )?;
            let young_adults = place_members(
                &resolver,
                &mut people,
                &record.id,
                &record.young_adults,
                Role::YoungAdult,
                crew_index,
            )?;

            centers[center.get()].crews.push(crew_index);
            crew_ids.insert(record.id.clone(), crew_index);
            crews.push(Crew {
                id: record.id,
                center,
                min_size: record.min_size,
                max_size: record.max_size,
                leaders,
                young_adults,
            });
        }

        for person in &people {
            if person.role == Role::YoungAdult && person.fixed_crew.is_none() {
                return Err(integrity(format!(
                    "young adult {} is not pinned to any crew",
                    person.name
                )));
            }
        }

        // Family references
        for (i, record) in person_records.iter().enumerate() {
            let index = PersonIndex::new(i);

            if let Some(reference) = &record.parent {
                let parent = resolver.resolve(reference).ok_or_else(|| {
                    integrity(format!(
                        "parent '{reference}' of {} is not on the roster",
                        record.name
                    ))
                })?;
                if parent == index {
                    return Err(integrity(format!("{} is listed as their own parent", record.name)));
                }
                let parent_person = &people[parent.get()];
                if parent_person.role == Role::Youth {
                    return Err(integrity(format!(
                        "parent {} of {} is registered as a youth",
                        parent_person.name, record.name
                    )));
                }
                if parent_person.fixed_crew.is_none() {
                    return Err(integrity(format!(
                        "parent {} of {} is not placed on any crew",
                        parent_person.name, record.name
                    )));
                }
                people[i].parent = Some(parent);
            }

            for reference in &record.siblings {
                let sibling = resolver.resolve(reference).ok_or_else(|| {
                    integrity(format!(
                        "sibling '{reference}' of {} is not on the roster",
                        record.name
                    ))
                })?;
                if sibling == index {
                    continue;
                }
                people[i].siblings.insert(sibling);
                people[sibling.get()].siblings.insert(index);
            }
        }

        // Friend choices
        for (i, record) in person_records.iter().enumerate() {
            let mut seen: BTreeSet<PersonIndex> = BTreeSet::new();
            for (rank, raw) in ChoiceRank::ALL.into_iter().zip(&record.friend_choices) {
                let raw = raw.trim();
                if raw.is_empty() {
                    continue;
                }
                let target = match resolver.resolve_loose(raw) {
                    Some(t) if t.get() == i => {
                        warn!(person = %record.name, choice = raw, "friend choice names the chooser");
                        None
                    }
                    Some(t) if !seen.insert(t) => {
                        debug!(person = %record.name, choice = raw, "repeated friend choice ignored");
                        None
                    }
                    Some(t) => Some(t),
                    None => {
                        warn!(person = %record.name, choice = raw, "unresolved friend choice");
                        None
                    }
                };
                people[i]
                    .friend_choices
                    .push(FriendChoice::new(rank, raw.to_string(), target));
            }
        }

        // Historical leadership
        for (youth, leaders) in past_leaders {
            let Some(index) = resolver.resolve(&youth) else {
                debug!(youth = %youth, "historical entry for unknown person dropped");
                continue;
            };
            for leader in leaders {
                match resolver.resolve(&leader) {
                    Some(l) if l != index => {
                        people[index.get()].past_leaders.insert(l);
                    }
                    Some(_) => {}
                    None => debug!(leader = %leader, "historical leader not on roster dropped"),
                }
            }
        }

        debug!(
            people = people.len(),
            centers = centers.len(),
            crews = crews.len(),
            "roster built"
        );

        Ok(Roster {
            people,
            centers,
            crews,
            person_ids,
            center_ids,
            crew_ids,
        })
    }
}

fn integrity(message: String) -> CrewForgeError {
    CrewForgeError::DataIntegrity(message)
}

fn place_members(
    resolver: &NameResolver,
    people: &mut [Person],
    crew_id: &CrewId,
    references: &[String],
    role: Role,
    crew: CrewIndex,
) -> Result<Vec<PersonIndex>> {
    let mut placed = Vec::with_capacity(references.len());
    for reference in references {
        let index = resolver.resolve(reference).ok_or_else(|| {
            integrity(format!(
                "crew {crew_id} lists '{reference}' who is not on the roster"
            ))
        })?;
        let person = &mut people[index.get()];
        if person.role != role {
            return Err(integrity(format!(
                "crew {crew_id} lists {} as {:?} but they are registered as {:?}",
                person.name, role, person.role
            )));
        }
        if person.fixed_crew.is_some() {
            return Err(integrity(format!(
                "{} is placed on more than one crew",
                person.name
            )));
        }
        person.fixed_crew = Some(crew);
        placed.push(index);
    }
    Ok(placed)
}
