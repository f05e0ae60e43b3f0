//! People on the roster: input records and their resolved form.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::ids::PersonId;
use crate::error::CrewForgeError;
use crate::index::{CrewIndex, PersonIndex};

/// Role of a person, which decides whether their crew is an input or an
/// output of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Participant whose crew is decided by the model.
    Youth,
    /// Pinned to a crew by the crew roster.
    YoungAdult,
    /// Leads a crew given by the crew roster.
    Adult,
}

impl Role {
    /// Returns true if the crew of a person with this role is decided by
    /// the model.
    #[inline]
    pub fn is_decidable(self) -> bool {
        self == Role::Youth
    }
}

impl FromStr for Role {
    type Err = CrewForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Youth" => Ok(Role::Youth),
            "YoungAdult" | "Young Adult" | "YA" => Ok(Role::YoungAdult),
            "Adult" => Ok(Role::Adult),
            other => Err(CrewForgeError::DataIntegrity(format!("unknown role '{other}'"))),
        }
    }
}

/// Gender as recorded on the buddy form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Male,
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Female,
}

impl FromStr for Gender {
    type Err = CrewForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            other => Err(CrewForgeError::DataIntegrity(format!("unknown gender '{other}'"))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "M",
            Gender::Female => "F",
        })
    }
}

/// School year level, ordered from youngest to oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YearLevel {
    #[cfg_attr(feature = "serde", serde(rename = "Fr"))]
    Freshman,
    #[cfg_attr(feature = "serde", serde(rename = "So"))]
    Sophomore,
    #[cfg_attr(feature = "serde", serde(rename = "Jr"))]
    Junior,
    #[cfg_attr(feature = "serde", serde(rename = "Sr"))]
    Senior,
}

impl YearLevel {
    /// All year levels in order.
    pub const ALL: [YearLevel; 4] = [
        YearLevel::Freshman,
        YearLevel::Sophomore,
        YearLevel::Junior,
        YearLevel::Senior,
    ];

    /// Returns the short code used on buddy forms.
    pub fn code(self) -> &'static str {
        match self {
            YearLevel::Freshman => "Fr",
            YearLevel::Sophomore => "So",
            YearLevel::Junior => "Jr",
            YearLevel::Senior => "Sr",
        }
    }
}

impl FromStr for YearLevel {
    type Err = CrewForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        YearLevel::ALL
            .into_iter()
            .find(|y| y.code() == s)
            .ok_or_else(|| CrewForgeError::DataIntegrity(format!("unknown year level '{s}'")))
    }
}

impl fmt::Display for YearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whether a participant attended in a prior year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum History {
    #[cfg_attr(feature = "serde", serde(rename = "V"))]
    Veteran,
    #[cfg_attr(feature = "serde", serde(rename = "N"))]
    New,
}

impl FromStr for History {
    type Err = CrewForgeError;

    /// Accepts `V`/`N`; buddy forms sometimes carry a trailing `*`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('*') {
            "V" => Ok(History::Veteran),
            "N" => Ok(History::New),
            other => Err(CrewForgeError::DataIntegrity(format!("unknown history '{other}'"))),
        }
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            History::Veteran => "V",
            History::New => "N",
        })
    }
}

/// Rank of a friend choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChoiceRank {
    First,
    Second,
    Third,
}

impl ChoiceRank {
    /// Ranks in preference order.
    pub const ALL: [ChoiceRank; 3] = [ChoiceRank::First, ChoiceRank::Second, ChoiceRank::Third];

    /// Friend-score points awarded when this choice shares a center.
    #[inline]
    pub fn points(self) -> u32 {
        match self {
            ChoiceRank::First => 3,
            ChoiceRank::Second => 2,
            ChoiceRank::Third => 1,
        }
    }
}

/// Input record for one person, as produced by the data loader.
///
/// References to other people (`friend_choices`, `parent`, `siblings`) are
/// raw strings and are resolved by [`RosterBuilder`](super::RosterBuilder).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    pub role: Role,
    pub gender: Gender,
    pub year: YearLevel,
    pub history: History,
    /// Ranked friend choices, first choice first. At most three.
    #[cfg_attr(feature = "serde", serde(default))]
    pub friend_choices: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub siblings: Vec<String>,
}

impl PersonRecord {
    /// Creates a youth record with no relationships.
    pub fn youth(
        id: impl Into<PersonId>,
        name: impl Into<String>,
        gender: Gender,
        year: YearLevel,
        history: History,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Role::Youth,
            gender,
            year,
            history,
            friend_choices: Vec::new(),
            parent: None,
            siblings: Vec::new(),
        }
    }

    /// Creates an adult record.
    pub fn adult(id: impl Into<PersonId>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            role: Role::Adult,
            ..Self::youth(id, name, gender, YearLevel::Senior, History::Veteran)
        }
    }

    /// Creates a young adult record.
    pub fn young_adult(
        id: impl Into<PersonId>,
        name: impl Into<String>,
        gender: Gender,
        history: History,
    ) -> Self {
        Self {
            role: Role::YoungAdult,
            ..Self::youth(id, name, gender, YearLevel::Senior, history)
        }
    }

    /// Sets the ranked friend choices.
    pub fn with_friends<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.friend_choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the parent reference.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the sibling references.
    pub fn with_siblings<I, S>(mut self, siblings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.siblings = siblings.into_iter().map(Into::into).collect();
        self
    }
}

/// A friend choice after name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FriendChoice {
    rank: ChoiceRank,
    raw: String,
    target: Option<PersonIndex>,
}

impl FriendChoice {
    pub(crate) fn new(rank: ChoiceRank, raw: String, target: Option<PersonIndex>) -> Self {
        Self { rank, raw, target }
    }

    pub fn rank(&self) -> ChoiceRank {
        self.rank
    }

    /// The text written on the buddy form.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The chosen person, or `None` when the name did not resolve to
    /// anyone on the current roster.
    pub fn target(&self) -> Option<PersonIndex> {
        self.target
    }
}

/// A validated person on the roster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub(crate) id: PersonId,
    pub(crate) name: String,
    pub(crate) role: Role,
    pub(crate) gender: Gender,
    pub(crate) year: YearLevel,
    pub(crate) history: History,
    pub(crate) friend_choices: Vec<FriendChoice>,
    pub(crate) parent: Option<PersonIndex>,
    pub(crate) siblings: BTreeSet<PersonIndex>,
    pub(crate) past_leaders: BTreeSet<PersonIndex>,
    pub(crate) fixed_crew: Option<CrewIndex>,
}

impl Person {
    pub fn id(&self) -> &PersonId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn year(&self) -> YearLevel {
        self.year
    }

    pub fn history(&self) -> History {
        self.history
    }

    /// Ranked friend choices, including unresolved ones.
    pub fn friend_choices(&self) -> &[FriendChoice] {
        &self.friend_choices
    }

    /// Friend choices that resolved to a person, with their rank.
    pub fn resolved_friends(&self) -> impl Iterator<Item = (ChoiceRank, PersonIndex)> + '_ {
        self.friend_choices
            .iter()
            .filter_map(|c| c.target.map(|t| (c.rank, t)))
    }

    /// Returns true if at least one friend choice resolved.
    pub fn has_resolved_friend(&self) -> bool {
        self.friend_choices.iter().any(|c| c.target.is_some())
    }

    pub fn parent(&self) -> Option<PersonIndex> {
        self.parent
    }

    /// Siblings, symmetric across the roster.
    pub fn siblings(&self) -> &BTreeSet<PersonIndex> {
        &self.siblings
    }

    /// Leaders this person had in prior years.
    pub fn past_leaders(&self) -> &BTreeSet<PersonIndex> {
        &self.past_leaders
    }

    /// The crew given as input for adults and young adults.
    pub fn fixed_crew(&self) -> Option<CrewIndex> {
        self.fixed_crew
    }

    /// Returns true if the model decides this person's crew.
    pub fn is_decidable(&self) -> bool {
        self.role.is_decidable()
    }
}
