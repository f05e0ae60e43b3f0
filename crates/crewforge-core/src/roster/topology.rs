//! Centers and crews.

use super::ids::{CenterId, CrewId};
use crate::index::{CenterIndex, CrewIndex, PersonIndex};

/// Input record for one crew and its pre-assigned members.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrewRecord {
    pub id: CrewId,
    pub center: CenterId,
    /// Overrides the configured minimum crew size.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_size: Option<u32>,
    /// Overrides the configured maximum crew size.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_size: Option<u32>,
    /// Adults leading the crew, by person id or name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub leaders: Vec<String>,
    /// Young adults pinned to the crew, by person id or name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub young_adults: Vec<String>,
}

impl CrewRecord {
    pub fn new(id: impl Into<CrewId>, center: impl Into<CenterId>) -> Self {
        Self {
            id: id.into(),
            center: center.into(),
            min_size: None,
            max_size: None,
            leaders: Vec::new(),
            young_adults: Vec::new(),
        }
    }

    pub fn with_leaders<I, S>(mut self, leaders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leaders = leaders.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_young_adults<I, S>(mut self, young_adults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.young_adults = young_adults.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size_bounds(mut self, min_size: u32, max_size: u32) -> Self {
        self.min_size = Some(min_size);
        self.max_size = Some(max_size);
        self
    }
}

/// A validated center.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Center {
    pub(crate) id: CenterId,
    pub(crate) crews: Vec<CrewIndex>,
}

impl Center {
    pub fn id(&self) -> &CenterId {
        &self.id
    }

    pub fn crews(&self) -> &[CrewIndex] {
        &self.crews
    }
}

/// A validated crew.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crew {
    pub(crate) id: CrewId,
    pub(crate) center: CenterIndex,
    pub(crate) min_size: Option<u32>,
    pub(crate) max_size: Option<u32>,
    pub(crate) leaders: Vec<PersonIndex>,
    pub(crate) young_adults: Vec<PersonIndex>,
}

impl Crew {
    pub fn id(&self) -> &CrewId {
        &self.id
    }

    pub fn center(&self) -> CenterIndex {
        self.center
    }

    pub fn leaders(&self) -> &[PersonIndex] {
        &self.leaders
    }

    pub fn young_adults(&self) -> &[PersonIndex] {
        &self.young_adults
    }

    /// All pre-assigned members. These form the crew's leader set for the
    /// historical-leadership rule.
    pub fn staff(&self) -> impl Iterator<Item = PersonIndex> + '_ {
        self.leaders.iter().chain(self.young_adults.iter()).copied()
    }

    /// Number of pre-assigned members counted toward occupancy.
    pub fn fixed_count(&self) -> u32 {
        (self.leaders.len() + self.young_adults.len()) as u32
    }

    /// Size bounds, falling back to the given defaults where the crew has
    /// no override.
    pub fn size_bounds(&self, default_min: u32, default_max: u32) -> (u32, u32) {
        (
            self.min_size.unwrap_or(default_min),
            self.max_size.unwrap_or(default_max),
        )
    }
}
