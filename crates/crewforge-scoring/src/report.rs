//! Score report types.

use std::fmt;

use crewforge_core::{CenterId, CrewId, PersonId, YearLevel};

/// One objective term.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubScore {
    /// Unweighted value.
    pub raw: f64,
    /// Configured weight.
    pub weight: f64,
}

impl SubScore {
    pub fn new(raw: f64, weight: f64) -> Self {
        Self { raw, weight }
    }

    /// Contribution to the combined objective.
    #[inline]
    pub fn weighted(&self) -> f64 {
        self.raw * self.weight
    }
}

/// Friend points earned inside one center.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterFriendScore {
    pub center: CenterId,
    /// Sum of 3/2/1 points over choices satisfied in this center.
    pub points: u32,
    /// Friend choosers who could be placed here; fixed by the roster.
    pub divisor: u32,
    /// Friend choosers this assignment actually placed here.
    pub choosers: u32,
}

impl CenterFriendScore {
    /// Points divided by the center's friend divisor.
    pub fn normalized(&self) -> f64 {
        f64::from(self.points) / f64::from(self.divisor)
    }

    /// Points per chooser placed in the center, or 0 with none placed.
    pub fn per_placed_chooser(&self) -> f64 {
        if self.choosers == 0 {
            0.0
        } else {
            f64::from(self.points) / f64::from(self.choosers)
        }
    }
}

/// Who ended up on one crew.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrewComposition {
    pub crew: CrewId,
    pub center: CenterId,
    /// Pre-assigned adults and young adults.
    pub staff: u32,
    /// Decided youths, in roster order.
    pub youths: Vec<PersonId>,
    pub males: u32,
    pub females: u32,
    /// Youth count per year level, indexed like [`YearLevel::ALL`].
    pub years: [u32; 4],
    pub veterans: u32,
    pub new: u32,
}

impl CrewComposition {
    /// Total occupancy counted against the size bounds.
    pub fn occupancy(&self) -> u32 {
        self.staff + self.youths.len() as u32
    }

    pub fn gender_balance(&self) -> u32 {
        self.males.min(self.females)
    }

    /// Number of year levels with at least one youth.
    pub fn years_represented(&self) -> u32 {
        self.years.iter().filter(|&&n| n > 0).count() as u32
    }

    pub fn history_balance(&self) -> u32 {
        self.veterans.min(self.new)
    }

    /// Youth count of one year level.
    pub fn year_count(&self, year: YearLevel) -> u32 {
        self.years[year as usize]
    }
}

/// How many friend choosers had their choices land in their own center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FriendChoiceStats {
    /// People with at least one resolved choice.
    pub choosers: u32,
    pub first: u32,
    pub second: u32,
    pub third: u32,
    /// Choosers with more than one choice satisfied.
    pub multiple: u32,
}

impl FriendChoiceStats {
    fn pct(&self, n: u32) -> f64 {
        if self.choosers == 0 {
            0.0
        } else {
            f64::from(n) * 100.0 / f64::from(self.choosers)
        }
    }

    pub fn first_choice_pct(&self) -> f64 {
        self.pct(self.first)
    }

    pub fn second_choice_pct(&self) -> f64 {
        self.pct(self.second)
    }

    pub fn third_choice_pct(&self) -> f64 {
        self.pct(self.third)
    }

    pub fn multiple_friends_pct(&self) -> f64 {
        self.pct(self.multiple)
    }
}

/// Raw and weighted sub-scores of an assignment with their breakdowns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreReport {
    pub friend: SubScore,
    pub gender: SubScore,
    pub year: SubScore,
    pub history: SubScore,
    /// Friend points per center, in roster order.
    pub centers: Vec<CenterFriendScore>,
    /// Composition per crew, in roster order.
    pub crews: Vec<CrewComposition>,
    pub friend_choices: FriendChoiceStats,
}

impl ScoreReport {
    /// Combined objective: the weighted sum of the four terms.
    pub fn total(&self) -> f64 {
        self.friend.weighted()
            + self.gender.weighted()
            + self.year.weighted()
            + self.history.weighted()
    }

    /// Composition of a crew by id.
    pub fn crew(&self, id: &str) -> Option<&CrewComposition> {
        self.crews.iter().find(|c| c.crew.as_str() == id)
    }

    /// Friend breakdown of a center by id.
    pub fn center(&self, id: &str) -> Option<&CenterFriendScore> {
        self.centers.iter().find(|c| c.center.as_str() == id)
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total {:.3}", self.total())?;
        for (name, score) in [
            ("friend", &self.friend),
            ("gender", &self.gender),
            ("year", &self.year),
            ("history", &self.history),
        ] {
            writeln!(
                f,
                "  {name:<8} {:>8.3} (raw {:.3} x {})",
                score.weighted(),
                score.raw,
                score.weight
            )?;
        }
        for center in &self.centers {
            writeln!(
                f,
                "  center {}: {} points / {} = {:.2} ({} choosers placed)",
                center.center,
                center.points,
                center.divisor,
                center.normalized(),
                center.choosers
            )?;
        }
        let stats = &self.friend_choices;
        write!(
            f,
            "  friend choices: first {:.1}%, second {:.1}%, third {:.1}%, multiple {:.1}%",
            stats.first_choice_pct(),
            stats.second_choice_pct(),
            stats.third_choice_pct(),
            stats.multiple_friends_pct()
        )
    }
}
