//! Per-center normalization of the friend score.

use crewforge_core::{CenterIndex, Roster};

/// Friend divisor of every center.
///
/// The divisor of a center is the number of friend choosers (people with at
/// least one resolved choice) who can end up there: pre-assigned to one of
/// its crews, or with an eligible crew in it. It is at least 1. Because it
/// depends only on the roster, friend points divided by it stay linear in
/// the model and the report reproduces the model objective exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendDivisors {
    divisors: Vec<u32>,
}

impl FriendDivisors {
    /// Computes the divisors of every center of the roster.
    pub fn from_roster(roster: &Roster) -> Self {
        let mut counts = vec![0u32; roster.centers().len()];
        for chooser in roster.friend_choosers() {
            for center in roster.eligible_centers(chooser) {
                counts[center.get()] += 1;
            }
        }
        Self {
            divisors: counts.into_iter().map(|c| c.max(1)).collect(),
        }
    }

    /// Divisor of a center.
    #[inline]
    pub fn get(&self, center: CenterIndex) -> u32 {
        self.divisors[center.get()]
    }

    /// Iterates over (center, divisor) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CenterIndex, u32)> + '_ {
        self.divisors
            .iter()
            .enumerate()
            .map(|(i, &d)| (CenterIndex::new(i), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewforge_core::{CrewRecord, Gender, History, PersonRecord, YearLevel};

    #[test]
    fn test_divisors_count_eligible_choosers() {
        let roster = Roster::builder()
            .person(PersonRecord::adult("a1", "Dana Moss", Gender::Female))
            .person(
                PersonRecord::youth("y1", "Eli Moss", Gender::Male, YearLevel::Junior, History::New)
                    .with_parent("a1")
                    .with_friends(["Ann Lee"]),
            )
            .person(
                PersonRecord::youth("y2", "Ann Lee", Gender::Female, YearLevel::Senior, History::New)
                    .with_friends(["Eli Moss"]),
            )
            .person(PersonRecord::youth("y3", "Cy Park", Gender::Male, YearLevel::Senior, History::New))
            .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
            .crew(CrewRecord::new("F02", "Fayette"))
            .crew(CrewRecord::new("K01", "Kanawha"))
            .build()
            .unwrap();

        let divisors = FriendDivisors::from_roster(&roster);
        let fayette = roster.center_index("Fayette").unwrap();
        let kanawha = roster.center_index("Kanawha").unwrap();
        // y1 is bound to Fayette by the parent, y2 can go anywhere.
        assert_eq!(divisors.get(fayette), 2);
        assert_eq!(divisors.get(kanawha), 1);
        assert_eq!(divisors.iter().count(), 2);
    }

    #[test]
    fn test_divisor_is_at_least_one() {
        let roster = Roster::builder()
            .crew(CrewRecord::new("F01", "Fayette"))
            .build()
            .unwrap();
        let divisors = FriendDivisors::from_roster(&roster);
        assert_eq!(divisors.get(CenterIndex::new(0)), 1);
    }
}
