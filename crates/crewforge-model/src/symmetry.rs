//! Interchangeable crews and the ordering rows that break their symmetry.
//!
//! Two crews of one center are interchangeable when swapping their
//! members maps every valid assignment to a valid assignment with the same
//! score: they share size bounds and staff count, every youth may join
//! both or neither, and no staff member on them is related to or chosen by
//! a youth.

use std::collections::BTreeMap;

use crewforge_config::AssignmentConfig;
use crewforge_core::{CrewIndex, PersonIndex, Roster};

use crate::kinship::KinshipPair;
use crate::layout::IndicatorLayout;

/// What two crews must share to be swapped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CrewSignature {
    bounds: (u32, u32),
    fixed: u32,
    domain: Vec<bool>,
}

/// Groups of at least two interchangeable crews, each in crew order.
pub fn interchangeable_crews(
    roster: &Roster,
    config: &AssignmentConfig,
    layout: &IndicatorLayout,
    kinship: &[KinshipPair],
    friends: &[(PersonIndex, PersonIndex)],
) -> Vec<Vec<CrewIndex>> {
    let mut tied = vec![false; roster.crews().len()];
    let pairs = kinship
        .iter()
        .map(|pair| (pair.a, pair.b))
        .chain(friends.iter().copied());
    for (a, b) in pairs {
        match (roster.person(a).fixed_crew(), roster.person(b).fixed_crew()) {
            (Some(crew), None) | (None, Some(crew)) => tied[crew.get()] = true,
            _ => {}
        }
    }

    let decidable: Vec<PersonIndex> = roster.decidable().collect();
    let mut classes = Vec::new();
    for k in roster.center_indices() {
        let mut by_signature: BTreeMap<CrewSignature, Vec<CrewIndex>> = BTreeMap::new();
        for &c in roster.center(k).crews() {
            if tied[c.get()] {
                continue;
            }
            let crew = roster.crew(c);
            let signature = CrewSignature {
                bounds: crew.size_bounds(config.min_crew_size, config.max_crew_size),
                fixed: crew.fixed_count(),
                domain: decidable
                    .iter()
                    .map(|&p| layout.indicator(p, c).is_some())
                    .collect(),
            };
            by_signature.entry(signature).or_default().push(c);
        }
        classes.extend(by_signature.into_values().filter(|crews| crews.len() > 1));
    }
    for class in &mut classes {
        class.sort();
    }
    classes
}
