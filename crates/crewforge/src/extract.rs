//! Decoding an engine valuation into an assignment.

use crewforge_core::{Assignment, CrewForgeError, Placement, Result, Roster};
use crewforge_model::IndicatorLayout;
use crewforge_solver::Valuation;

/// Reads the assignment out of a valuation.
///
/// Every decidable person must have exactly one true indicator; anything
/// else is reported as [`CrewForgeError::InternalConsistency`] naming each
/// offending person. The result depends only on the valuation, so equal
/// valuations decode to equal assignments.
pub fn extract(roster: &Roster, layout: &IndicatorLayout, valuation: &Valuation) -> Result<Assignment> {
    let needed = roster
        .decidable()
        .flat_map(|p| layout.indicators(p).iter().map(|(_, var)| var.index() + 1))
        .max()
        .unwrap_or(0);
    if valuation.len() < needed {
        return Err(CrewForgeError::InternalConsistency(vec![format!(
            "valuation has {} values but the layout needs {needed}",
            valuation.len()
        )]));
    }

    let mut problems = Vec::new();
    let mut placements = Vec::with_capacity(roster.decidable_count());
    for p in roster.decidable() {
        let person = roster.person(p);
        let chosen: Vec<_> = layout
            .indicators(p)
            .iter()
            .filter(|&&(_, var)| valuation.is_true(var))
            .map(|&(crew, _)| crew)
            .collect();
        match chosen.as_slice() {
            [crew] => {
                let crew = roster.crew(*crew);
                placements.push((
                    person.id().clone(),
                    Placement::new(roster.center(crew.center()).id().clone(), crew.id().clone()),
                ));
            }
            [] => problems.push(format!("{} has no crew in the solution", person.name())),
            many => {
                let ids: Vec<&str> = many.iter().map(|&c| roster.crew(c).id().as_str()).collect();
                problems.push(format!(
                    "{} is on {} crews in the solution: {}",
                    person.name(),
                    many.len(),
                    ids.join(", ")
                ));
            }
        }
    }
    if !problems.is_empty() {
        return Err(CrewForgeError::InternalConsistency(problems));
    }

    Assignment::from_placements(placements).map_err(|duplicates| {
        CrewForgeError::InternalConsistency(
            duplicates
                .into_iter()
                .map(|id| format!("{id} was decoded twice"))
                .collect(),
        )
    })
}
