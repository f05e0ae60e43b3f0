//! Pre-construction checks on roster data.

use crewforge_config::AssignmentConfig;
use crewforge_core::{CrewForgeError, Result, Roster};

/// Rejects rosters that no model can represent.
///
/// Every problem found is reported in one [`CrewForgeError::DataIntegrity`]:
/// decidable youths with no eligible crew, crews whose size bounds are
/// inverted, and crews whose pre-assigned members already exceed the
/// maximum size.
pub fn check_integrity(roster: &Roster, config: &AssignmentConfig) -> Result<()> {
    let mut problems = Vec::new();

    for person in roster.decidable() {
        if roster.eligible_crews(person).is_empty() {
            problems.push(format!(
                "{} has no eligible crew",
                roster.person(person).name()
            ));
        }
    }

    for crew in roster.crews() {
        let (min, max) = crew.size_bounds(config.min_crew_size, config.max_crew_size);
        if min > max {
            problems.push(format!(
                "crew {} has minimum size {min} above maximum size {max}",
                crew.id()
            ));
        }
        if crew.fixed_count() > max {
            problems.push(format!(
                "crew {} has {} pre-assigned members but a maximum size of {max}",
                crew.id(),
                crew.fixed_count()
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CrewForgeError::DataIntegrity(problems.join("; ")))
    }
}
