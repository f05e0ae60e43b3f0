//! A two-center camp with families, friend choices and history.
//!
//! Fayette runs F01 (led by Dana Moss) and F02 (led by Gus Park, with young
//! adult Ivy Hart pinned). Kanawha runs K01 (Rosa Diaz) and K02 (Tim Bell).
//!
//! - Eli Moss is Dana's son and Finn Moss's brother, so both brothers stay
//!   in Fayette, Eli off F01, and the brothers on different crews.
//! - Gia Lane and Hal Ross choose each other; Ivy Tran and Ivy Hart choose
//!   them by short form and full name.
//! - Jay Cruz was led by Rosa Diaz in a prior year.
//! - Kim Vega lists one friend who is not on the roster.

use crewforge_config::AssignmentConfig;
use crewforge_core::{CrewRecord, Gender, History, PersonRecord, Roster, YearLevel};

use crate::youth;

/// Builds the camp roster.
pub fn camp_roster() -> Roster {
    Roster::builder()
        .person(PersonRecord::adult("a1", "Dana Moss", Gender::Female))
        .person(PersonRecord::adult("a2", "Gus Park", Gender::Male))
        .person(PersonRecord::adult("a3", "Rosa Diaz", Gender::Female))
        .person(PersonRecord::adult("a4", "Tim Bell", Gender::Male))
        .person(
            PersonRecord::young_adult("ya1", "Ivy Hart", Gender::Female, History::Veteran)
                .with_friends(["Gia Lane"]),
        )
        .person(
            youth("y1", "Eli Moss", Gender::Male, YearLevel::Junior, History::New)
                .with_parent("Dana Moss")
                .with_siblings(["Finn Moss"]),
        )
        .person(youth("y2", "Finn Moss", Gender::Male, YearLevel::Freshman, History::New))
        .person(
            youth("y3", "Gia Lane", Gender::Female, YearLevel::Sophomore, History::Veteran)
                .with_friends(["Hal Ross", "Ivy Tran"]),
        )
        .person(
            youth("y4", "Hal Ross", Gender::Male, YearLevel::Senior, History::Veteran)
                .with_friends(["Gia Lane"]),
        )
        .person(
            youth("y5", "Ivy Tran", Gender::Female, YearLevel::Freshman, History::New)
                .with_friends(["Ross"]),
        )
        .person(youth("y6", "Jay Cruz", Gender::Male, YearLevel::Sophomore, History::Veteran))
        .person(
            youth("y7", "Kim Vega", Gender::Female, YearLevel::Junior, History::Veteran)
                .with_friends(["Lou West", "Nobody Known"]),
        )
        .person(youth("y8", "Lou West", Gender::Male, YearLevel::Senior, History::New))
        .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
        .crew(
            CrewRecord::new("F02", "Fayette")
                .with_leaders(["a2"])
                .with_young_adults(["ya1"]),
        )
        .crew(CrewRecord::new("K01", "Kanawha").with_leaders(["a3"]))
        .crew(CrewRecord::new("K02", "Kanawha").with_leaders(["a4"]))
        .past_leaders("Jay Cruz", ["Rosa Diaz"])
        .build()
        .expect("fixture roster is valid")
}

/// Crew sizes of two to four for the camp.
pub fn camp_config() -> AssignmentConfig {
    AssignmentConfig::new().with_crew_size(2, 4)
}
