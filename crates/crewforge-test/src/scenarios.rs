//! Small rosters for the acceptance scenarios.
//!
//! Each function returns the roster together with the configuration the
//! scenario runs under.

use crewforge_config::AssignmentConfig;
use crewforge_core::{CrewRecord, Gender, History, PersonRecord, Roster, YearLevel};

use crate::youth;

/// Two centers with one crew each (`2..=4`) and four unrelated youths,
/// two of each gender.
pub fn two_centers_four_youths() -> (Roster, AssignmentConfig) {
    let roster = Roster::builder()
        .person(youth("y1", "Ada Reed", Gender::Female, YearLevel::Freshman, History::New))
        .person(youth("y2", "Ben Shaw", Gender::Male, YearLevel::Sophomore, History::Veteran))
        .person(youth("y3", "Cara Tate", Gender::Female, YearLevel::Junior, History::Veteran))
        .person(youth("y4", "Dev Usher", Gender::Male, YearLevel::Senior, History::New))
        .crew(CrewRecord::new("F01", "Fayette").with_size_bounds(2, 4))
        .crew(CrewRecord::new("K01", "Kanawha").with_size_bounds(2, 4))
        .build()
        .expect("fixture roster is valid");
    (roster, AssignmentConfig::default())
}

/// One center with two crews; `p1` lists `p2` as first choice. Two more
/// youths fill the crews.
pub fn first_choice_pair() -> (Roster, AssignmentConfig) {
    let roster = Roster::builder()
        .person(
            youth("p1", "Pia Quinn", Gender::Female, YearLevel::Junior, History::New)
                .with_friends(["Rae Stone"]),
        )
        .person(youth("p2", "Rae Stone", Gender::Female, YearLevel::Junior, History::New))
        .person(youth("p3", "Sam Teller", Gender::Male, YearLevel::Senior, History::Veteran))
        .person(youth("p4", "Tom Urban", Gender::Male, YearLevel::Sophomore, History::Veteran))
        .crew(CrewRecord::new("F01", "Fayette"))
        .crew(CrewRecord::new("F02", "Fayette"))
        .build()
        .expect("fixture roster is valid");
    (roster, AssignmentConfig::new().with_crew_size(1, 3))
}

/// A single center whose first crew is led by the parent of `c1`.
pub fn parent_and_child() -> (Roster, AssignmentConfig) {
    let roster = Roster::builder()
        .person(PersonRecord::adult("a1", "Gail Hart", Gender::Female))
        .person(PersonRecord::adult("a2", "Hugo Ives", Gender::Male))
        .person(
            youth("c1", "Cole Hart", Gender::Male, YearLevel::Sophomore, History::New)
                .with_parent("a1"),
        )
        .person(youth("c2", "Dina Jones", Gender::Female, YearLevel::Junior, History::Veteran))
        .person(youth("c3", "Ezra King", Gender::Male, YearLevel::Freshman, History::New))
        .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
        .crew(CrewRecord::new("F02", "Fayette").with_leaders(["a2"]))
        .build()
        .expect("fixture roster is valid");
    (roster, AssignmentConfig::new().with_crew_size(2, 4))
}

/// A youth bound to Fayette by their parent, whose two other Fayette crews
/// are both led by the youth's past leaders.
pub fn historically_blocked_youth() -> (Roster, AssignmentConfig) {
    let roster = Roster::builder()
        .person(PersonRecord::adult("a1", "Iris Lang", Gender::Female))
        .person(PersonRecord::adult("a2", "Jack Mays", Gender::Male))
        .person(PersonRecord::adult("a3", "Kate Nash", Gender::Female))
        .person(PersonRecord::adult("a4", "Liam Orr", Gender::Male))
        .person(
            youth("y1", "Mona Nash", Gender::Female, YearLevel::Junior, History::Veteran)
                .with_parent("a3"),
        )
        .person(youth("y2", "Ned Pike", Gender::Male, YearLevel::Senior, History::Veteran))
        .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
        .crew(CrewRecord::new("F02", "Fayette").with_leaders(["a2"]))
        .crew(CrewRecord::new("F03", "Fayette").with_leaders(["a3"]))
        .crew(CrewRecord::new("K01", "Kanawha").with_leaders(["a4"]))
        .past_leaders("Mona Nash", ["Iris Lang", "Jack Mays"])
        .build()
        .expect("fixture roster is valid");
    (roster, AssignmentConfig::new().with_crew_size(1, 4))
}

/// Two crews, three youths, and a minimum crew size of four.
pub fn undersized_population() -> (Roster, AssignmentConfig) {
    let roster = Roster::builder()
        .person(youth("y1", "Opal Reyes", Gender::Female, YearLevel::Freshman, History::New))
        .person(youth("y2", "Paul Sims", Gender::Male, YearLevel::Junior, History::New))
        .person(youth("y3", "Quin Todd", Gender::Male, YearLevel::Senior, History::Veteran))
        .crew(CrewRecord::new("F01", "Fayette"))
        .crew(CrewRecord::new("F02", "Fayette"))
        .build()
        .expect("fixture roster is valid");
    (roster, AssignmentConfig::new().with_crew_size(4, 7))
}
