//! A 24-youth retreat with two centers of two crews each.
//!
//! Every crew has one adult leader. The youths form six friend circles of
//! four: each lists the two circle neighbours, so a circle fits one center
//! with alternate members on its two crews. Genders, years and history are
//! spread so that such a split fills every crew with three men and three
//! women, all four years, and three veterans beside three new youths.

use crewforge_config::AssignmentConfig;
use crewforge_core::{CrewRecord, Gender, History, PersonRecord, Roster, YearLevel};

use crate::youth;

const CIRCLES: [[&str; 4]; 6] = [
    ["Abe Cole", "Bart Dunn", "Cleo Eads", "Dora Fife"],
    ["Eli Gant", "Finn Hale", "Gwen Iles", "Hana Judd"],
    ["Ivan Kerr", "Jude Lamb", "Kira Moen", "Lena Nash"],
    ["Milo Orr", "Nate Pyle", "Opal Quan", "Pia Rios"],
    ["Quin Sato", "Rex Toms", "Sara Uhl", "Tess Vang"],
    ["Uri Webb", "Vic Xu", "Wren Yost", "Xena Zorn"],
];

/// Year levels of the four circle members, by circle.
const YEARS: [[YearLevel; 4]; 6] = {
    use YearLevel::*;
    [
        [Freshman, Sophomore, Junior, Senior],
        [Sophomore, Freshman, Senior, Junior],
        [Freshman, Sophomore, Junior, Senior],
        [Freshman, Sophomore, Junior, Senior],
        [Sophomore, Freshman, Senior, Junior],
        [Freshman, Sophomore, Junior, Senior],
    ]
};

/// Builds the retreat roster.
pub fn retreat_roster() -> Roster {
    let mut builder = Roster::builder()
        .person(PersonRecord::adult("a1", "Ada Bloom", Gender::Female))
        .person(PersonRecord::adult("a2", "Ben Croft", Gender::Male))
        .person(PersonRecord::adult("a3", "Cora Dale", Gender::Female))
        .person(PersonRecord::adult("a4", "Dan Ewing", Gender::Male));

    for (circle, names) in CIRCLES.iter().enumerate() {
        for (seat, name) in names.iter().enumerate() {
            // Seats 0 and 1 are men, 2 and 3 women; 0 and 3 are veterans.
            let gender = if seat < 2 { Gender::Male } else { Gender::Female };
            let history = if seat == 0 || seat == 3 {
                History::Veteran
            } else {
                History::New
            };
            let next = names[(seat + 1) % 4];
            let previous = names[(seat + 3) % 4];
            let id = format!("r{}{}", circle + 1, seat + 1);
            builder = builder.person(
                youth(&id, name, gender, YEARS[circle][seat], history)
                    .with_friends([next, previous]),
            );
        }
    }

    builder
        .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
        .crew(CrewRecord::new("F02", "Fayette").with_leaders(["a2"]))
        .crew(CrewRecord::new("K01", "Kanawha").with_leaders(["a3"]))
        .crew(CrewRecord::new("K02", "Kanawha").with_leaders(["a4"]))
        .build()
        .expect("fixture roster is valid")
}

/// Default sizes: five to seven including the leader.
pub fn retreat_config() -> AssignmentConfig {
    AssignmentConfig::default()
}
