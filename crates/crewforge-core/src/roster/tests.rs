//! Tests for roster construction and queries.

use super::*;
use crate::error::CrewForgeError;

fn youth(id: &str, name: &str) -> PersonRecord {
    PersonRecord::youth(id, name, Gender::Female, YearLevel::Sophomore, History::New)
}

fn base() -> RosterBuilder {
    RosterBuilder::new()
        .person(PersonRecord::adult("a1", "Dana Moss", Gender::Female))
        .person(PersonRecord::adult("a2", "Gus Park", Gender::Male))
        .person(PersonRecord::young_adult("ya1", "Ivy Hart", Gender::Female, History::Veteran))
        .crew(CrewRecord::new("F01", "Fayette").with_leaders(["a1"]))
        .crew(CrewRecord::new("F02", "Fayette").with_young_adults(["ya1"]))
        .crew(CrewRecord::new("K01", "Kanawha").with_leaders(["a2"]))
}

fn assert_integrity(result: crate::Result<Roster>, needle: &str) {
    match result {
        Err(CrewForgeError::DataIntegrity(msg)) => {
            assert!(msg.contains(needle), "unexpected message: {msg}")
        }
        other => panic!("expected data integrity error, got {other:?}"),
    }
}

#[test]
fn test_topology_and_fixed_placements() {
    let roster = base().build().unwrap();

    assert_eq!(roster.centers().len(), 2);
    assert_eq!(roster.crews().len(), 3);
    let fayette = roster.center_index("Fayette").unwrap();
    assert_eq!(roster.center(fayette).crews().len(), 2);

    let a1 = roster.person_index("a1").unwrap();
    let f01 = roster.crew_index("F01").unwrap();
    assert_eq!(roster.person(a1).fixed_crew(), Some(f01));
    assert_eq!(roster.fixed_center(a1), Some(fayette));

    let f02 = roster.crew_index("F02").unwrap();
    assert_eq!(roster.crew(f02).fixed_count(), 1);
    assert_eq!(roster.decidable_count(), 0);
}

#[test]
fn test_siblings_are_symmetric() {
    let roster = base()
        .person(youth("y1", "Ann Lee").with_siblings(["y2"]))
        .person(youth("y2", "Ben Lee"))
        .build()
        .unwrap();

    let y1 = roster.person_index("y1").unwrap();
    let y2 = roster.person_index("y2").unwrap();
    assert!(roster.person(y1).siblings().contains(&y2));
    assert!(roster.person(y2).siblings().contains(&y1));
}

#[test]
fn test_friend_resolution_and_unresolved_choice() {
    let roster = base()
        .person(youth("y1", "Ann Lee").with_friends(["Ben Cole", "Nobody Here", "Cole, B"]))
        .person(youth("y2", "Ben Cole"))
        .build()
        .unwrap();

    let y1 = roster.person_index("y1").unwrap();
    let y2 = roster.person_index("y2").unwrap();
    let choices = roster.person(y1).friend_choices();
    assert_eq!(choices.len(), 3);
    assert_eq!(choices[0].target(), Some(y2));
    assert_eq!(choices[1].target(), None);
    // Same friend twice only scores once.
    assert_eq!(choices[2].target(), None);

    let resolved: Vec<_> = roster.person(y1).resolved_friends().collect();
    assert_eq!(resolved, vec![(ChoiceRank::First, y2)]);
    assert_eq!(roster.friend_choosers().collect::<Vec<_>>(), vec![y1]);
}

#[test]
fn test_historical_leaders_resolve_and_drop_unknown() {
    let roster = base()
        .person(youth("y1", "Ann Lee"))
        .past_leaders("Ann Lee", ["Dana Moss", "Former Leader"])
        .past_leaders("Graduated Youth", ["Gus Park"])
        .build()
        .unwrap();

    let y1 = roster.person_index("y1").unwrap();
    let a1 = roster.person_index("a1").unwrap();
    assert_eq!(roster.person(y1).past_leaders().len(), 1);
    assert!(roster.person(y1).past_leaders().contains(&a1));

    let f01 = roster.crew_index("F01").unwrap();
    assert!(roster.is_historically_excluded(y1, f01));
    assert_eq!(roster.allowed_crews(y1).len(), 2);
}

#[test]
fn test_young_adult_counts_as_leader() {
    let roster = base()
        .person(youth("y1", "Ann Lee"))
        .past_leaders("y1", ["ya1"])
        .build()
        .unwrap();

    let y1 = roster.person_index("y1").unwrap();
    let f02 = roster.crew_index("F02").unwrap();
    assert!(roster.is_historically_excluded(y1, f02));
}

#[test]
fn test_eligible_crews_follow_parent() {
    let roster = base()
        .person(youth("y1", "Eli Moss").with_parent("a1"))
        .build()
        .unwrap();

    let y1 = roster.person_index("y1").unwrap();
    let f02 = roster.crew_index("F02").unwrap();
    assert_eq!(roster.eligible_crews(y1), vec![f02]);
    assert_eq!(
        roster.eligible_centers(y1),
        vec![roster.center_index("Fayette").unwrap()]
    );
    // The domain itself only reflects historical exclusions.
    assert_eq!(roster.allowed_crews(y1).len(), 3);
}

#[test]
fn test_unknown_parent_is_rejected() {
    let result = base().person(youth("y1", "Eli Moss").with_parent("zz")).build();
    assert_integrity(result, "parent 'zz'");
}

#[test]
fn test_unplaced_parent_is_rejected() {
    let result = base()
        .person(PersonRecord::adult("a9", "Al Free", Gender::Male))
        .person(youth("y1", "Eli Free").with_parent("a9"))
        .build();
    assert_integrity(result, "not placed");
}

#[test]
fn test_unknown_sibling_is_rejected() {
    let result = base().person(youth("y1", "Eli Moss").with_siblings(["ghost"])).build();
    assert_integrity(result, "sibling 'ghost'");
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let result = base().person(youth("a1", "Copy Cat")).build();
    assert_integrity(result, "duplicate person id");

    let result = base().crew(CrewRecord::new("F01", "Fayette")).build();
    assert_integrity(result, "duplicate crew id");
}

#[test]
fn test_member_role_and_double_placement() {
    let result = base()
        .person(youth("y1", "Ann Lee"))
        .crew(CrewRecord::new("K02", "Kanawha").with_leaders(["y1"]))
        .build();
    assert_integrity(result, "registered as Youth");

    let result = base()
        .crew(CrewRecord::new("K02", "Kanawha").with_leaders(["a1"]))
        .build();
    assert_integrity(result, "more than one crew");
}

#[test]
fn test_unpinned_young_adult_is_rejected() {
    let result = base()
        .person(PersonRecord::young_adult("ya2", "Jo Hart", Gender::Male, History::New))
        .build();
    assert_integrity(result, "not pinned");
}

#[test]
fn test_too_many_friend_choices() {
    let result = base()
        .person(youth("y1", "Ann Lee").with_friends(["a", "b", "c", "d"]))
        .build();
    assert_integrity(result, "at most 3");
}

#[cfg(feature = "serde")]
#[test]
fn test_person_record_deserializes_from_codes() {
    let json = r#"{
        "id": "y1", "name": "Ann Lee", "role": "Youth",
        "gender": "F", "year": "Fr", "history": "N",
        "friend_choices": ["Ben Cole"]
    }"#;
    let record: PersonRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.year, YearLevel::Freshman);
    assert_eq!(record.parent, None);
}
