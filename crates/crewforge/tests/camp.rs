//! Properties of assignments produced for the camp roster.

use crewforge::{
    extract, validate, AssignmentResult, CrewAssigner, CrewForgeConfig, ScoreCalculator,
    SolverConfig, SolverEngine, OBJECTIVE_TOLERANCE,
};
use crewforge_test::{camp_config, camp_roster};

fn camp_assigner() -> CrewAssigner {
    let solver = SolverConfig::new()
        .with_node_count_limit(500_000)
        .with_termination_seconds(30);
    CrewAssigner::new(
        CrewForgeConfig::new()
            .with_assignment(camp_config())
            .with_solver(solver),
    )
}

fn solve_camp() -> AssignmentResult {
    let result = camp_assigner().solve(&camp_roster()).unwrap();
    assert!(result.status.has_assignment());
    result
}

fn crew_of<'a>(result: &'a AssignmentResult, person: &str) -> &'a str {
    result.assignment.get(person).unwrap().crew.as_str()
}

#[test]
fn test_every_youth_placed_once() {
    let roster = camp_roster();
    let result = solve_camp();
    assert_eq!(result.assignment.len(), roster.decidable_count());
    for p in roster.decidable() {
        assert!(result.assignment.get(roster.person(p).id().as_str()).is_some());
    }
    assert!(result.assignment.get("a1").is_none());
    assert!(result.assignment.get("ya1").is_none());
}

#[test]
fn test_crew_sizes_hold() {
    let result = solve_camp();
    for crew in &result.report.crews {
        assert!(
            (2..=4).contains(&crew.occupancy()),
            "crew {} has {} members",
            crew.crew,
            crew.occupancy()
        );
    }
}

#[test]
fn test_family_rules_hold() {
    let result = solve_camp();
    // Eli can only go to F02 and his brother must stay in Fayette apart
    // from him.
    assert_eq!(crew_of(&result, "y1"), "F02");
    assert_eq!(crew_of(&result, "y2"), "F01");
}

#[test]
fn test_friends_and_history_hold() {
    let result = solve_camp();
    assert_ne!(crew_of(&result, "y3"), "F02");
    assert_ne!(crew_of(&result, "y3"), crew_of(&result, "y4"));
    assert_ne!(crew_of(&result, "y4"), crew_of(&result, "y5"));
    assert_ne!(crew_of(&result, "y7"), crew_of(&result, "y8"));
    assert_ne!(crew_of(&result, "y6"), "K01");
}

#[test]
fn test_result_revalidates_and_matches_objective() {
    let roster = camp_roster();
    let result = solve_camp();
    assert!(validate(&roster, &camp_config(), &result.assignment).is_ok());

    let report = ScoreCalculator::new(&roster, &camp_config())
        .calculate(&result.assignment)
        .unwrap();
    assert_eq!(report, result.report);
    assert!((report.total() - result.objective).abs() <= OBJECTIVE_TOLERANCE);
    assert_eq!(result.statistics.best_objective(), Some(result.objective));
}

#[test]
fn test_extraction_is_idempotent() {
    let roster = camp_roster();
    let assigner = camp_assigner();
    let built = assigner.build(&roster).unwrap();
    let outcome = assigner.engine().solve(built.model(), &assigner.config().solver);
    let valuation = outcome.valuation.unwrap();

    let first = extract(&roster, built.layout(), &valuation).unwrap();
    let second = extract(&roster, built.layout(), &valuation).unwrap();
    assert_eq!(first, second);

    let calculator = ScoreCalculator::new(&roster, &camp_config());
    assert_eq!(
        calculator.calculate(&first).unwrap(),
        calculator.calculate(&second).unwrap()
    );
}
