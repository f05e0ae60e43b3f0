//! Tests for assignment and solver configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = AssignmentConfig::default();
    assert_eq!(config.min_crew_size, 5);
    assert_eq!(config.max_crew_size, 7);
    assert_eq!(config.weights, ObjectiveWeights::new(2.0, 1.0, 1.0, 1.0));
    assert!(!config.require_friend_center);
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_solver_budget() {
    let solver = SolverConfig::default();
    assert_eq!(
        solver.time_limit(),
        Some(Duration::from_secs(DEFAULT_SECONDS_SPENT_LIMIT))
    );
    assert_eq!(solver.node_count_limit(), None);

    // A node limit keeps the default time budget.
    let limited = SolverConfig::new().with_node_count_limit(100);
    assert_eq!(limited.node_count_limit(), Some(100));
    assert_eq!(limited.time_limit(), Some(Duration::from_secs(60)));

    assert_eq!(SolverConfig::unlimited().time_limit(), None);
    assert_eq!(SolverConfig::unlimited().node_count_limit(), None);
}

#[test]
fn test_time_setters_replace_the_budget() {
    let millis = SolverConfig::new().with_termination_millis(250);
    assert_eq!(millis.time_limit(), Some(Duration::from_millis(250)));

    let seconds = millis.with_node_count_limit(10).with_termination_seconds(2);
    assert_eq!(seconds.time_limit(), Some(Duration::from_secs(2)));
    assert_eq!(seconds.node_count_limit(), Some(10));
}

#[test]
fn test_solver_section_without_termination_keeps_budget() {
    let config = CrewForgeConfig::from_toml_str("[solver]\n").unwrap();
    assert_eq!(config.solver, SolverConfig::default());
}

#[test]
fn test_presets() {
    let friends = AssignmentConfig::with_high_friend_weight();
    assert_eq!(friends.weights, ObjectiveWeights::new(4.0, 1.0, 1.0, 1.0));

    let diverse = AssignmentConfig::with_high_diversity();
    assert_eq!(diverse.weights, ObjectiveWeights::new(1.0, 2.0, 2.0, 2.0));
    assert_eq!(diverse.max_crew_size, 7);
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [assignment]
        min_crew_size = 3
        require_friend_center = true

        [assignment.weights]
        gender = 0.5

        [solver.termination]
        seconds_spent_limit = 2
        millis_spent_limit = 500
        node_count_limit = 10000
    "#;

    let config = CrewForgeConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.assignment.min_crew_size, 3);
    assert_eq!(config.assignment.max_crew_size, 7);
    assert!(config.assignment.require_friend_center);
    assert_eq!(config.assignment.weights.gender, 0.5);
    assert_eq!(config.assignment.weights.friend, 2.0);
    assert_eq!(config.solver.time_limit(), Some(Duration::from_millis(2500)));
    assert_eq!(config.solver.node_count_limit(), Some(10000));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        assignment:
          max_crew_size: 9
          weights:
            friend: 4.0
        solver:
          termination:
            seconds_spent_limit: 30
    "#;

    let config = CrewForgeConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.assignment.max_crew_size, 9);
    assert_eq!(config.assignment.weights.friend, 4.0);
    assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(30)));
}

#[test]
fn test_empty_document_is_default() {
    let config = CrewForgeConfig::from_toml_str("").unwrap();
    assert_eq!(config, CrewForgeConfig::default());
}

#[test]
fn test_builder() {
    let config = CrewForgeConfig::new()
        .with_assignment(AssignmentConfig::new().with_crew_size(2, 4))
        .with_solver(
            SolverConfig::new()
                .with_termination_seconds(60)
                .with_node_count_limit(500),
        );

    assert_eq!(config.assignment.min_crew_size, 2);
    assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.solver.node_count_limit(), Some(500));
}

#[test]
fn test_validate_rejects_bad_values() {
    let inverted = AssignmentConfig::new().with_crew_size(6, 4);
    assert!(matches!(inverted.validate(), Err(ConfigError::Invalid(_))));

    let zero = AssignmentConfig::new().with_crew_size(0, 4);
    assert!(zero.validate().is_err());

    let negative = AssignmentConfig::new().with_weights(ObjectiveWeights::new(-1.0, 1.0, 1.0, 1.0));
    let err = negative.validate().unwrap_err();
    assert!(err.to_string().contains("friend weight"));

    let nan = AssignmentConfig::new().with_weights(ObjectiveWeights::new(1.0, f64::NAN, 1.0, 1.0));
    assert!(nan.validate().is_err());
}

#[test]
fn test_missing_file_and_error_conversion() {
    let err = CrewForgeConfig::load("/nonexistent/crewforge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));

    let converted: CrewForgeError = ConfigError::Invalid("bad".into()).into();
    assert!(matches!(converted, CrewForgeError::Config(ref m) if m.contains("bad")));
}
