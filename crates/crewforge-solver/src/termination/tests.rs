//! Tests for termination conditions.

use super::*;
use crewforge_config::SolverConfig;

#[test]
fn test_node_count_termination() {
    let mut progress = SearchProgress::start();
    let term = NodeCountTermination::new(3);

    assert!(!term.is_terminated(&progress));
    progress.increment_node_count();
    progress.increment_node_count();
    assert!(!term.is_terminated(&progress));
    progress.increment_node_count();
    assert!(term.is_terminated(&progress));
}

#[test]
fn test_time_termination() {
    let progress = SearchProgress::start();
    assert!(TimeTermination::millis(0).is_terminated(&progress));
    assert!(!TimeTermination::seconds(3600).is_terminated(&progress));
}

#[test]
fn test_or_termination() {
    let mut progress = SearchProgress::start();
    let term = OrTermination((TimeTermination::seconds(3600), NodeCountTermination::new(1)));
    assert!(!term.is_terminated(&progress));
    progress.increment_node_count();
    assert!(term.is_terminated(&progress));
}

#[test]
fn test_absent_termination_never_fires() {
    let mut progress = SearchProgress::start();
    for _ in 0..10 {
        progress.increment_node_count();
    }
    let term: Option<NodeCountTermination> = None;
    assert!(!term.is_terminated(&progress));
    assert!(!from_config(&SolverConfig::unlimited()).is_terminated(&progress));
}

#[test]
fn test_from_config() {
    let mut progress = SearchProgress::start();
    let term = from_config(&SolverConfig::new().with_node_count_limit(2));
    progress.increment_node_count();
    assert!(!term.is_terminated(&progress));
    progress.increment_node_count();
    assert!(term.is_terminated(&progress));
}
