//! Search statistics collection and reporting.

use std::fmt;
use std::time::Duration;

/// Record of an objective improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveImprovement {
    /// Time since solving started when the solution was found.
    pub time_offset: Duration,
    /// Node count when the solution was found.
    pub node_count: u64,
    /// Objective of the new incumbent.
    pub objective: f64,
}

/// Complete statistics for an engine run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Search nodes visited.
    pub node_count: u64,
    /// Times the search undid a decision.
    pub backtrack_count: u64,
    /// Nodes cut off by the objective bound.
    pub prune_count: u64,
    /// Domain tightenings made by propagation.
    pub propagation_count: u64,
    /// Complete solutions reached.
    pub solution_count: u64,
    /// Incumbent history, in order.
    pub objective_history: Vec<ObjectiveImprovement>,
}

impl SolverStatistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the best objective found, if any.
    pub fn best_objective(&self) -> Option<f64> {
        self.objective_history.last().map(|i| i.objective)
    }

    /// Returns the number of incumbent improvements.
    pub fn improvement_count(&self) -> usize {
        self.objective_history.len()
    }

    /// Returns the node rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.total_duration.as_secs_f64();
        if secs > 0.0 {
            self.node_count as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} backtracks, {} prunings, {} solutions in {:.3}s",
            self.node_count,
            self.backtrack_count,
            self.prune_count,
            self.solution_count,
            self.total_duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_objective_is_last_improvement() {
        let mut stats = SolverStatistics::new();
        assert_eq!(stats.best_objective(), None);
        stats.objective_history.push(ObjectiveImprovement {
            time_offset: Duration::from_millis(1),
            node_count: 3,
            objective: 1.0,
        });
        stats.objective_history.push(ObjectiveImprovement {
            time_offset: Duration::from_millis(2),
            node_count: 9,
            objective: 4.5,
        });
        assert_eq!(stats.best_objective(), Some(4.5));
        assert_eq!(stats.improvement_count(), 2);
        assert_eq!(stats.nodes_per_second(), 0.0);
    }

    #[test]
    fn test_display() {
        let stats = SolverStatistics {
            node_count: 10,
            solution_count: 2,
            ..SolverStatistics::default()
        };
        assert_eq!(
            stats.to_string(),
            "10 nodes, 0 backtracks, 0 prunings, 2 solutions in 0.000s"
        );
    }
}
