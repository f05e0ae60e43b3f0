//! Termination conditions for the search.

mod composite;
mod node_count;
mod time;

use std::fmt::Debug;
use std::time::{Duration, Instant};

use crewforge_config::SolverConfig;

pub use composite::OrTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Progress of a running search, as seen by terminations.
#[derive(Debug, Clone)]
pub struct SearchProgress {
    start: Instant,
    node_count: u64,
}

impl SearchProgress {
    /// Starts the clock.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            node_count: 0,
        }
    }

    /// Returns the elapsed time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the number of nodes visited.
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// Records a visited node and returns the new count.
    pub fn increment_node_count(&mut self) -> u64 {
        self.node_count += 1;
        self.node_count
    }
}

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, progress: &SearchProgress) -> bool;
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, progress: &SearchProgress) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(progress))
    }
}

/// Termination built from configuration.
pub type ConfiguredTermination =
    OrTermination<(Option<TimeTermination>, Option<NodeCountTermination>)>;

/// Builds the termination described by the solver configuration. Without
/// limits the result never fires.
pub fn from_config(config: &SolverConfig) -> ConfiguredTermination {
    OrTermination((
        config.time_limit().map(TimeTermination::new),
        config.node_count_limit().map(NodeCountTermination::new),
    ))
}

#[cfg(test)]
mod tests;
