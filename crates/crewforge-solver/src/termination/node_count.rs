//! Node-count termination.

use super::{SearchProgress, Termination};

/// Terminates once the search has visited a number of nodes.
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, progress: &SearchProgress) -> bool {
        progress.node_count() >= self.limit
    }
}
