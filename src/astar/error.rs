// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed node expansions in [find_route](crate::find_route)
/// before [SearchError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur during [find_route](crate::find_route).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A node doesn't exist in the graph, or has no known position.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Two nodes, expected to be adjacent, are not connected by an edge.
    /// This can only happen with an inconsistent graph.
    #[error("no edge between {0} and {1}")]
    NoSuchEdge(String, String),

    /// There is no route between the two nodes.
    #[error("no route from {start} to {goal}")]
    PathNotFound { start: String, goal: String },

    /// Route search has exceeded its limit of steps.
    /// Either the nodes are really far apart, or no route exists.
    ///
    /// Concluding that no route exists requires traversing the whole graph,
    /// which can result in a denial-of-service. The step limit protects
    /// against resource exhaustion.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}

impl SearchError {
    pub(crate) fn path_not_found(start: &str, goal: &str) -> Self {
        Self::PathNotFound {
            start: start.to_owned(),
            goal: goal.to_owned(),
        }
    }
}
