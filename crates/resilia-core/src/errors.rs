//! Error types for the resilia workspace.
//!
//! Only structural problems surface as errors. Algorithmic dead ends
//! (no route, infeasible request, empty failure pool) are ordinary data:
//! empty paths, `is_feasible = false`, baseline metrics.

/// Topology construction errors. Malformed structure is the one fatal
/// condition in the system, detected at load time.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("link {link_id} references unknown endpoint {node_id}")]
    UnknownEndpoint { link_id: String, node_id: String },

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("duplicate link id: {0}")]
    DuplicateLink(String),
}

/// Demand/failure generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("topology has {available} usable nodes, need {needed}")]
    NotEnoughNodes { available: usize, needed: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
