//! # resilia-core
//!
//! Foundation crate for the resilia survivability evaluation system.
//! Defines topology elements, paths, failures, requests, errors, and
//! constants. Every other crate in the workspace depends on this.

pub mod constants;
pub mod errors;
pub mod failure;
pub mod logging;
pub mod path;
pub mod pathmap;
pub mod request;
pub mod topology;

// Re-export the most commonly used types at the crate root.
pub use errors::{GenerationError, TopologyError};
pub use failure::{Failure, FailureGroup, FailureSpec};
pub use path::Path;
pub use request::{
    Algorithm, Connections, Details, FailureBudget, FailureClass, MemberType, ProblemClass,
    Request, RequestSet, SourceDestPair,
};
pub use topology::{Link, Location, Node, Topology, TopologyBuilder};
