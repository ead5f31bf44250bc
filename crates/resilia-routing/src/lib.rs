//! # resilia-routing
//!
//! Routing engines: the Bellman-Ford shortest-path substrate (negative
//! edges allowed), the Bhandari disjoint-path constructor built on top of
//! it, the failure-budget-aware flex constructor, and the solver
//! trait/dispatcher that the rest of the system consumes.

pub mod bellman_ford;
pub mod bhandari;
pub mod costs;
pub mod flex;
pub mod residual;
pub mod solvers;

pub use bellman_ford::{all_shortest_paths, shortest_path};
pub use bhandari::compute_disjoint_paths;
pub use costs::populate_path_costs;
pub use flex::{paths_for_flex, FlexOutcome};
pub use residual::{ResidualEdge, ResidualGraph};
pub use solvers::{Dispatcher, RoutingAlgorithm};
