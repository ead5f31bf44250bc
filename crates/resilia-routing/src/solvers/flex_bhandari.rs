//! Budget-aware solver: delegates to the flex constructor so accepted
//! paths across the whole request never share a failure.

use resilia_core::{Details, Request, Topology};

use crate::flex::paths_for_flex;

use super::RoutingAlgorithm;

pub struct FlexBhandariSolver;

impl RoutingAlgorithm for FlexBhandariSolver {
    fn solve(&self, request: &Request, topology: &Topology) -> Details {
        let outcome = paths_for_flex(
            &request.pairs,
            &request.failures.failure_set,
            request.failure_budget.total,
            request.connections.num_connections,
            topology,
        );
        Details {
            chosen_paths: outcome.chosen_paths,
            running_time_seconds: 0.0,
            is_feasible: outcome.is_feasible,
        }
    }
}
