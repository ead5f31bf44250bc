//! Per-pair disjoint-path solver. Each pair is protected independently;
//! nothing stops two pairs from sharing a risk. Cross-pair coordination is
//! the flex solver's job.

use std::collections::BTreeMap;

use resilia_core::pathmap::ChosenPaths;
use resilia_core::{Details, Failure, Request, Topology};

use crate::bhandari::compute_disjoint_paths;

use super::RoutingAlgorithm;

pub struct BhandariSolver;

impl RoutingAlgorithm for BhandariSolver {
    fn solve(&self, request: &Request, topology: &Topology) -> Details {
        let failure_set = &request.failures.failure_set;
        let nodes_may_fail = failure_set
            .iter()
            .any(|f| matches!(f, Failure::Node { .. }));
        let mut chosen = ChosenPaths::new();
        let mut is_feasible = true;
        for pair in &request.pairs {
            let wanted = request.connections.min_for_pair(pair);
            let found = compute_disjoint_paths(
                topology,
                &pair.src,
                &pair.dst,
                wanted,
                request.failure_budget.total,
                nodes_may_fail,
                failure_set,
            );
            if found.len() < wanted {
                is_feasible = false;
            }
            let paths: BTreeMap<String, _> = found
                .into_iter()
                .enumerate()
                .map(|(i, p)| (i.to_string(), p))
                .collect();
            chosen.insert(pair.clone(), paths);
        }
        Details {
            chosen_paths: chosen,
            running_time_seconds: 0.0,
            is_feasible,
        }
    }
}
