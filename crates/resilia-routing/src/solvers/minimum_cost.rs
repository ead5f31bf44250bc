//! Baseline solver: one least-cost path per pair, no protection.

use std::collections::BTreeMap;

use resilia_core::constants::PRIMARY_PATH_ID;
use resilia_core::pathmap::ChosenPaths;
use resilia_core::{Details, Request, Topology};

use crate::bellman_ford::shortest_path;

use super::RoutingAlgorithm;

pub struct MinimumCostSolver;

impl RoutingAlgorithm for MinimumCostSolver {
    fn solve(&self, request: &Request, topology: &Topology) -> Details {
        let mut chosen = ChosenPaths::new();
        let mut routed = 0usize;
        for pair in &request.pairs {
            let mut paths = BTreeMap::new();
            let path = shortest_path(topology, &pair.src, &pair.dst);
            if !path.is_empty() {
                paths.insert(PRIMARY_PATH_ID.to_string(), path);
                routed += 1;
            }
            chosen.insert(pair.clone(), paths);
        }
        Details {
            chosen_paths: chosen,
            running_time_seconds: 0.0,
            is_feasible: routed >= request.connections.num_connections,
        }
    }
}
