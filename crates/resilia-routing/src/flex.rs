//! Failure-budget-aware disjoint path assignment across a whole demand.
//!
//! Disjointness within one pair is not enough: two accepted paths from
//! different pairs must never share a failure, or a single event could
//! take both down and blow the simultaneous-failure budget. Pairs are
//! served cheapest-first so the least expensive demands get first claim on
//! scarce disjoint capacity.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use resilia_core::constants::DISTANCE_INFINITY;
use resilia_core::pathmap::ChosenPaths;
use resilia_core::{Failure, SourceDestPair, Topology};

use crate::bellman_ford::shortest_path;
use crate::bhandari::compute_disjoint_paths;

/// Result of the budget-aware construction. Infeasibility is data, not an
/// error.
#[derive(Debug)]
pub struct FlexOutcome {
    pub chosen_paths: ChosenPaths,
    pub is_feasible: bool,
}

/// Build a path assignment for every pair such that no single failure in
/// `failure_set` threatens two accepted paths. Construction stops early
/// once enough paths are guaranteed to survive the budget:
/// `accepted - min(at_risk, total_fails_allowed) >= num_connections`.
pub fn paths_for_flex(
    pairs: &BTreeSet<SourceDestPair>,
    failure_set: &[Failure],
    total_fails_allowed: usize,
    num_connections: usize,
    topology: &Topology,
) -> FlexOutcome {
    let mut chosen: ChosenPaths = pairs
        .iter()
        .map(|p| (p.clone(), BTreeMap::new()))
        .collect();
    let nodes_may_fail = failure_set
        .iter()
        .any(|f| matches!(f, Failure::Node { .. }));

    let goal_met = |accepted: usize, at_risk: usize| {
        accepted.saturating_sub(at_risk.min(total_fails_allowed)) >= num_connections
    };

    let mut claimed: HashSet<String> = HashSet::new();
    let mut total_accepted = 0usize;
    let mut total_at_risk = 0usize;

    'demand: for pair in sort_pairs_by_path_cost(pairs, topology) {
        let candidates = compute_disjoint_paths(
            topology,
            &pair.src,
            &pair.dst,
            num_connections,
            total_fails_allowed,
            nodes_may_fail,
            failure_set,
        );
        let mut next_id = 0usize;
        for candidate in candidates {
            let touching: Vec<&Failure> = failure_set
                .iter()
                .filter(|f| f.touches(&candidate))
                .collect();
            // A failure already claimed by an accepted path rejects the
            // candidate: one event must never threaten two accepted paths.
            let conflicted = touching.iter().any(|f| claimed.contains(&f.key()));
            if !conflicted {
                for failure in &touching {
                    if claimed.insert(failure.key()) {
                        total_at_risk += 1;
                    }
                }
                if let Some(paths) = chosen.get_mut(&pair) {
                    paths.insert(next_id.to_string(), candidate);
                    next_id += 1;
                    total_accepted += 1;
                }
            }
            if goal_met(total_accepted, total_at_risk) {
                break 'demand;
            }
        }
    }

    let is_feasible = goal_met(total_accepted, total_at_risk);
    tracing::debug!(
        accepted = total_accepted,
        at_risk = total_at_risk,
        is_feasible,
        "flex construction finished"
    );
    FlexOutcome {
        chosen_paths: chosen,
        is_feasible,
    }
}

/// Pairs ordered ascending by their own least path cost; the precomputed
/// table is used when present, otherwise the cost is measured directly.
/// Unroutable pairs sort last.
fn sort_pairs_by_path_cost(
    pairs: &BTreeSet<SourceDestPair>,
    topology: &Topology,
) -> Vec<SourceDestPair> {
    let mut with_cost: Vec<(u64, SourceDestPair)> = pairs
        .iter()
        .map(|pair| {
            let cost = topology
                .min_cost_between(&pair.src, &pair.dst)
                .unwrap_or_else(|| {
                    let path = shortest_path(topology, &pair.src, &pair.dst);
                    if path.is_empty() {
                        DISTANCE_INFINITY as u64
                    } else {
                        path.total_weight()
                    }
                });
            (cost, pair.clone())
        })
        .collect();
    with_cost.sort();
    with_cost.into_iter().map(|(_, pair)| pair).collect()
}
