//! Bhandari-style disjoint-path construction.
//!
//! Each round finds a shortest path, then reverses its edges at negated
//! weight so the next round can buy shared segments back. A final merge
//! cancels antiparallel edge copies, leaving a family of mutually
//! link-disjoint paths in the original graph. When node failures must be
//! survived, the search runs on a node-split graph so cancellation also
//! enforces node-disjointness (endpoints excepted).

use std::collections::{BTreeMap, VecDeque};

use resilia_core::{Failure, Path, Topology};

use crate::bellman_ford::shortest_residual_path;
use crate::residual::ResidualGraph;

/// Construct up to `wanted_count` resource-disjoint paths between `src`
/// and `dst`, ordered ascending by weight. Extra searches are run per unit
/// of failure budget so the caller's acceptance filter has candidates to
/// reject. Fewer paths than wanted is not an error; the caller decides
/// feasibility.
pub fn compute_disjoint_paths(
    topology: &Topology,
    src: &str,
    dst: &str,
    wanted_count: usize,
    max_simultaneous_failures: usize,
    nodes_may_fail: bool,
    failure_set: &[Failure],
) -> Vec<Path> {
    if wanted_count == 0
        || src == dst
        || !topology.contains_node(src)
        || !topology.contains_node(dst)
    {
        return Vec::new();
    }

    let split = nodes_may_fail
        || failure_set
            .iter()
            .any(|f| matches!(f, Failure::Node { .. }));
    let budget = if failure_set.is_empty() {
        max_simultaneous_failures
    } else {
        max_simultaneous_failures.min(failure_set.len())
    };
    let searches = wanted_count + budget;

    let mut graph = if split {
        ResidualGraph::split_nodes(topology, src, dst)
    } else {
        ResidualGraph::from_topology(topology)
    };

    // Collapsed (origin, target) edge lists per accepted search round.
    let mut rounds: Vec<Vec<(String, String)>> = Vec::new();
    for _ in 0..searches {
        let found = shortest_residual_path(&graph, src, dst);
        if found.is_empty() {
            break;
        }
        for edge in &found {
            graph.reverse_edge(&edge.origin, &edge.target);
        }
        rounds.push(
            found
                .iter()
                .map(|e| {
                    (
                        ResidualGraph::collapse_id(&e.origin).to_string(),
                        ResidualGraph::collapse_id(&e.target).to_string(),
                    )
                })
                .collect(),
        );
    }
    if rounds.is_empty() {
        return Vec::new();
    }

    let counts = cancel_antiparallel(&rounds);
    reconstruct(topology, src, dst, counts)
}

/// Merge step: count surviving directed edges after dropping split-node
/// internal edges and cancelling antiparallel pairs.
fn cancel_antiparallel(rounds: &[Vec<(String, String)>]) -> BTreeMap<(String, String), usize> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for round in rounds {
        for (origin, target) in round {
            if origin != target {
                *counts
                    .entry((origin.clone(), target.clone()))
                    .or_default() += 1;
            }
        }
    }
    let keys: Vec<(String, String)> = counts.keys().cloned().collect();
    for (origin, target) in keys {
        if origin >= target {
            continue;
        }
        let forward = counts
            .get(&(origin.clone(), target.clone()))
            .copied()
            .unwrap_or(0);
        let backward = counts
            .get(&(target.clone(), origin.clone()))
            .copied()
            .unwrap_or(0);
        let cancelled = forward.min(backward);
        if cancelled > 0 {
            counts.insert((origin.clone(), target.clone()), forward - cancelled);
            counts.insert((target, origin), backward - cancelled);
        }
    }
    counts.retain(|_, count| *count > 0);
    counts
}

/// Walk the surviving edge set from `src`, consuming edges, to recover the
/// disjoint path family. Every walk through the union of edge-disjoint
/// s-t paths terminates at `dst` by flow conservation.
fn reconstruct(
    topology: &Topology,
    src: &str,
    dst: &str,
    counts: BTreeMap<(String, String), usize>,
) -> Vec<Path> {
    let mut adjacency: BTreeMap<String, VecDeque<String>> = BTreeMap::new();
    for ((origin, target), count) in counts {
        for _ in 0..count {
            adjacency
                .entry(origin.clone())
                .or_default()
                .push_back(target.clone());
        }
    }

    let walks = adjacency.get(src).map(|q| q.len()).unwrap_or(0);
    let hop_limit = topology.node_count().saturating_mul(2) + 2;
    let mut paths = Vec::with_capacity(walks);
    for _ in 0..walks {
        let mut links = Vec::new();
        let mut current = src.to_string();
        let mut reached = false;
        for _ in 0..hop_limit {
            let Some(next) = adjacency.get_mut(&current).and_then(|q| q.pop_front()) else {
                break;
            };
            match topology.link(&format!("{current}-{next}")) {
                Some(link) => links.push(link.clone()),
                None => {
                    tracing::warn!(
                        origin = %current,
                        target = %next,
                        "merged edge has no topology link"
                    );
                    break;
                }
            }
            current = next;
            if current == dst {
                reached = true;
                break;
            }
        }
        if reached && !links.is_empty() {
            paths.push(Path::new(links));
        }
    }
    paths.sort_by_key(|p| p.total_weight());
    paths
}
