//! Pairwise minimum path cost, precomputed once at topology load time.

use std::collections::HashMap;

use resilia_core::Topology;

use crate::bellman_ford::all_shortest_paths;

/// Attach the all-pairs minimum path cost table to a topology. Unreachable
/// pairs get no entry.
pub fn populate_path_costs(topology: Topology) -> Topology {
    let mut costs: HashMap<(String, String), u64> = HashMap::new();
    for source in topology.nodes() {
        for (dest, path) in all_shortest_paths(&topology, &source.id) {
            if dest == source.id {
                costs.insert((source.id.clone(), dest), 0);
            } else if !path.is_empty() {
                costs.insert((source.id.clone(), dest), path.total_weight());
            }
        }
    }
    topology.with_min_path_costs(costs)
}
