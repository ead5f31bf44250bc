//! Bellman-Ford shortest paths.
//!
//! Chosen over Dijkstra because the residual graphs produced during
//! disjoint-path construction contain negative edges (never negative
//! cycles). Relaxation is deterministic: edges are visited in sorted
//! order, distances start at the [`DISTANCE_INFINITY`] sentinel, and the
//! pass loop exits early once nothing changes.

use std::collections::{BTreeMap, HashMap};

use resilia_core::constants::DISTANCE_INFINITY;
use resilia_core::{Path, Topology};

use crate::residual::{ResidualEdge, ResidualGraph};

/// Least-cost path between two topology nodes. Empty path = no route.
pub fn shortest_path(topology: &Topology, source: &str, dest: &str) -> Path {
    let graph = ResidualGraph::from_topology(topology);
    to_path(topology, &shortest_residual_path(&graph, source, dest))
}

/// Least-cost paths from one source to every topology node.
pub fn all_shortest_paths(topology: &Topology, source: &str) -> BTreeMap<String, Path> {
    let graph = ResidualGraph::from_topology(topology);
    let edge_map = relax(&graph, source);
    if edge_map.is_empty() {
        return BTreeMap::new();
    }
    topology
        .nodes()
        .iter()
        .map(|node| {
            let links = build_path(&node.id, source, &edge_map);
            (node.id.clone(), to_path(topology, &links))
        })
        .collect()
}

/// Least-cost edge chain on a residual graph. The workhorse used by the
/// disjoint-path constructor between transforms.
pub fn shortest_residual_path(
    graph: &ResidualGraph,
    source: &str,
    dest: &str,
) -> Vec<ResidualEdge> {
    let edge_map = relax(graph, source);
    if edge_map.is_empty() {
        return Vec::new();
    }
    build_path(dest, source, &edge_map)
}

/// Run relaxation and return the predecessor-edge map. An empty map means
/// either an unreachable source or a structurally inconsistent graph; both
/// surface as "no path" to callers.
fn relax(graph: &ResidualGraph, source: &str) -> HashMap<String, ResidualEdge> {
    let mut distance: HashMap<&str, i64> = graph
        .node_ids()
        .map(|id| (id, DISTANCE_INFINITY))
        .collect();
    if !distance.contains_key(source) {
        tracing::warn!(source, "source not present in graph");
        return HashMap::new();
    }
    distance.insert(source, 0);

    let mut edge_map: HashMap<String, ResidualEdge> = HashMap::new();
    let edges = graph.edges_in_relaxation_order();

    for _ in 1..graph.node_count() {
        let mut changed = false;
        for edge in &edges {
            let (Some(&from), Some(&to)) = (
                distance.get(edge.origin.as_str()),
                distance.get(edge.target.as_str()),
            ) else {
                // An edge endpoint outside the node set is a structural
                // inconsistency: abort the whole computation.
                tracing::warn!(
                    origin = %edge.origin,
                    target = %edge.target,
                    "edge endpoint missing from node set"
                );
                return HashMap::new();
            };
            let candidate = from.saturating_add(edge.weight);
            if candidate < to {
                distance.insert(edge.target.as_str(), candidate);
                edge_map.insert(edge.target.clone(), (*edge).clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    edge_map
}

/// Walk predecessor edges from `dest` back to `source`. A broken chain
/// yields an empty path, not an error.
fn build_path(
    dest: &str,
    source: &str,
    edge_map: &HashMap<String, ResidualEdge>,
) -> Vec<ResidualEdge> {
    let mut links = Vec::new();
    let mut current = dest;
    while current != source {
        let Some(edge) = edge_map.get(current) else {
            return Vec::new();
        };
        links.push(edge.clone());
        current = &edge.origin;
    }
    links.reverse();
    links
}

/// Translate residual edges back into topology links. Edges that no longer
/// correspond to a topology link (possible only on transformed graphs) are
/// dropped; on an untransformed graph every edge resolves.
fn to_path(topology: &Topology, edges: &[ResidualEdge]) -> Path {
    let links = edges
        .iter()
        .filter_map(|e| topology.link(&format!("{}-{}", e.origin, e.target)))
        .cloned()
        .collect();
    Path::new(links)
}
