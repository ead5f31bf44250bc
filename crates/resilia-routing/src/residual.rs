//! Mutable working copies of a topology for residual-graph search.
//!
//! Disjoint-path construction repeatedly transforms the graph it searches:
//! used edges are reversed with negated weight so a later search can buy
//! shared segments back, and nodes are split into in/out halves when node
//! failures must be survived. The read-only [`Topology`] never changes;
//! all of that happens on a [`ResidualGraph`].

use std::collections::BTreeSet;

use resilia_core::Topology;

const IN_SUFFIX: &str = "__in";
const OUT_SUFFIX: &str = "__out";

/// Topology weights are unsigned; clamp into the signed domain. A weight
/// past `i64::MAX` already exceeds the distance sentinel, so the edge is
/// never chosen.
fn clamp_weight(weight: u64) -> i64 {
    i64::try_from(weight).unwrap_or(i64::MAX)
}

/// A directed edge in a residual graph. Weights are signed: reversal
/// negates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualEdge {
    pub origin: String,
    pub target: String,
    pub weight: i64,
}

/// An edge-list graph over string node ids, supporting the two transforms
/// disjoint-path construction needs.
#[derive(Debug, Clone)]
pub struct ResidualGraph {
    node_ids: BTreeSet<String>,
    edges: Vec<ResidualEdge>,
}

impl ResidualGraph {
    /// Working copy of a topology, untransformed.
    pub fn from_topology(topology: &Topology) -> Self {
        let node_ids = topology
            .nodes()
            .iter()
            .map(|n| n.id.clone())
            .collect();
        let edges = topology
            .links()
            .iter()
            .map(|l| ResidualEdge {
                origin: l.origin.clone(),
                target: l.target.clone(),
                weight: clamp_weight(l.weight),
            })
            .collect();
        Self { node_ids, edges }
    }

    /// Node-splitting transform: every node except the two endpoints
    /// becomes an in-node/out-node pair joined by a zero-cost edge, so that
    /// edge cancellation also enforces node-disjointness.
    pub fn split_nodes(topology: &Topology, src: &str, dst: &str) -> Self {
        let keep_whole = |id: &str| id == src || id == dst;

        let mut node_ids = BTreeSet::new();
        let mut edges = Vec::new();
        for node in topology.nodes() {
            if keep_whole(&node.id) {
                node_ids.insert(node.id.clone());
            } else {
                node_ids.insert(format!("{}{IN_SUFFIX}", node.id));
                node_ids.insert(format!("{}{OUT_SUFFIX}", node.id));
                edges.push(ResidualEdge {
                    origin: format!("{}{IN_SUFFIX}", node.id),
                    target: format!("{}{OUT_SUFFIX}", node.id),
                    weight: 0,
                });
            }
        }
        for link in topology.links() {
            let origin = if keep_whole(&link.origin) {
                link.origin.clone()
            } else {
                format!("{}{OUT_SUFFIX}", link.origin)
            };
            let target = if keep_whole(&link.target) {
                link.target.clone()
            } else {
                format!("{}{IN_SUFFIX}", link.target)
            };
            edges.push(ResidualEdge {
                origin,
                target,
                weight: clamp_weight(link.weight),
            });
        }
        Self { node_ids, edges }
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_ids.iter().map(String::as_str)
    }

    pub fn edges(&self) -> &[ResidualEdge] {
        &self.edges
    }

    /// Edges in deterministic relaxation order: sorted by origin identity
    /// (case-insensitive), then target.
    pub fn edges_in_relaxation_order(&self) -> Vec<&ResidualEdge> {
        let mut sorted: Vec<&ResidualEdge> = self.edges.iter().collect();
        sorted.sort_by(|a, b| {
            let by_origin = a
                .origin
                .to_lowercase()
                .cmp(&b.origin.to_lowercase());
            by_origin.then_with(|| a.target.to_lowercase().cmp(&b.target.to_lowercase()))
        });
        sorted
    }

    /// Replace one `origin->target` edge with `target->origin` at negated
    /// weight. No-op if the edge is absent.
    pub fn reverse_edge(&mut self, origin: &str, target: &str) {
        if let Some(pos) = self
            .edges
            .iter()
            .position(|e| e.origin == origin && e.target == target)
        {
            let edge = self.edges.swap_remove(pos);
            self.edges.push(ResidualEdge {
                origin: edge.target,
                target: edge.origin,
                weight: -edge.weight,
            });
        }
    }

    /// Undo a split-node id back to the topology node id.
    pub fn collapse_id(id: &str) -> &str {
        id.strip_suffix(IN_SUFFIX)
            .or_else(|| id.strip_suffix(OUT_SUFFIX))
            .unwrap_or(id)
    }
}
