//! Topology elements: nodes, links, and the read-only topology arena.
//!
//! Nodes and links are held in owning vectors; the petgraph adjacency and
//! all lookup maps reference them by index or stable string id, never by
//! aliasable reference. A `Topology` is built once, validated, and shared
//! read-only across all concurrent computations.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::errors::TopologyError;

/// Geographic coordinate attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A network node with a stable string identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub location: Option<Location>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: None,
        }
    }

    pub fn with_location(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            location: Some(Location {
                latitude,
                longitude,
            }),
        }
    }
}

/// A directed edge with a non-negative integer weight.
///
/// Link identity is `"origin-target"`; the inverse identity
/// (`"target-origin"`) is always derivable so that failure matching can be
/// direction-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    pub origin: String,
    pub target: String,
    pub weight: u64,
}

impl Link {
    pub fn new(origin: impl Into<String>, target: impl Into<String>, weight: u64) -> Self {
        Self {
            origin: origin.into(),
            target: target.into(),
            weight,
        }
    }

    /// Stable identity: `"origin-target"`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.origin, self.target)
    }

    /// Identity of the opposite direction: `"target-origin"`.
    pub fn inverse_id(&self) -> String {
        format!("{}-{}", self.target, self.origin)
    }
}

/// Immutable network topology: owning node/link collections plus a
/// petgraph adjacency for structural queries.
#[derive(Debug, Clone)]
pub struct Topology {
    id: String,
    nodes: Vec<Node>,
    links: Vec<Link>,
    graph: StableDiGraph<usize, usize>,
    node_indices: HashMap<String, NodeIndex>,
    link_positions: HashMap<String, usize>,
    min_path_cost: HashMap<(String, String), u64>,
}

impl Topology {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_indices
            .get(id)
            .and_then(|idx| self.graph.node_weight(*idx))
            .map(|pos| &self.nodes[*pos])
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.link_positions.get(id).map(|pos| &self.links[*pos])
    }

    /// Outgoing degree of a node; 0 for unknown ids.
    pub fn degree(&self, id: &str) -> usize {
        self.node_indices
            .get(id)
            .map(|idx| self.graph.neighbors_directed(*idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }

    /// Ids of nodes reachable over one outgoing link.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let Some(idx) = self.node_indices.get(id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(*idx, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n))
            .map(|pos| self.nodes[*pos].id.as_str())
            .collect()
    }

    /// Precomputed minimum path cost between two nodes, if populated.
    pub fn min_cost_between(&self, src: &str, dst: &str) -> Option<u64> {
        self.min_path_cost
            .get(&(src.to_string(), dst.to_string()))
            .copied()
    }

    /// Attach the pairwise minimum path cost table. Called once at load
    /// time by whoever owns a shortest-path engine.
    pub fn with_min_path_costs(mut self, costs: HashMap<(String, String), u64>) -> Self {
        self.min_path_cost = costs;
        self
    }
}

/// Validating builder for [`Topology`]. Endpoint existence is checked, not
/// assumed: a link naming an unknown node is a fatal load-time error.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    id: String,
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl TopologyBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn link(mut self, origin: &str, target: &str, weight: u64) -> Self {
        self.links.push(Link::new(origin, target, weight));
        self
    }

    /// Bidirectional convenience: adds `origin->target` and
    /// `target->origin` with the same weight.
    pub fn bidirectional_link(self, a: &str, b: &str, weight: u64) -> Self {
        self.link(a, b, weight).link(b, a, weight)
    }

    pub fn build(self) -> Result<Topology, TopologyError> {
        let mut graph = StableDiGraph::new();
        let mut node_indices = HashMap::with_capacity(self.nodes.len());
        let mut link_positions = HashMap::with_capacity(self.links.len());

        for (pos, node) in self.nodes.iter().enumerate() {
            if node_indices.contains_key(&node.id) {
                return Err(TopologyError::DuplicateNode(node.id.clone()));
            }
            let idx = graph.add_node(pos);
            node_indices.insert(node.id.clone(), idx);
        }

        for (pos, link) in self.links.iter().enumerate() {
            let origin = *node_indices.get(&link.origin).ok_or_else(|| {
                TopologyError::UnknownEndpoint {
                    link_id: link.id(),
                    node_id: link.origin.clone(),
                }
            })?;
            let target = *node_indices.get(&link.target).ok_or_else(|| {
                TopologyError::UnknownEndpoint {
                    link_id: link.id(),
                    node_id: link.target.clone(),
                }
            })?;
            if link_positions.insert(link.id(), pos).is_some() {
                return Err(TopologyError::DuplicateLink(link.id()));
            }
            graph.add_edge(origin, target, pos);
        }

        tracing::debug!(
            topology = %self.id,
            nodes = self.nodes.len(),
            links = self.links.len(),
            "topology built"
        );

        Ok(Topology {
            id: self.id,
            nodes: self.nodes,
            links: self.links,
            graph,
            node_indices,
            link_positions,
            min_path_cost: HashMap::new(),
        })
    }
}
