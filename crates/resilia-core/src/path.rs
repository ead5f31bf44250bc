//! Paths: ordered link chains with cached membership sets.

use std::collections::BTreeSet;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::topology::Link;

/// An ordered sequence of links from a source to a destination.
///
/// Node-id and link-id sets are derived once at construction for O(1)
/// membership tests during failure matching. An empty path means
/// "no route", not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    links: Vec<Link>,
    node_ids: BTreeSet<String>,
    link_ids: BTreeSet<String>,
    total_weight: u64,
}

impl Path {
    pub fn new(links: Vec<Link>) -> Self {
        let mut node_ids = BTreeSet::new();
        let mut link_ids = BTreeSet::new();
        let mut total_weight = 0u64;
        for link in &links {
            node_ids.insert(link.origin.clone());
            node_ids.insert(link.target.clone());
            link_ids.insert(link.id());
            total_weight += link.weight;
        }
        Self {
            links,
            node_ids,
            link_ids,
            total_weight,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_ids(&self) -> &BTreeSet<String> {
        &self.node_ids
    }

    pub fn link_ids(&self) -> &BTreeSet<String> {
        &self.link_ids
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of links (hops) in the path.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn source(&self) -> Option<&str> {
        self.links.first().map(|l| l.origin.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        self.links.last().map(|l| l.target.as_str())
    }

    /// Node ids in traversal order: source first, destination last.
    pub fn nodes_in_order(&self) -> Vec<&str> {
        let mut nodes = Vec::with_capacity(self.links.len() + 1);
        if let Some(first) = self.links.first() {
            nodes.push(first.origin.as_str());
        }
        for link in &self.links {
            nodes.push(link.target.as_str());
        }
        nodes
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node_ids.contains(node_id)
    }

    pub fn contains_link(&self, link_id: &str) -> bool {
        self.link_ids.contains(link_id)
    }
}

// Serialized form is just the link chain; derived sets are rebuilt on read.
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.links.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let links = Vec::<Link>::deserialize(deserializer)?;
        Ok(Path::new(links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[(&str, &str, u64)]) -> Path {
        Path::new(
            ids.iter()
                .map(|(a, b, w)| Link::new(*a, *b, *w))
                .collect(),
        )
    }

    #[test]
    fn caches_membership_and_weight() {
        let path = chain(&[("a", "b", 2), ("b", "c", 3)]);
        assert_eq!(path.total_weight(), 5);
        assert!(path.contains_node("b"));
        assert!(path.contains_link("b-c"));
        assert!(!path.contains_link("c-b"));
        assert_eq!(path.nodes_in_order(), vec!["a", "b", "c"]);
        assert_eq!(path.source(), Some("a"));
        assert_eq!(path.destination(), Some("c"));
    }

    #[test]
    fn empty_path_means_no_route() {
        let path = Path::empty();
        assert!(path.is_empty());
        assert_eq!(path.source(), None);
        assert_eq!(path.total_weight(), 0);
    }

    #[test]
    fn serde_round_trip_rebuilds_sets() {
        let path = chain(&[("a", "b", 1)]);
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(back.contains_link("a-b"));
    }
}
