//! Failures and failure scenarios.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path::Path;
use crate::request::SourceDestPair;
use crate::topology::Link;

/// A single potential failure: exactly one of a node or a link, with an
/// occurrence probability. The either/or invariant is carried by the enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Failure {
    Node {
        id: String,
        probability: f64,
    },
    Link {
        id: String,
        inverse_id: String,
        probability: f64,
    },
}

impl Failure {
    pub fn node(id: impl Into<String>, probability: f64) -> Self {
        Failure::Node {
            id: id.into(),
            probability,
        }
    }

    pub fn link(link: &Link, probability: f64) -> Self {
        Failure::Link {
            id: link.id(),
            inverse_id: link.inverse_id(),
            probability,
        }
    }

    pub fn probability(&self) -> f64 {
        match self {
            Failure::Node { probability, .. } | Failure::Link { probability, .. } => *probability,
        }
    }

    /// Stable key for claim bookkeeping and deduplication.
    pub fn key(&self) -> String {
        match self {
            Failure::Node { id, .. } => format!("node:{id}"),
            Failure::Link { id, .. } => format!("link:{id}"),
        }
    }

    /// Whether this failure would sever the given path. Link matching is
    /// direction-agnostic: a failed link kills a path no matter which
    /// direction the path traversed it.
    pub fn touches(&self, path: &Path) -> bool {
        match self {
            Failure::Node { id, .. } => path.contains_node(id),
            Failure::Link { id, inverse_id, .. } => {
                path.contains_link(id) || path.contains_link(inverse_id)
            }
        }
    }
}

/// One simultaneous-failure scenario. May be empty: the zero-failure
/// baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureGroup(pub Vec<Failure>);

impl FailureGroup {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.0.iter()
    }
}

/// The complete failure model attached to a request. Which pool applies
/// depends on the problem class: Flex/FlowSharedF/EndpointSharedF read the
/// global pool, Flow reads the per-pair pools, Endpoint the per-member
/// pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureSpec {
    pub failure_set: Vec<Failure>,
    pub failure_groups: Vec<FailureGroup>,
    pub pair_failure_sets: BTreeMap<SourceDestPair, Vec<Failure>>,
    pub pair_failure_groups: BTreeMap<SourceDestPair, Vec<FailureGroup>>,
    pub src_failure_groups: BTreeMap<String, Vec<FailureGroup>>,
    pub dst_failure_groups: BTreeMap<String, Vec<FailureGroup>>,
}

impl FailureSpec {
    /// Global failure spec shared across the whole request.
    pub fn shared(failure_set: Vec<Failure>, failure_groups: Vec<FailureGroup>) -> Self {
        Self {
            failure_set,
            failure_groups,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_ab_bc() -> Path {
        Path::new(vec![Link::new("a", "b", 1), Link::new("b", "c", 1)])
    }

    #[test]
    fn node_failure_touches_path() {
        let path = path_ab_bc();
        assert!(Failure::node("b", 0.1).touches(&path));
        assert!(!Failure::node("z", 0.1).touches(&path));
    }

    #[test]
    fn link_failure_is_direction_agnostic() {
        let path = path_ab_bc();
        // The path traverses a->b; a failure registered on b->a still kills it.
        let reverse = Link::new("b", "a", 1);
        assert!(Failure::link(&reverse, 0.1).touches(&path));
        let forward = Link::new("a", "b", 1);
        assert!(Failure::link(&forward, 0.1).touches(&path));
    }

    #[test]
    fn keys_distinguish_nodes_from_links() {
        let node = Failure::node("a-b", 0.1);
        let link = Failure::link(&Link::new("a", "b", 1), 0.1);
        assert_ne!(node.key(), link.key());
    }
}
