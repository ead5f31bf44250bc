//! Requests: demands to be routed and evaluated.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::failure::FailureSpec;
use crate::path::Path;

/// How failure scope is partitioned across a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemClass {
    Flex,
    Flow,
    Endpoint,
    FlowSharedF,
    EndpointSharedF,
}

impl ProblemClass {
    /// Flex, FlowSharedF and EndpointSharedF share one global failure-group
    /// pool across the whole request.
    pub fn uses_shared_pool(&self) -> bool {
        matches!(
            self,
            ProblemClass::Flex | ProblemClass::FlowSharedF | ProblemClass::EndpointSharedF
        )
    }
}

/// Which topology elements may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    Node,
    Link,
    Both,
}

/// Routing algorithm identity, used by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    MinimumCostPath,
    Bhandari,
    FlexBhandari,
}

/// Endpoint role for per-member metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    Source,
    Destination,
}

/// A source/destination demand pair. Equality is by endpoint identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceDestPair {
    pub src: String,
    pub dst: String,
}

impl SourceDestPair {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

impl fmt::Display for SourceDestPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.src, self.dst)
    }
}

// Pairs key serialized maps, so their serde form is the display string.
impl Serialize for SourceDestPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SourceDestPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (src, dst) = s
            .split_once("->")
            .ok_or_else(|| D::Error::custom(format!("malformed pair key: {s}")))?;
        Ok(SourceDestPair::new(src, dst))
    }
}

/// Connectivity requirements at request, pair, and member granularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connections {
    pub num_connections: usize,
    pub pair_min: BTreeMap<SourceDestPair, usize>,
    pub pair_max: BTreeMap<SourceDestPair, usize>,
    pub src_min: BTreeMap<String, usize>,
    pub src_max: BTreeMap<String, usize>,
    pub dst_min: BTreeMap<String, usize>,
    pub dst_max: BTreeMap<String, usize>,
}

impl Connections {
    /// A single request-wide requirement with no per-pair or per-member
    /// constraints.
    pub fn uniform(num_connections: usize) -> Self {
        Self {
            num_connections,
            ..Self::default()
        }
    }

    /// The minimum connection count for one pair; falls back to the
    /// request-wide requirement when no per-pair entry exists.
    pub fn min_for_pair(&self, pair: &SourceDestPair) -> usize {
        self.pair_min
            .get(pair)
            .copied()
            .unwrap_or(self.num_connections)
    }
}

/// Simultaneous-failure budget at request, pair, and member granularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureBudget {
    pub total: usize,
    pub pair: BTreeMap<SourceDestPair, usize>,
    pub src: BTreeMap<String, usize>,
    pub dst: BTreeMap<String, usize>,
}

impl FailureBudget {
    pub fn total_only(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }
}

/// Outcome of a solver run: the chosen path assignment plus bookkeeping.
/// Consumed by the persistence layer; the serialization format is its
/// problem, not ours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub chosen_paths: BTreeMap<SourceDestPair, BTreeMap<String, Path>>,
    pub running_time_seconds: f64,
    pub is_feasible: bool,
}

/// One demand: sources, destinations, derived pairs, requirements, and the
/// failure model. `details` is absent until a solver runs and is written
/// exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub sources: BTreeSet<String>,
    pub destinations: BTreeSet<String>,
    pub pairs: BTreeSet<SourceDestPair>,
    pub connections: Connections,
    pub failures: FailureSpec,
    pub failure_budget: FailureBudget,
    pub details: Option<Details>,
}

impl Request {
    /// Build a request; pairs are the cross product of sources and
    /// destinations, self-pairs excluded.
    pub fn new(
        id: impl Into<String>,
        sources: BTreeSet<String>,
        destinations: BTreeSet<String>,
        connections: Connections,
        failures: FailureSpec,
        failure_budget: FailureBudget,
    ) -> Self {
        let pairs = sources
            .iter()
            .flat_map(|s| {
                destinations
                    .iter()
                    .filter(move |d| *d != s)
                    .map(move |d| SourceDestPair::new(s.clone(), d.clone()))
            })
            .collect();
        Self {
            id: id.into(),
            sources,
            destinations,
            pairs,
            connections,
            failures,
            failure_budget,
            details: None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.details.is_some()
    }

    /// One-time unsolved -> solved transition. A second call is a logic
    /// error upstream; the first result is kept and the duplicate dropped.
    pub fn record_solution(&mut self, details: Details) {
        if self.details.is_some() {
            tracing::warn!(request = %self.id, "duplicate solve result ignored");
            return;
        }
        self.details = Some(details);
    }

    pub fn chosen_paths(&self) -> Option<&BTreeMap<SourceDestPair, BTreeMap<String, Path>>> {
        self.details.as_ref().map(|d| &d.chosen_paths)
    }
}

/// A batch of requests sharing one problem class, algorithm, and topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSet {
    pub id: String,
    pub seed: u64,
    pub problem_class: ProblemClass,
    pub algorithm: Algorithm,
    pub failure_class: FailureClass,
    pub topology_id: String,
    pub requests: BTreeMap<String, Request>,
}
