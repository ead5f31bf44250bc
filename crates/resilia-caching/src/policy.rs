//! Cache placement policies and their per-policy result record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use resilia_core::SourceDestPair;

/// Where to place content replicas relative to each pair's primary path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Destination only; the no-caching baseline.
    None,
    /// Every node on the path except the source.
    EntirePath,
    /// First hop past the source, plus the destination.
    SourceAdjacent,
    /// First node still reachable after the anticipated failures, plus the
    /// destination. Falls back to SourceAdjacent when nothing is reachable.
    FailureAware,
    /// Nodes shared by two or more primary paths into the same destination,
    /// plus the destination. Falls back to SourceAdjacent when the path has
    /// no branching point.
    BranchingPoint,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 5] = [
        CachePolicy::None,
        CachePolicy::EntirePath,
        CachePolicy::SourceAdjacent,
        CachePolicy::FailureAware,
        CachePolicy::BranchingPoint,
    ];
}

/// One policy's placement map plus the accessibility statistics measured
/// for it under a failure scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachingResult {
    pub policy: CachePolicy,
    pub caching_map: BTreeMap<SourceDestPair, BTreeSet<String>>,
    /// Fraction of sources that can still reach all of their desired
    /// content.
    pub reachability: f64,
    /// Mean per-source fraction of desired content still reachable,
    /// capped at 1.0.
    pub avg_accessibility: f64,
    /// Mean post-failure hop count to a cache hit, over sources with at
    /// least one hit.
    pub avg_hop_count_to_content: f64,
    /// Fraction of primary-path misses rescued by a backup path.
    pub reach_through_backup: f64,
}

impl CachingResult {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            caching_map: BTreeMap::new(),
            reachability: 0.0,
            avg_accessibility: 0.0,
            avg_hop_count_to_content: 0.0,
            reach_through_backup: 0.0,
        }
    }

    /// One result record per policy, ready for placement and evaluation.
    pub fn for_all_policies() -> Vec<CachingResult> {
        CachePolicy::ALL.into_iter().map(CachingResult::new).collect()
    }
}
