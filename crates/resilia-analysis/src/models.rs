//! Metric records produced by the analyzer. All of them serialize; the
//! storage layer downstream owns the format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use resilia_core::{Algorithm, MemberType, ProblemClass, SourceDestPair};

/// Per-path figures under one failure scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMetrics {
    pub num_links: usize,
    pub cost: u64,
    pub survived: bool,
}

/// Figures for one pair's chosen path set under one failure scenario.
/// `chosen` records whether the pair had any paths at all; pairs without
/// paths still produce a (zeroed) record so member averages see them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSetMetrics {
    pub path_metrics: BTreeMap<String, PathMetrics>,
    pub num_paths: usize,
    pub num_failed: usize,
    pub num_link_usages: usize,
    pub total_link_cost: u64,
    pub chosen: bool,
}

/// Metric maps keyed per source and per destination node.
pub type MemberMetricsMap =
    BTreeMap<MemberType, BTreeMap<String, BTreeMap<SourceDestPair, PathSetMetrics>>>;

/// Mean figures over one grouping (pairs, sources, or destinations). The
/// `per_chosen` variants restrict the denominator to members that had at
/// least one chosen path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub for_pair: bool,
    pub for_source: bool,
    pub for_dest: bool,
    pub avg_paths: f64,
    pub avg_paths_per_chosen: f64,
    pub avg_path_length: f64,
    pub avg_path_length_per_chosen: f64,
    pub avg_path_cost: f64,
    pub avg_path_cost_per_chosen: f64,
    pub avg_disconnected_paths: f64,
    pub avg_disconnected_paths_per_chosen: f64,
}

/// The analyzer's verdict on one request under its worst admissible
/// failure group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMetrics {
    pub request_id: String,
    pub is_survivable: bool,
    pub is_feasible: bool,
    pub running_time_seconds: f64,
    pub num_links_used: usize,
    pub cost_links_used: u64,
    pub num_paths: usize,
    pub num_disconnected_paths: usize,
    pub num_intact_paths: usize,
    pub avg_path_length: f64,
    pub avg_path_cost: f64,
    pub averages_per_pair: Averages,
    pub averages_per_src: Averages,
    pub averages_per_dst: Averages,
    pub path_set_metrics: BTreeMap<SourceDestPair, PathSetMetrics>,
    pub member_path_set_metrics: MemberMetricsMap,
}

/// Batch aggregation over a whole request set. Count and cost totals are
/// feasibility-gated: infeasible requests contribute nothing to them or to
/// their denominators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedSet {
    pub request_set_id: String,
    pub seed: u64,
    pub problem_class: ProblemClass,
    pub algorithm: Algorithm,
    pub request_metrics: BTreeMap<String, RequestMetrics>,
    pub num_requests: usize,
    pub total_running_time_seconds: f64,
    pub total_running_time_seconds_for_feasible: f64,
    pub avg_running_time_seconds: f64,
    pub avg_running_time_seconds_for_feasible: f64,
    pub total_survivable: usize,
    pub percent_survivable: f64,
    pub percent_survivable_for_feasible: f64,
    pub total_feasible: usize,
    pub percent_feasible: f64,
    pub total_feasible_and_survivable: usize,
    pub total_links_used: usize,
    pub avg_links_used_for_feasible: f64,
    pub total_cost_links_used: u64,
    pub avg_cost_links_used_for_feasible: f64,
    pub total_num_paths: usize,
    pub avg_num_paths_for_feasible: f64,
    pub total_disconnected_paths: usize,
    pub avg_disconnected_paths_for_feasible: f64,
    pub total_intact_paths: usize,
    pub avg_intact_paths_for_feasible: f64,
    pub avg_avg_path_length: f64,
    pub avg_avg_path_cost: f64,
    pub avg_averages_per_pair: Averages,
    pub avg_averages_per_src: Averages,
    pub avg_averages_per_dst: Averages,
}
