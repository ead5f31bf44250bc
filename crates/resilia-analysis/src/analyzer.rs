//! Per-request survivability metrics.
//!
//! The problem class decides the scope of the worst-case search: one
//! global search (Flex and the SharedF classes), one search per pair
//! (Flow), or one search per endpoint member (Endpoint). The Endpoint
//! class combines its member searches by taking the maximum of the
//! source-indexed and destination-indexed failed-path sums, a deliberately
//! conservative stand-in for a joint worst case.

use std::collections::{BTreeMap, BTreeSet};

use resilia_core::pathmap::ChosenPaths;
use resilia_core::{
    Details, FailureGroup, MemberType, ProblemClass, Request, SourceDestPair,
};

use crate::models::{Averages, MemberMetricsMap, PathSetMetrics, RequestMetrics};
use crate::worst_case::{worst_case_assignment, worst_case_path_set};

/// Evaluate one solved request. An unsolved request is analyzed as an
/// infeasible request with no chosen paths.
pub fn generate_metrics(request: &Request, problem_class: ProblemClass) -> RequestMetrics {
    let fallback = Details::default();
    let details = request.details.as_ref().unwrap_or(&fallback);
    let chosen = &details.chosen_paths;
    let pairs = &request.pairs;
    let failures = &request.failures;

    let mut pair_metrics: BTreeMap<SourceDestPair, PathSetMetrics> = BTreeMap::new();
    let mut member_metrics = MemberMetricsMap::new();
    let mut is_survivable = true;
    let mut num_link_usages = 0usize;
    let mut num_failed = 0usize;
    let mut num_paths = 0usize;
    let mut total_path_cost = 0u64;

    match problem_class {
        ProblemClass::Flex | ProblemClass::FlowSharedF | ProblemClass::EndpointSharedF => {
            let pool = &failures.failure_groups;
            pair_metrics = worst_case_assignment(chosen, pairs, pool);
            for metrics in pair_metrics.values() {
                num_link_usages += metrics.num_link_usages;
                num_failed += metrics.num_failed;
                num_paths += metrics.num_paths;
                total_path_cost += metrics.total_link_cost;
            }
            // Every member shares the one global pool.
            let src_pools = shared_pools(&request.sources, pool);
            let dst_pools = shared_pools(&request.destinations, pool);
            member_metrics = member_metrics_map(chosen, request, &src_pools, &dst_pools);
        }
        ProblemClass::Flow => {
            let mut src_pools: BTreeMap<String, Vec<FailureGroup>> = BTreeMap::new();
            let mut dst_pools: BTreeMap<String, Vec<FailureGroup>> = BTreeMap::new();
            let empty = BTreeMap::new();
            for pair in pairs {
                let paths = chosen.get(pair).unwrap_or(&empty);
                num_paths += paths.len();

                let pool = failures
                    .pair_failure_groups
                    .get(pair)
                    .cloned()
                    .unwrap_or_default();
                src_pools
                    .entry(pair.src.clone())
                    .or_default()
                    .extend(pool.iter().cloned());
                dst_pools
                    .entry(pair.dst.clone())
                    .or_default()
                    .extend(pool.iter().cloned());

                let metrics = worst_case_path_set(paths, &pool);
                num_link_usages += metrics.num_link_usages;
                num_failed += metrics.num_failed;
                total_path_cost += metrics.total_link_cost;
                // Each pair must individually survive its own worst case.
                if paths.len() - metrics.num_failed < request.connections.min_for_pair(pair) {
                    is_survivable = false;
                }
                pair_metrics.insert(pair.clone(), metrics);
            }
            member_metrics = member_metrics_map(chosen, request, &src_pools, &dst_pools);
        }
        ProblemClass::Endpoint => {
            let src_pools = &failures.src_failure_groups;
            let dst_pools = &failures.dst_failure_groups;
            member_metrics = member_metrics_map(chosen, request, src_pools, dst_pools);

            for paths in chosen.values() {
                for path in paths.values() {
                    num_paths += 1;
                    num_link_usages += path.len();
                    total_path_cost += path.total_weight();
                }
            }
            num_failed = max_failed_across_member_types(&member_metrics);

            for pair in pairs {
                let mut combined = src_pools.get(&pair.src).cloned().unwrap_or_default();
                combined.extend(dst_pools.get(&pair.dst).cloned().unwrap_or_default());
                let empty = BTreeMap::new();
                let paths = chosen.get(pair).unwrap_or(&empty);
                pair_metrics.insert(pair.clone(), worst_case_path_set(paths, &combined));
            }
        }
    }

    if num_paths - num_failed < request.connections.num_connections {
        is_survivable = false;
    }

    let avg_path_length = mean(num_link_usages as f64, num_paths);
    let avg_path_cost = mean(total_path_cost as f64, num_paths);
    let averages_per_pair = averages_for_pairs(pairs, &pair_metrics);
    let averages_per_src =
        averages_for_members(&request.sources, &member_metrics, MemberType::Source);
    let averages_per_dst =
        averages_for_members(&request.destinations, &member_metrics, MemberType::Destination);

    RequestMetrics {
        request_id: request.id.clone(),
        is_survivable,
        is_feasible: details.is_feasible,
        running_time_seconds: details.running_time_seconds,
        num_links_used: num_link_usages,
        cost_links_used: total_path_cost,
        num_paths,
        num_disconnected_paths: num_failed,
        num_intact_paths: num_paths - num_failed,
        avg_path_length,
        avg_path_cost,
        averages_per_pair,
        averages_per_src,
        averages_per_dst,
        path_set_metrics: pair_metrics,
        member_path_set_metrics: member_metrics,
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

fn shared_pools(
    members: &BTreeSet<String>,
    pool: &[FailureGroup],
) -> BTreeMap<String, Vec<FailureGroup>> {
    members
        .iter()
        .map(|m| (m.clone(), pool.to_vec()))
        .collect()
}

/// Run the worst-case search once per source and once per destination,
/// each restricted to that member's pairs and its own group pool.
fn member_metrics_map(
    chosen: &ChosenPaths,
    request: &Request,
    src_pools: &BTreeMap<String, Vec<FailureGroup>>,
    dst_pools: &BTreeMap<String, Vec<FailureGroup>>,
) -> MemberMetricsMap {
    let mut map = MemberMetricsMap::new();
    map.insert(
        MemberType::Source,
        per_member(chosen, &request.sources, &request.pairs, src_pools, true),
    );
    map.insert(
        MemberType::Destination,
        per_member(
            chosen,
            &request.destinations,
            &request.pairs,
            dst_pools,
            false,
        ),
    );
    map
}

fn per_member(
    chosen: &ChosenPaths,
    members: &BTreeSet<String>,
    pairs: &BTreeSet<SourceDestPair>,
    pools: &BTreeMap<String, Vec<FailureGroup>>,
    by_source: bool,
) -> BTreeMap<String, BTreeMap<SourceDestPair, PathSetMetrics>> {
    members
        .iter()
        .map(|member| {
            let member_pairs: BTreeSet<SourceDestPair> = pairs
                .iter()
                .filter(|p| {
                    if by_source {
                        p.src == *member
                    } else {
                        p.dst == *member
                    }
                })
                .cloned()
                .collect();
            let pool = pools.get(member).map(Vec::as_slice).unwrap_or(&[]);
            (
                member.clone(),
                worst_case_assignment(chosen, &member_pairs, pool),
            )
        })
        .collect()
}

/// Endpoint-class combination: failed-path sums indexed by source and by
/// destination, combined by maximum. Conservative, not jointly optimal.
fn max_failed_across_member_types(member_metrics: &MemberMetricsMap) -> usize {
    member_metrics
        .values()
        .map(|by_member| {
            by_member
                .values()
                .flat_map(|by_pair| by_pair.values())
                .map(|m| m.num_failed)
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0)
}

fn averages_for_pairs(
    pairs: &BTreeSet<SourceDestPair>,
    pair_metrics: &BTreeMap<SourceDestPair, PathSetMetrics>,
) -> Averages {
    let mut total_paths = 0.0;
    let mut total_length = 0.0;
    let mut total_cost = 0.0;
    let mut total_disconnected = 0.0;
    let mut num_chosen = 0usize;
    for pair in pairs {
        let Some(metrics) = pair_metrics.get(pair) else {
            continue;
        };
        total_paths += metrics.num_paths as f64;
        total_length += metrics.num_link_usages as f64;
        total_cost += metrics.total_link_cost as f64;
        total_disconnected += metrics.num_failed as f64;
        if metrics.chosen {
            num_chosen += 1;
        }
    }
    Averages {
        for_pair: true,
        for_source: false,
        for_dest: false,
        avg_paths: mean(total_paths, pairs.len()),
        avg_paths_per_chosen: mean(total_paths, num_chosen),
        avg_path_length: mean(total_length, pairs.len()),
        avg_path_length_per_chosen: mean(total_length, num_chosen),
        avg_path_cost: mean(total_cost, pairs.len()),
        avg_path_cost_per_chosen: mean(total_cost, num_chosen),
        avg_disconnected_paths: mean(total_disconnected, pairs.len()),
        avg_disconnected_paths_per_chosen: mean(total_disconnected, num_chosen),
    }
}

fn averages_for_members(
    members: &BTreeSet<String>,
    member_metrics: &MemberMetricsMap,
    member_type: MemberType,
) -> Averages {
    let empty = BTreeMap::new();
    let by_member = member_metrics.get(&member_type).unwrap_or(&empty);
    let mut total_paths = 0.0;
    let mut total_length = 0.0;
    let mut total_cost = 0.0;
    let mut total_disconnected = 0.0;
    let mut num_chosen = 0usize;
    for member in members {
        let Some(by_pair) = by_member.get(member) else {
            continue;
        };
        let mut used = false;
        for metrics in by_pair.values() {
            total_paths += metrics.num_paths as f64;
            total_length += metrics.num_link_usages as f64;
            total_cost += metrics.total_link_cost as f64;
            total_disconnected += metrics.num_failed as f64;
            used |= metrics.chosen;
        }
        if used {
            num_chosen += 1;
        }
    }
    Averages {
        for_pair: false,
        for_source: member_type == MemberType::Source,
        for_dest: member_type == MemberType::Destination,
        avg_paths: mean(total_paths, members.len()),
        avg_paths_per_chosen: mean(total_paths, num_chosen),
        avg_path_length: mean(total_length, members.len()),
        avg_path_length_per_chosen: mean(total_length, num_chosen),
        avg_path_cost: mean(total_cost, members.len()),
        avg_path_cost_per_chosen: mean(total_cost, num_chosen),
        avg_disconnected_paths: mean(total_disconnected, members.len()),
        avg_disconnected_paths_per_chosen: mean(total_disconnected, num_chosen),
    }
}
