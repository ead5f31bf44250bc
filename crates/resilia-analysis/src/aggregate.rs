//! Batch aggregation of per-request metrics into one record.

use std::collections::BTreeMap;

use resilia_core::RequestSet;

use crate::models::{AnalyzedSet, Averages, RequestMetrics};

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator / denominator as f64
    } else {
        0.0
    }
}

/// Fold per-request metrics into the batch record. Running time and
/// survivability counts cover every request; path, link, and cost totals
/// are gated on feasibility, as are their denominators.
pub fn generate_analyzed_set(
    set: &RequestSet,
    request_metrics: BTreeMap<String, RequestMetrics>,
) -> AnalyzedSet {
    let num_requests = request_metrics.len();
    let mut total_running_time = 0.0;
    let mut total_running_time_feasible = 0.0;
    let mut num_feasible = 0usize;
    let mut num_survivable = 0usize;
    let mut num_survivable_and_feasible = 0usize;
    let mut total_links_used = 0usize;
    let mut total_cost_links_used = 0u64;
    let mut total_num_paths = 0usize;
    let mut total_disconnected = 0usize;
    let mut total_intact = 0usize;
    let mut total_avg_path_length = 0.0;
    let mut total_avg_path_cost = 0.0;
    let mut pair_averages = Vec::new();
    let mut src_averages = Vec::new();
    let mut dst_averages = Vec::new();

    for metrics in request_metrics.values() {
        total_running_time += metrics.running_time_seconds;
        if metrics.is_survivable {
            num_survivable += 1;
        }
        if !metrics.is_feasible {
            continue;
        }
        num_feasible += 1;
        if metrics.is_survivable {
            num_survivable_and_feasible += 1;
        }
        total_running_time_feasible += metrics.running_time_seconds;
        total_links_used += metrics.num_links_used;
        total_cost_links_used += metrics.cost_links_used;
        total_num_paths += metrics.num_paths;
        total_disconnected += metrics.num_disconnected_paths;
        total_intact += metrics.num_intact_paths;
        total_avg_path_length += metrics.avg_path_length;
        total_avg_path_cost += metrics.avg_path_cost;
        pair_averages.push(metrics.averages_per_pair.clone());
        src_averages.push(metrics.averages_per_src.clone());
        dst_averages.push(metrics.averages_per_dst.clone());
    }

    AnalyzedSet {
        request_set_id: set.id.clone(),
        seed: set.seed,
        problem_class: set.problem_class,
        algorithm: set.algorithm,
        num_requests,
        total_running_time_seconds: total_running_time,
        total_running_time_seconds_for_feasible: total_running_time_feasible,
        avg_running_time_seconds: ratio(total_running_time, num_requests),
        avg_running_time_seconds_for_feasible: ratio(total_running_time_feasible, num_feasible),
        total_survivable: num_survivable,
        percent_survivable: ratio(num_survivable as f64, num_requests),
        percent_survivable_for_feasible: ratio(num_survivable_and_feasible as f64, num_feasible),
        total_feasible: num_feasible,
        percent_feasible: ratio(num_feasible as f64, num_requests),
        total_feasible_and_survivable: num_survivable_and_feasible,
        total_links_used,
        avg_links_used_for_feasible: ratio(total_links_used as f64, num_feasible),
        total_cost_links_used,
        avg_cost_links_used_for_feasible: ratio(total_cost_links_used as f64, num_feasible),
        total_num_paths,
        avg_num_paths_for_feasible: ratio(total_num_paths as f64, num_feasible),
        total_disconnected_paths: total_disconnected,
        avg_disconnected_paths_for_feasible: ratio(total_disconnected as f64, num_feasible),
        total_intact_paths: total_intact,
        avg_intact_paths_for_feasible: ratio(total_intact as f64, num_feasible),
        avg_avg_path_length: ratio(total_avg_path_length, num_feasible),
        avg_avg_path_cost: ratio(total_avg_path_cost, num_feasible),
        avg_averages_per_pair: average_of_averages(&pair_averages),
        avg_averages_per_src: average_of_averages(&src_averages),
        avg_averages_per_dst: average_of_averages(&dst_averages),
        request_metrics,
    }
}

/// Unweighted mean over per-request Averages records: every request counts
/// equally regardless of how many pairs or members it had.
fn average_of_averages(records: &[Averages]) -> Averages {
    let count = records.len().max(1);
    let mut out = Averages::default();
    for record in records {
        out.avg_paths += record.avg_paths;
        out.avg_paths_per_chosen += record.avg_paths_per_chosen;
        out.avg_path_length += record.avg_path_length;
        out.avg_path_length_per_chosen += record.avg_path_length_per_chosen;
        out.avg_path_cost += record.avg_path_cost;
        out.avg_path_cost_per_chosen += record.avg_path_cost_per_chosen;
        out.avg_disconnected_paths += record.avg_disconnected_paths;
        out.avg_disconnected_paths_per_chosen += record.avg_disconnected_paths_per_chosen;
        out.for_pair = record.for_pair;
        out.for_source = record.for_source;
        out.for_dest = record.for_dest;
    }
    out.avg_paths /= count as f64;
    out.avg_paths_per_chosen /= count as f64;
    out.avg_path_length /= count as f64;
    out.avg_path_length_per_chosen /= count as f64;
    out.avg_path_cost /= count as f64;
    out.avg_path_cost_per_chosen /= count as f64;
    out.avg_disconnected_paths /= count as f64;
    out.avg_disconnected_paths_per_chosen /= count as f64;
    out
}
