//! Content accessibility under a fixed failure scenario.
//!
//! For each pair, walk the primary path's post-failure reachable prefix
//! looking for a cached node; on a miss, try the remaining chosen paths in
//! weight order. Per-source tallies then yield the four derived
//! statistics.

use std::collections::{BTreeMap, BTreeSet};

use resilia_core::pathmap::{
    primary_path_map, reachable_nodes, sort_paths_by_weight, ChosenPaths,
};
use resilia_core::{Failure, Path};

use crate::policy::CachingResult;

#[derive(Default)]
struct SourceTally {
    hops: usize,
    hits: usize,
    pairs: usize,
}

/// Position of the first cached node along a post-failure prefix, counted
/// in hops from the source.
fn hit_on_prefix(prefix: &[String], cache: &BTreeSet<String>) -> Option<usize> {
    prefix
        .iter()
        .position(|node| cache.contains(node))
        .map(|i| i + 1)
}

/// Measure each policy's statistics for one failure scenario and write
/// them onto the result records. `demand_per_source` is the number of
/// content items each source wants to reach.
pub fn evaluate_content_accessibility(
    results: &mut [CachingResult],
    chosen: &ChosenPaths,
    scenario: &[Failure],
    demand_per_source: usize,
) {
    let primaries: BTreeMap<_, &Path> = primary_path_map(chosen)
        .into_iter()
        .filter_map(|(pair, primary)| primary.map(|p| (pair, p)))
        .collect();
    let empty_cache = BTreeSet::new();

    for result in results {
        let mut tallies: BTreeMap<String, SourceTally> = BTreeMap::new();
        let mut primary_misses = 0usize;
        let mut backup_rescues = 0usize;

        for (pair, primary) in &primaries {
            let cache = result.caching_map.get(pair).unwrap_or(&empty_cache);
            let prefix = reachable_nodes(primary, scenario);
            let mut hop_count = hit_on_prefix(&prefix, cache);

            if hop_count.is_none() {
                primary_misses += 1;
                // Exclude the primary's own entry by identity; a chosen
                // duplicate of the primary still counts as a backup.
                let backups: Vec<&Path> = chosen
                    .get(pair)
                    .map(|paths| {
                        sort_paths_by_weight(
                            paths
                                .values()
                                .filter(|p| !std::ptr::eq(*p, *primary) && !p.is_empty()),
                        )
                    })
                    .unwrap_or_default();
                for backup in backups {
                    let backup_prefix = reachable_nodes(backup, scenario);
                    hop_count = hit_on_prefix(&backup_prefix, cache);
                    if hop_count.is_some() {
                        backup_rescues += 1;
                        break;
                    }
                }
            }

            let tally = tallies.entry(pair.src.clone()).or_default();
            tally.pairs += 1;
            if let Some(hops) = hop_count {
                tally.hops += hops;
                tally.hits += 1;
            }
        }

        let num_sources = tallies.len();
        let mut full_reach = 0usize;
        let mut total_accessibility = 0.0;
        let mut hop_means = Vec::new();
        for tally in tallies.values() {
            let reach_fraction = if demand_per_source == 0 {
                if tally.hits > 0 {
                    1.0
                } else {
                    0.0
                }
            } else {
                (tally.hits as f64 / demand_per_source as f64).min(1.0)
            };
            if reach_fraction == 1.0 {
                full_reach += 1;
            }
            total_accessibility += reach_fraction;
            if tally.hits > 0 {
                hop_means.push(tally.hops as f64 / tally.hits as f64);
            }
        }

        result.reachability = fraction(full_reach as f64, num_sources);
        result.avg_accessibility = fraction(total_accessibility, num_sources);
        result.avg_hop_count_to_content =
            fraction(hop_means.iter().sum::<f64>(), hop_means.len());
        result.reach_through_backup = fraction(backup_rescues as f64, primary_misses);
        tracing::debug!(
            policy = ?result.policy,
            reachability = result.reachability,
            avg_accessibility = result.avg_accessibility,
            "scenario evaluated"
        );
    }
}

fn fraction(numerator: f64, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator / denominator as f64
    } else {
        0.0
    }
}
