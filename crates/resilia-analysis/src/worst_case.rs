//! Worst-case failure group search.
//!
//! Every search is a fold over the group pool producing an immutable
//! metric record: evaluate each group, keep the one killing strictly the
//! most paths, first encountered wins ties. An empty pool degrades to the
//! zero-failure baseline.

use std::collections::{BTreeMap, BTreeSet};

use resilia_core::pathmap::ChosenPaths;
use resilia_core::{FailureGroup, Path, SourceDestPair};

use crate::models::{PathMetrics, PathSetMetrics};

/// Whether a path outlives every failure in the group.
pub fn path_survives(path: &Path, group: &FailureGroup) -> bool {
    !group.iter().any(|f| f.touches(path))
}

/// Evaluate one pair's path set against one failure group.
pub fn path_set_metrics(paths: &BTreeMap<String, Path>, group: &FailureGroup) -> PathSetMetrics {
    let path_metrics: BTreeMap<String, PathMetrics> = paths
        .iter()
        .map(|(id, path)| {
            (
                id.clone(),
                PathMetrics {
                    num_links: path.len(),
                    cost: path.total_weight(),
                    survived: path_survives(path, group),
                },
            )
        })
        .collect();
    let num_paths = path_metrics.len();
    let num_failed = path_metrics.values().filter(|m| !m.survived).count();
    let num_link_usages = path_metrics.values().map(|m| m.num_links).sum();
    let total_link_cost = path_metrics.values().map(|m| m.cost).sum();
    PathSetMetrics {
        chosen: !path_metrics.is_empty(),
        path_metrics,
        num_paths,
        num_failed,
        num_link_usages,
        total_link_cost,
    }
}

fn assignment_under(
    chosen: &ChosenPaths,
    pairs: &BTreeSet<SourceDestPair>,
    group: &FailureGroup,
) -> (usize, BTreeMap<SourceDestPair, PathSetMetrics>) {
    let mut total_failed = 0;
    let map = pairs
        .iter()
        .map(|pair| {
            let metrics = chosen
                .get(pair)
                .map(|paths| path_set_metrics(paths, group))
                .unwrap_or_default();
            total_failed += metrics.num_failed;
            (pair.clone(), metrics)
        })
        .collect();
    (total_failed, map)
}

/// Find the failure group killing the most paths across a whole pair set;
/// return the per-pair metrics evaluated under that group.
pub fn worst_case_assignment(
    chosen: &ChosenPaths,
    pairs: &BTreeSet<SourceDestPair>,
    pool: &[FailureGroup],
) -> BTreeMap<SourceDestPair, PathSetMetrics> {
    let baseline = assignment_under(chosen, pairs, &FailureGroup::default());
    let (_, worst) = pool.iter().fold(baseline, |best, group| {
        let candidate = assignment_under(chosen, pairs, group);
        if candidate.0 > best.0 {
            candidate
        } else {
            best
        }
    });
    worst
}

/// Find the failure group killing the most paths in a single path set.
pub fn worst_case_path_set(
    paths: &BTreeMap<String, Path>,
    pool: &[FailureGroup],
) -> PathSetMetrics {
    let baseline = path_set_metrics(paths, &FailureGroup::default());
    pool.iter().fold(baseline, |best, group| {
        let candidate = path_set_metrics(paths, group);
        if candidate.num_failed > best.num_failed {
            candidate
        } else {
            best
        }
    })
}
