//! Utilities over chosen-path assignments: primary path selection,
//! weight ordering, post-failure reachability, and overlap detection.

use std::collections::{BTreeMap, BTreeSet};

use crate::failure::Failure;
use crate::path::Path;
use crate::request::SourceDestPair;

/// A solver's pair -> path-id -> path assignment.
pub type ChosenPaths = BTreeMap<SourceDestPair, BTreeMap<String, Path>>;

/// The least-cost chosen path per pair. Ties resolve to the smallest path
/// id, so the choice is deterministic.
pub fn primary_path_map(chosen: &ChosenPaths) -> BTreeMap<SourceDestPair, Option<&Path>> {
    chosen
        .iter()
        .map(|(pair, paths)| {
            let primary = paths
                .values()
                .filter(|p| !p.is_empty())
                .min_by_key(|p| p.total_weight());
            (pair.clone(), primary)
        })
        .collect()
}

/// Paths sorted ascending by total weight.
pub fn sort_paths_by_weight<'a, I>(paths: I) -> Vec<&'a Path>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut sorted: Vec<&Path> = paths.into_iter().collect();
    sorted.sort_by_key(|p| p.total_weight());
    sorted
}

/// Drop empty (no-route) paths from an assignment. Pairs left with no
/// paths keep their (empty) entry so per-pair metrics still see them.
pub fn filter_empty_paths(chosen: ChosenPaths) -> ChosenPaths {
    chosen
        .into_iter()
        .map(|(pair, paths)| {
            let kept = paths
                .into_iter()
                .filter(|(_, p)| !p.is_empty())
                .collect();
            (pair, kept)
        })
        .collect()
}

fn node_failed(failures: &[Failure], node_id: &str) -> bool {
    failures
        .iter()
        .any(|f| matches!(f, Failure::Node { id, .. } if id == node_id))
}

fn link_failed(failures: &[Failure], link_id: &str, link_inverse_id: &str) -> bool {
    failures.iter().any(|f| match f {
        Failure::Link { id, inverse_id, .. } => {
            id == link_id || id == link_inverse_id || inverse_id == link_id
        }
        Failure::Node { .. } => false,
    })
}

/// The post-failure reachable prefix of a path, walked from the source.
/// Returns node ids from the first hop onward (the source itself is
/// excluded); the walk stops before the first failed link or node.
pub fn reachable_nodes(path: &Path, failures: &[Failure]) -> Vec<String> {
    let Some(source) = path.source() else {
        return Vec::new();
    };
    if node_failed(failures, source) {
        return Vec::new();
    }
    let mut reachable = Vec::new();
    for link in path.links() {
        if link_failed(failures, &link.id(), &link.inverse_id()) {
            break;
        }
        if node_failed(failures, &link.target) {
            break;
        }
        reachable.push(link.target.clone());
    }
    reachable
}

/// Node ids appearing in at least two distinct paths.
pub fn find_overlap<'a, I>(paths: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for path in paths {
        for node_id in path.node_ids() {
            *counts.entry(node_id).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(id, _)| id.to_string())
        .collect()
}
