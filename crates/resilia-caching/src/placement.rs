//! Placement rules. Every rule operates on each pair's primary
//! (least-cost) chosen path; pairs with no routed path get no cache entry.

use std::collections::{BTreeMap, BTreeSet};

use resilia_core::pathmap::{find_overlap, primary_path_map, reachable_nodes, ChosenPaths};
use resilia_core::{Failure, Path, SourceDestPair};

use crate::policy::{CachePolicy, CachingResult};

type CacheMap = BTreeMap<SourceDestPair, BTreeSet<String>>;

/// Fill each result's caching map according to its policy.
pub fn build_cache_maps(
    results: &mut [CachingResult],
    chosen: &ChosenPaths,
    failures: &[Failure],
) {
    let primaries: BTreeMap<SourceDestPair, &Path> = primary_path_map(chosen)
        .into_iter()
        .filter_map(|(pair, primary)| primary.map(|p| (pair, p)))
        .collect();
    for result in results {
        result.caching_map = match result.policy {
            CachePolicy::None => cache_at_destination(&primaries),
            CachePolicy::EntirePath => cache_along_path(&primaries),
            CachePolicy::SourceAdjacent => cache_next_to_source(&primaries),
            CachePolicy::FailureAware => cache_outside_failures(&primaries, failures),
            CachePolicy::BranchingPoint => cache_at_branching_points(&primaries),
        };
    }
}

/// First node past the source. Every non-empty path has one.
fn first_hop(path: &Path) -> Option<String> {
    path.links().first().map(|l| l.target.clone())
}

fn cache_at_destination(primaries: &BTreeMap<SourceDestPair, &Path>) -> CacheMap {
    primaries
        .keys()
        .map(|pair| (pair.clone(), BTreeSet::from([pair.dst.clone()])))
        .collect()
}

fn cache_along_path(primaries: &BTreeMap<SourceDestPair, &Path>) -> CacheMap {
    primaries
        .iter()
        .map(|(pair, primary)| {
            let mut nodes: BTreeSet<String> = primary.node_ids().clone();
            nodes.remove(&pair.src);
            nodes.insert(pair.dst.clone());
            (pair.clone(), nodes)
        })
        .collect()
}

fn cache_next_to_source(primaries: &BTreeMap<SourceDestPair, &Path>) -> CacheMap {
    primaries
        .iter()
        .map(|(pair, primary)| {
            let mut nodes = BTreeSet::from([pair.dst.clone()]);
            nodes.extend(first_hop(primary));
            (pair.clone(), nodes)
        })
        .collect()
}

fn cache_outside_failures(
    primaries: &BTreeMap<SourceDestPair, &Path>,
    failures: &[Failure],
) -> CacheMap {
    primaries
        .iter()
        .map(|(pair, primary)| {
            let mut nodes = BTreeSet::from([pair.dst.clone()]);
            match reachable_nodes(primary, failures).into_iter().next() {
                Some(reachable) => {
                    nodes.insert(reachable);
                }
                None => {
                    nodes.extend(first_hop(primary));
                }
            }
            nodes.remove(&pair.src);
            (pair.clone(), nodes)
        })
        .collect()
}

fn cache_at_branching_points(primaries: &BTreeMap<SourceDestPair, &Path>) -> CacheMap {
    // Nodes shared by several primary paths into the same destination.
    let mut paths_to_dest: BTreeMap<&str, Vec<&Path>> = BTreeMap::new();
    for (pair, primary) in primaries {
        paths_to_dest
            .entry(pair.dst.as_str())
            .or_default()
            .push(primary);
    }
    let branching_points: BTreeMap<&str, BTreeSet<String>> = paths_to_dest
        .into_iter()
        .map(|(dst, paths)| {
            let mut overlap = find_overlap(paths.into_iter());
            overlap.remove(dst);
            (dst, overlap)
        })
        .collect();

    primaries
        .iter()
        .map(|(pair, primary)| {
            let empty = BTreeSet::new();
            let points = branching_points.get(pair.dst.as_str()).unwrap_or(&empty);
            let mut nodes: BTreeSet<String> = primary
                .node_ids()
                .iter()
                .filter(|n| **n != pair.src && points.contains(*n))
                .cloned()
                .collect();
            if nodes.is_empty() {
                nodes.extend(first_hop(primary));
            }
            nodes.insert(pair.dst.clone());
            (pair.clone(), nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resilia_core::Link;

    fn chosen_with(pairs: &[(&str, &str, Vec<Path>)]) -> ChosenPaths {
        pairs
            .iter()
            .map(|(src, dst, paths)| {
                let map: BTreeMap<String, Path> = paths
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i.to_string(), p.clone()))
                    .collect();
                (SourceDestPair::new(*src, *dst), map)
            })
            .collect()
    }

    fn four_hop_path() -> Path {
        Path::new(vec![
            Link::new("s", "a", 1),
            Link::new("a", "b", 1),
            Link::new("b", "c", 1),
            Link::new("c", "t", 1),
        ])
    }

    #[test]
    fn entire_path_caches_interior_plus_destination_never_source() {
        let chosen = chosen_with(&[("s", "t", vec![four_hop_path()])]);
        let mut results = vec![CachingResult::new(CachePolicy::EntirePath)];
        build_cache_maps(&mut results, &chosen, &[]);
        let cached = &results[0].caching_map[&SourceDestPair::new("s", "t")];
        let expected: BTreeSet<String> = ["a", "b", "c", "t"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(cached, &expected);
    }

    #[test]
    fn none_policy_caches_destination_only() {
        let chosen = chosen_with(&[("s", "t", vec![four_hop_path()])]);
        let mut results = vec![CachingResult::new(CachePolicy::None)];
        build_cache_maps(&mut results, &chosen, &[]);
        let cached = &results[0].caching_map[&SourceDestPair::new("s", "t")];
        assert_eq!(cached, &BTreeSet::from(["t".to_string()]));
    }

    #[test]
    fn source_adjacent_caches_first_hop_and_destination() {
        let chosen = chosen_with(&[("s", "t", vec![four_hop_path()])]);
        let mut results = vec![CachingResult::new(CachePolicy::SourceAdjacent)];
        build_cache_maps(&mut results, &chosen, &[]);
        let cached = &results[0].caching_map[&SourceDestPair::new("s", "t")];
        assert_eq!(
            cached,
            &BTreeSet::from(["a".to_string(), "t".to_string()])
        );
    }

    #[test]
    fn failure_aware_skips_past_the_failed_prefix() {
        let chosen = chosen_with(&[("s", "t", vec![four_hop_path()])]);
        let failures = vec![Failure::node("a", 0.5)];
        let mut results = vec![CachingResult::new(CachePolicy::FailureAware)];
        build_cache_maps(&mut results, &chosen, &failures);
        let cached = &results[0].caching_map[&SourceDestPair::new("s", "t")];
        // Nothing on the path survives past the failed first hop, so the
        // rule falls back to the first hop itself.
        assert_eq!(
            cached,
            &BTreeSet::from(["a".to_string(), "t".to_string()])
        );
    }

    #[test]
    fn failure_aware_picks_the_first_reachable_node() {
        let chosen = chosen_with(&[("s", "t", vec![four_hop_path()])]);
        let failures = vec![Failure::link(&Link::new("b", "c", 1), 0.5)];
        let mut results = vec![CachingResult::new(CachePolicy::FailureAware)];
        build_cache_maps(&mut results, &chosen, &failures);
        let cached = &results[0].caching_map[&SourceDestPair::new("s", "t")];
        assert_eq!(
            cached,
            &BTreeSet::from(["a".to_string(), "t".to_string()])
        );
    }

    #[test]
    fn branching_point_caches_where_primaries_converge() {
        // Two sources converge on m before reaching t.
        let p1 = Path::new(vec![Link::new("s1", "m", 1), Link::new("m", "t", 1)]);
        let p2 = Path::new(vec![Link::new("s2", "m", 1), Link::new("m", "t", 1)]);
        let chosen = chosen_with(&[("s1", "t", vec![p1]), ("s2", "t", vec![p2])]);
        let mut results = vec![CachingResult::new(CachePolicy::BranchingPoint)];
        build_cache_maps(&mut results, &chosen, &[]);
        for pair in [SourceDestPair::new("s1", "t"), SourceDestPair::new("s2", "t")] {
            let cached = &results[0].caching_map[&pair];
            assert!(cached.contains("m"));
            assert!(cached.contains("t"));
            assert!(!cached.contains(&pair.src));
        }
    }

    #[test]
    fn branching_point_falls_back_to_the_first_hop() {
        let chosen = chosen_with(&[("s", "t", vec![four_hop_path()])]);
        let mut results = vec![CachingResult::new(CachePolicy::BranchingPoint)];
        build_cache_maps(&mut results, &chosen, &[]);
        let cached = &results[0].caching_map[&SourceDestPair::new("s", "t")];
        assert_eq!(
            cached,
            &BTreeSet::from(["a".to_string(), "t".to_string()])
        );
    }

    #[test]
    fn unrouted_pairs_get_no_cache_entry() {
        let mut chosen = chosen_with(&[("s", "t", vec![four_hop_path()])]);
        chosen.insert(SourceDestPair::new("s", "u"), BTreeMap::new());
        let mut results = CachingResult::for_all_policies();
        build_cache_maps(&mut results, &chosen, &[]);
        for result in &results {
            assert!(!result.caching_map.contains_key(&SourceDestPair::new("s", "u")));
        }
    }
}
