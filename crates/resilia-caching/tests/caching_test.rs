use std::collections::BTreeSet;

use resilia_caching::{
    build_cache_maps, evaluate_content_accessibility, CachePolicy, CachingResult,
};
use resilia_core::{
    Algorithm, Connections, Failure, FailureBudget, FailureSpec, Link, Request, SourceDestPair,
};
use resilia_routing::Dispatcher;
use test_fixtures::diamond;

fn solved_diamond_paths() -> resilia_core::pathmap::ChosenPaths {
    let topo = diamond();
    let request = Request::new(
        "r1",
        BTreeSet::from(["s".to_string()]),
        BTreeSet::from(["t".to_string()]),
        Connections::uniform(2),
        FailureSpec::default(),
        FailureBudget::total_only(0),
    );
    let details = Dispatcher::new().solve(Algorithm::Bhandari, &request, &topo);
    assert!(details.is_feasible);
    details.chosen_paths
}

#[test]
fn every_policy_produces_a_placement_for_a_routed_pair() {
    let chosen = solved_diamond_paths();
    let mut results = CachingResult::for_all_policies();
    build_cache_maps(&mut results, &chosen, &[]);
    let pair = SourceDestPair::new("s", "t");
    for result in &results {
        let cached = &result.caching_map[&pair];
        assert!(!cached.is_empty(), "policy {:?} cached nothing", result.policy);
        assert!(cached.contains("t"));
        assert!(!cached.contains("s"), "policy {:?} cached the source", result.policy);
    }
}

#[test]
fn failure_aware_beats_the_baseline_under_its_anticipated_failure() {
    let chosen = solved_diamond_paths();
    let anticipated = vec![Failure::link(&Link::new("a", "t", 1), 0.5)];
    let mut results = vec![
        CachingResult::new(CachePolicy::None),
        CachingResult::new(CachePolicy::FailureAware),
    ];
    build_cache_maps(&mut results, &chosen, &anticipated);
    evaluate_content_accessibility(&mut results, &chosen, &anticipated, 1);
    let baseline = &results[0];
    let aware = &results[1];
    // Both still reach content (the backup route survives), but the
    // failure-aware placement hits on the primary prefix.
    assert_eq!(aware.reachability, 1.0);
    assert!(aware.avg_hop_count_to_content <= baseline.avg_hop_count_to_content);
    assert_eq!(aware.reach_through_backup, 0.0);
    assert_eq!(baseline.reach_through_backup, 1.0);
}

#[test]
fn evaluation_handles_an_empty_assignment() {
    let chosen = resilia_core::pathmap::ChosenPaths::new();
    let mut results = CachingResult::for_all_policies();
    build_cache_maps(&mut results, &chosen, &[]);
    evaluate_content_accessibility(&mut results, &chosen, &[], 1);
    for result in &results {
        assert!(result.caching_map.is_empty());
        assert_eq!(result.reachability, 0.0);
        assert_eq!(result.avg_accessibility, 0.0);
    }
}
