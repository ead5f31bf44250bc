use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use resilia_analysis::{generate_metrics, worst_case_path_set};
use resilia_core::{
    Connections, Details, Failure, FailureBudget, FailureGroup, FailureSpec, Link, Path,
    ProblemClass, Request, SourceDestPair,
};

fn chain(nodes: usize) -> Path {
    let links = (0..nodes.saturating_sub(1))
        .map(|i| Link::new(format!("n{i}"), format!("n{}", i + 1), 1))
        .collect();
    Path::new(links)
}

fn group_strategy() -> impl Strategy<Value = FailureGroup> {
    prop::collection::vec(0usize..8, 0..4).prop_map(|ids| {
        FailureGroup(
            ids.into_iter()
                .map(|i| Failure::node(format!("n{i}"), 0.5))
                .collect(),
        )
    })
}

/// Every non-empty subset of `set` with at most `max_size` members.
fn groups_up_to(set: &[Failure], max_size: usize) -> Vec<FailureGroup> {
    let n = set.len();
    (1u32..1 << n)
        .filter(|mask| (mask.count_ones() as usize) <= max_size)
        .map(|mask| {
            FailureGroup(
                (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| set[i].clone())
                    .collect(),
            )
        })
        .collect()
}

/// A solved single-pair request whose failure groups are capped at
/// `budget` simultaneous failures.
fn solved_flex_request(
    set: &[Failure],
    budget: usize,
    paths: &BTreeMap<String, Path>,
) -> Request {
    let pair = SourceDestPair::new("n0", "n9");
    let mut request = Request::new(
        "r",
        BTreeSet::from(["n0".to_string()]),
        BTreeSet::from(["n9".to_string()]),
        Connections::uniform(1),
        FailureSpec::shared(set.to_vec(), groups_up_to(set, budget)),
        FailureBudget::total_only(budget),
    );
    let mut details = Details::default();
    details.chosen_paths.insert(pair, paths.clone());
    details.is_feasible = true;
    request.record_solution(details);
    request
}

proptest! {
    #[test]
    fn failed_count_never_exceeds_path_count(
        pool in prop::collection::vec(group_strategy(), 0..6),
        sizes in prop::collection::vec(2usize..6, 0..4),
    ) {
        let paths: BTreeMap<String, Path> = sizes
            .iter()
            .enumerate()
            .map(|(i, n)| (i.to_string(), chain(*n)))
            .collect();
        let metrics = worst_case_path_set(&paths, &pool);
        prop_assert!(metrics.num_failed <= metrics.num_paths);
        prop_assert_eq!(metrics.num_paths, paths.len());
    }

    #[test]
    fn growing_the_pool_never_shrinks_the_worst_case(
        pool in prop::collection::vec(group_strategy(), 0..6),
        extra in group_strategy(),
        sizes in prop::collection::vec(2usize..6, 1..4),
    ) {
        let paths: BTreeMap<String, Path> = sizes
            .iter()
            .enumerate()
            .map(|(i, n)| (i.to_string(), chain(*n)))
            .collect();
        let before = worst_case_path_set(&paths, &pool).num_failed;
        let mut grown = pool.clone();
        grown.push(extra);
        let after = worst_case_path_set(&paths, &grown).num_failed;
        prop_assert!(after >= before);
    }

    #[test]
    fn raising_the_failure_budget_never_improves_the_verdict(
        node_picks in prop::collection::btree_set(0usize..6, 1..5),
        budget in 1usize..3,
        sizes in prop::collection::vec(2usize..6, 1..4),
    ) {
        let set: Vec<Failure> = node_picks
            .iter()
            .map(|i| Failure::node(format!("n{i}"), 0.5))
            .collect();
        let paths: BTreeMap<String, Path> = sizes
            .iter()
            .enumerate()
            .map(|(i, n)| (i.to_string(), chain(*n)))
            .collect();

        let lenient = solved_flex_request(&set, budget, &paths);
        let strict = solved_flex_request(&set, budget + 1, &paths);
        let survives_lenient = generate_metrics(&lenient, ProblemClass::Flex).is_survivable;
        let survives_strict = generate_metrics(&strict, ProblemClass::Flex).is_survivable;
        // Allowing one more simultaneous failure can only break requests.
        prop_assert!(!survives_strict || survives_lenient);
    }
}
