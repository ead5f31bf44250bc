use std::collections::{BTreeMap, BTreeSet};

use resilia_analysis::{analyze_request_set, generate_metrics};
use resilia_core::{
    Algorithm, Connections, Details, Failure, FailureBudget, FailureClass, FailureGroup,
    FailureSpec, Link, Path, ProblemClass, Request, RequestSet, SourceDestPair,
};
use resilia_routing::{shortest_path, Dispatcher};
use test_fixtures::{diamond, nsfnet};

fn solved_request(
    id: &str,
    src: &str,
    dst: &str,
    paths: Vec<Path>,
    failures: FailureSpec,
    num_connections: usize,
) -> Request {
    let mut request = Request::new(
        id,
        BTreeSet::from([src.to_string()]),
        BTreeSet::from([dst.to_string()]),
        Connections::uniform(num_connections),
        failures,
        FailureBudget::total_only(1),
    );
    let pair = SourceDestPair::new(src, dst);
    let path_map: BTreeMap<String, Path> = paths
        .into_iter()
        .enumerate()
        .map(|(i, p)| (i.to_string(), p))
        .collect();
    request.record_solution(Details {
        chosen_paths: BTreeMap::from([(pair, path_map)]),
        running_time_seconds: 0.1,
        is_feasible: true,
    });
    request
}

fn diamond_paths() -> Vec<Path> {
    vec![
        Path::new(vec![Link::new("s", "a", 1), Link::new("a", "t", 1)]),
        Path::new(vec![Link::new("s", "b", 3), Link::new("b", "t", 3)]),
    ]
}

#[test]
fn zero_failure_baseline_is_survivable() {
    let request = solved_request("r1", "s", "t", diamond_paths(), FailureSpec::default(), 1);
    let metrics = generate_metrics(&request, ProblemClass::Flex);
    assert!(metrics.is_survivable);
    assert_eq!(metrics.num_paths, 2);
    assert_eq!(metrics.num_disconnected_paths, 0);
    assert_eq!(metrics.num_intact_paths, 2);
    assert_eq!(metrics.num_links_used, 4);
    assert_eq!(metrics.cost_links_used, 8);
    assert_eq!(metrics.avg_path_length, 2.0);
    assert_eq!(metrics.avg_path_cost, 4.0);
}

#[test]
fn worst_group_decides_the_verdict() {
    let one_at_a_time = FailureSpec::shared(
        vec![],
        vec![
            FailureGroup(vec![Failure::link(&Link::new("a", "t", 1), 0.1)]),
            FailureGroup(vec![Failure::link(&Link::new("b", "t", 3), 0.1)]),
        ],
    );
    let request = solved_request("r1", "s", "t", diamond_paths(), one_at_a_time, 1);
    let metrics = generate_metrics(&request, ProblemClass::Flex);
    assert!(metrics.is_survivable);
    assert_eq!(metrics.num_disconnected_paths, 1);
}

#[test]
fn larger_failure_groups_never_improve_the_verdict() {
    let both_at_once = FailureSpec::shared(
        vec![],
        vec![
            FailureGroup(vec![Failure::link(&Link::new("a", "t", 1), 0.1)]),
            FailureGroup(vec![
                Failure::link(&Link::new("a", "t", 1), 0.1),
                Failure::link(&Link::new("b", "t", 3), 0.1),
            ]),
        ],
    );
    let request = solved_request("r1", "s", "t", diamond_paths(), both_at_once, 1);
    let metrics = generate_metrics(&request, ProblemClass::Flex);
    assert!(!metrics.is_survivable);
    assert_eq!(metrics.num_disconnected_paths, 2);
    assert_eq!(metrics.num_intact_paths, 0);
}

#[test]
fn flow_class_checks_each_pair_against_its_own_minimum() {
    let pair = SourceDestPair::new("s", "t");
    let mut failures = FailureSpec::default();
    failures.pair_failure_groups.insert(
        pair.clone(),
        vec![FailureGroup(vec![Failure::link(
            &Link::new("a", "t", 1),
            0.1,
        )])],
    );
    let mut request = solved_request("r1", "s", "t", diamond_paths(), failures, 1);
    // The pair requires both paths intact; the worst group kills one.
    request.connections.pair_min.insert(pair, 2);
    let metrics = generate_metrics(&request, ProblemClass::Flow);
    assert!(!metrics.is_survivable);
    assert_eq!(metrics.num_disconnected_paths, 1);
}

#[test]
fn endpoint_class_takes_the_max_of_member_sums() {
    let mut failures = FailureSpec::default();
    // Source-indexed pool kills one path; destination-indexed kills both.
    failures.src_failure_groups.insert(
        "s".to_string(),
        vec![FailureGroup(vec![Failure::link(
            &Link::new("a", "t", 1),
            0.1,
        )])],
    );
    failures.dst_failure_groups.insert(
        "t".to_string(),
        vec![FailureGroup(vec![
            Failure::link(&Link::new("a", "t", 1), 0.1),
            Failure::link(&Link::new("b", "t", 3), 0.1),
        ])],
    );
    let request = solved_request("r1", "s", "t", diamond_paths(), failures, 1);
    let metrics = generate_metrics(&request, ProblemClass::Endpoint);
    assert_eq!(metrics.num_disconnected_paths, 2);
    assert!(!metrics.is_survivable);
}

#[test]
fn survival_matching_ignores_traversal_direction() {
    let reversed = FailureSpec::shared(
        vec![],
        vec![FailureGroup(vec![Failure::link(
            &Link::new("t", "a", 1),
            0.1,
        )])],
    );
    let request = solved_request("r1", "s", "t", diamond_paths(), reversed, 1);
    let metrics = generate_metrics(&request, ProblemClass::Flex);
    assert_eq!(metrics.num_disconnected_paths, 1);
}

#[test]
fn unsolved_request_is_analyzed_as_infeasible() {
    let request = Request::new(
        "r1",
        BTreeSet::from(["s".to_string()]),
        BTreeSet::from(["t".to_string()]),
        Connections::uniform(1),
        FailureSpec::default(),
        FailureBudget::total_only(0),
    );
    let metrics = generate_metrics(&request, ProblemClass::Flex);
    assert!(!metrics.is_feasible);
    assert!(!metrics.is_survivable);
    assert_eq!(metrics.num_paths, 0);
}

#[test]
fn batch_percentages_match_their_totals() {
    let mut requests = BTreeMap::new();
    for i in 0..4 {
        let mut request = solved_request(
            &format!("r{i}"),
            "s",
            "t",
            diamond_paths(),
            FailureSpec::default(),
            1,
        );
        // Make one request infeasible.
        if i == 3 {
            if let Some(details) = request.details.as_mut() {
                details.is_feasible = false;
            }
        }
        requests.insert(format!("r{i}"), request);
    }
    let set = RequestSet {
        id: "set".to_string(),
        seed: 11,
        problem_class: ProblemClass::Flex,
        algorithm: Algorithm::Bhandari,
        failure_class: FailureClass::Link,
        topology_id: "diamond".to_string(),
        requests,
    };
    let analyzed = analyze_request_set(&set);
    assert_eq!(analyzed.num_requests, 4);
    assert_eq!(analyzed.total_feasible, 3);
    let reconstructed = (analyzed.percent_feasible * analyzed.num_requests as f64).round();
    assert_eq!(reconstructed as usize, analyzed.total_feasible);
    // Feasibility-gated totals exclude the infeasible request.
    assert_eq!(analyzed.total_num_paths, 6);
    assert_eq!(analyzed.avg_num_paths_for_feasible, 2.0);
}

#[test]
fn nsfnet_scenario_end_to_end() {
    let topo = nsfnet();
    let request = Request::new(
        "r1",
        BTreeSet::from(["Seattle".to_string()]),
        BTreeSet::from(["Princeton".to_string()]),
        Connections::uniform(1),
        FailureSpec::default(),
        FailureBudget::total_only(0),
    );
    let details = Dispatcher::new().solve(Algorithm::MinimumCostPath, &request, &topo);
    assert!(details.is_feasible);
    let pair = SourceDestPair::new("Seattle", "Princeton");
    let expected = shortest_path(&topo, "Seattle", "Princeton");
    assert_eq!(details.chosen_paths[&pair]["0"], expected);

    // Fail a link lying on that exact path.
    let mut solved = request.clone();
    solved.failures = FailureSpec::shared(
        vec![],
        vec![FailureGroup(vec![Failure::link(
            &Link::new("Champaign", "Pittsburgh", 700),
            0.1,
        )])],
    );
    solved.record_solution(details);
    let metrics = generate_metrics(&solved, ProblemClass::Flex);
    assert_eq!(metrics.num_paths, 1);
    assert_eq!(metrics.num_disconnected_paths, 1);
    assert!(!metrics.is_survivable);
}

#[test]
fn sanity_check_diamond_paths_match_the_fixture() {
    let topo = diamond();
    let cheap = shortest_path(&topo, "s", "t");
    assert_eq!(cheap.total_weight(), 2);
}
