//! Failure scenario generation: candidate pools per failure class,
//! biased sampling of the failure set, and group enumeration scoped by
//! problem class.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use resilia_core::{
    Failure, FailureClass, FailureGroup, FailureSpec, ProblemClass, SourceDestPair, Topology,
};

use crate::combinations::k_combinations;
use crate::params::SimulationParams;

/// One failure candidate per undirected link: only the lexicographically
/// first direction of each symmetric pair, so a link and its inverse never
/// both enter the pool. Matching stays direction-agnostic regardless.
fn link_candidates(topology: &Topology, probability: f64) -> Vec<Failure> {
    let mut candidates: Vec<Failure> = topology
        .links()
        .iter()
        .filter(|l| l.origin < l.target || topology.link(&l.inverse_id()).is_none())
        .map(|l| Failure::link(l, probability))
        .collect();
    candidates.sort_by_key(Failure::key);
    candidates
}

fn node_candidates(topology: &Topology, probability: f64) -> Vec<Failure> {
    let mut candidates: Vec<Failure> = topology
        .nodes()
        .iter()
        .map(|n| Failure::node(&n.id, probability))
        .collect();
    candidates.sort_by_key(Failure::key);
    candidates
}

fn candidate_pool(topology: &Topology, class: FailureClass, probability: f64) -> Vec<Failure> {
    match class {
        FailureClass::Node => node_candidates(topology, probability),
        FailureClass::Link => link_candidates(topology, probability),
        FailureClass::Both => {
            let mut pool = node_candidates(topology, probability);
            pool.extend(link_candidates(topology, probability));
            pool
        }
    }
}

fn quota(percent: f64, member_count: usize) -> usize {
    (percent * member_count as f64).round() as usize
}

/// Sample one failure set. When node failures are admissible, the
/// `percent_src_fail` / `percent_dest_fail` knobs force that share of the
/// members into the set before the remainder is drawn uniformly. The
/// result is sorted by failure key.
pub fn generate_failure_set<R: Rng>(
    params: &SimulationParams,
    sources: &BTreeSet<String>,
    destinations: &BTreeSet<String>,
    topology: &Topology,
    rng: &mut R,
) -> Vec<Failure> {
    let probability = params.failure_probability;
    let mut picked: Vec<Failure> = Vec::new();
    let mut taken: BTreeSet<String> = BTreeSet::new();

    if params.failure_class != FailureClass::Link {
        let source_pool: Vec<String> = sources.iter().cloned().collect();
        let dest_pool: Vec<String> = destinations.iter().cloned().collect();
        for member in crate::select::sample(&source_pool, quota(params.percent_src_fail, sources.len()), rng)
            .into_iter()
            .chain(crate::select::sample(&dest_pool, quota(params.percent_dest_fail, destinations.len()), rng))
        {
            let failure = Failure::node(&member, probability);
            if taken.insert(failure.key()) {
                picked.push(failure);
            }
        }
    }

    let mut remaining: Vec<Failure> = candidate_pool(topology, params.failure_class, probability)
        .into_iter()
        .filter(|f| !taken.contains(&f.key()))
        .collect();
    while picked.len() < params.num_failure_events && !remaining.is_empty() {
        let idx = rng.random_range(0..remaining.len());
        picked.push(remaining.swap_remove(idx));
    }

    picked.truncate(params.num_failure_events);
    picked.sort_by_key(Failure::key);
    picked
}

/// Expand a failure set into every group of size 1 through
/// `num_fails_allowed`.
pub fn enumerate_groups(failure_set: &[Failure], num_fails_allowed: usize) -> Vec<FailureGroup> {
    (1..=num_fails_allowed.min(failure_set.len()))
        .flat_map(|k| k_combinations(failure_set, k).into_iter().map(FailureGroup))
        .collect()
}

/// Build the failure model at the scope the problem class requires: one
/// shared pool, one pool per pair, or one pool per endpoint member.
pub fn assign_failures<R: Rng>(
    params: &SimulationParams,
    pairs: &BTreeSet<SourceDestPair>,
    sources: &BTreeSet<String>,
    destinations: &BTreeSet<String>,
    topology: &Topology,
    rng: &mut R,
) -> FailureSpec {
    match params.problem_class {
        ProblemClass::Flex | ProblemClass::FlowSharedF | ProblemClass::EndpointSharedF => {
            let set = generate_failure_set(params, sources, destinations, topology, rng);
            let groups = enumerate_groups(&set, params.num_fails_allowed);
            FailureSpec::shared(set, groups)
        }
        ProblemClass::Flow => {
            let mut pair_failure_sets = BTreeMap::new();
            let mut pair_failure_groups = BTreeMap::new();
            for pair in pairs {
                let set = generate_failure_set(params, sources, destinations, topology, rng);
                let groups = enumerate_groups(&set, params.num_fails_allowed);
                pair_failure_sets.insert(pair.clone(), set);
                pair_failure_groups.insert(pair.clone(), groups);
            }
            FailureSpec {
                pair_failure_sets,
                pair_failure_groups,
                ..FailureSpec::default()
            }
        }
        ProblemClass::Endpoint => {
            let mut src_failure_groups = BTreeMap::new();
            let mut dst_failure_groups = BTreeMap::new();
            for src in sources {
                let set = generate_failure_set(params, sources, destinations, topology, rng);
                src_failure_groups
                    .insert(src.clone(), enumerate_groups(&set, params.num_fails_allowed));
            }
            for dst in destinations {
                let set = generate_failure_set(params, sources, destinations, topology, rng);
                dst_failure_groups
                    .insert(dst.clone(), enumerate_groups(&set, params.num_fails_allowed));
            }
            FailureSpec {
                src_failure_groups,
                dst_failure_groups,
                ..FailureSpec::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use resilia_core::{Node, TopologyBuilder};

    fn square() -> Topology {
        TopologyBuilder::new("square")
            .node(Node::new("a"))
            .node(Node::new("b"))
            .node(Node::new("c"))
            .node(Node::new("d"))
            .bidirectional_link("a", "b", 1)
            .bidirectional_link("b", "c", 1)
            .bidirectional_link("c", "d", 1)
            .bidirectional_link("d", "a", 1)
            .build()
            .unwrap()
    }

    #[test]
    fn link_pool_holds_one_candidate_per_undirected_link() {
        let pool = link_candidates(&square(), 0.1);
        assert_eq!(pool.len(), 4);
        let keys: Vec<String> = pool.iter().map(Failure::key).collect();
        assert!(keys.contains(&"link:a-b".to_string()));
        assert!(!keys.contains(&"link:b-a".to_string()));
    }

    #[test]
    fn group_enumeration_counts_match_combinatorics() {
        let set = node_candidates(&square(), 0.1);
        // 4 singletons + 6 pairs.
        assert_eq!(enumerate_groups(&set[..4], 2).len(), 10);
        assert!(enumerate_groups(&set, 0).is_empty());
    }

    #[test]
    fn src_fail_bias_forces_sources_into_the_set() {
        let topo = square();
        let mut params = SimulationParams::default();
        params.failure_class = FailureClass::Node;
        params.num_failure_events = 2;
        params.percent_src_fail = 1.0;
        let sources = BTreeSet::from(["a".to_string(), "b".to_string()]);
        let destinations = BTreeSet::from(["c".to_string()]);
        let mut rng = StdRng::seed_from_u64(3);
        let set = generate_failure_set(&params, &sources, &destinations, &topo, &mut rng);
        let keys: BTreeSet<String> = set.iter().map(Failure::key).collect();
        assert!(keys.contains("node:a"));
        assert!(keys.contains("node:b"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn flow_scoping_fills_per_pair_pools_only() {
        let topo = square();
        let mut params = SimulationParams::default();
        params.problem_class = ProblemClass::Flow;
        params.num_failure_events = 1;
        params.num_fails_allowed = 1;
        let sources = BTreeSet::from(["a".to_string()]);
        let destinations = BTreeSet::from(["c".to_string()]);
        let pairs = BTreeSet::from([SourceDestPair::new("a", "c")]);
        let mut rng = StdRng::seed_from_u64(5);
        let spec = assign_failures(&params, &pairs, &sources, &destinations, &topo, &mut rng);
        assert!(spec.failure_set.is_empty());
        assert!(spec.failure_groups.is_empty());
        assert_eq!(spec.pair_failure_groups[&SourceDestPair::new("a", "c")].len(), 1);
    }
}
