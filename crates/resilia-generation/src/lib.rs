//! # resilia-generation
//!
//! Seeded demand and failure generation. One `StdRng` is created from the
//! run seed and threaded explicitly through every sampling step, so equal
//! parameters always reproduce the same request set (ids excepted).

pub mod combinations;
pub mod failures;
pub mod params;
pub mod select;

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use resilia_core::{
    Connections, FailureBudget, GenerationError, ProblemClass, Request, RequestSet,
    SourceDestPair, Topology,
};

pub use params::SimulationParams;

/// Generate a full request set from parameters.
pub fn generate_request_set(
    params: &SimulationParams,
    topology: &Topology,
) -> Result<RequestSet, GenerationError> {
    validate(params, topology)?;
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut requests = BTreeMap::new();
    for _ in 0..params.num_requests {
        let request = generate_request(params, topology, &mut rng);
        requests.insert(request.id.clone(), request);
    }
    tracing::info!(
        seed = params.seed,
        requests = requests.len(),
        topology = topology.id(),
        "request set generated"
    );
    Ok(RequestSet {
        id: Uuid::new_v4().to_string(),
        seed: params.seed,
        problem_class: params.problem_class,
        algorithm: params.algorithm,
        failure_class: params.failure_class,
        topology_id: topology.id().to_string(),
        requests,
    })
}

fn validate(params: &SimulationParams, topology: &Topology) -> Result<(), GenerationError> {
    for (name, value) in [
        ("percent_src_also_dest", params.percent_src_also_dest),
        ("percent_src_fail", params.percent_src_fail),
        ("percent_dest_fail", params.percent_dest_fail),
        ("failure_probability", params.failure_probability),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(GenerationError::InvalidParameter(format!(
                "{name} must lie in [0, 1], got {value}"
            )));
        }
    }
    if params.num_sources == 0 || params.num_destinations == 0 {
        return Err(GenerationError::InvalidParameter(
            "at least one source and one destination required".to_string(),
        ));
    }
    let available = select::eligible_node_ids(topology).len();
    let needed = params.num_sources.max(params.num_destinations);
    if available < needed {
        return Err(GenerationError::NotEnoughNodes { available, needed });
    }
    Ok(())
}

/// Generate one request: members, failure model, requirements, budget.
fn generate_request<R: Rng>(
    params: &SimulationParams,
    topology: &Topology,
    rng: &mut R,
) -> Request {
    let eligible = select::eligible_node_ids(topology);
    let sources = select::pick_sources(&eligible, params.num_sources, rng);
    let destinations = select::pick_destinations(
        &eligible,
        params.num_destinations,
        params.percent_src_also_dest,
        &sources,
        rng,
    );
    let pairs: BTreeSet<SourceDestPair> = sources
        .iter()
        .flat_map(|s| {
            destinations
                .iter()
                .filter(move |d| *d != s)
                .map(move |d| SourceDestPair::new(s.clone(), d.clone()))
        })
        .collect();

    let failure_spec =
        failures::assign_failures(params, &pairs, &sources, &destinations, topology, rng);
    let connections = assign_connections(params, &pairs, &sources, &destinations, rng);
    let failure_budget = assign_failure_budget(params, &pairs, &sources, &destinations);

    Request::new(
        Uuid::new_v4().to_string(),
        sources,
        destinations,
        connections,
        failure_spec,
        failure_budget,
    )
}

fn draw<R: Rng>(range: (usize, usize), rng: &mut R) -> usize {
    if range.0 >= range.1 {
        range.0
    } else {
        rng.random_range(range.0..=range.1)
    }
}

/// Requirements at the scope the problem class uses. With explicit ranges
/// the per-pair/per-member figures are drawn from them; without ranges the
/// request-wide requirement applies, with zero minimums and uniform
/// maximums at the finer scopes.
fn assign_connections<R: Rng>(
    params: &SimulationParams,
    pairs: &BTreeSet<SourceDestPair>,
    sources: &BTreeSet<String>,
    destinations: &BTreeSet<String>,
    rng: &mut R,
) -> Connections {
    let mut connections = Connections::uniform(params.num_connections);
    let ranges = params
        .min_connections_range
        .zip(params.max_connections_range);

    match params.problem_class {
        ProblemClass::Flex => {
            if let Some((min_range, max_range)) = ranges {
                connections.num_connections = draw((min_range.0, max_range.1), rng);
            }
        }
        ProblemClass::Flow | ProblemClass::FlowSharedF => match ranges {
            Some((min_range, max_range)) => {
                for pair in pairs {
                    connections.pair_min.insert(pair.clone(), draw(min_range, rng));
                    connections.pair_max.insert(pair.clone(), draw(max_range, rng));
                }
                if connections.num_connections == 0 {
                    connections.num_connections = connections.pair_min.values().sum();
                }
            }
            None => {
                for pair in pairs {
                    connections.pair_min.insert(pair.clone(), 0);
                    connections
                        .pair_max
                        .insert(pair.clone(), params.num_connections);
                }
            }
        },
        ProblemClass::Endpoint | ProblemClass::EndpointSharedF => match ranges {
            Some((min_range, max_range)) => {
                for src in sources {
                    connections.src_min.insert(src.clone(), draw(min_range, rng));
                    connections.src_max.insert(src.clone(), draw(max_range, rng));
                }
                for dst in destinations {
                    connections.dst_min.insert(dst.clone(), draw(min_range, rng));
                    connections.dst_max.insert(dst.clone(), draw(max_range, rng));
                }
                if connections.num_connections == 0 {
                    connections.num_connections = connections
                        .src_min
                        .values()
                        .sum::<usize>()
                        .max(connections.dst_min.values().sum());
                }
            }
            None => {
                for src in sources {
                    connections.src_min.insert(src.clone(), 0);
                    connections.src_max.insert(src.clone(), params.num_connections);
                }
                for dst in destinations {
                    connections.dst_min.insert(dst.clone(), 0);
                    connections.dst_max.insert(dst.clone(), params.num_connections);
                }
            }
        },
    }
    connections
}

/// The simultaneous-failure budget, repeated at the scope the problem
/// class reads it from.
fn assign_failure_budget(
    params: &SimulationParams,
    pairs: &BTreeSet<SourceDestPair>,
    sources: &BTreeSet<String>,
    destinations: &BTreeSet<String>,
) -> FailureBudget {
    let mut budget = FailureBudget::total_only(params.num_fails_allowed);
    match params.problem_class {
        ProblemClass::Flow | ProblemClass::FlowSharedF => {
            for pair in pairs {
                budget.pair.insert(pair.clone(), params.num_fails_allowed);
            }
        }
        ProblemClass::Endpoint | ProblemClass::EndpointSharedF => {
            for src in sources {
                budget.src.insert(src.clone(), params.num_fails_allowed);
            }
            for dst in destinations {
                budget.dst.insert(dst.clone(), params.num_fails_allowed);
            }
        }
        ProblemClass::Flex => {}
    }
    budget
}
