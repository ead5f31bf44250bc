//! Deterministic member selection. Candidate pools are sorted before any
//! sampling so a fixed seed always yields the same members regardless of
//! map iteration order upstream.

use std::collections::BTreeSet;

use rand::Rng;

use resilia_core::Topology;

/// Node ids eligible to carry demands: connected nodes only, sorted.
pub fn eligible_node_ids(topology: &Topology) -> Vec<String> {
    let mut ids: Vec<String> = topology
        .nodes()
        .iter()
        .filter(|n| topology.degree(&n.id) > 0)
        .map(|n| n.id.clone())
        .collect();
    ids.sort_unstable();
    ids
}

/// Sample up to `count` distinct entries from a pool.
pub fn sample<R: Rng>(pool: &[String], count: usize, rng: &mut R) -> BTreeSet<String> {
    let mut remaining: Vec<&String> = pool.iter().collect();
    let mut picked = BTreeSet::new();
    for _ in 0..count.min(pool.len()) {
        let idx = rng.random_range(0..remaining.len());
        picked.insert(remaining.swap_remove(idx).clone());
    }
    picked
}

pub fn pick_sources<R: Rng>(
    eligible: &[String],
    count: usize,
    rng: &mut R,
) -> BTreeSet<String> {
    sample(eligible, count, rng)
}

/// Destinations drawn partly from the source set (per
/// `percent_src_also_dest`) and otherwise from non-source nodes. Falls
/// back to sources when too few non-source nodes remain.
pub fn pick_destinations<R: Rng>(
    eligible: &[String],
    count: usize,
    percent_src_also_dest: f64,
    sources: &BTreeSet<String>,
    rng: &mut R,
) -> BTreeSet<String> {
    let overlap_target = ((percent_src_also_dest * count as f64).round() as usize)
        .min(sources.len())
        .min(count);
    let source_pool: Vec<String> = sources.iter().cloned().collect();
    let mut destinations = sample(&source_pool, overlap_target, rng);

    let outside_pool: Vec<String> = eligible
        .iter()
        .filter(|id| !sources.contains(*id))
        .cloned()
        .collect();
    destinations.extend(sample(&outside_pool, count - destinations.len(), rng));

    if destinations.len() < count {
        let leftover: Vec<String> = source_pool
            .into_iter()
            .filter(|id| !destinations.contains(id))
            .collect();
        destinations.extend(sample(&leftover, count - destinations.len(), rng));
    }
    destinations
}
