//! Simulation parameters: everything a reproducible generation run needs.

use serde::{Deserialize, Serialize};

use resilia_core::{Algorithm, FailureClass, ProblemClass};

/// Knobs for one generation run. Identical parameters and seed always
/// produce the same demands and failure scenarios; request and set ids are
/// the only non-reproducible fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub seed: u64,
    pub num_requests: usize,
    pub num_sources: usize,
    pub num_destinations: usize,
    pub problem_class: ProblemClass,
    pub algorithm: Algorithm,
    pub failure_class: FailureClass,
    /// Number of failure events sampled into each request's failure set.
    pub num_failure_events: usize,
    /// Maximum simultaneous failures; bounds failure-group size.
    pub num_fails_allowed: usize,
    pub num_connections: usize,
    /// Range the per-pair/per-member minimum requirements are drawn from.
    pub min_connections_range: Option<(usize, usize)>,
    /// Range the per-pair/per-member maximum requirements are drawn from.
    pub max_connections_range: Option<(usize, usize)>,
    /// Fraction of destinations drawn from the source set.
    pub percent_src_also_dest: f64,
    /// Fraction of sources forced into the failure set as node failures.
    pub percent_src_fail: f64,
    /// Fraction of destinations forced into the failure set as node
    /// failures.
    pub percent_dest_fail: f64,
    /// Occurrence probability assigned uniformly to every failure.
    pub failure_probability: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            num_requests: 1,
            num_sources: 1,
            num_destinations: 1,
            problem_class: ProblemClass::Flex,
            algorithm: Algorithm::FlexBhandari,
            failure_class: FailureClass::Link,
            num_failure_events: 0,
            num_fails_allowed: 0,
            num_connections: 1,
            min_connections_range: None,
            max_connections_range: None,
            percent_src_also_dest: 0.0,
            percent_src_fail: 0.0,
            percent_dest_fail: 0.0,
            failure_probability: 0.01,
        }
    }
}
