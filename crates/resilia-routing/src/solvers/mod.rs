//! Solver trait and dispatch.
//!
//! Each routing algorithm implements [`RoutingAlgorithm`]; the
//! [`Dispatcher`] owns one instance per [`Algorithm`] variant and handles
//! the cross-cutting concerns itself: timing, empty-path cleanup, and the
//! one-shot write of results back onto requests.

mod bhandari;
mod flex_bhandari;
mod minimum_cost;

use std::collections::HashMap;
use std::time::Instant;

use resilia_core::pathmap::filter_empty_paths;
use resilia_core::{Algorithm, Details, Request, RequestSet, Topology};

pub use bhandari::BhandariSolver;
pub use flex_bhandari::FlexBhandariSolver;
pub use minimum_cost::MinimumCostSolver;

/// One routing algorithm. Implementations are pure over their inputs and
/// leave timing to the dispatcher.
pub trait RoutingAlgorithm: Send + Sync {
    fn solve(&self, request: &Request, topology: &Topology) -> Details;
}

/// Algorithm registry. `Default` registers every built-in solver; callers
/// can override or extend the table with [`Dispatcher::register`].
pub struct Dispatcher {
    solvers: HashMap<Algorithm, Box<dyn RoutingAlgorithm>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        let mut dispatcher = Self {
            solvers: HashMap::new(),
        };
        dispatcher.register(Algorithm::MinimumCostPath, Box::new(MinimumCostSolver));
        dispatcher.register(Algorithm::Bhandari, Box::new(BhandariSolver));
        dispatcher.register(Algorithm::FlexBhandari, Box::new(FlexBhandariSolver));
        dispatcher
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, algorithm: Algorithm, solver: Box<dyn RoutingAlgorithm>) {
        self.solvers.insert(algorithm, solver);
    }

    /// Run one algorithm over one request. Unroutable-pair placeholders are
    /// dropped from the result and the wall-clock time is recorded. An
    /// unregistered algorithm yields an infeasible empty result.
    pub fn solve(
        &self,
        algorithm: Algorithm,
        request: &Request,
        topology: &Topology,
    ) -> Details {
        let Some(solver) = self.solvers.get(&algorithm) else {
            tracing::warn!(?algorithm, "no solver registered");
            return Details::default();
        };
        let started = Instant::now();
        let mut details = solver.solve(request, topology);
        details.running_time_seconds = started.elapsed().as_secs_f64();
        details.chosen_paths = filter_empty_paths(details.chosen_paths);
        tracing::info!(
            ?algorithm,
            request = %request.id,
            is_feasible = details.is_feasible,
            seconds = details.running_time_seconds,
            "request solved"
        );
        details
    }

    /// Solve every unsolved request in a batch, writing results in place.
    pub fn solve_request_set(&self, set: &mut RequestSet, topology: &Topology) {
        for request in set.requests.values_mut() {
            if request.is_solved() {
                continue;
            }
            let details = self.solve(set.algorithm, request, topology);
            request.record_solution(details);
        }
    }
}
