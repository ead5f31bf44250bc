//! # resilia-analysis
//!
//! Survivability analysis of solved routing requests: worst-case failure
//! group search, per-request metrics scoped by problem class, and batch
//! aggregation. Requests within a set are independent, so the batch walk
//! is parallel.

pub mod aggregate;
pub mod analyzer;
pub mod models;
pub mod worst_case;

use std::collections::BTreeMap;

use rayon::prelude::*;
use resilia_core::RequestSet;

pub use aggregate::generate_analyzed_set;
pub use analyzer::generate_metrics;
pub use models::{
    AnalyzedSet, Averages, MemberMetricsMap, PathMetrics, PathSetMetrics, RequestMetrics,
};
pub use worst_case::{path_set_metrics, path_survives, worst_case_assignment, worst_case_path_set};

/// Analyze every request in a set and aggregate the results.
pub fn analyze_request_set(set: &RequestSet) -> AnalyzedSet {
    let request_metrics: BTreeMap<String, RequestMetrics> = set
        .requests
        .par_iter()
        .map(|(id, request)| (id.clone(), generate_metrics(request, set.problem_class)))
        .collect();
    tracing::info!(
        request_set = %set.id,
        requests = request_metrics.len(),
        "request set analyzed"
    );
    generate_analyzed_set(set, request_metrics)
}
