//! Workspace-wide constants.

/// Sentinel distance meaning "unreachable". Large enough to dominate any
/// real path cost, small enough that summing a handful of them cannot
/// overflow an `i64` during relaxation.
pub const DISTANCE_INFINITY: i64 = 999_999_999;

/// Path id assigned to the first (least-cost) path chosen for a pair.
pub const PRIMARY_PATH_ID: &str = "0";
