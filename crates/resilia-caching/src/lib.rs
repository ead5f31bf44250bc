//! # resilia-caching
//!
//! Content cache placement over solved routing assignments, and
//! measurement of how accessible the cached content stays once failures
//! strike. Placement operates on each pair's primary path; evaluation
//! walks post-failure reachable prefixes.

pub mod accessibility;
pub mod placement;
pub mod policy;

pub use accessibility::evaluate_content_accessibility;
pub use placement::build_cache_maps;
pub use policy::{CachePolicy, CachingResult};
