//! elephant-groups: minimal balanced group encodings.
//!
//! Given `N` items, find the fewest groups such that every item belongs to a
//! distinct combination of groups, with every item in the same number of
//! groups. Each item gets a bit-string of length `min_groups` with exactly
//! `k = min_groups / 2` ones; bit position `g` says whether the item is in
//! group `g`.
//!
//! # Pipeline
//!
//! count -> [`solver::min_groups`] -> `k` -> [`encoding::encodings`] ->
//! [`grouping::GroupAssigner`] -> [`GroupingResult`]
//!
//! # Key Types
//!
//! - [`compute_groups`] / [`GroupAssigner`] - run the pipeline
//! - [`GroupingConfig`] - limits and policies, built with `GroupingConfig::builder()`
//! - [`GroupingResult`] - the computed scheme
//! - [`worker::GroupingWorker`] - async request/response adapter for hosts
//!
//! # Example
//!
//! ```
//! use elephant_groups::compute_groups;
//!
//! let result = compute_groups(4)?;
//! assert_eq!(result.min_groups, 4);
//! assert_eq!(result.k, 2);
//! assert_eq!(result.encodings_count, 6);
//! # Ok::<(), elephant_groups::GroupingError>(())
//! ```

pub mod batch;
pub mod combinatorics;
pub mod config;
pub mod encoding;
pub mod error;
pub mod grouping;
pub mod model;
pub mod protocol;
pub mod solver;
pub mod testing;
pub mod utils;
pub mod worker;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use config::{ConfigError, CoveragePolicy, GroupingConfig};
pub use error::{GroupingError, Result};
pub use grouping::{compute_groups, GroupAssigner};
pub use model::{GroupingResult, IntoItemCount, ItemCount};
pub use protocol::{GroupingRequest, GroupingResponse};
pub use utils::{run_with_threads, Parallelism};
