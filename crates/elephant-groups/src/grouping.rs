//! Group assignment: the top-level pipeline.
//!
//! count -> min_groups -> k -> encodings -> groups
//!
//! Item `i` (0-based) receives the `i`-th encoding in enumeration order; the
//! association is purely positional. Group `g` then lists every item whose
//! encoding has a `1` at string position `g`.

use tracing::{debug, warn};

use crate::config::{CoveragePolicy, GroupingConfig};
use crate::encoding::{encodings, Encoding};
use crate::error::{GroupingError, Result};
use crate::model::{GroupingResult, IntoItemCount, ItemCount};
use crate::solver::min_groups;

/// Compute the minimal balanced grouping with the default configuration.
///
/// # Errors
///
/// - [`GroupingError::InvalidItemCount`] if `num_elephants` is not a positive
///   integer
/// - [`GroupingError::TooManyGroups`] if the grouping needs more than
///   [`DEFAULT_MAX_GROUPS`](crate::config::DEFAULT_MAX_GROUPS) groups, i.e.
///   for counts above `C(63, 31)`
///
/// # Example
///
/// ```
/// use elephant_groups::compute_groups;
///
/// let result = compute_groups(2)?;
/// assert_eq!(result.min_groups, 2);
/// assert_eq!(result.k, 1);
/// assert_eq!(result.groups, vec![vec![2], vec![1]]);
///
/// assert!(compute_groups(0).is_err());
/// assert!(compute_groups(2.5).is_err());
/// # Ok::<(), elephant_groups::GroupingError>(())
/// ```
pub fn compute_groups(num_elephants: impl IntoItemCount) -> Result<GroupingResult> {
    GroupAssigner::default().compute(num_elephants)
}

/// Runs the grouping pipeline under a [`GroupingConfig`].
///
/// Holds no per-request state; one assigner can serve any number of
/// requests, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct GroupAssigner {
    config: GroupingConfig,
}

impl GroupAssigner {
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Validate `num_elephants` and compute its grouping.
    pub fn compute(&self, num_elephants: impl IntoItemCount) -> Result<GroupingResult> {
        let count = num_elephants.into_item_count()?;
        self.compute_count(count)
    }

    /// Compute the grouping for an already validated count.
    pub fn compute_count(&self, count: ItemCount) -> Result<GroupingResult> {
        let n_items = count.get();
        let n_groups = min_groups(count)?;
        if n_groups > self.config.max_groups {
            return Err(GroupingError::TooManyGroups {
                required: n_groups,
                max: self.config.max_groups,
            });
        }
        let k = n_groups / 2;

        // Keep the first `n_items` encodings for assignment and count the
        // rest, so the sequence is walked exactly once.
        let mut sequence = encodings(n_groups, k);
        let assigned: Vec<Encoding> = sequence
            .by_ref()
            .take(usize::try_from(n_items).unwrap_or(usize::MAX))
            .collect();
        let encodings_count = assigned.len() as u64 + sequence.count() as u64;

        check_coverage(n_items, encodings_count, self.config.coverage)?;

        let groups = assign_groups(&assigned, n_groups);

        debug!(
            num_elephants = n_items,
            min_groups = n_groups,
            k,
            encodings_count,
            "computed grouping"
        );

        Ok(GroupingResult {
            num_elephants: n_items,
            min_groups: n_groups,
            k,
            encodings_count,
            groups,
        })
    }
}

/// Apply `policy` when `available` encodings cannot cover `requested` items.
fn check_coverage(requested: u64, available: u64, policy: CoveragePolicy) -> Result<()> {
    if available >= requested {
        return Ok(());
    }
    match policy {
        CoveragePolicy::Strict => Err(GroupingError::InsufficientEncodings {
            requested,
            available,
        }),
        CoveragePolicy::Truncate => {
            warn!(
                requested,
                available, "not enough encodings, excess items left ungrouped"
            );
            Ok(())
        }
    }
}

/// Collect, for each position `g < n_groups`, the 1-based ids of the items
/// whose encoding is set at `g`. Item ids within a group are ascending.
fn assign_groups(assigned: &[Encoding], n_groups: u32) -> Vec<Vec<u64>> {
    (0..n_groups)
        .map(|g| {
            assigned
                .iter()
                .zip(1u64..)
                .filter(|(encoding, _)| encoding.is_set(g))
                .map(|(_, item)| item)
                .collect()
        })
        .collect()
}
