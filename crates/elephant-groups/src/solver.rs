//! Minimum group count.
//!
//! With `n` groups and every item in exactly `floor(n/2)` of them, at most
//! `C(n, floor(n/2))` items can be told apart. The solver finds the smallest
//! `n` for which that is enough.

use tracing::trace;

use crate::combinatorics::central_binomial;
use crate::error::{GroupingError, Result};
use crate::model::ItemCount;

/// Whether `n` groups of balanced weight can distinguish `count` items.
#[inline]
pub fn covers(n: u32, count: u64) -> bool {
    central_binomial(n) >= u128::from(count)
}

/// Smallest `n` with `C(n, floor(n/2)) >= count`.
///
/// Scans `n = 0..=count`. The central coefficient grows at least as fast as
/// `n` beyond the first rows, so the scan always succeeds well before its
/// upper bound.
///
/// # Errors
///
/// [`GroupingError::NoValidGroupLength`] if no length in the scanned range
/// qualifies. This indicates a logic error and is never masked.
///
/// # Example
///
/// ```
/// use elephant_groups::model::ItemCount;
/// use elephant_groups::solver::min_groups;
///
/// assert_eq!(min_groups(ItemCount::new(1)?)?, 0);
/// assert_eq!(min_groups(ItemCount::new(4)?)?, 4);
/// # Ok::<(), elephant_groups::GroupingError>(())
/// ```
pub fn min_groups(count: ItemCount) -> Result<u32> {
    let count = count.get();
    let upper = u32::try_from(count).unwrap_or(u32::MAX);

    for n in 0..=upper {
        let capacity = central_binomial(n);
        trace!(n, capacity = %capacity, count, "probing group count");
        if capacity >= u128::from(count) {
            return Ok(n);
        }
    }

    Err(GroupingError::NoValidGroupLength { count })
}
