//! Evaluation of many independent counts.
//!
//! Requests share no state, so a batch is a plain (possibly parallel) map.
//! Results come back in input order, each with its own outcome.

use tracing::debug;

use crate::error::Result;
use crate::grouping::GroupAssigner;
use crate::model::{GroupingResult, IntoItemCount};
use crate::utils::{run_with_threads, Parallelism};

/// Compute a grouping for every entry of `counts`.
///
/// A failing entry does not affect the others.
pub fn compute_many<N>(
    assigner: &GroupAssigner,
    counts: &[N],
    parallelism: Parallelism,
) -> Vec<Result<GroupingResult>>
where
    N: IntoItemCount + Copy + Send + Sync,
{
    debug!(n_requests = counts.len(), ?parallelism, "computing batch");
    parallelism.maybe_par_map(counts, |&count| assigner.compute(count))
}

/// Like [`compute_many`], on a pool of `n_threads` threads.
///
/// See [`run_with_threads`] for the thread count semantics.
pub fn compute_many_with_threads<N>(
    assigner: &GroupAssigner,
    counts: &[N],
    n_threads: usize,
) -> std::result::Result<Vec<Result<GroupingResult>>, rayon::ThreadPoolBuildError>
where
    N: IntoItemCount + Copy + Send + Sync,
{
    run_with_threads(n_threads, |parallelism| {
        compute_many(assigner, counts, parallelism)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroupingError;

    #[test]
    fn keeps_input_order_and_isolates_failures() {
        let assigner = GroupAssigner::default();
        let counts: [i64; 5] = [4, 0, 1, -3, 20];

        for parallelism in [Parallelism::Sequential, Parallelism::Parallel] {
            let results = compute_many(&assigner, &counts, parallelism);
            assert_eq!(results.len(), 5);
            assert_eq!(results[0].as_ref().unwrap().min_groups, 4);
            assert!(matches!(results[1], Err(GroupingError::InvalidItemCount { .. })));
            assert_eq!(results[2].as_ref().unwrap().min_groups, 0);
            assert!(results[3].is_err());
            assert_eq!(results[4].as_ref().unwrap().min_groups, 6);
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let assigner = GroupAssigner::default();
        let counts: Vec<u64> = (1..=300).collect();
        let seq = compute_many(&assigner, &counts, Parallelism::Sequential);
        let par = compute_many_with_threads(&assigner, &counts, 3).unwrap();
        assert_eq!(seq, par);
    }
}
