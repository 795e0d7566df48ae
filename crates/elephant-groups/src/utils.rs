//! Parallelism configuration and thread pool setup.

use rayon::prelude::*;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// When `true`, callers may use `rayon` parallel iterators. When `false`,
/// they must iterate sequentially. Thread pools are set up by
/// [`run_with_threads`]; components only respect this flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map over `iter`, in parallel if allowed. Output order follows input
    /// order in both modes.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        <I as IntoParallelIterator>::Iter: IndexedParallelIterator,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use the global pool)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// # Errors
///
/// Returns the pool build error if a dedicated pool cannot be created.
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T, rayon::ThreadPoolBuildError> {
    let parallelism = Parallelism::from_threads(n_threads);

    match parallelism {
        Parallelism::Sequential => Ok(f(Parallelism::Sequential)),
        Parallelism::Parallel if n_threads == 0 => Ok(f(Parallelism::Parallel)),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallelism_from_threads() {
        assert_eq!(Parallelism::from_threads(1), Parallelism::Sequential);
        assert!(Parallelism::from_threads(4).is_parallel());
    }

    #[test]
    fn test_maybe_par_map_preserves_order() {
        let input: Vec<u32> = (0..100).collect();
        for parallelism in [Parallelism::Sequential, Parallelism::Parallel] {
            let out = parallelism.maybe_par_map(input.clone(), |x| x * 2);
            assert_eq!(out, (0..100).map(|x| x * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_run_with_threads() {
        let seen = run_with_threads(1, |p| p).unwrap();
        assert_eq!(seen, Parallelism::Sequential);

        let seen = run_with_threads(2, |p| {
            assert_eq!(rayon::current_num_threads(), 2);
            p
        })
        .unwrap();
        assert_eq!(seen, Parallelism::Parallel);
    }
}
