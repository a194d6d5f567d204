// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use sifter_core::{Parallelism, SeriesFrame, SifterError};

/// Builds a dedicated worker pool for the fixed-width setting.
///
/// `Parallelism::All` returns `None`; callers then run on the global
/// rayon pool.
pub fn build_pool(parallelism: Parallelism) -> Result<Option<ThreadPool>, SifterError> {
    match parallelism {
        Parallelism::All => Ok(None),
        Parallelism::Workers(workers) => {
            if workers == 0 {
                return Err(SifterError::invalid_config(
                    "parallelism must be >= 1 workers; got 0",
                ));
            }
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map(Some)
                .map_err(|err| {
                    SifterError::resource_limit(format!("failed to build worker pool: {err}"))
                })
        }
    }
}

/// Applies `op` to every column, in input order, splitting the work
/// across the given pool. The first error aborts the run.
///
/// Results are collected positionally, so the output order never depends
/// on worker scheduling.
pub fn map_columns<T, F>(
    pool: Option<&ThreadPool>,
    frame: &SeriesFrame,
    op: F,
) -> Result<Vec<T>, SifterError>
where
    T: Send,
    F: Fn(&str, &[f64]) -> Result<T, SifterError> + Sync,
{
    let columns: Vec<(&str, &[f64])> = frame.iter().collect();
    let run = || {
        columns
            .par_iter()
            .map(|&(name, values)| op(name, values))
            .collect::<Result<Vec<T>, SifterError>>()
    };
    match pool {
        Some(pool) => pool.install(run),
        None => run(),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_pool, map_columns};
    use sifter_core::{Parallelism, SeriesFrame, SifterError};

    fn frame() -> SeriesFrame {
        SeriesFrame::new(
            (0..16)
                .map(|i| (format!("m{i:02}"), vec![i as f64; 4]))
                .collect(),
        )
        .expect("frame should build")
    }

    #[test]
    fn all_parallelism_uses_the_global_pool() {
        let pool = build_pool(Parallelism::All).expect("build should succeed");
        assert!(pool.is_none());
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(build_pool(Parallelism::Workers(0)).is_err());
    }

    #[test]
    fn map_preserves_input_order() {
        for parallelism in [Parallelism::All, Parallelism::Workers(1), Parallelism::Workers(3)] {
            let pool = build_pool(parallelism).expect("build should succeed");
            let frame = frame();
            let names = map_columns(pool.as_ref(), &frame, |name, _| Ok(name.to_string()))
                .expect("map should succeed");
            assert_eq!(names, frame.names(), "parallelism {parallelism:?}");
        }
    }

    #[test]
    fn first_error_aborts_the_run() {
        let frame = frame();
        let out = map_columns(None, &frame, |name, _| {
            if name == "m07" {
                Err(SifterError::invalid_input("boom"))
            } else {
                Ok(())
            }
        });
        assert!(out.is_err());
    }
}
