// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::pool::map_columns;
use rayon::ThreadPool;
use sifter_core::{SeriesFrame, SifterError, is_missing};
use std::collections::BTreeSet;

/// True when the series carries a change worth running a search on.
///
/// Dropped shapes: empty or single-sample series, all-missing series,
/// constant series, perfect linear ramps, and series whose first
/// differences are all missing or zero. NaN compares unequal to itself,
/// so a column containing any missing sample never matches the constant
/// or ramp rules; the final rule catches series that only vary through
/// their missing runs.
pub fn has_simple_change(values: &[f64]) -> bool {
    if values.len() <= 1 {
        return false;
    }
    if values.iter().all(|&v| is_missing(v)) {
        return false;
    }
    if values.iter().all(|&v| v == values[0]) {
        return false;
    }
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    if diffs.iter().all(|&d| d == diffs[0]) {
        return false;
    }
    !diffs.iter().all(|&d| is_missing(d) || d == 0.0)
}

/// Stage-0 filter: keeps only columns with a simple change, preserving
/// column order.
///
/// The per-column predicate runs on the given worker pool; the kept set
/// is merged positionally, so the result never depends on scheduling.
pub fn simple_filter(
    pool: Option<&ThreadPool>,
    frame: &SeriesFrame,
) -> Result<SeriesFrame, SifterError> {
    let verdicts = map_columns(pool, frame, |name, values| {
        Ok((name.to_string(), has_simple_change(values)))
    })?;
    let keep: BTreeSet<String> = verdicts
        .into_iter()
        .filter_map(|(name, kept)| kept.then_some(name))
        .collect();
    Ok(frame.select(&keep))
}
