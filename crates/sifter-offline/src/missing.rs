// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sifter_core::is_missing;

/// Indices where a run of missing samples begins.
///
/// A start is any index whose sample is missing while its predecessor is not;
/// index 0 counts when the series opens with a missing sample.
///
/// `[1, 2, NaN, NaN, 5, 6, NaN, 8, 9, NaN, NaN]` yields `[2, 6, 9]`.
pub fn missing_run_starts(values: &[f64]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut prev_missing = false;
    for (idx, &value) in values.iter().enumerate() {
        let missing = is_missing(value);
        if missing && !prev_missing {
            starts.push(idx);
        }
        prev_missing = missing;
    }
    starts
}
