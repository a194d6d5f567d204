// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// True when the sample is missing (NaN).
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Population standard deviation over the non-missing samples.
///
/// Returns 0.0 when no valid sample exists, so an all-missing series derives
/// a zero penalty instead of poisoning downstream arithmetic with NaN.
pub fn nan_std(values: &[f64]) -> f64 {
    let mut count = 0usize;
    let mut sum = 0.0;
    for &value in values {
        if !is_missing(value) {
            count += 1;
            sum += value;
        }
    }
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    let mut sq_dev = 0.0;
    for &value in values {
        if !is_missing(value) {
            let centered = value - mean;
            sq_dev += centered * centered;
        }
    }
    (sq_dev / count as f64).sqrt()
}

/// Missing-aware prefix statistics for O(1) segment-cost queries.
///
/// NaN samples contribute nothing to the sums and are excluded from the valid
/// count, so segment costs stay finite on series with missing runs.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixStats {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
    valid: Vec<usize>,
}

impl PrefixStats {
    pub fn new(values: &[f64]) -> Self {
        let mut sum = Vec::with_capacity(values.len() + 1);
        let mut sum_sq = Vec::with_capacity(values.len() + 1);
        let mut valid = Vec::with_capacity(values.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);
        valid.push(0);
        for &value in values {
            let (dv, dsq, dn) = if is_missing(value) {
                (0.0, 0.0, 0)
            } else {
                (value, value * value, 1)
            };
            sum.push(sum.last().copied().unwrap_or(0.0) + dv);
            sum_sq.push(sum_sq.last().copied().unwrap_or(0.0) + dsq);
            valid.push(valid.last().copied().unwrap_or(0) + dn);
        }
        Self { sum, sum_sq, valid }
    }

    pub fn len(&self) -> usize {
        self.sum.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of valid samples over `[start, end)`.
    pub fn sum(&self, start: usize, end: usize) -> f64 {
        self.sum[end] - self.sum[start]
    }

    /// Sum of squared valid samples over `[start, end)`.
    pub fn sum_sq(&self, start: usize, end: usize) -> f64 {
        self.sum_sq[end] - self.sum_sq[start]
    }

    /// Count of valid samples over `[start, end)`.
    pub fn valid_count(&self, start: usize, end: usize) -> usize {
        self.valid[end] - self.valid[start]
    }
}
