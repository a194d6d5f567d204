// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::model::CostModel;
use sifter_core::{PrefixStats, SifterError};

// Variance floor keeping the log-likelihood finite on constant segments.
const VARIANCE_FLOOR: f64 = 1e-12;

/// Gaussian mean/variance negative log-likelihood cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostNormalMeanVar;

/// Prefix-stat cache for O(1) normal segment-cost queries.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalCache {
    prefix: PrefixStats,
}

impl CostModel for CostNormalMeanVar {
    type Cache = NormalCache;

    fn name(&self) -> &'static str {
        "normal"
    }

    fn precompute(&self, values: &[f64]) -> Result<Self::Cache, SifterError> {
        Ok(NormalCache {
            prefix: PrefixStats::new(values),
        })
    }

    fn segment_cost(&self, cache: &Self::Cache, start: usize, end: usize) -> f64 {
        let m = cache.prefix.valid_count(start, end);
        if m == 0 {
            return 0.0;
        }
        let m_f = m as f64;
        let sum = cache.prefix.sum(start, end);
        let sum_sq = cache.prefix.sum_sq(start, end);
        let variance = ((sum_sq - (sum * sum) / m_f) / m_f).max(VARIANCE_FLOOR);
        m_f * variance.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::{CostModel, CostNormalMeanVar, VARIANCE_FLOOR};

    #[test]
    fn constant_segment_hits_variance_floor() {
        let model = CostNormalMeanVar;
        let cache = model.precompute(&[4.0; 10]).expect("precompute succeeds");
        let cost = model.segment_cost(&cache, 0, 10);
        assert!(cost.is_finite());
        assert!((cost - 10.0 * VARIANCE_FLOOR.ln()).abs() < 1e-9);
    }

    #[test]
    fn variance_change_is_cheaper_when_split() {
        let model = CostNormalMeanVar;
        let mut values = Vec::new();
        for _ in 0..10 {
            values.push(-0.5);
            values.push(0.5);
        }
        for _ in 0..10 {
            values.push(-5.0);
            values.push(5.0);
        }
        let cache = model.precompute(&values).expect("precompute succeeds");
        let whole = model.segment_cost(&cache, 0, 40);
        let split = model.segment_cost(&cache, 0, 20) + model.segment_cost(&cache, 20, 40);
        assert!(split < whole);
    }

    #[test]
    fn missing_samples_keep_cost_finite() {
        let model = CostNormalMeanVar;
        let values = [1.0, f64::NAN, 2.0, 3.0, f64::NAN];
        let cache = model.precompute(&values).expect("precompute succeeds");
        assert!(model.segment_cost(&cache, 0, 5).is_finite());
        assert_eq!(model.segment_cost(&cache, 1, 2), 0.0);
    }
}
