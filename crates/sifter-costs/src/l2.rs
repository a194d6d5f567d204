// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::model::CostModel;
use sifter_core::{PrefixStats, SifterError};

/// Squared deviation from the segment mean.
///
/// Equivalent to the linear-kernel cost minimized by the pelt search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostL2Mean;

/// Prefix-stat cache for O(1) L2 segment-cost queries.
#[derive(Clone, Debug, PartialEq)]
pub struct L2Cache {
    prefix: PrefixStats,
}

impl CostModel for CostL2Mean {
    type Cache = L2Cache;

    fn name(&self) -> &'static str {
        "l2"
    }

    fn precompute(&self, values: &[f64]) -> Result<Self::Cache, SifterError> {
        Ok(L2Cache {
            prefix: PrefixStats::new(values),
        })
    }

    fn segment_cost(&self, cache: &Self::Cache, start: usize, end: usize) -> f64 {
        let m = cache.prefix.valid_count(start, end);
        if m == 0 {
            return 0.0;
        }
        let sum = cache.prefix.sum(start, end);
        let sum_sq = cache.prefix.sum_sq(start, end);
        let centered = sum_sq - (sum * sum) / m as f64;
        // Cancellation can leave a tiny negative residue.
        centered.max(0.0)
    }
}
