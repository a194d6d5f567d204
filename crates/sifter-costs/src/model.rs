// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sifter_core::SifterError;

/// Segment cost contract used by every offline search.
///
/// `precompute` builds an O(n) cache over one series so `segment_cost` can
/// answer any `[start, end)` query in O(1). Implementations must be
/// missing-aware: a NaN sample never makes a segment cost non-finite.
pub trait CostModel {
    type Cache;

    fn name(&self) -> &'static str;

    fn precompute(&self, values: &[f64]) -> Result<Self::Cache, SifterError>;

    /// Cost of fitting one segment over the half-open range `[start, end)`.
    fn segment_cost(&self, cache: &Self::Cache, start: usize, end: usize) -> f64;
}
