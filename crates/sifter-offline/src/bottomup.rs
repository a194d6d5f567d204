// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sifter_core::SifterError;
use sifter_costs::CostModel;

/// Configuration for [`BottomUp`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BottomUpConfig {
    /// Cost increase below which two adjacent segments are merged.
    pub beta: f64,
    pub min_segment_len: usize,
}

impl Default for BottomUpConfig {
    fn default() -> Self {
        Self {
            beta: 1.0,
            min_segment_len: 2,
        }
    }
}

impl BottomUpConfig {
    fn validate(&self) -> Result<(), SifterError> {
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(SifterError::invalid_config(format!(
                "BottomUpConfig.beta must be finite and >= 0.0; got {}",
                self.beta
            )));
        }
        if self.min_segment_len == 0 {
            return Err(SifterError::invalid_config(
                "BottomUpConfig.min_segment_len must be >= 1; got 0",
            ));
        }
        Ok(())
    }
}

/// Merge-based search: start from the finest admissible partition and fuse
/// the cheapest adjacent pair until every remaining merge would cost at
/// least the penalty.
///
/// With a zero penalty (zero-variance input) no merge is admissible and the
/// finest partition survives whole; the simple-change filter removes constant
/// series before this point.
#[derive(Debug)]
pub struct BottomUp<C: CostModel> {
    cost_model: C,
    config: BottomUpConfig,
}

impl<C: CostModel> BottomUp<C> {
    pub fn new(cost_model: C, config: BottomUpConfig) -> Result<Self, SifterError> {
        config.validate()?;
        Ok(Self { cost_model, config })
    }

    pub fn config(&self) -> &BottomUpConfig {
        &self.config
    }

    /// Returns segment ends in ascending order, terminated by `n`.
    pub fn detect(&self, values: &[f64]) -> Result<Vec<usize>, SifterError> {
        let n = values.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        let min_len = self.config.min_segment_len;
        if n < 2 * min_len {
            return Ok(vec![n]);
        }

        let cache = self.cost_model.precompute(values)?;

        // Leaves of min_segment_len samples; the last leaf absorbs the
        // remainder so every leaf stays admissible.
        let mut boundaries: Vec<usize> = (1..)
            .map(|i| i * min_len)
            .take_while(|&b| n - b >= min_len)
            .collect();

        while !boundaries.is_empty() {
            let mut best: Option<(f64, usize)> = None;

            for (idx, &boundary) in boundaries.iter().enumerate() {
                let start = if idx == 0 { 0 } else { boundaries[idx - 1] };
                let end = if idx + 1 == boundaries.len() {
                    n
                } else {
                    boundaries[idx + 1]
                };
                let delta = self.cost_model.segment_cost(&cache, start, end)
                    - self.cost_model.segment_cost(&cache, start, boundary)
                    - self.cost_model.segment_cost(&cache, boundary, end);
                if !delta.is_finite() {
                    return Err(SifterError::numerical_issue(format!(
                        "non-finite merge delta at [{start}, {boundary}, {end})"
                    )));
                }
                // Strict improvement keeps the leftmost boundary on ties.
                if best.is_none_or(|(best_delta, _)| delta < best_delta) {
                    best = Some((delta, idx));
                }
            }

            match best {
                Some((delta, idx)) if delta < self.config.beta => {
                    boundaries.remove(idx);
                }
                _ => break,
            }
        }

        boundaries.push(n);
        Ok(boundaries)
    }
}

#[cfg(test)]
mod tests {
    use super::{BottomUp, BottomUpConfig};
    use sifter_costs::{CostL2Mean, CostNormalMeanVar};

    fn bottomup(beta: f64) -> BottomUp<CostL2Mean> {
        BottomUp::new(
            CostL2Mean,
            BottomUpConfig {
                beta,
                min_segment_len: 2,
            },
        )
        .expect("config should be valid")
    }

    #[test]
    fn config_validation_rejects_bad_values() {
        assert!(
            BottomUp::new(
                CostL2Mean,
                BottomUpConfig {
                    beta: f64::NAN,
                    min_segment_len: 2
                }
            )
            .is_err()
        );
        assert!(
            BottomUp::new(
                CostL2Mean,
                BottomUpConfig {
                    beta: 1.0,
                    min_segment_len: 0
                }
            )
            .is_err()
        );
    }

    #[test]
    fn constant_series_with_positive_penalty_merges_to_one_segment() {
        assert_eq!(
            bottomup(1.0).detect(&[7.0; 24]).expect("detect succeeds"),
            vec![24]
        );
    }

    #[test]
    fn single_level_shift_survives_merging() {
        let mut values = vec![0.0; 12];
        values.extend(vec![10.0; 12]);
        assert_eq!(
            bottomup(1.0).detect(&values).expect("detect succeeds"),
            vec![12, 24]
        );
    }

    #[test]
    fn zero_penalty_keeps_the_finest_partition() {
        let breakpoints = bottomup(0.0).detect(&[3.0; 12]).expect("detect succeeds");
        assert_eq!(breakpoints, vec![2, 4, 6, 8, 10, 12]);
    }

    #[test]
    fn short_series_yields_single_segment() {
        assert_eq!(
            bottomup(1.0).detect(&[1.0, 2.0]).expect("detect succeeds"),
            vec![2]
        );
    }

    #[test]
    fn normal_cost_merges_equal_variance_segments() {
        let mut values = Vec::new();
        for _ in 0..10 {
            values.push(-1.0);
            values.push(1.0);
        }
        let detector = BottomUp::new(
            CostNormalMeanVar,
            BottomUpConfig {
                beta: 5.0,
                min_segment_len: 2,
            },
        )
        .expect("config should be valid");
        let breakpoints = detector.detect(&values).expect("detect succeeds");
        assert_eq!(breakpoints, vec![20]);
    }
}
