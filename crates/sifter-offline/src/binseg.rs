// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sifter_core::SifterError;
use sifter_costs::CostModel;

/// Configuration for [`BinSeg`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinSegConfig {
    /// Minimum cost reduction a split must achieve to be kept.
    pub beta: f64,
    pub min_segment_len: usize,
}

impl Default for BinSegConfig {
    fn default() -> Self {
        Self {
            beta: 1.0,
            min_segment_len: 2,
        }
    }
}

impl BinSegConfig {
    fn validate(&self) -> Result<(), SifterError> {
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(SifterError::invalid_config(format!(
                "BinSegConfig.beta must be finite and >= 0.0; got {}",
                self.beta
            )));
        }
        if self.min_segment_len == 0 {
            return Err(SifterError::invalid_config(
                "BinSegConfig.min_segment_len must be >= 1; got 0",
            ));
        }
        Ok(())
    }
}

/// Greedy binary segmentation over one series.
///
/// Splits the segment whose best split gains the most, until the best
/// remaining gain falls below the penalty. With a zero penalty (zero-variance
/// input) every admissible split is taken; the simple-change filter removes
/// constant series before this point.
#[derive(Debug)]
pub struct BinSeg<C: CostModel> {
    cost_model: C,
    config: BinSegConfig,
}

impl<C: CostModel> BinSeg<C> {
    pub fn new(cost_model: C, config: BinSegConfig) -> Result<Self, SifterError> {
        config.validate()?;
        Ok(Self { cost_model, config })
    }

    pub fn config(&self) -> &BinSegConfig {
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
        let mut breakpoints: Vec<usize> = Vec::new();

        loop {
            let mut best: Option<(f64, usize)> = None;

            let mut start = 0usize;
            for &end in breakpoints.iter().chain(std::iter::once(&n)) {
                if end - start >= 2 * min_len {
                    let base = self.cost_model.segment_cost(&cache, start, end);
                    for split in (start + min_len)..=(end - min_len) {
                        let gain = base
                            - self.cost_model.segment_cost(&cache, start, split)
                            - self.cost_model.segment_cost(&cache, split, end);
                        if !gain.is_finite() {
                            return Err(SifterError::numerical_issue(format!(
                                "non-finite split gain at [{start}, {split}, {end})"
                            )));
                        }
                        // Strict improvement keeps the leftmost split on ties.
                        if best.is_none_or(|(best_gain, _)| gain > best_gain) {
                            best = Some((gain, split));
                        }
                    }
                }
                start = end;
            }

            match best {
                Some((gain, split)) if gain >= self.config.beta => {
                    let position = breakpoints.partition_point(|&b| b < split);
                    breakpoints.insert(position, split);
                }
                _ => break,
            }
        }

        breakpoints.push(n);
        Ok(breakpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::{BinSeg, BinSegConfig};
    use sifter_costs::{CostL2Mean, CostNormalMeanVar};

    fn binseg(beta: f64) -> BinSeg<CostL2Mean> {
        BinSeg::new(
            CostL2Mean,
            BinSegConfig {
                beta,
                min_segment_len: 2,
            },
        )
        .expect("config should be valid")
    }

    #[test]
    fn config_validation_rejects_bad_values() {
        assert!(
            BinSeg::new(
                CostL2Mean,
                BinSegConfig {
                    beta: f64::INFINITY,
                    min_segment_len: 2
                }
            )
            .is_err()
        );
        assert!(
            BinSeg::new(
                CostL2Mean,
                BinSegConfig {
                    beta: 1.0,
                    min_segment_len: 0
                }
            )
            .is_err()
        );
    }

    #[test]
    fn single_level_shift_is_found_exactly() {
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 10.0];
        assert_eq!(
            binseg(1.0).detect(&values).expect("detect succeeds"),
            vec![5, 10]
        );
    }

    #[test]
    fn recursive_splits_recover_two_shifts() {
        let values = [
            0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 10.0, -5.0, -5.0, -5.0, -5.0, -5.0,
        ];
        assert_eq!(
            binseg(1.0).detect(&values).expect("detect succeeds"),
            vec![5, 10, 15]
        );
    }

    #[test]
    fn constant_series_with_positive_penalty_has_no_changes() {
        assert_eq!(
            binseg(1.0).detect(&[2.0; 32]).expect("detect succeeds"),
            vec![32]
        );
    }

    #[test]
    fn zero_penalty_on_constant_input_splits_everywhere() {
        let breakpoints = binseg(0.0).detect(&[2.0; 16]).expect("detect succeeds");
        // Every admissible split is taken once the gain threshold is zero.
        assert!(breakpoints.len() > 4);
        assert_eq!(breakpoints.last().copied(), Some(16));
        for window in breakpoints.windows(2) {
            assert!(window[1] - window[0] >= 2);
        }
    }

    #[test]
    fn normal_cost_detects_variance_change() {
        let mut values = Vec::new();
        for _ in 0..8 {
            values.push(-0.5);
            values.push(0.5);
        }
        for _ in 0..8 {
            values.push(-6.0);
            values.push(6.0);
        }
        let detector = BinSeg::new(
            CostNormalMeanVar,
            BinSegConfig {
                beta: 10.0,
                min_segment_len: 2,
            },
        )
        .expect("config should be valid");
        let breakpoints = detector.detect(&values).expect("detect succeeds");
        assert!(breakpoints.contains(&16), "got {breakpoints:?}");
    }
}
