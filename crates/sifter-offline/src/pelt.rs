// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sifter_core::SifterError;
use sifter_costs::CostModel;

/// Configuration for [`Pelt`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeltConfig {
    /// Penalty added per extra segment. Zero is legal: a zero-variance series
    /// derives a zero penalty and the search runs unpenalized.
    pub beta: f64,
    pub min_segment_len: usize,
}

impl Default for PeltConfig {
    fn default() -> Self {
        Self {
            beta: 1.0,
            min_segment_len: 2,
        }
    }
}

impl PeltConfig {
    fn validate(&self) -> Result<(), SifterError> {
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(SifterError::invalid_config(format!(
                "PeltConfig.beta must be finite and >= 0.0; got {}",
                self.beta
            )));
        }
        if self.min_segment_len == 0 {
            return Err(SifterError::invalid_config(
                "PeltConfig.min_segment_len must be >= 1; got 0",
            ));
        }
        Ok(())
    }
}

/// Pruned Exact Linear Time search over one series.
#[derive(Debug)]
pub struct Pelt<C: CostModel> {
    cost_model: C,
    config: PeltConfig,
}

impl<C: CostModel> Pelt<C> {
    pub fn new(cost_model: C, config: PeltConfig) -> Result<Self, SifterError> {
        config.validate()?;
        Ok(Self { cost_model, config })
    }

    pub fn config(&self) -> &PeltConfig {
        &self.config
    }

    /// Returns segment ends in ascending order, terminated by `n`.
    ///
    /// An empty series yields no breakpoints; a series too short to split
    /// yields the single segment `[n]`. Ties between equally good
    /// predecessors resolve to the leftmost split.
    pub fn detect(&self, values: &[f64]) -> Result<Vec<usize>, SifterError> {
        let n = values.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        let min_len = self.config.min_segment_len;
        if n < 2 * min_len {
            return Ok(vec![n]);
        }

        let beta = self.config.beta;
        let cache = self.cost_model.precompute(values)?;

        let mut f = vec![f64::INFINITY; n + 1];
        let mut last_cp = vec![usize::MAX; n + 1];
        f[0] = -beta;
        last_cp[0] = 0;

        let mut candidate_set = vec![0usize];

        for t in min_len..=n {
            let mut scored = vec![None; candidate_set.len()];
            let mut best_cost = f64::INFINITY;
            let mut best_tau = usize::MAX;

            for (idx, &tau) in candidate_set.iter().enumerate() {
                if t - tau < min_len || !f[tau].is_finite() {
                    continue;
                }
                let segment_cost = self.cost_model.segment_cost(&cache, tau, t);
                if !segment_cost.is_finite() {
                    return Err(SifterError::numerical_issue(format!(
                        "non-finite segment cost at [{tau}, {t}): {segment_cost}"
                    )));
                }
                let score_no_penalty = f[tau] + segment_cost;
                let candidate = score_no_penalty + beta;
                scored[idx] = Some(score_no_penalty);
                if candidate < best_cost || (candidate == best_cost && tau < best_tau) {
                    best_cost = candidate;
                    best_tau = tau;
                }
            }

            if best_tau == usize::MAX {
                continue;
            }
            f[t] = best_cost;
            last_cp[t] = best_tau;

            // PELT pruning: a predecessor that cannot beat the current best
            // even without its penalty can never become optimal again. The
            // comparison is strict so that with beta = 0 a tied predecessor
            // survives and the leftmost tie-break stays reachable.
            let mut next_candidate_set = Vec::with_capacity(candidate_set.len() + 1);
            for (idx, &tau) in candidate_set.iter().enumerate() {
                match scored[idx] {
                    Some(score_no_penalty) if score_no_penalty > best_cost => {}
                    _ => next_candidate_set.push(tau),
                }
            }
            if t < n {
                next_candidate_set.push(t);
            }
            candidate_set = next_candidate_set;
        }

        if !f[n].is_finite() {
            return Err(SifterError::numerical_issue(
                "no feasible segmentation reached the terminal index",
            ));
        }

        reconstruct_breakpoints(n, &last_cp)
    }
}

fn reconstruct_breakpoints(n: usize, last_cp: &[usize]) -> Result<Vec<usize>, SifterError> {
    let mut reverse = vec![n];
    let mut cursor = n;
    let mut hops = 0usize;

    while cursor > 0 {
        hops += 1;
        if hops > n + 1 {
            return Err(SifterError::numerical_issue(
                "invalid backtrack state: cycle detected",
            ));
        }
        let tau = last_cp[cursor];
        if tau == usize::MAX || tau >= cursor {
            return Err(SifterError::numerical_issue(format!(
                "invalid backtrack state: predecessor {tau} at t={cursor}"
            )));
        }
        if tau == 0 {
            break;
        }
        reverse.push(tau);
        cursor = tau;
    }

    reverse.reverse();
    Ok(reverse)
}
