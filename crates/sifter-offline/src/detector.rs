// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::binseg::{BinSeg, BinSegConfig};
use crate::bottomup::{BottomUp, BottomUpConfig};
use crate::missing::missing_run_starts;
use crate::pelt::{Pelt, PeltConfig};
use sifter_core::{CostModelKind, Penalty, SearchMethod, SifterConfig, SifterError, nan_std};
use sifter_costs::{CostL2Mean, CostNormalMeanVar};

/// Minimum samples per segment, fixed for every search.
pub const MIN_SEGMENT_LEN: usize = 2;

/// Resolves the penalty basis against the per-metric standard deviation.
///
/// A zero sigma resolves to a zero penalty and the search then runs
/// unpenalized. The simple-change filter removes truly constant metrics
/// before this point.
pub fn resolve_penalty(
    penalty: Penalty,
    penalty_adjust: f64,
    sigma: f64,
    n: usize,
) -> Result<f64, SifterError> {
    let basis = match penalty {
        Penalty::Aic => sigma * sigma,
        Penalty::Bic => (n as f64).ln() * sigma * sigma,
        Penalty::Manual(value) => value,
    };
    let beta = basis * penalty_adjust;
    if !beta.is_finite() || beta < 0.0 {
        return Err(SifterError::numerical_issue(format!(
            "resolved penalty must be finite and >= 0.0; got beta={beta} \
             (penalty={penalty:?}, sigma={sigma}, n={n})"
        )));
    }
    Ok(beta)
}

fn run_search(
    values: &[f64],
    method: SearchMethod,
    cost_model: CostModelKind,
    beta: f64,
) -> Result<Vec<usize>, SifterError> {
    match method {
        // pelt always minimizes the linear-kernel (L2) cost; cost_model only
        // applies to the binseg and bottomup searches.
        SearchMethod::Pelt => Pelt::new(
            CostL2Mean,
            PeltConfig {
                beta,
                min_segment_len: MIN_SEGMENT_LEN,
            },
        )?
        .detect(values),
        SearchMethod::BinSeg => {
            let config = BinSegConfig {
                beta,
                min_segment_len: MIN_SEGMENT_LEN,
            };
            match cost_model {
                CostModelKind::L2 => BinSeg::new(CostL2Mean, config)?.detect(values),
                CostModelKind::Normal => BinSeg::new(CostNormalMeanVar, config)?.detect(values),
            }
        }
        SearchMethod::BottomUp => {
            let config = BottomUpConfig {
                beta,
                min_segment_len: MIN_SEGMENT_LEN,
            };
            match cost_model {
                CostModelKind::L2 => BottomUp::new(CostL2Mean, config)?.detect(values),
                CostModelKind::Normal => BottomUp::new(CostNormalMeanVar, config)?.detect(values),
            }
        }
    }
}

/// Detects changepoints for one metric: the statistical search united with
/// missing-run starts, sorted and deduplicated, every index in `[0, n)`.
pub fn detect_changepoints(
    values: &[f64],
    config: &SifterConfig,
) -> Result<Vec<usize>, SifterError> {
    let n = values.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let sigma = nan_std(values);
    let beta = resolve_penalty(config.penalty, config.penalty_adjust, sigma, n)?;
    let breakpoints = run_search(values, config.search_method, config.cost_model, beta)?;

    // Every search terminates its breakpoint list with the sentinel n.
    let mut change_points: Vec<usize> = breakpoints.into_iter().filter(|&b| b < n).collect();
    change_points.extend(missing_run_starts(values));
    change_points.sort_unstable();
    change_points.dedup();
    Ok(change_points)
}
