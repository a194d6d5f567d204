// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::pool::map_columns;
use rayon::ThreadPool;
use sifter_core::{SeriesFrame, SifterConfig, SifterError};
use std::collections::{BTreeMap, BTreeSet};

/// Change points of every metric in one run, pooled and indexed.
///
/// Metrics without any change point are listed separately instead of
/// being folded into the pooled pairs under a sentinel.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangePointIndex {
    /// `(metric, position)` pairs in column order, positions ascending
    /// within each metric.
    pub pooled: Vec<(String, usize)>,
    /// Per-metric change point lists, only for metrics that have any.
    pub per_metric: BTreeMap<String, Vec<usize>>,
    /// Metrics the search found no change points in.
    pub silent_metrics: BTreeSet<String>,
}

impl ChangePointIndex {
    /// Pooled change point positions, in the pooled pair order.
    pub fn positions(&self) -> Vec<usize> {
        self.pooled.iter().map(|&(_, p)| p).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pooled.is_empty()
    }
}

/// Runs the per-metric search over every column of the frame.
///
/// The column order of the frame fixes the pooled pair order, so the
/// result is identical for any worker count.
pub fn detect_multi_changepoints(
    pool: Option<&ThreadPool>,
    frame: &SeriesFrame,
    config: &SifterConfig,
) -> Result<ChangePointIndex, SifterError> {
    let per_column = map_columns(pool, frame, |name, values| {
        let cps = sifter_offline::detect_changepoints(values, config)?;
        Ok((name.to_string(), cps))
    })?;

    let mut index = ChangePointIndex::default();
    for (name, cps) in per_column {
        if cps.is_empty() {
            index.silent_metrics.insert(name);
        } else {
            for &cp in &cps {
                index.pooled.push((name.clone(), cp));
            }
            index.per_metric.insert(name, cps);
        }
    }
    Ok(index)
}
