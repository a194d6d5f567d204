// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sifter_core::{Segment, SegmentSelection, SifterError};
use std::collections::{BTreeMap, BTreeSet};

/// The winning cluster: its time window plus the metrics that change in it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedSegment {
    pub segment: Segment,
    pub metrics: BTreeSet<String>,
}

/// Pick the cluster whose metrics matter most under the given policy.
///
/// `Max` scores a cluster by the number of distinct metrics changing in
/// it. `WeightedMax` scores it by the sum of `1 / k` over its metrics,
/// where `k` is the metric's total change point count, so metrics that
/// change rarely dominate metrics that change everywhere. Ties go to the
/// smallest label.
pub fn select_segment(
    label_to_metrics: &BTreeMap<usize, BTreeSet<String>>,
    metric_to_cps: &BTreeMap<String, Vec<usize>>,
    label_to_points: &BTreeMap<usize, Vec<usize>>,
    policy: SegmentSelection,
    series_len: usize,
) -> Result<Option<SelectedSegment>, SifterError> {
    let mut best: Option<(usize, f64)> = None;
    for (&label, metrics) in label_to_metrics {
        let score = match policy {
            SegmentSelection::Max => metrics.len() as f64,
            SegmentSelection::WeightedMax => metrics
                .iter()
                .map(|name| match metric_to_cps.get(name) {
                    Some(cps) if !cps.is_empty() => 1.0 / cps.len() as f64,
                    _ => 0.0,
                })
                .sum(),
        };
        // Strict comparison keeps the smallest label on ties; the map
        // iterates labels in ascending order.
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((label, score));
        }
    }

    let Some((label, _)) = best else {
        return Ok(None);
    };
    let points = label_to_points.get(&label).ok_or_else(|| {
        SifterError::invalid_input(format!("selected label {label} has no change points"))
    })?;
    let (&start, &end) = match (points.iter().min(), points.iter().max()) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(SifterError::invalid_input(format!(
                "selected label {label} has no change points"
            )));
        }
    };
    let segment = Segment::new(label, start, end, series_len)?;
    let metrics = label_to_metrics[&label].clone();
    Ok(Some(SelectedSegment { segment, metrics }))
}
