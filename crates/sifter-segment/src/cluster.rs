// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::kde::{GaussianKde, strict_local_minima};
use sifter_core::SifterError;
use std::collections::{BTreeMap, BTreeSet};

/// Temporal clustering of change point positions.
///
/// Change points from all metrics are pooled, a Gaussian KDE over their
/// positions is evaluated on the integer grid `0..series_len`, and the
/// strict local minima of the density curve partition the timeline into
/// labelled clusters.
#[derive(Clone, Debug)]
pub struct KdeSegmenter {
    bandwidth: f64,
    unique_values: bool,
}

/// Result of clustering: one label per pooled change point, plus the
/// positions grouped by label.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segmentation {
    /// `labels[i]` is the cluster label of the i-th pooled change point.
    pub labels: Vec<usize>,
    /// Positions belonging to each cluster, in ascending label order.
    pub label_to_points: BTreeMap<usize, Vec<usize>>,
}

impl KdeSegmenter {
    pub fn new(bandwidth: f64, unique_values: bool) -> Result<Self, SifterError> {
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(SifterError::invalid_config(format!(
                "kde bandwidth must be finite and > 0.0; got {bandwidth}"
            )));
        }
        Ok(Self {
            bandwidth,
            unique_values,
        })
    }

    /// Cluster pooled change point positions on a series of length
    /// `series_len`.
    ///
    /// With zero spread among the positions the density curve has no
    /// interior minimum, so every point lands in cluster 0.
    pub fn segment(
        &self,
        points: &[usize],
        series_len: usize,
    ) -> Result<Segmentation, SifterError> {
        if points.is_empty() {
            return Ok(Segmentation::default());
        }
        if let Some(&max) = points.iter().max()
            && max >= series_len
        {
            return Err(SifterError::invalid_input(format!(
                "change point {max} is out of range for series length {series_len}"
            )));
        }

        let boundaries = if spread_is_zero(points) {
            Vec::new()
        } else {
            let kde = GaussianKde::new(points, self.bandwidth)?;
            let curve = kde.evaluate_grid(series_len);
            strict_local_minima(&curve)
        };

        let labels: Vec<usize> = points
            .iter()
            .map(|&p| boundaries.partition_point(|&b| b <= p))
            .collect();

        let mut label_to_points: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (&point, &label) in points.iter().zip(&labels) {
            label_to_points.entry(label).or_default().push(point);
        }
        if self.unique_values {
            for group in label_to_points.values_mut() {
                group.sort_unstable();
                group.dedup();
            }
        }

        Ok(Segmentation {
            labels,
            label_to_points,
        })
    }
}

fn spread_is_zero(points: &[usize]) -> bool {
    points.iter().all(|&p| p == points[0])
}

/// Group metric names by the cluster labels their change points fall in.
///
/// A metric appears under every label that at least one of its change
/// points received.
pub fn label_metric_sets(
    per_metric: &BTreeMap<String, Vec<usize>>,
    pooled: &[(String, usize)],
    labels: &[usize],
) -> BTreeMap<usize, BTreeSet<String>> {
    debug_assert_eq!(pooled.len(), labels.len());
    let mut out: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
    for ((name, _), &label) in pooled.iter().zip(labels) {
        if per_metric.contains_key(name) {
            out.entry(label).or_default().insert(name.clone());
        }
    }
    out
}
