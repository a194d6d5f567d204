// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sifter_core::SifterError;
use std::f64::consts::PI;

/// 1-D Gaussian kernel density estimate with a fixed bandwidth.
#[derive(Clone, Debug)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    pub fn new(points: &[usize], bandwidth: f64) -> Result<Self, SifterError> {
        if points.is_empty() {
            return Err(SifterError::invalid_input(
                "GaussianKde requires at least one sample point",
            ));
        }
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(SifterError::invalid_config(format!(
                "kde bandwidth must be finite and > 0.0; got {bandwidth}"
            )));
        }
        Ok(Self {
            points: points.iter().map(|&p| p as f64).collect(),
            bandwidth,
        })
    }

    /// Density at one position.
    pub fn density_at(&self, t: f64) -> f64 {
        let norm = 1.0 / (self.points.len() as f64 * self.bandwidth * (2.0 * PI).sqrt());
        let mut acc = 0.0;
        for &point in &self.points {
            let u = (t - point) / self.bandwidth;
            acc += (-0.5 * u * u).exp();
        }
        acc * norm
    }

    /// Density evaluated at every integer position `0..grid_len`.
    pub fn evaluate_grid(&self, grid_len: usize) -> Vec<f64> {
        (0..grid_len).map(|t| self.density_at(t as f64)).collect()
    }
}

/// Interior positions strictly below both neighbors.
///
/// Plateaus are not minima, matching the strict-comparison extrema search
/// the segmentation step relies on.
pub fn strict_local_minima(curve: &[f64]) -> Vec<usize> {
    let mut minima = Vec::new();
    for idx in 1..curve.len().saturating_sub(1) {
        if curve[idx] < curve[idx - 1] && curve[idx] < curve[idx + 1] {
            minima.push(idx);
        }
    }
    minima
}
