// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporal clustering of change points and segment selection.
//!
//! Pooled change point positions are scored with a Gaussian kernel
//! density estimate; strict local minima of the density curve split the
//! timeline into labelled clusters, and a selection policy picks the
//! cluster whose metrics matter most.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod kde;
pub mod select;

pub use cluster::{KdeSegmenter, Segmentation, label_metric_sets};
pub use kde::{GaussianKde, strict_local_minima};
pub use select::{SelectedSegment, select_segment};
