// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric reduction for incident analysis.
//!
//! Given a frame of time-aligned metrics, the pipeline drops columns
//! with no meaningful change, detects per-metric change points, clusters
//! the pooled change points in time, and keeps only the metrics of the
//! dominant cluster.
//!
//! ```
//! use sifter::{SeriesFrame, Sifter, SifterConfig};
//!
//! let frame = SeriesFrame::new(vec![
//!     ("flat".to_string(), vec![1.0; 60]),
//!     ("shift".to_string(), (0..60).map(|t| if t < 30 { 0.0 } else { 9.0 }).collect()),
//! ])?;
//! let sifter = Sifter::new(SifterConfig::default())?;
//! let reduced = sifter.sift(&frame)?;
//! assert_eq!(reduced.names(), &["shift".to_string()]);
//! # Ok::<(), sifter::SifterError>(())
//! ```

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod filter;
pub mod pool;
pub mod pipeline;

pub use aggregate::{ChangePointIndex, detect_multi_changepoints};
pub use filter::{has_simple_change, simple_filter};
pub use pipeline::{SiftReport, Sifter};

pub use sifter_core::{
    CostModelKind, Diagnostics, Parallelism, Penalty, SearchMethod, Segment, SegmentSelection,
    SeriesFrame, SifterConfig, SifterError,
};
pub use sifter_segment::SelectedSegment;
