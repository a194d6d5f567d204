// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared types for the sifter metric-reduction pipeline: the column frame,
//! pipeline configuration, error taxonomy, and NaN-aware statistics helpers.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod segment;
pub mod stats;

pub use config::{
    CostModelKind, Parallelism, Penalty, SearchMethod, SegmentSelection, SifterConfig,
};
pub use diagnostics::Diagnostics;
pub use error::SifterError;
pub use frame::SeriesFrame;
pub use segment::Segment;
pub use stats::{PrefixStats, is_missing, nan_std};
