// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Per-metric offline changepoint searches: pelt, binseg, and bottomup,
//! plus missing-run boundary detection and the detector that unites both.

pub mod binseg;
pub mod bottomup;
pub mod detector;
pub mod missing;
pub mod pelt;

pub use binseg::{BinSeg, BinSegConfig};
pub use bottomup::{BottomUp, BottomUpConfig};
pub use detector::{MIN_SEGMENT_LEN, detect_changepoints, resolve_penalty};
pub use missing::missing_run_starts;
pub use pelt::{Pelt, PeltConfig};
