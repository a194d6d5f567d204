// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Segment cost models shared by the offline changepoint searches.

pub mod l2;
pub mod model;
pub mod normal;

pub use l2::{CostL2Mean, L2Cache};
pub use model::CostModel;
pub use normal::{CostNormalMeanVar, NormalCache};
