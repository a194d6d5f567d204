// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SifterError;

/// A temporally contiguous cluster of changepoints: one candidate incident
/// window on the 0..n-1 time axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Segment id assigned in ascending time order, starting at 0.
    pub label: usize,
    /// Smallest changepoint index in the segment.
    pub start_time: usize,
    /// Largest changepoint index in the segment.
    pub end_time: usize,
}

impl Segment {
    /// Builds a segment, enforcing `start_time <= end_time < series_len`.
    pub fn new(
        label: usize,
        start_time: usize,
        end_time: usize,
        series_len: usize,
    ) -> Result<Self, SifterError> {
        if start_time > end_time {
            return Err(SifterError::invalid_input(format!(
                "segment bounds out of order: start_time={start_time} > end_time={end_time}"
            )));
        }
        if end_time >= series_len {
            return Err(SifterError::invalid_input(format!(
                "segment end_time={end_time} outside series of length {series_len}"
            )));
        }
        Ok(Self {
            label,
            start_time,
            end_time,
        })
    }
}
