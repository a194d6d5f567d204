// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::borrow::Cow;

/// Structured metadata captured from one pipeline run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    /// Series length (rows).
    pub n: usize,
    /// Input column count.
    pub d: usize,
    pub algorithm: Cow<'static, str>,
    pub cost_model: Cow<'static, str>,
    pub runtime_ms: Option<u64>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            n: 0,
            d: 0,
            algorithm: Cow::Borrowed(""),
            cost_model: Cow::Borrowed(""),
            runtime_ms: None,
            notes: vec![],
            warnings: vec![],
        }
    }
}
