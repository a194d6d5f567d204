// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Error type shared by every stage of the reduction pipeline.
///
/// Configuration problems are rejected before any data is touched; degenerate
/// inputs (zero rows, zero columns, all-missing series) are not errors and
/// degrade to empty results instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SifterError {
    /// Unknown keyword or out-of-domain value in the pipeline configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Structurally invalid input data (ragged columns, duplicate names).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A computation produced a non-finite or otherwise unusable value.
    #[error("numerical issue: {0}")]
    NumericalIssue(String),
    /// An execution resource (worker pool) could not be acquired.
    #[error("resource limit: {0}")]
    ResourceLimit(String),
}

impl SifterError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn numerical_issue(message: impl Into<String>) -> Self {
        Self::NumericalIssue(message.into())
    }

    pub fn resource_limit(message: impl Into<String>) -> Self {
        Self::ResourceLimit(message.into())
    }
}
