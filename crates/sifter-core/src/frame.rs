// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SifterError;
use std::collections::BTreeSet;

/// Ordered table of named f64 columns over an implicit 0..n-1 time index.
///
/// IEEE-754 NaN denotes a missing sample. A frame is immutable once built;
/// every pipeline stage derives a new frame instead of mutating in place.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesFrame {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl SeriesFrame {
    /// Builds a validated frame from `(name, values)` pairs.
    ///
    /// All columns must share one length; duplicate names are rejected.
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> Result<Self, SifterError> {
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        let mut seen = BTreeSet::new();
        let mut n_rows = None;

        for (name, column) in columns {
            if !seen.insert(name.clone()) {
                return Err(SifterError::invalid_input(format!(
                    "duplicate column name: {name}"
                )));
            }
            match n_rows {
                None => n_rows = Some(column.len()),
                Some(expected) if expected != column.len() => {
                    return Err(SifterError::invalid_input(format!(
                        "ragged column {name}: got {} rows, expected {expected}",
                        column.len()
                    )));
                }
                Some(_) => {}
            }
            names.push(name);
            values.push(column);
        }

        Ok(Self {
            names,
            columns: values,
            n_rows: n_rows.unwrap_or(0),
        })
    }

    /// Frame with zero columns and zero rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True when the frame has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Iterates `(name, values)` pairs in original column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Restricts the frame to the named columns, preserving original order.
    ///
    /// Names absent from the frame are ignored.
    pub fn select(&self, keep: &BTreeSet<String>) -> Self {
        let mut names = Vec::new();
        let mut columns = Vec::new();
        for (name, column) in self.names.iter().zip(&self.columns) {
            if keep.contains(name) {
                names.push(name.clone());
                columns.push(column.clone());
            }
        }
        let n_rows = if columns.is_empty() { 0 } else { self.n_rows };
        Self {
            names,
            columns,
            n_rows,
        }
    }
}
