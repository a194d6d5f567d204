// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SifterError;
use std::fmt;
use std::str::FromStr;

/// Changepoint search algorithm run per metric.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMethod {
    /// Penalized optimal partitioning with pruning over the L2 kernel cost.
    Pelt,
    /// Greedy binary segmentation over the configured cost model.
    BinSeg,
    /// Finest-partition merge over the configured cost model.
    BottomUp,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pelt => "pelt",
            Self::BinSeg => "binseg",
            Self::BottomUp => "bottomup",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMethod {
    type Err = SifterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pelt" => Ok(Self::Pelt),
            "binseg" => Ok(Self::BinSeg),
            "bottomup" => Ok(Self::BottomUp),
            other => Err(SifterError::invalid_config(format!(
                "unknown search_method: {other} (expected pelt, binseg, or bottomup)"
            ))),
        }
    }
}

/// Segment cost model used by the binseg and bottomup searches.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostModelKind {
    /// Squared deviation from the segment mean.
    L2,
    /// Gaussian mean/variance log-likelihood cost.
    Normal,
}

impl CostModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L2 => "l2",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for CostModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostModelKind {
    type Err = SifterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l2" => Ok(Self::L2),
            "normal" => Ok(Self::Normal),
            other => Err(SifterError::invalid_config(format!(
                "unknown cost_model: {other} (expected l2 or normal)"
            ))),
        }
    }
}

/// Penalty magnitude basis for the changepoint search.
///
/// The keyword forms are scaled by the per-metric standard deviation before
/// the search runs; `Manual` is taken literally. Either way the resolved
/// value is multiplied by `penalty_adjust`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Penalty {
    /// sigma^2
    Aic,
    /// ln(n) * sigma^2
    Bic,
    /// A literal non-negative penalty value.
    Manual(f64),
}

impl FromStr for Penalty {
    type Err = SifterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aic" => Ok(Self::Aic),
            "bic" => Ok(Self::Bic),
            other => match other.parse::<f64>() {
                Ok(value) => Ok(Self::Manual(value)),
                Err(_) => Err(SifterError::invalid_config(format!(
                    "unparseable penalty: {other} (expected aic, bic, or a number)"
                ))),
            },
        }
    }
}

/// Policy for picking among competing segments.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentSelection {
    /// Largest metric-set cardinality.
    Max,
    /// Largest sum of 1/changepoint-count over the segment's metrics.
    WeightedMax,
}

impl SegmentSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::WeightedMax => "weighted_max",
        }
    }
}

impl FromStr for SegmentSelection {
    type Err = SifterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(Self::Max),
            "weighted_max" => Ok(Self::WeightedMax),
            other => Err(SifterError::invalid_config(format!(
                "unknown segment_selection_method: {other} (expected max or weighted_max)"
            ))),
        }
    }
}

/// Worker count for the parallel stages (simple filter and detection).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// One worker per available execution unit.
    All,
    /// A fixed worker count; `Workers(1)` forces strictly sequential runs.
    Workers(usize),
}

impl FromStr for Parallelism {
    type Err = SifterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => match other.parse::<usize>() {
                Ok(workers) if workers >= 1 => Ok(Self::Workers(workers)),
                _ => Err(SifterError::invalid_config(format!(
                    "unparseable parallelism: {other} (expected all or an integer >= 1)"
                ))),
            },
        }
    }
}

/// Full pipeline configuration, validated once per run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SifterConfig {
    pub search_method: SearchMethod,
    pub cost_model: CostModelKind,
    pub penalty: Penalty,
    pub penalty_adjust: f64,
    pub kde_bandwidth: f64,
    pub segment_selection: SegmentSelection,
    pub parallelism: Parallelism,
    /// Skip the stage-0 simple-change filter and run detection on every column.
    pub skip_simple_filter: bool,
}

impl Default for SifterConfig {
    fn default() -> Self {
        Self {
            search_method: SearchMethod::Pelt,
            cost_model: CostModelKind::L2,
            penalty: Penalty::Bic,
            penalty_adjust: 2.0,
            kde_bandwidth: 2.5,
            segment_selection: SegmentSelection::WeightedMax,
            parallelism: Parallelism::All,
            skip_simple_filter: false,
        }
    }
}

impl SifterConfig {
    pub fn validate(&self) -> Result<(), SifterError> {
        if !self.penalty_adjust.is_finite() || self.penalty_adjust <= 0.0 {
            return Err(SifterError::invalid_config(format!(
                "penalty_adjust must be finite and > 0.0; got {}",
                self.penalty_adjust
            )));
        }
        if let Penalty::Manual(value) = self.penalty
            && (!value.is_finite() || value < 0.0)
        {
            return Err(SifterError::invalid_config(format!(
                "manual penalty must be finite and >= 0.0; got {value}"
            )));
        }
        if !self.kde_bandwidth.is_finite() || self.kde_bandwidth <= 0.0 {
            return Err(SifterError::invalid_config(format!(
                "kde_bandwidth must be finite and > 0.0; got {}",
                self.kde_bandwidth
            )));
        }
        if let Parallelism::Workers(workers) = self.parallelism
            && workers == 0
        {
            return Err(SifterError::invalid_config(
                "parallelism must be >= 1 workers; got 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CostModelKind, Parallelism, Penalty, SearchMethod, SegmentSelection, SifterConfig,
    };

    #[test]
    fn defaults_match_documented_surface() {
        let config = SifterConfig::default();
        assert_eq!(config.search_method, SearchMethod::Pelt);
        assert_eq!(config.cost_model, CostModelKind::L2);
        assert_eq!(config.penalty, Penalty::Bic);
        assert_eq!(config.penalty_adjust, 2.0);
        assert_eq!(config.kde_bandwidth, 2.5);
        assert_eq!(config.segment_selection, SegmentSelection::WeightedMax);
        assert_eq!(config.parallelism, Parallelism::All);
        assert!(!config.skip_simple_filter);
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn keyword_parsing_accepts_known_values() {
        assert_eq!("pelt".parse::<SearchMethod>().unwrap(), SearchMethod::Pelt);
        assert_eq!(
            "binseg".parse::<SearchMethod>().unwrap(),
            SearchMethod::BinSeg
        );
        assert_eq!(
            "bottomup".parse::<SearchMethod>().unwrap(),
            SearchMethod::BottomUp
        );
        assert_eq!("l2".parse::<CostModelKind>().unwrap(), CostModelKind::L2);
        assert_eq!("aic".parse::<Penalty>().unwrap(), Penalty::Aic);
        assert_eq!("bic".parse::<Penalty>().unwrap(), Penalty::Bic);
        assert_eq!("12.5".parse::<Penalty>().unwrap(), Penalty::Manual(12.5));
        assert_eq!(
            "weighted_max".parse::<SegmentSelection>().unwrap(),
            SegmentSelection::WeightedMax
        );
        assert_eq!("all".parse::<Parallelism>().unwrap(), Parallelism::All);
        assert_eq!("4".parse::<Parallelism>().unwrap(), Parallelism::Workers(4));
    }

    #[test]
    fn unknown_keywords_fail_fast() {
        assert!("fancy".parse::<SearchMethod>().is_err());
        assert!("l7".parse::<CostModelKind>().is_err());
        assert!("bicc".parse::<Penalty>().is_err());
        assert!("biggest".parse::<SegmentSelection>().is_err());
        assert!("0".parse::<Parallelism>().is_err());
        assert!("some".parse::<Parallelism>().is_err());
    }

    #[test]
    fn validate_rejects_out_of_domain_values() {
        let mut config = SifterConfig {
            penalty_adjust: 0.0,
            ..SifterConfig::default()
        };
        assert!(config.validate().is_err());

        config.penalty_adjust = f64::NAN;
        assert!(config.validate().is_err());

        config.penalty_adjust = 2.0;
        config.kde_bandwidth = -1.0;
        assert!(config.validate().is_err());

        config.kde_bandwidth = 2.5;
        config.penalty = Penalty::Manual(f64::INFINITY);
        assert!(config.validate().is_err());

        config.penalty = Penalty::Manual(5.0);
        config.validate().expect("restored config should validate");
    }
}
