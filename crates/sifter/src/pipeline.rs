// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::aggregate::{ChangePointIndex, detect_multi_changepoints};
use crate::filter::simple_filter;
use crate::pool::build_pool;
use sifter_core::{Diagnostics, SeriesFrame, SifterConfig, SifterError};
use sifter_segment::{KdeSegmenter, SelectedSegment, label_metric_sets, select_segment};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of one pipeline run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiftReport {
    /// The reduced frame, columns in input order.
    pub series: SeriesFrame,
    /// The winning segment, absent when nothing changed.
    pub segment: Option<SelectedSegment>,
    pub diagnostics: Diagnostics,
}

/// The metric reduction pipeline.
///
/// Four stages: a cheap no-change filter, per-metric changepoint
/// searches, KDE clustering of the pooled change points, and selection
/// of the dominant cluster. Construction validates the configuration
/// once; each run borrows the input frame and produces a fresh report.
#[derive(Clone, Debug)]
pub struct Sifter {
    config: SifterConfig,
}

impl Sifter {
    pub fn new(config: SifterConfig) -> Result<Self, SifterError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SifterConfig {
        &self.config
    }

    /// Full pipeline, returning only the reduced frame.
    pub fn sift(&self, frame: &SeriesFrame) -> Result<SeriesFrame, SifterError> {
        self.sift_with_segment(frame).map(|report| report.series)
    }

    /// Full pipeline, returning the reduced frame together with the
    /// selected segment and run diagnostics.
    pub fn sift_with_segment(&self, frame: &SeriesFrame) -> Result<SiftReport, SifterError> {
        self.run(frame, true)
    }

    /// Filter and detection only: keeps every metric with at least one
    /// change point, skipping clustering and selection.
    pub fn detect_only(&self, frame: &SeriesFrame) -> Result<SiftReport, SifterError> {
        self.run(frame, false)
    }

    fn run(&self, frame: &SeriesFrame, segment_stage: bool) -> Result<SiftReport, SifterError> {
        let started = Instant::now();
        let mut diagnostics = Diagnostics {
            n: frame.n_rows(),
            d: frame.n_cols(),
            algorithm: Cow::Borrowed(self.config.search_method.as_str()),
            cost_model: Cow::Borrowed(self.config.cost_model.as_str()),
            ..Diagnostics::default()
        };

        let pool = build_pool(self.config.parallelism)?;
        let filtered = if self.config.skip_simple_filter {
            diagnostics
                .notes
                .push("simple filter skipped by configuration".to_string());
            frame.clone()
        } else {
            let kept = simple_filter(pool.as_ref(), frame)?;
            debug!(
                kept = kept.n_cols(),
                total = frame.n_cols(),
                "simple filter"
            );
            diagnostics.notes.push(format!(
                "simple filter kept {} of {} columns",
                kept.n_cols(),
                frame.n_cols()
            ));
            kept
        };

        if filtered.is_empty() || filtered.n_rows() == 0 {
            diagnostics
                .warnings
                .push("no columns survived the simple filter".to_string());
            return Ok(self.finish(SeriesFrame::empty(), None, diagnostics, started));
        }

        let index = detect_multi_changepoints(pool.as_ref(), &filtered, &self.config)?;
        debug!(
            changing = index.per_metric.len(),
            silent = index.silent_metrics.len(),
            "changepoint detection"
        );
        diagnostics.notes.push(format!(
            "detection found change points in {} of {} columns",
            index.per_metric.len(),
            filtered.n_cols()
        ));

        if index.is_empty() {
            diagnostics
                .warnings
                .push("no change points detected in any column".to_string());
            return Ok(self.finish(SeriesFrame::empty(), None, diagnostics, started));
        }

        if !segment_stage {
            let keep: BTreeSet<String> = index.per_metric.keys().cloned().collect();
            let series = filtered.select(&keep);
            return Ok(self.finish(series, None, diagnostics, started));
        }

        let (series, segment) = self.segment_and_select(&filtered, &index, &mut diagnostics)?;
        Ok(self.finish(series, segment, diagnostics, started))
    }

    fn segment_and_select(
        &self,
        filtered: &SeriesFrame,
        index: &ChangePointIndex,
        diagnostics: &mut Diagnostics,
    ) -> Result<(SeriesFrame, Option<SelectedSegment>), SifterError> {
        let segmenter = KdeSegmenter::new(self.config.kde_bandwidth, true)?;
        let segmentation = segmenter.segment(&index.positions(), filtered.n_rows())?;
        diagnostics.notes.push(format!(
            "kde clustering produced {} segment(s)",
            segmentation.label_to_points.len()
        ));

        let label_to_metrics =
            label_metric_sets(&index.per_metric, &index.pooled, &segmentation.labels);
        let selected = select_segment(
            &label_to_metrics,
            &index.per_metric,
            &segmentation.label_to_points,
            self.config.segment_selection,
            filtered.n_rows(),
        )?;

        match selected {
            Some(selected) => {
                diagnostics.notes.push(format!(
                    "selected segment label {} covering {} metric(s)",
                    selected.segment.label,
                    selected.metrics.len()
                ));
                let series = filtered.select(&selected.metrics);
                Ok((series, Some(selected)))
            }
            None => {
                diagnostics
                    .warnings
                    .push("no segment selectable from the detected change points".to_string());
                Ok((SeriesFrame::empty(), None))
            }
        }
    }

    fn finish(
        &self,
        series: SeriesFrame,
        segment: Option<SelectedSegment>,
        mut diagnostics: Diagnostics,
        started: Instant,
    ) -> SiftReport {
        diagnostics.runtime_ms = Some(started.elapsed().as_millis() as u64);
        info!(
            kept = series.n_cols(),
            total = diagnostics.d,
            runtime_ms = diagnostics.runtime_ms,
            "sift finished"
        );
        SiftReport {
            series,
            segment,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Sifter;
    use sifter_core::{Parallelism, SeriesFrame, SifterConfig};

    fn step(shift_at: usize, n: usize, level: f64) -> Vec<f64> {
        (0..n)
            .map(|t| if t < shift_at { 0.0 } else { level })
            .collect()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SifterConfig {
            kde_bandwidth: 0.0,
            ..SifterConfig::default()
        };
        assert!(Sifter::new(config).is_err());
    }

    #[test]
    fn empty_frame_short_circuits() {
        let sifter = Sifter::new(SifterConfig::default()).expect("config should validate");
        let report = sifter
            .sift_with_segment(&SeriesFrame::empty())
            .expect("run should succeed");
        assert!(report.series.is_empty());
        assert!(report.segment.is_none());
        assert!(!report.diagnostics.warnings.is_empty());
    }

    #[test]
    fn all_flat_input_reduces_to_nothing() {
        let frame = SeriesFrame::new(vec![
            ("a".to_string(), vec![1.0; 40]),
            ("b".to_string(), vec![2.0; 40]),
        ])
        .expect("frame should build");
        let sifter = Sifter::new(SifterConfig::default()).expect("config should validate");
        let report = sifter.sift_with_segment(&frame).expect("run should succeed");
        assert!(report.series.is_empty());
        assert!(report.segment.is_none());
    }

    #[test]
    fn single_shifted_metric_survives_with_its_segment() {
        let frame = SeriesFrame::new(vec![
            ("flat".to_string(), vec![3.0; 80]),
            ("shift".to_string(), step(40, 80, 10.0)),
        ])
        .expect("frame should build");
        let sifter = Sifter::new(SifterConfig::default()).expect("config should validate");
        let report = sifter.sift_with_segment(&frame).expect("run should succeed");

        assert_eq!(report.series.names(), &["shift".to_string()]);
        let segment = report.segment.expect("a segment should be selected");
        assert_eq!(segment.segment.label, 0);
        assert_eq!(segment.segment.start_time, 40);
        assert_eq!(segment.segment.end_time, 40);
        assert!(segment.metrics.contains("shift"));
    }

    #[test]
    fn detect_only_keeps_every_changing_metric() {
        let frame = SeriesFrame::new(vec![
            ("early".to_string(), step(20, 100, 8.0)),
            ("late".to_string(), step(70, 100, 8.0)),
            ("flat".to_string(), vec![0.5; 100]),
        ])
        .expect("frame should build");
        let sifter = Sifter::new(SifterConfig::default()).expect("config should validate");
        let report = sifter.detect_only(&frame).expect("run should succeed");

        assert_eq!(
            report.series.names(),
            &["early".to_string(), "late".to_string()]
        );
        assert!(report.segment.is_none());
    }

    #[test]
    fn skip_simple_filter_passes_flat_columns_to_detection() {
        let frame = SeriesFrame::new(vec![("flat".to_string(), vec![1.0; 50])])
            .expect("frame should build");
        let config = SifterConfig {
            skip_simple_filter: true,
            ..SifterConfig::default()
        };
        let sifter = Sifter::new(config).expect("config should validate");
        let report = sifter.sift_with_segment(&frame).expect("run should succeed");
        // The search finds nothing in a flat series, so the outcome
        // matches the filtered path while exercising the detection stage.
        assert!(report.series.is_empty());
        assert!(
            report
                .diagnostics
                .notes
                .iter()
                .any(|note| note.contains("skipped"))
        );
    }

    #[test]
    fn worker_count_does_not_change_the_result() {
        let frame = SeriesFrame::new(
            (0..12)
                .map(|i| {
                    let name = format!("m{i:02}");
                    let at = 30 + (i % 3);
                    (name, step(at, 90, 5.0 + i as f64))
                })
                .collect(),
        )
        .expect("frame should build");

        let baseline = Sifter::new(SifterConfig {
            parallelism: Parallelism::Workers(1),
            ..SifterConfig::default()
        })
        .expect("config should validate")
        .sift_with_segment(&frame)
        .expect("run should succeed");

        for parallelism in [Parallelism::Workers(3), Parallelism::All] {
            let report = Sifter::new(SifterConfig {
                parallelism,
                ..SifterConfig::default()
            })
            .expect("config should validate")
            .sift_with_segment(&frame)
            .expect("run should succeed");
            assert_eq!(report.series, baseline.series, "parallelism {parallelism:?}");
            assert_eq!(report.segment, baseline.segment);
        }
    }
}
