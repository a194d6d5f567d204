// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg(feature = "serde")]

use sifter::{SeriesFrame, SiftReport, Sifter, SifterConfig};

#[test]
fn report_round_trips_through_json() {
    let frame = SeriesFrame::new(vec![
        ("flat".to_string(), vec![1.0; 60]),
        (
            "shift".to_string(),
            (0..60)
                .map(|t| if t < 30 { 0.0 } else { 9.0 })
                .collect::<Vec<f64>>(),
        ),
    ])
    .expect("frame should build");

    let sifter = Sifter::new(SifterConfig::default()).expect("config should validate");
    let report = sifter.sift_with_segment(&frame).expect("run should succeed");

    let json = serde_json::to_string(&report).expect("serialization should succeed");
    let decoded: SiftReport = serde_json::from_str(&json).expect("deserialization should succeed");
    assert_eq!(decoded, report);
}

#[test]
fn config_round_trips_through_json() {
    let config = SifterConfig::default();
    let json = serde_json::to_string(&config).expect("serialization should succeed");
    let decoded: SifterConfig = serde_json::from_str(&json).expect("deserialization should succeed");
    assert_eq!(decoded, config);
}
