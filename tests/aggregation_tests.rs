// Interval aggregation: bucketing, averaging, gap-fill, ordering

mod common;

use chrono::TimeDelta;
use common::{sample, ts};
use netwatch::aggregation::{AggregationError, aggregate_by_interval, bucket_end};
use netwatch::models::{AggregatedPoint, BucketState, Sample};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

fn spread_samples() -> Vec<Sample> {
    vec![
        sample("2025-07-10 14:02:10", 1.0),
        sample("2025-07-10 09:44:00", 0.5),
        sample("2025-07-10 11:15:00", 0.25),
        sample("2025-07-10 11:29:59", 0.75),
        sample("2025-07-09 23:58:00", 0.0),
        sample("2025-07-10 00:01:00", 1.0),
    ]
}

#[test]
fn empty_input_gives_empty_series() {
    let out = aggregate_by_interval(&[], 15).unwrap();
    assert!(out.is_empty());
}

#[test]
fn single_sample_gives_single_measured_bucket() {
    let out = aggregate_by_interval(&[sample("2025-07-10 12:05:00", 0.8)], 15).unwrap();
    assert_eq!(
        out,
        vec![AggregatedPoint::measured(ts("2025-07-10 12:15:00"), 0.8)]
    );
}

#[test]
fn gap_between_samples_is_filled_with_missing() {
    let samples = vec![
        sample("2025-07-10 11:55:00", 0.8),
        sample("2025-07-10 12:05:00", 0.6),
        sample("2025-07-10 12:35:00", 1.0),
    ];
    let out = aggregate_by_interval(&samples, 15).unwrap();
    assert_eq!(
        out,
        vec![
            AggregatedPoint::measured(ts("2025-07-10 12:00:00"), 0.8),
            AggregatedPoint::measured(ts("2025-07-10 12:15:00"), 0.6),
            AggregatedPoint::missing(ts("2025-07-10 12:30:00")),
            AggregatedPoint::measured(ts("2025-07-10 12:45:00"), 1.0),
        ]
    );
    assert_eq!(out[2].state, BucketState::Missing);
    assert_eq!(out[2].value, 0.0);
}

#[test]
fn bucket_value_is_unweighted_mean() {
    let samples = vec![
        sample("2025-07-10 12:01:00", 0.2),
        sample("2025-07-10 12:07:00", 0.6),
        sample("2025-07-10 12:14:00", 1.0),
    ];
    let out = aggregate_by_interval(&samples, 15).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].state, BucketState::Measured);
    assert_eq!(out[0].bucket_end, ts("2025-07-10 12:15:00"));
    assert_close(out[0].value, 0.6);
}

#[test]
fn boundary_sample_opens_the_following_bucket() {
    let out = aggregate_by_interval(&[sample("2025-07-10 12:15:00", 1.0)], 15).unwrap();
    assert_eq!(out[0].bucket_end, ts("2025-07-10 12:30:00"));
}

#[test]
fn seconds_and_subseconds_do_not_affect_bucketing() {
    let late = ts("2025-07-10 12:14:59") + TimeDelta::milliseconds(999);
    assert_eq!(bucket_end(late, 15).unwrap(), ts("2025-07-10 12:15:00"));
    let out = aggregate_by_interval(&[Sample::new(late, 0.5)], 15).unwrap();
    assert_eq!(out, vec![AggregatedPoint::measured(ts("2025-07-10 12:15:00"), 0.5)]);
}

#[test]
fn buckets_are_anchored_to_the_hour_not_the_first_sample() {
    let out = aggregate_by_interval(&[sample("2025-07-10 12:13:00", 1.0)], 7).unwrap();
    // floor(13 / 7) * 7 = 7 -> bucket 12:07-12:14
    assert_eq!(out[0].bucket_end, ts("2025-07-10 12:14:00"));
    assert_eq!(bucket_end(ts("2025-07-10 12:59:00"), 7).unwrap(), ts("2025-07-10 13:03:00"));
}

#[test]
fn odd_width_across_an_hour_keeps_every_measured_bucket() {
    let samples = vec![
        sample("2025-07-10 12:13:00", 0.4),
        sample("2025-07-10 13:01:00", 0.9),
    ];
    let out = aggregate_by_interval(&samples, 7).unwrap();
    let keys: Vec<String> = out
        .iter()
        .map(|p| p.bucket_end.format("%H:%M").to_string())
        .collect();
    assert_eq!(
        keys,
        vec!["12:14", "12:21", "12:28", "12:35", "12:42", "12:49", "12:56", "13:03", "13:07"]
    );
    assert_eq!(out.first().unwrap().state, BucketState::Measured);
    assert_eq!(out.last().unwrap().state, BucketState::Measured);
    assert!(out[1..out.len() - 1].iter().all(|p| p.is_missing()));
    // the grid restarts at 13:00, so the last step is shorter than the width
    assert_eq!(out[8].bucket_end - out[7].bucket_end, TimeDelta::minutes(4));
    assert!(out.windows(2).all(|w| w[1].bucket_end - w[0].bucket_end <= TimeDelta::minutes(7)));
}

#[test]
fn input_order_does_not_matter() {
    let samples = spread_samples();
    let mut reversed = samples.clone();
    reversed.reverse();
    assert_eq!(
        aggregate_by_interval(&samples, 15).unwrap(),
        aggregate_by_interval(&reversed, 15).unwrap()
    );
}

#[test]
fn aggregation_is_idempotent() {
    let samples = spread_samples();
    let a = aggregate_by_interval(&samples, 10).unwrap();
    let b = aggregate_by_interval(&samples, 10).unwrap();
    assert_eq!(a, b);
}

#[test]
fn adjacent_keys_differ_by_exactly_one_interval() {
    for width in [1u32, 5, 10, 15, 20, 30, 60] {
        let out = aggregate_by_interval(&spread_samples(), width).unwrap();
        let step = TimeDelta::minutes(i64::from(width));
        for pair in out.windows(2) {
            assert_eq!(pair[0].bucket_end + step, pair[1].bucket_end, "width {width}");
        }
    }
}

#[test]
fn every_sample_bucket_appears_once_as_measured() {
    let samples = spread_samples();
    let out = aggregate_by_interval(&samples, 15).unwrap();
    for s in &samples {
        let key = bucket_end(s.timestamp, 15).unwrap();
        let hits: Vec<_> = out.iter().filter(|p| p.bucket_end == key).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].state, BucketState::Measured);
    }
}

#[test]
fn buckets_without_samples_are_missing_with_zero_value() {
    let samples = spread_samples();
    let out = aggregate_by_interval(&samples, 15).unwrap();
    let measured_keys: Vec<_> = samples
        .iter()
        .map(|s| bucket_end(s.timestamp, 15).unwrap())
        .collect();
    for point in &out {
        if !measured_keys.contains(&point.bucket_end) {
            assert_eq!(point.state, BucketState::Missing);
            assert_eq!(point.value, 0.0);
        }
    }
    // 23:45 .. 14:15 inclusive at 15 minutes
    assert_eq!(out.first().unwrap().bucket_end, ts("2025-07-10 00:00:00"));
    assert_eq!(out.last().unwrap().bucket_end, ts("2025-07-10 14:15:00"));
    assert_eq!(out.len(), 58);
}

#[test]
fn samples_across_midnight_share_one_series() {
    let samples = vec![
        sample("2025-07-09 23:50:00", 1.0),
        sample("2025-07-10 00:10:00", 0.0),
    ];
    let out = aggregate_by_interval(&samples, 15).unwrap();
    assert_eq!(
        out,
        vec![
            AggregatedPoint::measured(ts("2025-07-10 00:00:00"), 1.0),
            AggregatedPoint::measured(ts("2025-07-10 00:15:00"), 0.0),
        ]
    );
}

#[test]
fn zero_interval_is_rejected() {
    let err = aggregate_by_interval(&[sample("2025-07-10 12:05:00", 0.8)], 0).unwrap_err();
    assert_eq!(err, AggregationError::InvalidInterval { minutes: 0 });
    assert!(bucket_end(ts("2025-07-10 12:05:00"), 0).is_err());
    // rejected even with nothing to aggregate
    assert!(aggregate_by_interval(&[], 0).is_err());
}
