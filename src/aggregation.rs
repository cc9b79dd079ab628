// Interval bucketing: samples -> fixed-width, gap-complete series.
// Buckets are aligned to the top of the hour and keyed by their end time.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use tracing::info;

use crate::models::{AggregatedPoint, Sample};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("interval must be a positive number of minutes, got {minutes}")]
    InvalidInterval { minutes: u32 },
}

/// End of the bucket containing `timestamp`.
///
/// The bucket start is the minute-of-hour floored to a multiple of
/// `interval_minutes`, with seconds and sub-seconds dropped. A timestamp
/// exactly on a boundary opens the next bucket: 12:15:00 at 15 minutes
/// belongs to 12:15-12:30 and is keyed 12:30.
pub fn bucket_end(
    timestamp: NaiveDateTime,
    interval_minutes: u32,
) -> Result<NaiveDateTime, AggregationError> {
    let width = interval_width(interval_minutes)?;
    Ok(bucket_start(timestamp, interval_minutes) + width)
}

fn bucket_start(timestamp: NaiveDateTime, interval_minutes: u32) -> NaiveDateTime {
    let into_bucket = timestamp.minute() % interval_minutes;
    timestamp
        - TimeDelta::minutes(i64::from(into_bucket))
        - TimeDelta::seconds(i64::from(timestamp.second()))
        - TimeDelta::nanoseconds(i64::from(timestamp.nanosecond()))
}

fn interval_width(interval_minutes: u32) -> Result<TimeDelta, AggregationError> {
    if interval_minutes == 0 {
        return Err(AggregationError::InvalidInterval {
            minutes: interval_minutes,
        });
    }
    Ok(TimeDelta::minutes(i64::from(interval_minutes)))
}

/// Start of the bucket after the one starting at `start`. Within an hour that is
/// `start + width`; a bucket whose successor would cross the hour is followed by
/// the bucket starting at the top of the next hour.
fn next_bucket_start(start: NaiveDateTime, interval_minutes: u32) -> NaiveDateTime {
    if start.minute() + interval_minutes < 60 {
        start + TimeDelta::minutes(i64::from(interval_minutes))
    } else {
        start + TimeDelta::minutes(i64::from(60 - start.minute()))
    }
}

/// Groups samples into buckets, averages each bucket, and fills every empty
/// bucket between the first and last observed one with a `Missing` point.
///
/// Input order does not matter. No samples gives an empty series. When the
/// width divides 60 the output keys step by exactly one width. Other widths
/// give uneven keys at hour boundaries: the grid restarts at the top of each
/// hour, so the first key of an hour can follow the last key of the previous
/// hour by less than one width (7 minutes: 13:03 then 13:07).
pub fn aggregate_by_interval(
    samples: &[Sample],
    interval_minutes: u32,
) -> Result<Vec<AggregatedPoint>, AggregationError> {
    let width = interval_width(interval_minutes)?;

    let mut buckets: BTreeMap<NaiveDateTime, Vec<f64>> = BTreeMap::new();
    for sample in samples {
        let end = bucket_start(sample.timestamp, interval_minutes) + width;
        buckets.entry(end).or_default().push(sample.success_ratio);
    }

    let (Some((&first, _)), Some((&last, _))) =
        (buckets.first_key_value(), buckets.last_key_value())
    else {
        return Ok(Vec::new());
    };

    let mut series = Vec::new();
    let mut start = first - width;
    while start + width <= last {
        let end = start + width;
        match buckets.get(&end) {
            Some(ratios) => series.push(AggregatedPoint::measured(end, mean_f64(ratios))),
            None => series.push(AggregatedPoint::missing(end)),
        }
        start = next_bucket_start(start, interval_minutes);
    }

    info!(
        buckets = series.len(),
        interval_minutes, "aggregated samples into intervals"
    );
    Ok(series)
}

fn mean_f64(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}
