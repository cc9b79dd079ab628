// Parsed log samples and the gap-filled series built from them

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One probe round read back from a log file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    /// accessible / total, or 0.0 when total was 0.
    pub success_ratio: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, success_ratio: f64) -> Self {
        Self {
            timestamp,
            success_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketState {
    Measured,
    Missing,
}

/// One fixed-width bucket, keyed by its end time.
/// `value` is 0.0 for `Missing` buckets and carries no meaning there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPoint {
    pub bucket_end: NaiveDateTime,
    pub value: f64,
    pub state: BucketState,
}

impl AggregatedPoint {
    pub fn measured(bucket_end: NaiveDateTime, value: f64) -> Self {
        Self {
            bucket_end,
            value,
            state: BucketState::Measured,
        }
    }

    pub fn missing(bucket_end: NaiveDateTime) -> Self {
        Self {
            bucket_end,
            value: 0.0,
            state: BucketState::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.state == BucketState::Missing
    }
}
