// Domain models

mod context;
mod report;
mod sample;

pub use context::{RunContext, detect_hostname};
pub use report::{CheckStatus, ConnectivityReport, SiteCheck, TIMESTAMP_FORMAT, TimestampInfo};
pub use sample::{AggregatedPoint, BucketState, Sample};
