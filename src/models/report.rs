// Probe round models: per-site outcome, timestamps, and the full report

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp format used in log lines and the sink payload.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Success,
    Http(u16),
    Failed(String),
}

impl CheckStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckStatus::Success)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Success => write!(f, "SUCCESS"),
            CheckStatus::Http(code) => write!(f, "HTTP_{}", code),
            CheckStatus::Failed(reason) => write!(f, "FAILED: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteCheck {
    pub url: String,
    pub status: CheckStatus,
    pub duration: Duration,
}

/// Local and UTC wall clock for one probe round, plus a printable timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampInfo {
    pub local: NaiveDateTime,
    pub utc: NaiveDateTime,
    pub timezone: String,
}

impl TimestampInfo {
    pub fn local_string(&self) -> String {
        self.local.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn utc_string(&self) -> String {
        self.utc.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivityReport {
    pub timestamp: TimestampInfo,
    pub wifi_network: String,
    pub checks: Vec<SiteCheck>,
}

impl ConnectivityReport {
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_success()).count()
    }

    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// True when every site answered; also true for an empty site list.
    pub fn all_succeeded(&self) -> bool {
        self.success_count() == self.total_count()
    }

    pub fn status_word(&self) -> &'static str {
        if self.all_succeeded() {
            "success"
        } else {
            "failed"
        }
    }
}
