// Reads per-day connectivity logs back into samples for one host and network.
// Missing directories, missing files and unreadable files are reported and skipped.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::log_writer::{LOG_FILE_PREFIX, LOG_FILE_SUFFIX};
use crate::models::{Sample, TIMESTAMP_FORMAT};

static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) - WiFi: ([^-]+) - Internet: (\d+)/(\d+) sites accessible",
    )
    .expect("summary line pattern is valid")
});

/// The fields of one `... - WiFi: ... - Internet: a/b sites accessible` line.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub timestamp: NaiveDateTime,
    /// Already trimmed.
    pub network: String,
    pub accessible: u32,
    pub total: u32,
}

impl SummaryLine {
    /// 0.0 when no sites were probed; that is a sentinel, not an observed outage.
    pub fn success_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.accessible) / f64::from(self.total)
    }
}

/// Matches a summary line (surrounding whitespace ignored). Detail lines and
/// anything malformed give `None`.
pub fn parse_summary_line(line: &str) -> Option<SummaryLine> {
    let caps = SUMMARY_LINE.captures(line.trim())?;
    let timestamp = NaiveDateTime::parse_from_str(&caps[1], TIMESTAMP_FORMAT).ok()?;
    let accessible = caps[3].parse().ok()?;
    let total = caps[4].parse().ok()?;
    Some(SummaryLine {
        timestamp,
        network: caps[2].trim().to_string(),
        accessible,
        total,
    })
}

/// Samples from one file's content whose network equals `wifi_filter` after trimming.
/// Returned in file order.
pub fn samples_from_str(content: &str, wifi_filter: &str) -> Vec<Sample> {
    let wifi_filter = wifi_filter.trim();
    content
        .lines()
        .filter_map(parse_summary_line)
        .filter(|line| line.network == wifi_filter)
        .map(|line| Sample::new(line.timestamp, line.success_ratio()))
        .collect()
}

/// `connectivity_log_*.txt` files directly under `host_dir`, sorted by name.
pub fn find_log_files(host_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(host_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Drops samples older than `hours` before the latest sample.
/// Expects `samples` sorted ascending; anchors on the last element, not on the clock.
/// A window reaching past the earliest representable date keeps everything.
pub fn apply_recency_window(samples: &mut Vec<Sample>, hours: u32) {
    let Some(latest) = samples.last().map(|s| s.timestamp) else {
        return;
    };
    let Some(cutoff) = latest.checked_sub_signed(TimeDelta::hours(i64::from(hours))) else {
        return;
    };
    samples.retain(|s| s.timestamp >= cutoff);
}

/// All samples for `hostname` on `wifi_filter`, sorted by timestamp and
/// optionally limited to the most recent `time_range_hours` of recorded data.
pub fn parse_log_files(
    logs_dir: &Path,
    hostname: &str,
    wifi_filter: &str,
    time_range_hours: Option<u32>,
) -> Vec<Sample> {
    let host_dir = logs_dir.join(hostname);
    if !host_dir.is_dir() {
        warn!(dir = %host_dir.display(), "hostname directory not found");
        return Vec::new();
    }

    let log_files = match find_log_files(&host_dir) {
        Ok(files) => files,
        Err(e) => {
            warn!(dir = %host_dir.display(), error = %e, "failed to list log files");
            return Vec::new();
        }
    };
    if log_files.is_empty() {
        warn!(dir = %host_dir.display(), "no log files found");
        return Vec::new();
    }

    info!(files = log_files.len(), "parsing log files");

    let mut samples = Vec::new();
    for path in &log_files {
        debug!(file = %path.display(), "processing log file");
        match std::fs::read_to_string(path) {
            Ok(content) => samples.extend(samples_from_str(&content, wifi_filter)),
            Err(e) => warn!(file = %path.display(), error = %e, "error parsing log file"),
        }
    }

    samples.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    if let Some(hours) = time_range_hours {
        apply_recency_window(&mut samples, hours);
    }

    info!(
        samples = samples.len(),
        wifi_network = wifi_filter,
        "found data points"
    );
    samples
}
