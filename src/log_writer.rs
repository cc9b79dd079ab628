// Per-host, per-day text log: one summary line, one detail line per site, a hostname footer.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;

use crate::models::ConnectivityReport;

pub const LOG_FILE_PREFIX: &str = "connectivity_log_";
pub const LOG_FILE_SUFFIX: &str = ".txt";

/// `<host>/connectivity_log_<YYYYMMDD>.txt` relative to the logs root.
pub fn log_file_name(hostname: &str, date: NaiveDate) -> PathBuf {
    Path::new(hostname).join(format!(
        "{}{}{}",
        LOG_FILE_PREFIX,
        date.format("%Y%m%d"),
        LOG_FILE_SUFFIX
    ))
}

pub fn log_file_path(logs_dir: &Path, hostname: &str, date: NaiveDate) -> PathBuf {
    logs_dir.join(log_file_name(hostname, date))
}

/// The block appended to the day's log for one probe round.
pub fn format_report(report: &ConnectivityReport, hostname: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - WiFi: {} - Internet: {}/{} sites accessible",
        report.timestamp.local_string(),
        report.wifi_network,
        report.success_count(),
        report.total_count()
    );
    for check in &report.checks {
        let _ = writeln!(
            out,
            "  ({:.2}s) - {}: {}",
            check.duration.as_secs_f64(),
            check.url,
            check.status
        );
    }
    let _ = writeln!(out, "Hostname: {}", hostname);
    out.push('\n');
    out
}

/// Appends the formatted report, creating the file and its parent directories.
pub fn append_report(path: &Path, report: &ConnectivityReport, hostname: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    file.write_all(format_report(report, hostname).as_bytes())
        .with_context(|| format!("write log file {}", path.display()))?;
    Ok(())
}

/// One-line console summary, e.g. `... - WiFi: Home - failed, 2/3 sites accessible`.
pub fn summary_line(report: &ConnectivityReport) -> String {
    format!(
        "{} - WiFi: {} - {}, {}/{} sites accessible",
        report.timestamp.local_string(),
        report.wifi_network,
        report.status_word(),
        report.success_count(),
        report.total_count()
    )
}
