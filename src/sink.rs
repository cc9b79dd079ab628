// Remote log sink: POST a JSON summary of the round to an HTTP ingest endpoint.
// Runs after the local log write; failures are logged and swallowed.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SinkConfig;
use crate::log_writer::summary_line;
use crate::models::ConnectivityReport;

const SINK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinkPayload {
    pub message: String,
    pub hostname: String,
    pub timestamp_utc: String,
    pub timestamp_local: String,
    pub timezone_local: String,
    pub wifi_network: String,
    pub status: String,
    pub success_count: usize,
    pub failed_count: usize,
    pub total_count: usize,
    pub success_percentage: f64,
    pub failed_percentage: f64,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

impl SinkPayload {
    pub fn from_report(report: &ConnectivityReport, hostname: &str) -> Self {
        let success_count = report.success_count();
        let total_count = report.total_count();
        let failed_count = total_count - success_count;
        Self {
            message: summary_line(report),
            hostname: hostname.to_string(),
            timestamp_utc: report.timestamp.utc_string(),
            timestamp_local: report.timestamp.local_string(),
            timezone_local: report.timestamp.timezone.clone(),
            wifi_network: report.wifi_network.clone(),
            status: report.status_word().to_string(),
            success_count,
            failed_count,
            total_count,
            success_percentage: percentage(success_count, total_count),
            failed_percentage: percentage(failed_count, total_count),
        }
    }
}

/// Bearer token from the configured env var; `None` when unset or blank.
pub fn sink_token(config: &SinkConfig) -> Option<String> {
    std::env::var(&config.token_env)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub async fn send_payload(url: &str, token: &str, payload: &SinkPayload) -> anyhow::Result<()> {
    let client = reqwest::Client::builder().timeout(SINK_TIMEOUT).build()?;
    client
        .post(url)
        .bearer_auth(token)
        .json(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// Forwards the round to the sink. Returns whether it was delivered.
pub async fn forward_report(config: &SinkConfig, report: &ConnectivityReport, hostname: &str) -> bool {
    if !config.enabled {
        debug!("remote sink disabled");
        return false;
    }
    let Some(token) = sink_token(config) else {
        debug!(token_env = %config.token_env, "no sink token provided, skipping remote logging");
        return false;
    };
    let payload = SinkPayload::from_report(report, hostname);
    match send_payload(&config.url, &token, &payload).await {
        Ok(()) => {
            info!(url = %config.url, "summary forwarded to remote sink");
            true
        }
        Err(e) => {
            warn!(url = %config.url, error = %e, "remote sink delivery failed");
            false
        }
    }
}
