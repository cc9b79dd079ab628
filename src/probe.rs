// Site prober: concurrent HTTPS GETs with a per-request timeout.
// Results always come back in configured site order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use crate::config::CheckerConfig;
use crate::models::{CheckStatus, ConnectivityReport, RunContext, SiteCheck};
use crate::timestamp::{local_timezone_name, timestamp_info};
use crate::wifi;

pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub async fn check_single_site(client: &Client, url: &str) -> SiteCheck {
    let start = Instant::now();
    let status = match client.get(url).send().await {
        Ok(resp) if resp.status().as_u16() == 200 => CheckStatus::Success,
        Ok(resp) => CheckStatus::Http(resp.status().as_u16()),
        Err(e) => CheckStatus::Failed(e.to_string()),
    };
    let duration = start.elapsed();
    debug!(url, status = %status, duration_ms = duration.as_millis() as u64, "site checked");
    SiteCheck {
        url: url.to_string(),
        status,
        duration,
    }
}

/// Probes every site with at most `workers` requests in flight.
pub async fn probe_sites(client: &Client, sites: &[String], workers: usize) -> Vec<SiteCheck> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut set = JoinSet::new();
    for (idx, url) in sites.iter().enumerate() {
        let client = client.clone();
        let url = url.clone();
        let semaphore = semaphore.clone();
        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            (idx, check_single_site(&client, &url).await)
        });
    }

    let mut slots: Vec<Option<SiteCheck>> = vec![None; sites.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, check)) => slots[idx] = Some(check),
            Err(e) => warn!(error = %e, "probe task failed"),
        }
    }

    slots
        .into_iter()
        .zip(sites)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| SiteCheck {
                url: url.clone(),
                status: CheckStatus::Failed("probe task did not complete".into()),
                duration: Duration::ZERO,
            })
        })
        .collect()
}

/// One full probe round: timestamps from `ctx`, current WiFi, and every configured site.
#[instrument(skip_all, fields(sites = config.sites.len()))]
pub async fn check_connectivity(
    config: &CheckerConfig,
    ctx: &RunContext,
) -> anyhow::Result<ConnectivityReport> {
    let client = build_client(Duration::from_secs(config.timeout_secs))?;
    let timestamp = timestamp_info(&ctx.now, &local_timezone_name());
    let wifi_network = wifi::get_wifi_network().await;
    let checks = probe_sites(&client, &config.sites, config.worker_count()).await;
    Ok(ConnectivityReport {
        timestamp,
        wifi_network,
        checks,
    })
}
