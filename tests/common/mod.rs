// Shared test helpers
#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDateTime;
use netwatch::models::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn sample(s: &str, ratio: f64) -> Sample {
    Sample::new(ts(s), ratio)
}

pub fn check(url: &str, status: CheckStatus, secs: f64) -> SiteCheck {
    SiteCheck {
        url: url.to_string(),
        status,
        duration: Duration::from_secs_f64(secs),
    }
}

pub fn report(checks: Vec<SiteCheck>) -> ConnectivityReport {
    ConnectivityReport {
        timestamp: TimestampInfo {
            local: ts("2025-07-09 10:30:45"),
            utc: ts("2025-07-09 14:30:45"),
            timezone: "America/New_York".into(),
        },
        wifi_network: "TestNetwork".into(),
        checks,
    }
}

/// Two successes and one failure, durations 0.25s / 0.18s / 5.0s.
pub fn mixed_report() -> ConnectivityReport {
    report(vec![
        check("https://google.com", CheckStatus::Success, 0.25),
        check("https://github.com", CheckStatus::Success, 0.18),
        check("https://example.com", CheckStatus::Failed("timed out".into()), 5.0),
    ])
}

pub fn write_log(logs_dir: &Path, host: &str, file_name: &str, content: &str) {
    let dir = logs_dir.join(host);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file_name), content).unwrap();
}

fn request_complete(req: &[u8]) -> bool {
    let text = String::from_utf8_lossy(req);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|l| {
            l.to_ascii_lowercase()
                .strip_prefix("content-length:")
                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
        })
        .unwrap_or(0);
    req.len() >= header_end + 4 + content_length
}

/// Minimal HTTP/1.1 server answering every request with `status_line`
/// (e.g. "200 OK"). Raw requests are sent on the returned channel.
pub async fn spawn_http_server(
    status_line: &'static str,
) -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Ok((mut sock, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut req = Vec::new();
                loop {
                    let n = sock.read(&mut buf).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    req.extend_from_slice(&buf[..n]);
                    if request_complete(&req) {
                        break;
                    }
                }
                let _ = tx.send(String::from_utf8_lossy(&req).into_owned());
                let resp = format!(
                    "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    status_line
                );
                let _ = sock.write_all(resp.as_bytes()).await;
                let _ = sock.shutdown().await;
            });
        }
    });
    (format!("http://{}", addr), rx)
}

/// A local URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
