// Plot shell helpers: logs directory check, output file naming, and "open the result".

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context;
use chrono::NaiveDateTime;
use tracing::warn;

pub fn setup_logs_directory(logs_dir: &Path) -> anyhow::Result<PathBuf> {
    anyhow::ensure!(
        logs_dir.is_dir(),
        "logs directory not found: {}",
        logs_dir.display()
    );
    Ok(logs_dir.to_path_buf())
}

pub fn output_file_name(
    hostname: &str,
    wifi_network: &str,
    time_range_hours: u32,
    interval_minutes: u32,
    now: NaiveDateTime,
) -> String {
    format!(
        "connectivity_plot_{}_{}_{}h_{}m_{}.html",
        hostname,
        wifi_network,
        time_range_hours,
        interval_minutes,
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Timestamped chart path under `output_dir`; creates the directory.
pub fn generate_output_filename(
    hostname: &str,
    wifi_network: &str,
    time_range_hours: u32,
    interval_minutes: u32,
    output_dir: &Path,
    now: NaiveDateTime,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    Ok(output_dir.join(output_file_name(
        hostname,
        wifi_network,
        time_range_hours,
        interval_minutes,
        now,
    )))
}

/// An explicit, non-empty `output` wins; otherwise a generated name under `output_dir`.
pub fn resolve_output_path(
    output: Option<&Path>,
    hostname: &str,
    wifi_network: &str,
    time_range_hours: u32,
    interval_minutes: u32,
    output_dir: &Path,
    now: NaiveDateTime,
) -> anyhow::Result<PathBuf> {
    match output {
        Some(path) if !path.as_os_str().is_empty() => Ok(path.to_path_buf()),
        _ => generate_output_filename(
            hostname,
            wifi_network,
            time_range_hours,
            interval_minutes,
            output_dir,
            now,
        ),
    }
}

fn open_command(path: &Path) -> Option<Command> {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        Some(cmd)
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        Some(cmd)
    } else if cfg!(unix) {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        Some(cmd)
    } else {
        None
    }
}

/// Opens `path` in the default viewer without waiting for it.
pub fn open_file_non_blocking(path: &Path) -> bool {
    let Some(mut cmd) = open_command(path) else {
        warn!(path = %path.display(), "unsupported platform, please open the file manually");
        return false;
    };
    match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not open file automatically");
            false
        }
    }
}
