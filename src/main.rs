use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use netwatch::config::AppConfig;
use netwatch::models::RunContext;
use netwatch::{git_sync, log_writer, logging, probe, sink};

/// Probe well-known sites once and append the result to today's log.
#[derive(Parser)]
#[command(name = "connectivity-checker", version)]
struct Cli {
    /// Logs root (overrides checker.logs_dir)
    #[arg(long)]
    logs_dir: Option<String>,
    /// Skip committing/pushing past-day logs
    #[arg(long)]
    no_git: bool,
    /// Skip forwarding to the remote sink
    #[arg(long)]
    no_sink: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init("info");
    let cli = Cli::parse();

    let mut app_config = AppConfig::load()?;
    if let Some(dir) = cli.logs_dir {
        app_config.checker.logs_dir = dir;
        app_config.validate()?;
    }

    let ctx = RunContext::detect();
    let report = probe::check_connectivity(&app_config.checker, &ctx).await?;

    let today = ctx.now.date_naive();
    let log_path =
        log_writer::log_file_path(Path::new(&app_config.checker.logs_dir), &ctx.hostname, today);
    log_writer::append_report(&log_path, &report, &ctx.hostname)?;
    println!("{}", log_writer::summary_line(&report));

    // Local log is written; nothing below may fail the run.
    if !cli.no_sink {
        sink::forward_report(&app_config.sink, &report, &ctx.hostname).await;
    }

    if app_config.git.enabled && !cli.no_git {
        let repo_dir = PathBuf::from(&app_config.git.repo_dir);
        // Relative to the working directory, like the log write above.
        let logs_dir = std::path::absolute(&app_config.checker.logs_dir)
            .unwrap_or_else(|_| PathBuf::from(&app_config.checker.logs_dir));
        let hostname = ctx.hostname.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            git_sync::push_logs_to_git(&repo_dir, &logs_dir, &hostname, today)
        })
        .await;
        match outcome {
            Ok(outcome) => tracing::debug!(?outcome, "git sync finished"),
            Err(e) => tracing::warn!(error = %e, "git sync task failed"),
        }
    }

    Ok(())
}
