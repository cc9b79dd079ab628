// Chart connectivity success/failure per interval from the per-day logs.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use netwatch::aggregation::aggregate_by_interval;
use netwatch::chart::{ChartLabels, render_chart};
use netwatch::config::AppConfig;
use netwatch::log_parser::parse_log_files;
use netwatch::models::RunContext;
use netwatch::{logging, paths};

/// Generate connectivity success rate plots
#[derive(Parser)]
#[command(name = "outage-plot", version)]
struct Cli {
    /// Hostname to plot data for (default: current machine)
    #[arg(long)]
    hostname: Option<String>,
    /// WiFi network to filter by (default: plot.wifi_network)
    #[arg(long)]
    wifi_network: Option<String>,
    /// Time range in hours, counted back from the latest sample
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    time_range: Option<u32>,
    /// Aggregation interval in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    interval: Option<u32>,
    /// Logs root (default: checker.logs_dir)
    #[arg(long)]
    logs_dir: Option<PathBuf>,
    /// Output directory for chart files
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Specific output file path (overrides --output-dir)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Open the interactive viewer instead of writing a file
    #[arg(long)]
    show: bool,
}

fn main() -> Result<()> {
    logging::init("info");
    let cli = Cli::parse();

    let app_config = AppConfig::load()?;
    let ctx = RunContext::detect();

    let hostname = cli.hostname.unwrap_or(ctx.hostname);
    let wifi_network = cli
        .wifi_network
        .unwrap_or_else(|| app_config.plot.wifi_network.clone());
    let time_range = cli.time_range.unwrap_or(app_config.plot.time_range_hours);
    let interval = cli.interval.unwrap_or(app_config.plot.interval_minutes);
    let output_dir = cli.output_dir.unwrap_or_else(|| app_config.plot.output_dir());
    let logs_dir = cli
        .logs_dir
        .unwrap_or_else(|| PathBuf::from(&app_config.checker.logs_dir));

    println!("Hostname: {}", hostname);
    println!("WiFi network filter: {}", wifi_network);
    println!("Time range: {} hours", time_range);
    println!("Aggregation interval: {} minutes", interval);
    println!("Output directory: {}", output_dir.display());

    let logs_dir = paths::setup_logs_directory(&logs_dir)?;
    let samples = parse_log_files(&logs_dir, &hostname, &wifi_network, Some(time_range));
    anyhow::ensure!(
        !samples.is_empty(),
        "no data found for WiFi network '{}' on host '{}'",
        wifi_network,
        hostname
    );

    let series = aggregate_by_interval(&samples, interval)?;
    let labels = ChartLabels {
        hostname: hostname.clone(),
        wifi_network: wifi_network.clone(),
        interval_minutes: interval,
    };

    if cli.show {
        render_chart(&series, &labels, None)?;
        return Ok(());
    }

    let output = paths::resolve_output_path(
        cli.output.as_deref(),
        &hostname,
        &wifi_network,
        time_range,
        interval,
        &output_dir,
        ctx.now.naive_local(),
    )?;
    if let Some(path) = render_chart(&series, &labels, Some(&output))? {
        println!("Plot saved to: {}", path.display());
        paths::open_file_non_blocking(&path);
    }
    Ok(())
}
