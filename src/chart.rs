// Stacked success/failure bars per bucket; missing buckets drawn as empty dotted outlines.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use plotly::color::{NamedColor, Rgb, Rgba};
use plotly::common::{DashType, Line, Marker, Orientation, Title};
use plotly::layout::{Axis, AxisType, BarMode, Legend};
use plotly::{Bar, Layout, Plot};
use tracing::{info, warn};

use crate::models::AggregatedPoint;

fn failure_color() -> Rgb {
    Rgb::new(0xFF, 0x6B, 0x35)
}

fn success_color() -> Rgb {
    Rgb::new(0x66, 0xD9, 0xA6)
}

const BAR_OPACITY: f64 = 0.8;
const FULL_HEIGHT: f64 = 100.0;
const TICK_EVERY_HOURS: u32 = 3;
const DATED_TICK_FORMAT: &str = "%m/%d %H:%M";
const TIME_TICK_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone)]
pub struct ChartLabels {
    pub hostname: String,
    pub wifi_network: String,
    pub interval_minutes: u32,
}

impl ChartLabels {
    pub fn title(&self) -> String {
        format!(
            "Internet Connectivity Success/Failure Rate - {} ({})<br><sub>{}-minute intervals</sub>",
            self.hostname, self.wifi_network, self.interval_minutes
        )
    }
}

/// Series split into plottable columns; rates are percentages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartColumns {
    pub measured_x: Vec<NaiveDateTime>,
    pub success_pct: Vec<f64>,
    pub failure_pct: Vec<f64>,
    pub missing_x: Vec<NaiveDateTime>,
}

pub fn build_columns(series: &[AggregatedPoint]) -> ChartColumns {
    let mut cols = ChartColumns::default();
    for point in series {
        let x = point.bucket_end;
        if point.is_missing() {
            cols.missing_x.push(x);
        } else {
            let success = point.value * 100.0;
            cols.measured_x.push(x);
            cols.success_pct.push(success);
            cols.failure_pct.push(100.0 - success);
        }
    }
    cols
}

/// X-axis ticks every three hours of the day (00:00, 03:00, ...) between the
/// first and last bucket. Labels carry the date at midnight and on the
/// outermost ticks, the time alone elsewhere.
pub fn time_ticks(series: &[AggregatedPoint]) -> Vec<(NaiveDateTime, String)> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Vec::new();
    };
    let (first, last) = (first.bucket_end, last.bucket_end);

    let hour_floor = first - TimeDelta::seconds(i64::from(first.minute() * 60 + first.second()))
        - TimeDelta::nanoseconds(i64::from(first.nanosecond()));
    let mut tick = if hour_floor < first {
        hour_floor + TimeDelta::hours(1)
    } else {
        hour_floor
    };
    while tick.hour() % TICK_EVERY_HOURS != 0 {
        tick += TimeDelta::hours(1);
    }

    let mut at = Vec::new();
    while tick <= last {
        at.push(tick);
        tick += TimeDelta::hours(i64::from(TICK_EVERY_HOURS));
    }

    let outer = at.len().saturating_sub(1);
    at.iter()
        .enumerate()
        .map(|(i, &t)| {
            let dated = i == 0 || i == outer || (t.hour() == 0 && t.minute() == 0);
            let fmt = if dated { DATED_TICK_FORMAT } else { TIME_TICK_FORMAT };
            (t, t.format(fmt).to_string())
        })
        .collect()
}

fn time_axis(series: &[AggregatedPoint]) -> Axis {
    let mut axis = Axis::new()
        .title(Title::new("Time"))
        .type_(AxisType::Date)
        .show_grid(true)
        .grid_color(Rgba::new(0, 0, 0, 0.1))
        .tick_angle(-45.0);
    let ticks = time_ticks(series);
    if !ticks.is_empty() {
        // plotly reads numeric date values as epoch milliseconds; naive times are drawn as-is
        let values = ticks
            .iter()
            .map(|(t, _)| t.and_utc().timestamp_millis() as f64)
            .collect();
        let text = ticks.into_iter().map(|(_, label)| label).collect();
        axis = axis.tick_values(values).tick_text(text);
    }
    axis
}

pub fn build_plot(series: &[AggregatedPoint], labels: &ChartLabels) -> Plot {
    let cols = build_columns(series);
    let mut plot = Plot::new();

    if !cols.measured_x.is_empty() {
        let outline = Line::new().color(NamedColor::Black).width(0.5);
        plot.add_trace(
            Bar::new(cols.measured_x.clone(), cols.failure_pct)
                .name("Connection Failed")
                .opacity(BAR_OPACITY)
                .marker(Marker::new().color(failure_color()).line(outline.clone())),
        );
        plot.add_trace(
            Bar::new(cols.measured_x, cols.success_pct)
                .name("Connection Success")
                .opacity(BAR_OPACITY)
                .marker(Marker::new().color(success_color()).line(outline)),
        );
    }

    if !cols.missing_x.is_empty() {
        let heights = vec![FULL_HEIGHT; cols.missing_x.len()];
        plot.add_trace(
            Bar::new(cols.missing_x, heights)
                .name("No Data Recorded")
                .marker(
                    Marker::new().color(Rgba::new(0, 0, 0, 0.0)).line(
                        Line::new()
                            .color(NamedColor::Black)
                            .width(0.5)
                            .dash(DashType::Dot),
                    ),
                ),
        );
    }

    let layout = Layout::new()
        .title(Title::new(&labels.title()))
        .bar_mode(BarMode::Stack)
        .x_axis(time_axis(series))
        .y_axis(
            Axis::new()
                .title(Title::new("Rate (%)"))
                .range(vec![0.0, 105.0])
                .show_grid(true)
                .grid_color(Rgba::new(0, 0, 0, 0.1)),
        )
        .legend(Legend::new().orientation(Orientation::Horizontal).y(-0.3));
    plot.set_layout(layout);
    plot
}

/// Writes a standalone HTML chart to `output`, or opens the interactive viewer
/// when `output` is `None`. An empty series renders nothing.
pub fn render_chart(
    series: &[AggregatedPoint],
    labels: &ChartLabels,
    output: Option<&Path>,
) -> anyhow::Result<Option<PathBuf>> {
    if series.is_empty() {
        warn!("no data to plot");
        return Ok(None);
    }

    let plot = build_plot(series, labels);
    match output {
        Some(path) => {
            std::fs::write(path, plot.to_html())
                .with_context(|| format!("write chart {}", path.display()))?;
            info!(path = %path.display(), "plot saved");
            Ok(Some(path.to_path_buf()))
        }
        None => {
            plot.show();
            Ok(None)
        }
    }
}
