// Local/UTC timestamps and a printable timezone for one probe round

use chrono::{DateTime, Offset, TimeZone};

use crate::models::TimestampInfo;

const DEFAULT_TZ_NAME: &str = "Local";

/// `GMT+0530`, `GMT-0330`, `GMT+0000`.
pub fn format_gmt_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    format!("GMT{}{:02}{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

/// Zone name from `TZ`, or "Local" when unset.
pub fn local_timezone_name() -> String {
    std::env::var("TZ")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_TZ_NAME.to_string())
}

pub fn timestamp_info<Tz: TimeZone>(now: &DateTime<Tz>, tz_name: &str) -> TimestampInfo {
    let offset_seconds = now.offset().fix().local_minus_utc();
    TimestampInfo {
        local: now.naive_local(),
        utc: now.naive_utc(),
        timezone: format!("{} {}", tz_name, format_gmt_offset(offset_seconds)),
    }
}
