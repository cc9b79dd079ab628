// Process-level facts passed explicitly instead of looked up ad hoc

use chrono::{DateTime, Local};

const UNKNOWN_HOST: &str = "unknown-host";

#[derive(Debug, Clone)]
pub struct RunContext {
    pub hostname: String,
    pub now: DateTime<Local>,
}

impl RunContext {
    pub fn new(hostname: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            hostname: hostname.into(),
            now,
        }
    }

    /// Hostname from the OS and the current local time.
    pub fn detect() -> Self {
        Self::new(detect_hostname(), Local::now())
    }
}

pub fn detect_hostname() -> String {
    sysinfo::System::host_name()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}
