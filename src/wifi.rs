// Current WiFi network name via OS utilities (macOS networksetup/system_profiler, Linux nmcli/iwgetid).
// Every probe is best-effort: a missing tool or a non-zero exit just moves on to the next one.

use tokio::process::Command;
use tracing::debug;

pub const NOT_CONNECTED: &str = "Not connected to WiFi";

const NETWORKSETUP_PREFIX: &str = "Current Wi-Fi Network:";
const PROFILER_SECTION: &str = "Current Network Information:";
/// How many lines after the section header may hold the network name.
const PROFILER_LOOKAHEAD: usize = 9;
const PROFILER_SKIPPED_KEYS: [&str; 4] = ["PHY Mode", "Channel", "Country Code", "Network Type"];

/// `networksetup -getairportnetwork en0`
pub fn parse_networksetup(output: &str) -> Option<String> {
    let output = output.trim();
    if !output.contains(NETWORKSETUP_PREFIX) {
        return None;
    }
    let name = output.replace(&format!("{} ", NETWORKSETUP_PREFIX), "");
    let name = name.trim();
    if name.is_empty() || name == NETWORKSETUP_PREFIX {
        return None;
    }
    Some(name.to_string())
}

/// `system_profiler SPAirPortDataType`: the first `<name>:` line under the
/// current-network section that is not one of the per-network property keys.
pub fn parse_system_profiler(output: &str) -> Option<String> {
    let lines: Vec<&str> = output.lines().collect();
    let header = lines.iter().position(|l| l.contains(PROFILER_SECTION))?;
    for line in lines.iter().skip(header + 1).take(PROFILER_LOOKAHEAD) {
        let line = line.trim();
        if line.is_empty()
            || !line.contains(':')
            || PROFILER_SKIPPED_KEYS.iter().any(|k| line.starts_with(k))
        {
            continue;
        }
        let name = line.split(':').next().unwrap_or_default().trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    None
}

/// `nmcli -t -f active,ssid dev wifi`: the `yes:<ssid>` row.
pub fn parse_nmcli(output: &str) -> Option<String> {
    output
        .lines()
        .filter_map(|l| l.trim().strip_prefix("yes:"))
        .map(|ssid| ssid.replace("\\:", ":"))
        .find(|ssid| !ssid.is_empty())
}

/// `iwgetid -r`: the bare SSID.
pub fn parse_iwgetid(output: &str) -> Option<String> {
    let ssid = output.trim();
    (!ssid.is_empty()).then(|| ssid.to_string())
}

async fn run_tool(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output().await {
        Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
        Ok(out) => {
            debug!(program, status = %out.status, "wifi probe exited with failure");
            None
        }
        Err(e) => {
            debug!(program, error = %e, "wifi probe unavailable");
            None
        }
    }
}

/// Name of the connected WiFi network, or [`NOT_CONNECTED`].
pub async fn get_wifi_network() -> String {
    if cfg!(target_os = "macos") {
        if let Some(out) = run_tool("networksetup", &["-getairportnetwork", "en0"]).await
            && let Some(name) = parse_networksetup(&out)
        {
            return name;
        }
        if let Some(out) = run_tool("system_profiler", &["SPAirPortDataType"]).await
            && let Some(name) = parse_system_profiler(&out)
        {
            return name;
        }
    } else {
        if let Some(out) = run_tool("nmcli", &["-t", "-f", "active,ssid", "dev", "wifi"]).await
            && let Some(name) = parse_nmcli(&out)
        {
            return name;
        }
        if let Some(out) = run_tool("iwgetid", &["-r"]).await
            && let Some(name) = parse_iwgetid(&out)
        {
            return name;
        }
    }
    NOT_CONNECTED.to_string()
}
