use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_SITES: [&str; 4] = [
    "https://github.com",
    "https://google.com",
    "https://apple.com",
    "https://reddit.com",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub checker: CheckerConfig,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
    #[serde(default = "default_sites")]
    pub sites: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Concurrent probes; 0 means one per site.
    #[serde(default)]
    pub max_workers: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            logs_dir: default_logs_dir(),
            sites: default_sites(),
            timeout_secs: default_timeout_secs(),
            max_workers: 0,
        }
    }
}

impl CheckerConfig {
    pub fn worker_count(&self) -> usize {
        if self.max_workers == 0 {
            self.sites.len().max(1)
        } else {
            self.max_workers
        }
    }
}

fn default_logs_dir() -> String {
    "logs".into()
}

fn default_sites() -> Vec<String> {
    DEFAULT_SITES.iter().map(|s| s.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Remote log sink (Better Stack / Logtail HTTP ingest).
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_sink_url")]
    pub url: String,
    /// Env var holding the bearer token; never stored in the file.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_sink_url(),
            token_env: default_token_env(),
        }
    }
}

fn default_sink_url() -> String {
    "https://in.logs.betterstack.com/".into()
}

fn default_token_env() -> String {
    "LOGTAIL_TOKEN".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_repo_dir")]
    pub repo_dir: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            repo_dir: default_repo_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_repo_dir() -> String {
    ".".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_wifi_network")]
    pub wifi_network: String,
    #[serde(default = "default_time_range_hours")]
    pub time_range_hours: u32,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    /// Unset means `~/Desktop`.
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            wifi_network: default_wifi_network(),
            time_range_hours: default_time_range_hours(),
            interval_minutes: default_interval_minutes(),
            output_dir: None,
        }
    }
}

impl PlotConfig {
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => PathBuf::from(dir),
            None => default_output_dir(),
        }
    }
}

fn default_wifi_network() -> String {
    "GoTitansFC".into()
}

fn default_time_range_hours() -> u32 {
    72
}

fn default_interval_minutes() -> u32 {
    15
}

fn default_output_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join("Desktop"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl AppConfig {
    /// Reads `CONFIG_FILE` if set (must exist), else `config.toml` if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("config file {}: {}", path, e))?;
                Self::load_from_str(&s)
            }
            Err(_) => match std::fs::read_to_string("config.toml") {
                Ok(s) => Self::load_from_str(&s),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.checker.logs_dir.is_empty(),
            "checker.logs_dir must be non-empty"
        );
        anyhow::ensure!(
            !self.checker.sites.is_empty(),
            "checker.sites must list at least one URL"
        );
        for site in &self.checker.sites {
            anyhow::ensure!(
                site.starts_with("http://") || site.starts_with("https://"),
                "checker.sites entries must be http(s) URLs, got {}",
                site
            );
        }
        anyhow::ensure!(
            self.checker.timeout_secs > 0,
            "checker.timeout_secs must be > 0, got {}",
            self.checker.timeout_secs
        );
        if self.sink.enabled {
            anyhow::ensure!(
                !self.sink.url.is_empty(),
                "sink.url must be non-empty when sink.enabled"
            );
            anyhow::ensure!(
                !self.sink.token_env.is_empty(),
                "sink.token_env must be non-empty when sink.enabled"
            );
        }
        anyhow::ensure!(
            !self.git.repo_dir.is_empty(),
            "git.repo_dir must be non-empty"
        );
        anyhow::ensure!(
            !self.plot.wifi_network.trim().is_empty(),
            "plot.wifi_network must be non-empty"
        );
        anyhow::ensure!(
            self.plot.time_range_hours > 0,
            "plot.time_range_hours must be > 0, got {}",
            self.plot.time_range_hours
        );
        anyhow::ensure!(
            self.plot.interval_minutes > 0,
            "plot.interval_minutes must be > 0, got {}",
            self.plot.interval_minutes
        );
        Ok(())
    }
}
