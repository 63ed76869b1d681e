use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_remote_enabled")]
    pub remote_enabled: bool,
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub local_texts_path: Option<PathBuf>,
    #[serde(default = "default_metrics_interval_ms")]
    pub metrics_interval_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_duration_secs() -> u64 {
    60
}
fn default_lookahead() -> usize {
    2
}
fn default_min_words() -> usize {
    8
}
fn default_max_attempts() -> usize {
    5
}
fn default_remote_enabled() -> bool {
    true
}
fn default_remote_url() -> String {
    "https://poetrydb.org/random".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_metrics_interval_ms() -> u64 {
    100
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            lookahead: default_lookahead(),
            min_words: default_min_words(),
            max_attempts: default_max_attempts(),
            remote_enabled: default_remote_enabled(),
            remote_url: default_remote_url(),
            request_timeout_secs: default_request_timeout_secs(),
            local_texts_path: None,
            metrics_interval_ms: default_metrics_interval_ms(),
            theme: default_theme(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typeline")
            .join("config.toml")
    }

    pub fn log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typeline")
            .join("typeline.log")
    }

    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn validate(&mut self) {
        self.duration_secs = self.duration_secs.clamp(5, 600);
        self.lookahead = self.lookahead.clamp(1, 5);
        self.min_words = self.min_words.clamp(1, 40);
        self.max_attempts = self.max_attempts.clamp(1, 20);
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 60);
        self.metrics_interval_ms = self.metrics_interval_ms.clamp(50, 5_000);
        if self.remote_url.trim().is_empty() {
            self.remote_url = default_remote_url();
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_millis(self.metrics_interval_ms)
    }
}
