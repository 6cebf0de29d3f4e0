use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration loaded from `~/.morse-console.toml`
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Audio asset lookup settings
    pub audio: AudioConfig,
    /// Telemetry settings
    pub telemetry: TelemetryConfig,
}

/// Audio asset lookup settings
#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    /// Directory holding the tone and pause clips
    pub assets_dir: String,
    /// Clip file extension; resources resolve as `<name>.<extension>`
    pub extension: String,
    /// Resolve all known clips at startup
    pub preload: bool,
}

/// Telemetry settings
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    /// Log to a file instead of stdout
    pub enabled: bool,
    /// Log file location
    pub log_path: String,
}

impl Config {
    /// Load config from `~/.morse-console.toml`, writing a default file on
    /// first run.
    ///
    /// # Errors
    /// Returns error if the file cannot be created, read, or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default(&config_path).context("failed to create default config")?;
        }

        let contents = fs::read_to_string(&config_path).context("failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("failed to parse config TOML")?;

        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(".morse-console.toml"))
    }

    fn create_default(path: &Path) -> Result<()> {
        fs::write(path, DEFAULT_CONFIG).context("failed to write default config")?;
        Ok(())
    }

    /// Expand a leading `~/` to the home directory.
    ///
    /// # Errors
    /// Returns error if `HOME` is not set.
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if let Some(stripped) = path.strip_prefix("~/") {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            Ok(PathBuf::from(home).join(stripped))
        } else {
            Ok(PathBuf::from(path))
        }
    }
}

const DEFAULT_CONFIG: &str = r#"[audio]
assets_dir = "~/.morse-console/assets"
extension = "wav"
preload = true

[telemetry]
enabled = true
log_path = "~/.morse-console/crash.log"
"#;
