//! Dashboard configuration
//!
//! Every field has a default, so an absent file or a partial one still yields
//! the stock dashboard: 1100x760 at 60 fps polling `BTC-PERPETUAL` once a second.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Startup asset failure; always fatal
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Font file not found: {0}")]
    FontMissing(PathBuf),

    #[error("Failed to read font {path}: {source}")]
    FontUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub window: WindowConfig,

    /// Monospaced font, relative to the working directory
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,

    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Instruments offered by the dropdown, in display order
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,

    /// Instrument polled at startup; the first catalogue entry when unset
    #[serde(default)]
    pub initial_instrument: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_font_path() -> PathBuf {
    PathBuf::from("JetBrainsMono-Regular.ttf")
}

fn default_width() -> f32 {
    1100.0
}

fn default_height() -> f32 {
    760.0
}

fn default_title() -> String {
    "Deribit Orderbook".to_string()
}

fn default_target_fps() -> u32 {
    60
}

fn default_endpoint() -> String {
    deribit::DEFAULT_ENDPOINT.to_string()
}

fn default_poll_interval_ms() -> u64 {
    deribit::DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_instruments() -> Vec<String> {
    deribit::INSTRUMENTS.iter().map(|s| s.to_string()).collect()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_ms: default_poll_interval_ms(),
            instruments: default_instruments(),
            initial_instrument: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            window: WindowConfig::default(),
            font_path: default_font_path(),
            feed: FeedConfig::default(),
        }
    }
}

impl FeedConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Index of the startup instrument in the catalogue
    pub fn initial_index(&self) -> usize {
        self.initial_instrument
            .as_ref()
            .and_then(|name| self.instruments.iter().position(|i| i == name))
            .unwrap_or(0)
    }

    fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("ws://") || self.endpoint.starts_with("wss://")) {
            return Err(ConfigError::ValidationError(format!(
                "feed.endpoint must be a ws:// or wss:// URL, got {}",
                self.endpoint
            )));
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "feed.poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.instruments.is_empty() {
            return Err(ConfigError::ValidationError(
                "feed.instruments must not be empty".to_string(),
            ));
        }

        if let Some(initial) = &self.initial_instrument {
            if !self.instruments.contains(initial) {
                return Err(ConfigError::ValidationError(format!(
                    "feed.initial_instrument {} is not in feed.instruments",
                    initial
                )));
            }
        }

        Ok(())
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&yaml_content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DashboardConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        if self.window.target_fps == 0 {
            return Err(ConfigError::ValidationError(
                "window.target_fps must be greater than 0".to_string(),
            ));
        }

        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError(
                "window.width and window.height must be greater than 0".to_string(),
            ));
        }

        self.feed.validate()
    }

    /// Instrument polled at startup
    pub fn initial_instrument(&self) -> &str {
        self.feed
            .instruments
            .get(self.feed.initial_index())
            .map(String::as_str)
            .unwrap_or(deribit::INSTRUMENTS[0])
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.window.target_fps.max(1) as f64)
    }

    /// Read the font file; absence is fatal to startup
    pub fn load_font(&self) -> std::result::Result<Vec<u8>, AssetError> {
        if !self.font_path.exists() {
            return Err(AssetError::FontMissing(self.font_path.clone()));
        }
        std::fs::read(&self.font_path).map_err(|source| AssetError::FontUnreadable {
            path: self.font_path.clone(),
            source,
        })
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Dashboard Configuration:");
        info!("  Log level: {}", self.log_level);
        info!(
            "  Window: {}x{} @ {} fps",
            self.window.width, self.window.height, self.window.target_fps
        );
        info!("  Font: {}", self.font_path.display());
        info!("Feed:");
        info!("  Endpoint: {}", self.feed.endpoint);
        info!("  Poll interval: {} ms", self.feed.poll_interval_ms);
        info!("  Instruments: {}", self.feed.instruments.join(", "));
        info!("  Initial instrument: {}", self.initial_instrument());
    }
}
