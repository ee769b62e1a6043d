//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::shops::models::Item;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the item list relative to the user config directory.
pub const CONFIG_RELATIVE_PATH: &str = "waybar/modules/custom-price-monitor.toml";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Items to monitor, one `[[item]]` table each
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay between requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// What to do when an item cannot be priced
    #[serde(default)]
    pub on_error: FailurePolicy,
}

fn default_delay_ms() -> u64 {
    250
}

fn default_delay_jitter_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            on_error: FailurePolicy::Abort,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Returns the default config file path under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_RELATIVE_PATH))
    }

    /// Loads configuration with fallback to the default location.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                debug!("Found config in user config directory");
                return Self::from_file(path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("PRICE_MONITOR_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("PRICE_MONITOR_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(policy) = std::env::var("PRICE_MONITOR_ON_ERROR") {
            if let Ok(p) = policy.parse() {
                self.on_error = p;
            }
        }

        self
    }
}

/// How a failed item affects the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole run; no tooltip is emitted.
    #[default]
    Abort,
    /// Leave the item out of the tooltip.
    Skip,
    /// Show the item as unavailable.
    Placeholder,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            "placeholder" | "unavailable" => Ok(FailurePolicy::Placeholder),
            _ => Err(format!("Unknown failure policy: {}. Use: abort, skip, placeholder", s)),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Abort => write!(f, "abort"),
            FailurePolicy::Skip => write!(f, "skip"),
            FailurePolicy::Placeholder => write!(f, "placeholder"),
        }
    }
}
