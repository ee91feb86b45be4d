//! User configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use super::{get_app_dir, validate_profile_name, DEFAULT_PROFILE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_profile")]
    pub default_profile: String,

    #[serde(default)]
    pub tick: TickConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: default_profile(),
            tick: TickConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

/// How often the TUI recomputes task colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl TickConfig {
    /// Never faster than 100ms, whatever the file says.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(100))
    }
}

fn default_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Ask before deleting a task
    #[serde(default = "default_true")]
    pub confirm_delete: bool,

    /// Show the success count after marking a task done
    #[serde(default = "default_true")]
    pub notify_on_reset: bool,

    /// Show the `#rrggbb` value next to each task
    #[serde(default)]
    pub show_hex: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            notify_on_reset: true,
            show_hex: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    /// Config from disk, or defaults when there is no file yet.
    pub fn load() -> Result<Self> {
        Ok(load_config()?.unwrap_or_default())
    }
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(Some(config))
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

pub fn set_default_profile(name: &str) -> Result<()> {
    validate_profile_name(name)?;
    let mut config = Config::load()?;
    config.default_profile = name.to_string();
    save_config(&config)
}

/// Profile used when none is given on the command line.
pub fn get_default_profile() -> String {
    load_config()
        .ok()
        .flatten()
        .map(|c| c.default_profile)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(default_profile)
}
