//! Task persistence: app directory, profiles, config and the task store

pub mod config;
mod error;
mod storage;
mod task_store;

pub use config::{
    get_default_profile, load_config, save_config, set_default_profile, Config, TickConfig,
    UiConfig,
};
pub use error::{Result, StoreError};
pub use storage::{LoadedRecord, Storage};
pub use task_store::TaskStore;

use anyhow::bail;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PROFILE: &str = "default";

const APP_DIR_NAME: &str = "overdue";
const PROFILES_DIR: &str = "profiles";

/// Root directory for config and profiles, created on first use.
///
/// Linux follows XDG (`$XDG_CONFIG_HOME/overdue`); other platforms use
/// `~/.overdue`.
pub fn get_app_dir() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))?
        .join(APP_DIR_NAME);

    #[cfg(not(target_os = "linux"))]
    let dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
        .join(format!(".{}", APP_DIR_NAME));

    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn get_profile_dir(profile: &str) -> anyhow::Result<PathBuf> {
    validate_profile_name(profile)?;
    let dir = get_app_dir()?.join(PROFILES_DIR).join(profile);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Names of all profile directories, sorted.
pub fn list_profiles() -> anyhow::Result<Vec<String>> {
    let profiles_dir = get_app_dir()?.join(PROFILES_DIR);
    if !profiles_dir.exists() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in fs::read_dir(&profiles_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                profiles.push(name.to_string());
            }
        }
    }
    profiles.sort();
    Ok(profiles)
}

pub fn create_profile(name: &str) -> anyhow::Result<()> {
    validate_profile_name(name)?;
    let dir = get_app_dir()?.join(PROFILES_DIR).join(name);
    if dir.exists() {
        bail!("Profile '{}' already exists", name);
    }
    fs::create_dir_all(&dir)?;
    Ok(())
}

pub fn delete_profile(name: &str) -> anyhow::Result<()> {
    validate_profile_name(name)?;
    if name == get_default_profile() {
        bail!("Cannot delete the default profile '{}'", name);
    }

    let dir = get_app_dir()?.join(PROFILES_DIR).join(name);
    if !dir.exists() {
        bail!("Profile '{}' does not exist", name);
    }
    fs::remove_dir_all(&dir)?;
    Ok(())
}

pub(crate) fn validate_profile_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        bail!("Profile name cannot be empty");
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        bail!("Invalid profile name: {}", name);
    }
    Ok(())
}
