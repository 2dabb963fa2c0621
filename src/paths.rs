//! Centralized path resolution for lampstack
//!
//! # Environment Variables
//!
//! - `LAMPSTACK_CONFIG_DIR` - Override config directory
//! - `LAMPSTACK_PROJECT_DIR` - Override the playbook project directory
//! - `LAMPSTACK_PRIVATE_DATA_DIR` - Override the transient runner directory
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `LAMPSTACK_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/lampstack` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\lampstack`
//!    - macOS/Linux: `~/.config/lampstack`
//!
//! The project and private data directories are resolved from the
//! environment first and the config file second; see [`crate::config`].

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "LAMPSTACK_CONFIG_DIR";

/// Environment variable for project directory override
pub const ENV_PROJECT_DIR: &str = "LAMPSTACK_PROJECT_DIR";

/// Environment variable for private data directory override
pub const ENV_PRIVATE_DATA_DIR: &str = "LAMPSTACK_PRIVATE_DATA_DIR";

/// Get the lampstack config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Some(path) = env_path(ENV_CONFIG_DIR) {
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("lampstack");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            let path = app_data.join("lampstack");
            log::debug!("Using Windows config dir: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("lampstack");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Path of the optional config file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Default playbook project: `<config dir>/project`
pub fn default_project_dir() -> Result<PathBuf> {
    Ok(config_dir()?.join("project"))
}

/// Default private data directory: `~/.lampstack`
pub fn default_private_data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".lampstack"))
}

/// Default Galaxy collections path: `~/.ansible`
pub fn default_collections_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".ansible"))
}

/// Expanded value of a path environment variable, if set and non-empty.
pub fn env_path(var: &str) -> Option<PathBuf> {
    let value = std::env::var(var).ok().filter(|v| !v.is_empty())?;
    let path = expand(&value);
    log::debug!("Using {} from {}", path.display(), var);
    Some(path)
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
