use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::orchestrator::RunPaths;
use crate::paths;

/// Optional settings from `<config dir>/config.toml`.
///
/// ```toml
/// project_dir = "~/src/lampstack-playbooks"
/// private_data_dir = "~/.lampstack"
/// collections_path = "~/.ansible"
/// galaxy_bin = "/usr/local/bin/ansible-galaxy"
/// runner_bin = "/usr/local/bin/ansible-runner"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LampstackConfig {
    #[serde(default)]
    pub project_dir: Option<String>,
    #[serde(default)]
    pub private_data_dir: Option<String>,
    #[serde(default)]
    pub collections_path: Option<String>,
    #[serde(default)]
    pub galaxy_bin: Option<String>,
    #[serde(default)]
    pub runner_bin: Option<String>,
}

/// Directory overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub project_dir: Option<PathBuf>,
    pub private_data_dir: Option<PathBuf>,
    pub collections_path: Option<PathBuf>,
}

impl LampstackConfig {
    /// Load the config file, or defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_file()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))
    }

    /// Resolve run directories: command line, then environment, then this
    /// file, then built-in defaults.
    pub fn run_paths(&self, overrides: PathOverrides) -> Result<RunPaths> {
        let project_dir = match overrides
            .project_dir
            .or_else(|| paths::env_path(paths::ENV_PROJECT_DIR))
            .or_else(|| self.project_dir.as_deref().map(paths::expand))
        {
            Some(dir) => dir,
            None => paths::default_project_dir()?,
        };

        let private_data_dir = match overrides
            .private_data_dir
            .or_else(|| paths::env_path(paths::ENV_PRIVATE_DATA_DIR))
            .or_else(|| self.private_data_dir.as_deref().map(paths::expand))
        {
            Some(dir) => dir,
            None => paths::default_private_data_dir()?,
        };

        let collections_path = match overrides
            .collections_path
            .or_else(|| self.collections_path.as_deref().map(paths::expand))
        {
            Some(dir) => dir,
            None => paths::default_collections_path()?,
        };

        Ok(RunPaths {
            project_dir,
            private_data_dir,
            collections_path,
        })
    }

    /// Configured `ansible-galaxy` / `ansible-runner`, when both are set.
    pub fn executables(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.galaxy_bin, &self.runner_bin) {
            (Some(galaxy), Some(runner)) => Some((paths::expand(galaxy), paths::expand(runner))),
            _ => None,
        }
    }
}
