//! Real Ansible backend using `ansible-galaxy` and `ansible-runner` commands.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{RunOutcome, RunRequest, RunStats};
use std::path::Path;
use std::process::{Command, Stdio};

/// Backend that executes the real Ansible command line tools.
pub struct AnsibleCli {
    /// Path to the ansible-galaxy executable
    galaxy_bin: String,
    /// Path to the ansible-runner executable
    runner_bin: String,
}

impl AnsibleCli {
    /// Create a new AnsibleCli, locating both executables on `PATH`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            galaxy_bin: find_executable("ansible-galaxy")?,
            runner_bin: find_executable("ansible-runner")?,
        })
    }

    /// Create a backend with explicit executable paths.
    pub fn with_executables(galaxy_bin: impl Into<String>, runner_bin: impl Into<String>) -> Self {
        Self {
            galaxy_bin: galaxy_bin.into(),
            runner_bin: runner_bin.into(),
        }
    }

    /// Run ansible-galaxy and capture its output.
    fn run_galaxy(&self, args: &[&str]) -> Result<std::process::Output> {
        log::debug!("{} {}", self.galaxy_bin, args.join(" "));
        Command::new(&self.galaxy_bin)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute ansible-galaxy: {e}"),
                stderr: String::new(),
            })
    }
}

impl Backend for AnsibleCli {
    fn list_collections(&self, collections_path: &Path) -> Result<String> {
        let path = collections_path.to_string_lossy();
        let output = self.run_galaxy(&["collection", "list", "--collections-path", &path])?;

        // ansible-galaxy exits non-zero when the path holds no collections yet;
        // an empty listing is the right answer in that case.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::debug!("collection list exited non-zero: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn install_collections(&self, collections: &[String], collections_path: &Path) -> Result<()> {
        let path = collections_path.to_string_lossy();
        let mut args: Vec<&str> = vec!["collection", "install", "--collections-path", &*path];
        args.extend(collections.iter().map(String::as_str));
        log::debug!("{} {}", self.galaxy_bin, args.join(" "));

        let output = Command::new(&self.galaxy_bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute ansible-galaxy: {e}"),
                stderr: String::new(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::from_galaxy_output(&stderr, "collection install"));
        }

        Ok(())
    }

    fn run_playbook(&self, request: &RunRequest) -> Result<RunOutcome> {
        let private_data_dir = request.private_data_dir.to_string_lossy();
        let project_dir = request.project_dir.to_string_lossy();
        let args = [
            "run",
            private_data_dir.as_ref(),
            "--project-dir",
            project_dir.as_ref(),
            "--playbook",
            request.playbook.as_str(),
            "--ident",
            request.ident.as_str(),
        ];
        log::debug!("{} {}", self.runner_bin, args.join(" "));

        let status = Command::new(&self.runner_bin)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute ansible-runner: {e}"),
                stderr: String::new(),
            })?;

        // Killed by a signal: no code, treat as failure.
        let rc = status.code().unwrap_or(1);
        let stats = read_stats(&request.artifacts_dir()).unwrap_or_else(|e| {
            log::warn!("Could not read run stats: {e}");
            None
        });

        Ok(RunOutcome { rc, stats })
    }
}

/// Find an executable on `PATH`.
fn find_executable(name: &str) -> Result<String> {
    let output = Command::new("which")
        .arg(name)
        .output()
        .map_err(|_| Error::ExecutableNotFound(name.to_string()))?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Ok(path);
        }
    }

    Err(Error::ExecutableNotFound(name.to_string()))
}

/// Read the `playbook_on_stats` event from a run's artifacts.
///
/// Returns `Ok(None)` when the runner left no job events (e.g. it failed
/// before the playbook started).
pub fn read_stats(artifacts_dir: &Path) -> Result<Option<RunStats>> {
    let events_dir = artifacts_dir.join("job_events");
    if !events_dir.is_dir() {
        return Ok(None);
    }

    let mut events: Vec<(u64, std::path::PathBuf)> = std::fs::read_dir(&events_dir)?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .map(|p| (event_counter(&p), p))
        .collect();
    events.sort();

    let mut stats = None;
    for (_, path) in events {
        let content = std::fs::read_to_string(&path)?;
        if let Some(found) = parse_stats_event(&content)? {
            stats = Some(found);
        }
    }

    Ok(stats)
}

/// Job event files are named `<counter>-<uuid>.json`.
fn event_counter(path: &Path) -> u64 {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('-').next())
        .and_then(|c| c.parse().ok())
        .unwrap_or(0)
}

/// Parse one job event, returning its stats if it is the stats event.
fn parse_stats_event(content: &str) -> Result<Option<RunStats>> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    if json["event"].as_str() != Some("playbook_on_stats") {
        return Ok(None);
    }
    let stats = serde_json::from_value(json["event_data"].clone())?;
    Ok(Some(stats))
}
