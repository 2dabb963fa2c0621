//! Core types for Ansible runs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// A request for a single `ansible-runner` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Private data directory holding `inventory/` and `env/`
    pub private_data_dir: PathBuf,
    /// Directory holding the playbooks
    pub project_dir: PathBuf,
    /// Playbook file name relative to the project directory
    pub playbook: String,
    /// Artifact identifier for this run
    pub ident: String,
}

impl RunRequest {
    /// Create a new run request.
    pub fn new(
        private_data_dir: impl Into<PathBuf>,
        project_dir: impl Into<PathBuf>,
        playbook: impl Into<String>,
        ident: impl Into<String>,
    ) -> Self {
        Self {
            private_data_dir: private_data_dir.into(),
            project_dir: project_dir.into(),
            playbook: playbook.into(),
            ident: ident.into(),
        }
    }

    /// Full path of the playbook file.
    pub fn playbook_path(&self) -> PathBuf {
        self.project_dir.join(&self.playbook)
    }

    /// Directory where ansible-runner writes this run's artifacts.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.private_data_dir.join("artifacts").join(&self.ident)
    }

    /// Validate the request before handing it to the runner.
    pub fn prepare(&self) -> Result<()> {
        if !self.project_dir.is_dir() {
            return Err(Error::ProjectNotFound(self.project_dir.clone()));
        }
        let playbook = self.playbook_path();
        if !playbook.is_file() {
            return Err(Error::PlaybookNotFound(playbook));
        }
        if !self.private_data_dir.is_dir() {
            std::fs::create_dir_all(&self.private_data_dir)?;
        }
        Ok(())
    }
}

/// Per-host counters from the final `playbook_on_stats` event.
///
/// Each map is keyed by host name. Hosts with a zero count are usually
/// omitted by Ansible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub ok: BTreeMap<String, u32>,
    #[serde(default)]
    pub changed: BTreeMap<String, u32>,
    #[serde(default)]
    pub failures: BTreeMap<String, u32>,
    /// Unreachable hosts
    #[serde(default)]
    pub dark: BTreeMap<String, u32>,
    #[serde(default)]
    pub skipped: BTreeMap<String, u32>,
    #[serde(default)]
    pub rescued: BTreeMap<String, u32>,
    #[serde(default)]
    pub ignored: BTreeMap<String, u32>,
    #[serde(default)]
    pub processed: BTreeMap<String, u32>,
}

/// Counters for a single host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub ok: u32,
    pub changed: u32,
    pub unreachable: u32,
    pub failed: u32,
    pub skipped: u32,
    pub rescued: u32,
    pub ignored: u32,
}

impl RunStats {
    /// All hosts mentioned in any counter, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts = BTreeSet::new();
        for map in [
            &self.ok,
            &self.changed,
            &self.failures,
            &self.dark,
            &self.skipped,
            &self.rescued,
            &self.ignored,
            &self.processed,
        ] {
            hosts.extend(map.keys().map(String::as_str));
        }
        hosts.into_iter().collect()
    }

    /// Counters for one host.
    pub fn host(&self, name: &str) -> HostStats {
        let get = |map: &BTreeMap<String, u32>| map.get(name).copied().unwrap_or(0);
        HostStats {
            ok: get(&self.ok),
            changed: get(&self.changed),
            unreachable: get(&self.dark),
            failed: get(&self.failures),
            skipped: get(&self.skipped),
            rescued: get(&self.rescued),
            ignored: get(&self.ignored),
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for host in self.hosts() {
            let s = self.host(host);
            writeln!(
                f,
                "{host:<30} ok={:<4} changed={:<4} unreachable={:<4} failed={:<4} skipped={:<4} rescued={:<4} ignored={}",
                s.ok, s.changed, s.unreachable, s.failed, s.skipped, s.rescued, s.ignored
            )?;
        }
        Ok(())
    }
}

/// Final state of a run: the runner's return code plus its statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Process return code (0 = success)
    pub rc: i32,
    /// Statistics, when the runner produced them
    pub stats: Option<RunStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> RunStats {
        serde_json::from_str(
            r#"{
                "ok": {"example.com": 12, "db.example.com": 4},
                "changed": {"example.com": 3},
                "failures": {},
                "dark": {"db.example.com": 1},
                "skipped": {"example.com": 2}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_stats_hosts_sorted_and_merged() {
        let stats = sample_stats();
        assert_eq!(stats.hosts(), vec!["db.example.com", "example.com"]);
    }

    #[test]
    fn test_stats_host_counters() {
        let stats = sample_stats();
        let web = stats.host("example.com");
        assert_eq!(web.ok, 12);
        assert_eq!(web.changed, 3);
        assert_eq!(web.skipped, 2);
        assert_eq!(web.failed, 0);
        assert_eq!(stats.host("db.example.com").unreachable, 1);
    }

    #[test]
    fn test_run_request_prepare_missing_playbook() {
        let dir = tempfile::tempdir().unwrap();
        let req = RunRequest::new(dir.path().join("pd"), dir.path(), "wordpress.yml", "run1");
        assert!(matches!(req.prepare(), Err(Error::PlaybookNotFound(_))));
    }

    #[test]
    fn test_run_request_prepare_ok() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("php.yml"), "---\n").unwrap();
        let req = RunRequest::new(dir.path().join("pd"), dir.path(), "php.yml", "run1");
        req.prepare().unwrap();
        assert!(dir.path().join("pd").is_dir());
        assert_eq!(
            req.artifacts_dir(),
            dir.path().join("pd").join("artifacts").join("run1")
        );
    }
}
