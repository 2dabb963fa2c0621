//! Galaxy dependency reconciliation
//!
//! Compares the project's requirements manifest against what
//! `ansible-galaxy` reports as installed and, with consent, installs the
//! difference in one go. Installation is not re-verified afterwards: a
//! failed install is reported and the playbook run goes ahead regardless.

use ansiblekit::{Client, Requirements};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::consent::ConsentProvider;
use crate::constants::GALAXY_REQUIREMENTS_FILE;
use crate::progress;
use crate::ui;

/// Where the manifest lives and where collections get installed.
pub struct Reconciler<'a> {
    client: &'a Client,
    requirements_path: PathBuf,
    collections_path: PathBuf,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a Client, project_dir: &Path, collections_path: &Path) -> Self {
        Self {
            client,
            requirements_path: project_dir.join(GALAXY_REQUIREMENTS_FILE),
            collections_path: collections_path.to_path_buf(),
        }
    }

    /// Collections named in the manifest but absent from the listing.
    pub fn missing(&self) -> Result<Vec<String>> {
        let requirements = Requirements::load(&self.requirements_path)?;
        let pb = progress::spinner("Checking installed Ansible Galaxy collections...");
        let missing = self
            .client
            .missing_collections(&requirements.names(), &self.collections_path);
        progress::finish_clear(&pb);
        missing.context("Failed to list installed Ansible Galaxy collections")
    }

    /// Make sure every required collection is present.
    ///
    /// Returns `Ok(false)` when collections are missing and consent was
    /// not given; nothing is installed in that case. Once consent is given
    /// the result is `Ok(true)`, whatever the installer reported.
    pub fn reconcile(&self, consent: &mut dyn ConsentProvider) -> Result<bool> {
        let missing = self.missing()?;
        if missing.is_empty() {
            log::debug!("All Galaxy requirements already installed");
            return Ok(true);
        }
        log::info!("Missing Galaxy collections: {}", ui::join_human(&missing));

        if !consent.approve_install(&missing, &self.collections_path)? {
            return Ok(false);
        }

        match self.client.install_collections(&missing, &self.collections_path) {
            Ok(()) => ui::success(&format!("Installed {} Galaxy collection(s)", missing.len())),
            Err(e) => {
                log::warn!("ansible-galaxy collection install failed: {e}");
                ui::warn(&format!(
                    "Could not install {}: {}",
                    ui::join_human(&missing),
                    e.category().advice()
                ));
            }
        }
        Ok(true)
    }
}
