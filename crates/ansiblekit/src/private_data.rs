//! Private data directory handed to `ansible-runner`.
//!
//! Layout:
//!
//! ```text
//! <dir>/
//!   inventory/hosts   YAML inventory
//!   env/extravars     YAML mapping of extra variables
//!   env/ssh_key       private key data (optional)
//! ```
//!
//! The directory is transient: [`PrivateData::cleanup`] removes it, and
//! dropping a `PrivateData` that was never cleaned up removes it as well.

use crate::error::Result;
use crate::inventory::Inventory;
use serde_yaml::Mapping;
use std::fs;
use std::path::{Path, PathBuf};

/// Owner of one run's private data directory.
#[derive(Debug)]
pub struct PrivateData {
    dir: PathBuf,
    cleaned: bool,
}

impl PrivateData {
    /// Create the directory (and parents) and take ownership of it.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::debug!("Private data dir: {}", dir.display());
        Ok(Self {
            dir,
            cleaned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.dir.join("inventory").join("hosts")
    }

    pub fn extravars_path(&self) -> PathBuf {
        self.dir.join("env").join("extravars")
    }

    pub fn ssh_key_path(&self) -> PathBuf {
        self.dir.join("env").join("ssh_key")
    }

    /// Write `inventory/hosts`.
    pub fn write_inventory(&self, inventory: &Inventory) -> Result<()> {
        write_file(&self.inventory_path(), &inventory.to_yaml()?)
    }

    /// Write `env/extravars`, keeping key order.
    pub fn write_extravars(&self, extravars: &Mapping) -> Result<()> {
        write_file(&self.extravars_path(), &serde_yaml::to_string(extravars)?)
    }

    /// Write `env/ssh_key` verbatim.
    pub fn write_ssh_key(&self, key_data: &str) -> Result<()> {
        let path = self.ssh_key_path();
        write_file(&path, key_data)?;
        restrict_permissions(&path)?;
        Ok(())
    }

    /// Remove the directory. Only the first call does anything.
    pub fn cleanup(&mut self) -> Result<()> {
        if self.cleaned {
            return Ok(());
        }
        self.cleaned = true;
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        log::debug!("Removed private data dir: {}", self.dir.display());
        Ok(())
    }

    pub fn is_cleaned(&self) -> bool {
        self.cleaned
    }
}

impl Drop for PrivateData {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::warn!("Failed to remove {}: {e}", self.dir.display());
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
