//! Backend abstraction for the Ansible toolchain.
//!
//! The [`Backend`] trait defines the three engine operations a deployment
//! needs, allowing for different implementations (real CLI, scripted mock
//! for testing).

pub mod cli;

use crate::error::Result;
use crate::types::{RunOutcome, RunRequest};
use std::path::Path;

/// Backend trait for Ansible operations.
///
/// This trait abstracts the underlying engine, enabling:
/// - Real CLI execution via `ansible-galaxy` and `ansible-runner`
/// - Mock implementations for testing
pub trait Backend {
    /// Text listing of installed Galaxy collections under `collections_path`.
    fn list_collections(&self, collections_path: &Path) -> Result<String>;

    /// Install the given Galaxy collections into `collections_path` in one
    /// invocation.
    fn install_collections(&self, collections: &[String], collections_path: &Path)
    -> Result<()>;

    /// Perform exactly one playbook run.
    fn run_playbook(&self, request: &RunRequest) -> Result<RunOutcome>;
}
