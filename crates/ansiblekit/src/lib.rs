//! # ansiblekit
//!
//! Pure Rust library for driving `ansible-galaxy` and `ansible-runner`.
//!
//! This crate provides functionality for:
//! - Parsing Galaxy requirements files
//! - Detecting which required collections are missing
//! - Writing an ansible-runner private data directory (inventory, extravars, SSH key)
//! - Running a single playbook and reading back its return code and stats
//!
//! ## Example
//!
//! ```no_run
//! use ansiblekit::{Client, Requirements, RunRequest};
//! use std::path::Path;
//!
//! let client = Client::new().expect("Ansible not available");
//!
//! let requirements =
//!     Requirements::load(Path::new("project/ansible-galaxy-requirements.yml")).unwrap();
//! let missing = client
//!     .missing_collections(&requirements.names(), Path::new("/home/me/.ansible"))
//!     .unwrap();
//! if !missing.is_empty() {
//!     client
//!         .install_collections(&missing, Path::new("/home/me/.ansible"))
//!         .unwrap();
//! }
//!
//! let request = RunRequest::new("/tmp/pd", "project", "lamp-stack.yml", "run-1");
//! let outcome = client.run(&request).unwrap();
//! println!("rc = {}", outcome.rc);
//! ```

#![warn(clippy::all)]

pub mod audit;
pub mod backend;
pub mod error;
pub mod inventory;
pub mod private_data;
pub mod requirements;
pub mod types;

pub use error::{Error, ErrorCategory, Result};
pub use inventory::Inventory;
pub use private_data::PrivateData;
pub use requirements::{CollectionRequirement, Requirements};
pub use types::{HostStats, RunOutcome, RunRequest, RunStats};

use backend::{Backend, cli::AnsibleCli};
use std::path::Path;

/// High-level client for Ansible operations.
///
/// The client wraps a backend and provides the operations a deployment
/// run needs: collection reconciliation and a single playbook run.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a new Client with the default backend.
    ///
    /// Returns an error if `ansible-galaxy` or `ansible-runner` is missing.
    pub fn new() -> Result<Self> {
        let backend = AnsibleCli::new()?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Required collections absent from `collections_path`.
    pub fn missing_collections(
        &self,
        required: &[String],
        collections_path: &Path,
    ) -> Result<Vec<String>> {
        let listing = self.backend.list_collections(collections_path)?;
        Ok(audit::missing_collections(required, &listing))
    }

    /// Install collections into `collections_path` in a single
    /// `ansible-galaxy` invocation.
    pub fn install_collections(
        &self,
        collections: &[String],
        collections_path: &Path,
    ) -> Result<()> {
        self.backend.install_collections(collections, collections_path)
    }

    /// Validate the request and perform exactly one run.
    pub fn run(&self, request: &RunRequest) -> Result<RunOutcome> {
        request.prepare()?;
        self.backend.run_playbook(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct FakeBackend {
        listing: String,
        installed: Rc<RefCell<Vec<Vec<String>>>>,
        /// Every collections path the backend was handed, in call order
        paths: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl FakeBackend {
        fn new(listing: &str) -> Self {
            Self {
                listing: listing.to_string(),
                installed: Rc::new(RefCell::new(Vec::new())),
                paths: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl Backend for FakeBackend {
        fn list_collections(&self, collections_path: &Path) -> Result<String> {
            self.paths.borrow_mut().push(collections_path.to_path_buf());
            Ok(self.listing.clone())
        }

        fn install_collections(
            &self,
            collections: &[String],
            collections_path: &Path,
        ) -> Result<()> {
            self.paths.borrow_mut().push(collections_path.to_path_buf());
            self.installed.borrow_mut().push(collections.to_vec());
            Ok(())
        }

        fn run_playbook(&self, _request: &RunRequest) -> Result<RunOutcome> {
            Ok(RunOutcome { rc: 0, stats: None })
        }
    }

    #[test]
    fn test_missing_collections_through_client() {
        let backend = FakeBackend::new("community.mysql 3.9.0\n");
        let installed = Rc::clone(&backend.installed);
        let paths = Rc::clone(&backend.paths);
        let client = Client::with_backend(Box::new(backend));

        let collections_path = Path::new("/opt/custom-ansible");
        let required = vec!["community.mysql".to_string(), "ansible.posix".to_string()];
        let missing = client.missing_collections(&required, collections_path).unwrap();
        assert_eq!(missing, vec!["ansible.posix".to_string()]);

        client.install_collections(&missing, collections_path).unwrap();
        assert_eq!(installed.borrow().len(), 1);
        assert_eq!(
            *paths.borrow(),
            vec![collections_path.to_path_buf(), collections_path.to_path_buf()]
        );
    }

    #[test]
    fn test_run_validates_request_first() {
        let client = Client::with_backend(Box::new(FakeBackend::new("")));
        let request = RunRequest::new("/tmp/pd", "/nonexistent/project", "php.yml", "id");
        assert!(matches!(
            client.run(&request),
            Err(Error::ProjectNotFound(_))
        ));
    }
}
