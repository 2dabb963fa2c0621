//! Error types for Ansible operations.
//!
//! Errors are categorized so callers can give appropriate user feedback.
//! Each error type includes contextual information to help users understand
//! what went wrong and how to fix it.

use std::path::PathBuf;
use thiserror::Error;

/// Categories of Ansible errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors while talking to Galaxy
    Network,
    /// `ansible-galaxy` or `ansible-runner` not found
    NotInstalled,
    /// Project directory or playbook missing
    Project,
    /// Malformed requirements file or run artifacts
    Parse,
    /// Permission denied
    Permission,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::NotInstalled => "Ansible tooling not installed",
            Self::Project => "Playbook project not found",
            Self::Parse => "Malformed input",
            Self::Permission => "Permission denied",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check your internet connection and try again",
            Self::NotInstalled => "Install Ansible and ansible-runner, e.g. `pipx install ansible-core ansible-runner`",
            Self::Project => "Point project_dir at the directory holding the playbooks",
            Self::Parse => "Check the file contents for YAML/JSON syntax errors",
            Self::Permission => "Check directory permissions or run with appropriate access",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur while preparing or driving an Ansible run.
#[derive(Debug, Error)]
pub enum Error {
    /// Executable is not on `PATH`
    #[error("{0} not found in PATH")]
    ExecutableNotFound(String),

    /// Network error reported by ansible-galaxy
    #[error("network error: {message}")]
    Network {
        /// Detailed error message from the failed network operation
        message: String,
    },

    /// Permission denied
    #[error("permission denied: {message}")]
    Permission {
        /// Details about what permission was denied
        message: String,
    },

    /// Command execution failed
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// Project directory does not exist
    #[error("project directory not found: {0}")]
    ProjectNotFound(PathBuf),

    /// Playbook does not exist inside the project directory
    #[error("playbook not found: {0}")]
    PlaybookNotFound(PathBuf),

    /// Invalid requirements file
    #[error("invalid requirements file {path}: {message}")]
    Requirements {
        /// Path of the requirements file
        path: PathBuf,
        /// Description of the problem
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ExecutableNotFound(_) => ErrorCategory::NotInstalled,
            Error::Network { .. } => ErrorCategory::Network,
            Error::Permission { .. } => ErrorCategory::Permission,
            Error::ProjectNotFound(_) | Error::PlaybookNotFound(_) => ErrorCategory::Project,
            Error::Requirements { .. } | Error::Yaml(_) | Error::Json(_) => ErrorCategory::Parse,
            Error::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                ErrorCategory::Permission
            }
            _ => ErrorCategory::Other,
        }
    }

    /// Create an error from ansible-galaxy command output.
    ///
    /// Analyzes stderr to categorize the error appropriately.
    pub fn from_galaxy_output(stderr: &str, subcommand: &str) -> Self {
        let stderr_lower = stderr.to_lowercase();

        if stderr_lower.contains("urlopen error")
            || stderr_lower.contains("could not resolve")
            || stderr_lower.contains("connection refused")
            || stderr_lower.contains("timed out")
            || stderr_lower.contains("ssl")
            || stderr_lower.contains("failed to download")
        {
            return Error::Network {
                message: stderr.trim().to_string(),
            };
        }

        if stderr_lower.contains("permission denied")
            || stderr_lower.contains("operation not permitted")
        {
            return Error::Permission {
                message: stderr.trim().to_string(),
            };
        }

        Error::CommandFailed {
            message: format!("ansible-galaxy {subcommand} failed"),
            stderr: stderr.trim().to_string(),
        }
    }
}

/// Result type for Ansible operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_galaxy_output_network() {
        let err = Error::from_galaxy_output(
            "ERROR! Unknown error when attempting to call Galaxy: <urlopen error timed out>",
            "install",
        );
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_from_galaxy_output_permission() {
        let err = Error::from_galaxy_output("[Errno 13] Permission denied: '/root'", "install");
        assert_eq!(err.category(), ErrorCategory::Permission);
    }

    #[test]
    fn test_from_galaxy_output_other() {
        let err = Error::from_galaxy_output("ERROR! something odd", "list");
        assert_eq!(err.category(), ErrorCategory::Other);
        assert!(err.to_string().contains("ansible-galaxy list"));
    }

    #[test]
    fn test_project_errors_category() {
        let err = Error::PlaybookNotFound(PathBuf::from("/srv/project/wordpress.yml"));
        assert_eq!(err.category(), ErrorCategory::Project);
        assert!(!err.category().advice().is_empty());
    }
}
