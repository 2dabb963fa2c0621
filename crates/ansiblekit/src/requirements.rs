//! Galaxy requirements manifest parsing.
//!
//! Reads the `collections` list of an `ansible-galaxy` requirements file.
//! Entries may be plain strings or mappings with a `name` key:
//!
//! ```yaml
//! collections:
//!   - name: community.mysql
//!   - community.general
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RequirementsFile {
    #[serde(default)]
    collections: Option<Vec<CollectionEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CollectionEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        version: Option<String>,
    },
}

/// One required collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRequirement {
    pub name: String,
    pub version: Option<String>,
}

/// The declared set of collections a project needs before a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    pub collections: Vec<CollectionRequirement>,
}

impl Requirements {
    /// Load a requirements file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Requirements {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Parse requirements from a string; `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let file: RequirementsFile =
            serde_yaml::from_str(content).map_err(|e| Error::Requirements {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let collections = file
            .collections
            .ok_or_else(|| Error::Requirements {
                path: path.to_path_buf(),
                message: "missing 'collections' list".to_string(),
            })?
            .into_iter()
            .map(|entry| match entry {
                CollectionEntry::Name(name) => CollectionRequirement {
                    name,
                    version: None,
                },
                CollectionEntry::Detailed { name, version } => {
                    CollectionRequirement { name, version }
                }
            })
            .collect();

        Ok(Self { collections })
    }

    /// Collection names, in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.collections.iter().map(|c| c.name.clone()).collect()
    }
}
