//! Data models for berth entities.
//!
//! This module defines the core data structures:
//! - `LocalProject` - A tracked local project (name, path, type, remote)
//! - `ProjectType` - The enumerated set of kinds the scaffolder knows

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The set of project kinds the scaffolder can lay out.
///
/// The registry itself stores `type` as free-form text; this enum only
/// constrains what `br init` will scaffold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Command-line program
    #[default]
    Cli,
    /// Static web site
    Web,
    /// Reusable library
    Lib,
}

impl ProjectType {
    /// Every known project type.
    #[cfg(test)]
    pub fn all() -> &'static [ProjectType] {
        &[ProjectType::Cli, ProjectType::Web, ProjectType::Lib]
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Cli => "cli",
            ProjectType::Web => "web",
            ProjectType::Lib => "lib",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A local project tracked by berth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalProject {
    /// Unique project name; immutable once registered
    pub name: String,

    /// Working directory, stored exactly as given (absolute or relative);
    /// not required to exist at save time
    pub path: PathBuf,

    /// Project kind ("cli", "web", "lib" when scaffolded; free-form otherwise)
    #[serde(rename = "type")]
    pub kind: String,

    /// Optional remote repository reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl LocalProject {
    /// Create a new project record with no remote.
    pub fn new(name: String, path: PathBuf, kind: String) -> Self {
        Self {
            name,
            path,
            kind,
            remote: None,
        }
    }
}
