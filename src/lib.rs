//! berth - A personal tracker for locally scaffolded projects.
//!
//! This library provides the core functionality for the `br` CLI tool:
//! a registry of local projects, JSON configuration, starter-file
//! scaffolding, and timestamped tar.gz backups.

pub mod action_log;
pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod registry;
pub mod templates;

use std::path::PathBuf;

/// Library-level error type for berth operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Config file corrupt: {}: {}", .path.display(), .source)]
    ConfigCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Source path for '{}' does not exist: {}", .name, .path.display())]
    SourcePathMissing { name: String, path: PathBuf },

    #[error("Failed to write archive {}: {}", .path.display(), .source)]
    ArchiveWrite { path: PathBuf, source: std::io::Error },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for berth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Resolve the data directory holding the registry, config, and action log.
///
/// `BR_DATA_DIR` wins when set; otherwise the platform config directory
/// plus `berth` (e.g. `~/.config/berth` on Linux).
pub fn default_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BR_DATA_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let base = dirs::config_dir()
        .ok_or_else(|| Error::Other("could not determine config directory".to_string()))?;
    Ok(base.join("berth"))
}
