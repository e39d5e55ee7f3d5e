//! Configuration management for berth.
//!
//! A single JSON document at `<data dir>/config.json` holds user options.
//! Two keys are always present after a load, even when the file is missing
//! or only partially populated:
//!
//! - `default_branch` - branch name suggested for new projects (default "main")
//! - `backup_dir` - where backup archives are written (default `~/backups`)
//!
//! Unrecognized keys round-trip untouched, so the document can carry
//! free-form user options (deploy hooks, editor preferences, ...).
//!
//! Updates follow a read-modify-write pattern over the whole document; saves
//! go through a temp file + rename so a crash cannot leave a truncated file.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// File name of the config document inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// User configuration stored in config.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Branch name suggested when wiring up a new project's repository
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Directory where backup archives are written
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// Unrecognized keys, preserved as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_backup_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("backups")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
            backup_dir: default_backup_dir(),
            extra: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the config document from `path`.
    ///
    /// A missing file yields the built-in defaults without creating it.
    /// A present but unparseable file is an error; the data is never
    /// silently replaced with defaults. Keys absent from the file are
    /// filled with defaults in the returned value only - the file itself
    /// is not rewritten by a load.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigCorrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the full document to `path`, creating the parent directory
    /// if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write to a temporary file first, then rename (atomic replace)
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Look up a single option by name.
    ///
    /// The typed keys are answered from the struct fields; everything else
    /// comes from the preserved extras.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "default_branch" => Some(Value::String(self.default_branch.clone())),
            "backup_dir" => Some(Value::String(self.backup_dir.display().to_string())),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Set a single option by name.
    ///
    /// Typed keys update the struct fields; any other key lands in the
    /// extras map and survives round-trips verbatim.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "default_branch" => self.default_branch = value.to_string(),
            "backup_dir" => self.backup_dir = PathBuf::from(value),
            _ => {
                self.extra
                    .insert(key.to_string(), Value::String(value.to_string()));
            }
        }
    }

    /// The backup directory with a leading ~ expanded to the home
    /// directory.
    pub fn backup_dir_resolved(&self) -> PathBuf {
        if let Ok(stripped) = self.backup_dir.strip_prefix("~") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        self.backup_dir.clone()
    }
}

/// Path of the config document inside a data directory.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}
