//! Command implementations for the berth CLI.
//!
//! This module contains the business logic for each CLI command:
//! - `init` - Scaffold a project and add it to the registry
//! - `status` - List tracked projects and whether they still exist on disk
//! - `backup` - Archive a project's working tree
//! - `remove` - Drop a project from the registry
//! - `config_*` - Read and write configuration options
//! - `log` - Show recent command history
//!
//! Each command returns a result struct implementing [`Output`], so the
//! binary can render either JSON or human-readable text.

use serde::Serialize;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};

use crate::action_log::{self, ActionLogEntry};
use crate::archive;
use crate::config::{self, Config};
use crate::models::{LocalProject, ProjectType};
use crate::registry::Registry;
use crate::templates;
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

// === init ===

#[derive(Debug, Serialize)]
pub struct InitResult {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Files written by the scaffold, relative to the project directory
    pub created: Vec<String>,
    /// Suggested follow-up shell commands
    pub hints: Vec<String>,
}

impl Output for InitResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!(
            "Initialized {} project '{}' at {}",
            self.kind,
            self.name,
            self.path.display()
        );
        if !self.created.is_empty() {
            out.push_str(&format!("\n  created: {}", self.created.join(", ")));
        }
        if !self.hints.is_empty() {
            out.push_str("\nNext steps:");
            for hint in &self.hints {
                out.push_str(&format!("\n  {}", hint));
            }
        }
        out
    }
}

/// Scaffold a new project and record it in the registry.
///
/// `path` defaults to `<current dir>/<name>`. Running `init` again for the
/// same name updates the record and fills in any missing starter files.
pub fn init(
    data_dir: &Path,
    name: &str,
    kind: ProjectType,
    path: Option<PathBuf>,
    remote: Option<String>,
) -> Result<InitResult> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput(
            "project name must not be empty".to_string(),
        ));
    }

    let path = match path {
        Some(path) => path,
        None => env::current_dir()?.join(name),
    };
    let remote = remote.filter(|r| !r.trim().is_empty());

    let created = templates::scaffold(kind, &path, name)?;

    let mut project = LocalProject::new(name.to_string(), path.clone(), kind.to_string());
    project.remote = remote.clone();
    Registry::open(data_dir)?.save(&project)?;

    let config = Config::load(&config::config_path(data_dir))?;
    let mut hints = Vec::new();
    if !path.join(".git").exists() {
        hints.push(format!("git init -b {}", config.default_branch));
    }
    if let Some(remote) = &remote {
        hints.push(format!("git remote add origin {}", remote));
    }

    let created = created
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    Ok(InitResult {
        name: name.to_string(),
        kind: kind.to_string(),
        path,
        remote,
        created,
        hints,
    })
}

// === status ===

#[derive(Debug, Serialize)]
pub struct ProjectStatus {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Whether the project directory still exists on disk
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub total: usize,
    pub projects: Vec<ProjectStatus>,
}

impl Output for StatusResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects tracked. Run `br init <name>` to start.".to_string();
        }

        let mut out = format!("Tracked projects: {}", self.total);
        for project in &self.projects {
            out.push_str(&format!(
                "\n  {} ({}) {}{}",
                project.name,
                project.kind,
                project.path.display(),
                if project.exists { "" } else { " [missing]" }
            ));
            if let Some(remote) = &project.remote {
                out.push_str(&format!("\n      remote: {}", remote));
            }
        }
        out
    }
}

/// List every tracked project, flagging ones whose directory is gone.
pub fn status(data_dir: &Path) -> Result<StatusResult> {
    let projects = Registry::open(data_dir)?.all()?;

    let projects: Vec<ProjectStatus> = projects
        .into_iter()
        .map(|project| ProjectStatus {
            exists: project.path.is_dir(),
            name: project.name,
            kind: project.kind,
            path: project.path,
            remote: project.remote,
        })
        .collect();

    Ok(StatusResult {
        total: projects.len(),
        projects,
    })
}

// === backup ===

#[derive(Debug, Serialize)]
pub struct BackupResult {
    pub name: String,
    pub archive: PathBuf,
    pub files_added: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<PathBuf>,
}

impl Output for BackupResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!(
            "Backed up '{}' to {} ({} file{})",
            self.name,
            self.archive.display(),
            self.files_added,
            if self.files_added == 1 { "" } else { "s" }
        );
        if !self.skipped.is_empty() {
            out.push_str(&format!("\nSkipped {} unreadable entries:", self.skipped.len()));
            for path in &self.skipped {
                out.push_str(&format!("\n  {}", path.display()));
            }
        }
        out
    }
}

/// Archive a tracked project into the configured backup directory.
pub fn backup(data_dir: &Path, name: &str) -> Result<BackupResult> {
    let project = Registry::open(data_dir)?
        .load(name)?
        .ok_or_else(|| Error::ProjectNotFound(name.to_string()))?;

    let config = Config::load(&config::config_path(data_dir))?;
    let outcome = archive::backup(&project, &config.backup_dir_resolved())?;

    Ok(BackupResult {
        name: project.name,
        archive: outcome.archive_path,
        files_added: outcome.files_added,
        skipped: outcome.skipped,
    })
}

// === remove ===

#[derive(Debug, Serialize)]
pub struct RemoveResult {
    pub name: String,
    pub removed: bool,
}

impl Output for RemoveResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.removed {
            format!("Removed '{}' from the registry (files left in place)", self.name)
        } else {
            format!("Project '{}' was not tracked", self.name)
        }
    }
}

/// Drop a project from the registry. Removing an unknown name is a no-op,
/// not an error; files on disk are never touched.
pub fn remove(data_dir: &Path, name: &str) -> Result<RemoveResult> {
    let removed = Registry::open(data_dir)?.delete(name)?;

    Ok(RemoveResult {
        name: name.to_string(),
        removed,
    })
}

// === config ===

#[derive(Debug, Serialize)]
pub struct ConfigGetResult {
    pub key: String,
    pub value: Value,
}

impl Output for ConfigGetResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Read one config option. An unset key is an error so scripts can tell
/// "unset" apart from an empty value.
pub fn config_get(data_dir: &Path, key: &str) -> Result<ConfigGetResult> {
    let config = Config::load(&config::config_path(data_dir))?;
    let value = config
        .get(key)
        .ok_or_else(|| Error::InvalidInput(format!("config key not set: {}", key)))?;

    Ok(ConfigGetResult {
        key: key.to_string(),
        value,
    })
}

#[derive(Debug, Serialize)]
pub struct ConfigSetResult {
    pub key: String,
    pub value: String,
}

impl Output for ConfigSetResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Set {} = {}", self.key, self.value)
    }
}

/// Write one config option and persist the file.
pub fn config_set(data_dir: &Path, key: &str, value: &str) -> Result<ConfigSetResult> {
    let path = config::config_path(data_dir);
    let mut config = Config::load(&path)?;
    config.set(key, value);
    config.save(&path)?;

    Ok(ConfigSetResult {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct ConfigListResult {
    pub config: Value,
}

impl Output for ConfigListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let Value::Object(map) = &self.config else {
            return self.config.to_string();
        };

        let mut out = String::new();
        for (key, value) in map {
            if !out.is_empty() {
                out.push('\n');
            }
            match value {
                Value::String(s) => out.push_str(&format!("{} = {}", key, s)),
                other => out.push_str(&format!("{} = {}", key, other)),
            }
        }
        out
    }
}

/// Show the effective configuration, defaults included.
pub fn config_list(data_dir: &Path) -> Result<ConfigListResult> {
    let config = Config::load(&config::config_path(data_dir))?;

    Ok(ConfigListResult {
        config: serde_json::to_value(&config)?,
    })
}

// === log ===

#[derive(Debug, Serialize)]
pub struct LogResult {
    pub entries: Vec<ActionLogEntry>,
}

impl Output for LogResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return "No actions logged yet.".to_string();
        }

        let mut out = String::new();
        for entry in &self.entries {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!(
                "{}  {:<8} {:<4} {}ms",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.command,
                if entry.success { "ok" } else { "err" },
                entry.duration_ms
            ));
            if let Some(error) = &entry.error {
                out.push_str(&format!("  {}", error));
            }
        }
        out
    }
}

/// Show the most recent `limit` logged commands, oldest first.
pub fn log(data_dir: &Path, limit: usize) -> Result<LogResult> {
    Ok(LogResult {
        entries: action_log::read_tail(data_dir, limit)?,
    })
}
