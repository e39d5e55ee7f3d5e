//! Action logging for berth commands.
//!
//! Every command invocation is appended to `action.log` in the data
//! directory as one JSON object per line. Logging is best effort and never
//! makes a command fail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};

/// File name of the log inside the data directory.
pub const ACTION_LOG_FILE: &str = "action.log";

/// A single logged command invocation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// ISO 8601 timestamp when the command ran
    pub timestamp: DateTime<Utc>,

    /// Command name (e.g. "init", "backup")
    pub command: String,

    /// Command arguments as JSON
    pub args: Value,

    /// Whether the command succeeded
    pub success: bool,

    /// Error message if the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds
    pub duration_ms: u64,

    /// User who ran the command
    pub user: String,
}

/// Record one command invocation.
///
/// Honors the `action_log` config flag (set it to "false", "0", or "no" to
/// disable) and the `action_log_path` override. Failures are reported on
/// stderr and otherwise swallowed.
pub fn log_action(
    data_dir: &Path,
    command: &str,
    args: Value,
    success: bool,
    error: Option<String>,
    duration_ms: u64,
) {
    // A broken config must not stop logging
    let config = Config::load(&config::config_path(data_dir)).unwrap_or_default();

    if !config_flag(&config, "action_log", true) {
        return;
    }

    let args = if config_flag(&config, "action_log_sanitize", true) {
        sanitize_args(&args)
    } else {
        args
    };

    let entry = ActionLogEntry {
        timestamp: Utc::now(),
        command: command.to_string(),
        args,
        success,
        error,
        duration_ms,
        user: current_user(),
    };

    if let Err(e) = append_entry(&log_path(data_dir, &config), &entry) {
        eprintln!("Warning: failed to write action log: {}", e);
    }
}

/// Read the most recent `limit` entries, oldest first.
///
/// A missing log yields an empty list; lines that do not parse are skipped.
pub fn read_tail(data_dir: &Path, limit: usize) -> crate::Result<Vec<ActionLogEntry>> {
    let config = Config::load(&config::config_path(data_dir)).unwrap_or_default();
    let path = log_path(data_dir, &config);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(&path)?;
    let mut entries: Vec<ActionLogEntry> = contents
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    if entries.len() > limit {
        entries.drain(..entries.len() - limit);
    }
    Ok(entries)
}

/// Where the log lives: the data directory unless `action_log_path`
/// overrides it.
fn log_path(data_dir: &Path, config: &Config) -> PathBuf {
    if let Some(Value::String(custom)) = config.get("action_log_path") {
        return expand_home(Path::new(&custom));
    }
    data_dir.join(ACTION_LOG_FILE)
}

/// Expand a leading ~ to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

fn append_entry(path: &Path, entry: &ActionLogEntry) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;

    Ok(())
}

/// Read a boolean flag from config; unset or unparseable means `default`.
fn config_flag(config: &Config, key: &str, default: bool) -> bool {
    match config.get(key) {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64() != Some(0),
        Some(Value::String(s)) => {
            let s = s.to_lowercase();
            s == "true" || s == "1" || s == "yes"
        }
        _ => default,
    }
}

/// Strip sensitive material from logged arguments.
///
/// Values under keys mentioning credentials are redacted, path-like strings
/// are reduced to their basename, and oversized values are summarized.
fn sanitize_args(args: &Value) -> Value {
    match args {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                if is_sensitive(key) {
                    out.insert(key.clone(), Value::String("[REDACTED]".to_string()));
                } else {
                    out.insert(key.clone(), sanitize_args(value));
                }
            }
            Value::Object(out)
        }
        Value::Array(arr) if arr.len() > 10 => {
            Value::String(format!("[Array with {} items]", arr.len()))
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sanitize_args).collect()),
        Value::String(s) => {
            let base = if s.contains('/') || s.contains('\\') {
                s.rsplit(['/', '\\']).next().unwrap_or(s).to_string()
            } else {
                s.clone()
            };

            if base.len() > 100 {
                let head: String = base.chars().take(97).collect();
                Value::String(format!("{}... ({} chars)", head, base.len()))
            } else {
                Value::String(base)
            }
        }
        _ => args.clone(),
    }
}

const REDACT_MARKERS: &[&str] = &["password", "token", "key", "secret"];

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    REDACT_MARKERS.iter().any(|marker| key.contains(marker))
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
