//! CLI argument definitions for berth.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::ProjectType;

/// berth - A personal tracker for locally scaffolded projects.
///
/// Start with `br init <name>` to scaffold a project, then `br status` to
/// see everything berth tracks.
#[derive(Parser, Debug)]
#[command(name = "br")]
#[command(
    author,
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("BR_GIT_COMMIT"),
        ", built ",
        env!("BR_BUILD_TIMESTAMP"),
        ")"
    ),
    about = "Track local projects and their backups",
    long_about = None
)]
pub struct Cli {
    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep registry, config, and logs in <path> instead of the default
    /// data directory. Can also be set via BR_DATA_DIR.
    #[arg(short = 'D', long = "data-dir", global = true, env = "BR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new project and start tracking it
    ///
    /// Writes starter files for the chosen type and records the project in
    /// the registry. Running it again for the same name updates the record
    /// and fills in missing starter files without touching existing ones.
    Init {
        /// Project name (unique registry key)
        name: String,

        /// Project type
        #[arg(long = "type", value_enum, default_value_t = ProjectType::Cli)]
        kind: ProjectType,

        /// Project directory (defaults to ./<name>)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Remote URL to associate with the project
        #[arg(long)]
        remote: Option<String>,
    },

    /// List tracked projects and whether they still exist on disk
    Status,

    /// Archive a project's working tree into the backup directory
    Backup {
        /// Project name
        name: String,
    },

    /// Stop tracking a project (files on disk are untouched)
    Remove {
        /// Project name
        name: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show recent command history
    Log {
        /// Number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// List all configuration values
    List,
}
