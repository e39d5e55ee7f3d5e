//! Common test utilities for berth integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's real data directory or backup directory.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with isolated working and data directories.
///
/// Each `TestEnv` creates two temporary directories:
/// - `work_dir`: Where projects get scaffolded (the command's cwd)
/// - `data_dir`: Holds berth's registry, config, and action log
///
/// The `br()` method returns a `Command` that sets `BR_DATA_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub work_dir: TempDir,
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the br binary with isolated data directory.
    pub fn br(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_br"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("BR_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Get the path to the working directory.
    pub fn work_path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    /// Scaffold a project through the CLI and return its directory.
    pub fn init_project(&self, name: &str, kind: &str) -> PathBuf {
        let path = self.work_path().join(name);
        self.br()
            .args([
                "init",
                name,
                "--type",
                kind,
                "--path",
                path.to_str().unwrap(),
            ])
            .assert()
            .success();
        path
    }

    /// Point `backup_dir` at a directory inside the test environment and
    /// return it.
    pub fn set_backup_dir(&self) -> PathBuf {
        let dir = self.data_path().join("backups");
        self.br()
            .args(["config", "set", "backup_dir", dir.to_str().unwrap()])
            .assert()
            .success();
        dir
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
