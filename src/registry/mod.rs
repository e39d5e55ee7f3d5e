//! Durable storage of project records.
//!
//! Records live in a single SQLite database (`projects.db`) inside the berth
//! data directory, one row per project keyed by unique name. Saves are
//! insert-or-replace upserts, so there is never more than one record per
//! name. Each statement runs in its own implicit transaction; overlapping
//! invocations from separate processes are serialized by SQLite's own
//! locking rather than any application-level lock.

use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::LocalProject;
use crate::{Error, Result};

/// File name of the registry database inside the data directory.
pub const DB_FILE: &str = "projects.db";

/// Registry of tracked projects, backed by an embedded SQLite store.
pub struct Registry {
    conn: Connection,
}

impl Registry {
    /// Open the registry inside `data_dir`, creating the database file and
    /// schema on first use.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;

        let conn = Connection::open(data_dir.join(DB_FILE))?;
        Self::init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Initialize the SQLite schema.
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                name   TEXT PRIMARY KEY,
                path   TEXT NOT NULL,
                type   TEXT NOT NULL,
                remote TEXT
            );
            "#,
        )?;

        Ok(())
    }

    /// Insert the record, or fully replace an existing record with the same
    /// name.
    ///
    /// The upsert is a single statement, so there is no window between an
    /// existence check and the write.
    pub fn save(&self, project: &LocalProject) -> Result<()> {
        if project.name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "project name must not be empty".to_string(),
            ));
        }

        self.conn.execute(
            r#"
            INSERT INTO projects (name, path, type, remote)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(name) DO UPDATE SET
                path = excluded.path,
                type = excluded.type,
                remote = excluded.remote
            "#,
            params![
                project.name,
                project.path.to_string_lossy().into_owned(),
                project.kind,
                project.remote,
            ],
        )?;

        Ok(())
    }

    /// Look up a project by exact name.
    ///
    /// A missing name is a normal `None`, never an error; I/O and database
    /// failures still surface as errors.
    pub fn load(&self, name: &str) -> Result<Option<LocalProject>> {
        let project = self
            .conn
            .query_row(
                "SELECT name, path, type, remote FROM projects WHERE name = ?1",
                [name],
                row_to_project,
            )
            .optional()?;

        Ok(project)
    }

    /// List every tracked project.
    ///
    /// Returns an empty vec when nothing has been saved yet.
    pub fn all(&self) -> Result<Vec<LocalProject>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, path, type, remote FROM projects ORDER BY name")?;

        let mut projects = Vec::new();
        for row in stmt.query_map([], row_to_project)? {
            projects.push(row?);
        }

        Ok(projects)
    }

    /// Delete the record with the given name.
    ///
    /// Returns whether a record was actually removed; deleting an unknown
    /// name is a no-op, not an error.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM projects WHERE name = ?1", [name])?;

        Ok(removed > 0)
    }
}

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<LocalProject> {
    Ok(LocalProject {
        name: row.get(0)?,
        path: PathBuf::from(row.get::<_, String>(1)?),
        kind: row.get(2)?,
        remote: row.get(3)?,
    })
}
