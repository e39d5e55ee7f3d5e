//! Backup archives of project working trees.
//!
//! A backup is a gzip-compressed tarball named
//! `<project>_<YYYYmmddHHMMSS>.tar.gz` in the configured backup directory.
//! Entries are rooted at a top-level directory named after the project, so
//! extraction reproduces `<project>/<relative paths...>`.
//!
//! The tar stream goes through a `.partial` temp file that is renamed into
//! place only once the archive is finalized; a failed run removes the temp
//! file instead of leaving a corrupt artifact. Symlinks, special files, and
//! entries that cannot be read are skipped and reported, never fatal.
//!
//! A backup directory that sits inside the project tree is left out of the
//! walk entirely, so an archive never contains earlier archives or its own
//! in-progress temp file.

use chrono::Local;
use flate2::{Compression, write::GzEncoder};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::LocalProject;
use crate::{Error, Result};

/// Report of one completed backup run.
#[derive(Debug)]
pub struct BackupOutcome {
    /// Final path of the produced archive
    pub archive_path: PathBuf,
    /// Number of file entries written
    pub files_added: usize,
    /// Entries left out because they were unreadable or not regular files
    pub skipped: Vec<PathBuf>,
}

/// Create a timestamped archive of `project`'s working directory under
/// `backup_dir`.
///
/// The source directory must exist; the backup directory is created if
/// needed. Consecutive backups in the same second get a `-1`, `-2`, ...
/// suffix rather than overwriting each other.
pub fn backup(project: &LocalProject, backup_dir: &Path) -> Result<BackupOutcome> {
    let source = project.path.as_path();
    let is_dir = fs::metadata(source).map(|m| m.is_dir()).unwrap_or(false);
    if !is_dir {
        return Err(Error::SourcePathMissing {
            name: project.name.clone(),
            path: source.to_path_buf(),
        });
    }

    fs::create_dir_all(backup_dir)?;

    let archive_path = next_archive_path(backup_dir, &project.name);
    let temp_path = archive_path.with_extension("gz.partial");
    let exclude = walk_exclusion(source, backup_dir, &temp_path);

    match write_archive(source, &project.name, &temp_path, exclude.as_deref()) {
        Ok((files_added, skipped)) => {
            if let Err(err) = fs::rename(&temp_path, &archive_path) {
                let _ = fs::remove_file(&temp_path);
                return Err(Error::ArchiveWrite {
                    path: archive_path,
                    source: err,
                });
            }
            Ok(BackupOutcome {
                archive_path,
                files_added,
                skipped,
            })
        }
        Err(err) => {
            let _ = fs::remove_file(&temp_path);
            Err(Error::ArchiveWrite {
                path: archive_path,
                source: err,
            })
        }
    }
}

/// Stream a gzip-compressed tar of `source` into `temp_path`, with entries
/// rooted at `name`.
///
/// Source-side problems (an entry that cannot be listed or opened) are
/// collected and skipped; sink-side write failures abort the run. The
/// `exclude` path (the backup location, when it lives inside `source`) is
/// pruned from the walk.
fn write_archive(
    source: &Path,
    name: &str,
    temp_path: &Path,
    exclude: Option<&Path>,
) -> std::io::Result<(usize, Vec<PathBuf>)> {
    let file = File::create(temp_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    let mut files_added = 0usize;
    let mut skipped = Vec::new();

    let walker = WalkDir::new(source)
        .sort_by(|a, b| a.path().cmp(b.path()))
        .into_iter()
        .filter_entry(|entry| Some(entry.path()) != exclude);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // A directory listing failed; its contents are unreachable
                if let Some(path) = err.path() {
                    skipped.push(path.to_path_buf());
                }
                continue;
            }
        };

        let path = entry.path();
        let rooted = if path == source {
            PathBuf::from(name)
        } else {
            match path.strip_prefix(source) {
                Ok(rel) => Path::new(name).join(rel),
                Err(_) => continue,
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            builder.append_dir(&rooted, path)?;
        } else if file_type.is_file() {
            // The temp must never end up inside the archive it backs
            if path == temp_path {
                continue;
            }
            let mut f = match File::open(path) {
                Ok(f) => f,
                Err(_) => {
                    skipped.push(path.to_path_buf());
                    continue;
                }
            };
            builder.append_file(&rooted, &mut f)?;
            files_added += 1;
        } else {
            // Symlinks and special files are not archived
            skipped.push(path.to_path_buf());
        }
    }

    let encoder = builder.into_inner()?;
    encoder.finish()?;

    Ok((files_added, skipped))
}

/// The walk-visible path to prune when the archive's own output location
/// lies inside the tree being archived.
///
/// A backup directory nested below the source excludes its whole subtree;
/// a backup directory that *is* the source excludes just the in-progress
/// temp file. Canonical paths are compared, so relative and absolute
/// spellings of the same directory agree.
fn walk_exclusion(source: &Path, backup_dir: &Path, temp_path: &Path) -> Option<PathBuf> {
    let canon_source = fs::canonicalize(source).ok()?;
    let canon_backup = fs::canonicalize(backup_dir).ok()?;
    let rel = canon_backup.strip_prefix(&canon_source).ok()?;
    if rel.as_os_str().is_empty() {
        return Some(source.join(temp_path.file_name()?));
    }
    Some(source.join(rel))
}

/// Pick the next free archive path for `name` in `backup_dir`.
fn next_archive_path(backup_dir: &Path, name: &str) -> PathBuf {
    let base = format!("{}_{}", name, Local::now().format("%Y%m%d%H%M%S"));

    let mut candidate = backup_dir.join(format!("{}.tar.gz", base));
    let mut attempt = 1u32;
    while candidate.exists() {
        candidate = backup_dir.join(format!("{}-{}.tar.gz", base, attempt));
        attempt += 1;
    }

    candidate
}
