//! Starter files for newly initialized projects.
//!
//! Each project type maps to a small set of files written into the project
//! directory on `init`. Occurrences of `{name}` in a template are replaced
//! with the project name. Files that already exist are left alone, so
//! re-running `init` on a live project never clobbers work.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::models::ProjectType;

const CLI_FILES: &[(&str, &str)] = &[
    (
        "main.py",
        r#"#!/usr/bin/env python3
"""{name} entry point."""


def main():
    print("{name} is alive")


if __name__ == "__main__":
    main()
"#,
    ),
    ("README.md", "# {name}\n\nA command line tool.\n"),
];

const WEB_FILES: &[(&str, &str)] = &[
    (
        "index.html",
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{name}</title>
  <link rel="stylesheet" href="style.css">
</head>
<body>
  <h1>{name}</h1>
  <script src="app.js"></script>
</body>
</html>
"#,
    ),
    (
        "style.css",
        "body {\n  font-family: sans-serif;\n  margin: 2rem;\n}\n",
    ),
    ("app.js", "console.log(\"{name} loaded\");\n"),
];

const LIB_FILES: &[(&str, &str)] = &[
    (
        "lib.py",
        r#""""{name} library."""


def version():
    return "0.1.0"
"#,
    ),
    ("README.md", "# {name}\n\nA Python library.\n"),
];

fn files_for(kind: ProjectType) -> &'static [(&'static str, &'static str)] {
    match kind {
        ProjectType::Cli => CLI_FILES,
        ProjectType::Web => WEB_FILES,
        ProjectType::Lib => LIB_FILES,
    }
}

/// Write the starter files for `kind` into `dest`, returning the paths that
/// were actually created. Existing files are skipped.
pub fn scaffold(kind: ProjectType, dest: &Path, name: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dest)?;

    let mut created = Vec::new();
    for (rel, template) in files_for(kind) {
        let path = dest.join(rel);
        if path.exists() {
            continue;
        }
        fs::write(&path, template.replace("{name}", name))?;
        created.push(path);
    }

    Ok(created)
}
