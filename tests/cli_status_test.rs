//! Integration tests for `br status`.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_status_with_nothing_tracked() {
    let env = TestEnv::new();

    env.br()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects tracked"));
}

#[test]
fn test_status_lists_all_projects() {
    let env = TestEnv::new();
    env.init_project("alpha", "cli");
    env.init_project("beta", "web");

    env.br()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracked projects: 2"))
        .stdout(predicate::str::contains("alpha (cli)"))
        .stdout(predicate::str::contains("beta (web)"));
}

#[test]
fn test_status_flags_missing_directory() {
    let env = TestEnv::new();
    let path = env.init_project("vanished", "cli");
    fs::remove_dir_all(&path).unwrap();

    env.br()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("vanished (cli)"))
        .stdout(predicate::str::contains("[missing]"));
}

#[test]
fn test_status_json_output() {
    let env = TestEnv::new();
    env.init_project("alpha", "cli");

    env.br()
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 1"))
        .stdout(predicate::str::contains("\"name\": \"alpha\""))
        .stdout(predicate::str::contains("\"exists\": true"));
}

#[test]
fn test_status_survives_registry_reopen() {
    let env = TestEnv::new();
    env.init_project("durable", "cli");

    // Separate invocations mean separate processes and fresh connections
    for _ in 0..3 {
        env.br()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("durable"));
    }
}
