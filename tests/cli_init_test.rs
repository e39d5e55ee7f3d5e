//! Integration tests for `br init`.
//!
//! These tests verify that init scaffolds the right starter files for each
//! project type, records the project in the registry, and reports errors
//! with a non-zero exit code.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_scaffolds_cli_project() {
    let env = TestEnv::new();
    let path = env.work_path().join("mytool");

    env.br()
        .args([
            "init",
            "mytool",
            "--type",
            "cli",
            "--path",
            path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized cli project 'mytool'"));

    assert!(path.join("main.py").exists());
    assert!(path.join("README.md").exists());
    let main = fs::read_to_string(path.join("main.py")).unwrap();
    assert!(main.contains("mytool"));
}

#[test]
fn test_init_scaffolds_web_project() {
    let env = TestEnv::new();
    let path = env.init_project("mysite", "web");

    assert!(path.join("index.html").exists());
    assert!(path.join("style.css").exists());
    assert!(path.join("app.js").exists());
}

#[test]
fn test_init_scaffolds_lib_project() {
    let env = TestEnv::new();
    let path = env.init_project("mylib", "lib");

    assert!(path.join("lib.py").exists());
    assert!(path.join("README.md").exists());
}

#[test]
fn test_init_default_path_is_under_cwd() {
    let env = TestEnv::new();

    env.br().args(["init", "here"]).assert().success();

    assert!(env.work_path().join("here").join("main.py").exists());
}

#[test]
fn test_init_records_project_in_registry() {
    let env = TestEnv::new();
    env.init_project("tracked", "cli");

    env.br()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("tracked (cli)"));
}

#[test]
fn test_init_json_output() {
    let env = TestEnv::new();
    let path = env.work_path().join("jsonproj");

    env.br()
        .args([
            "--json",
            "init",
            "jsonproj",
            "--path",
            path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"jsonproj\""))
        .stdout(predicate::str::contains("\"type\": \"cli\""));
}

#[test]
fn test_init_with_remote_prints_hint() {
    let env = TestEnv::new();
    let path = env.work_path().join("remoted");

    env.br()
        .args([
            "init",
            "remoted",
            "--path",
            path.to_str().unwrap(),
            "--remote",
            "git@example.com:me/remoted.git",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "git remote add origin git@example.com:me/remoted.git",
        ));

    env.br()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("remote: git@example.com:me/remoted.git"));
}

#[test]
fn test_init_hint_uses_configured_branch() {
    let env = TestEnv::new();
    env.br()
        .args(["config", "set", "default_branch", "trunk"])
        .assert()
        .success();

    let path = env.work_path().join("branched");
    env.br()
        .args(["init", "branched", "--path", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("git init -b trunk"));
}

#[test]
fn test_init_rejects_unknown_type() {
    let env = TestEnv::new();

    env.br()
        .args(["init", "bad", "--type", "desktop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_init_rejects_empty_name() {
    let env = TestEnv::new();

    env.br()
        .args(["init", ""])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("project name must not be empty"));
}

#[test]
fn test_reinit_updates_project_type() {
    let env = TestEnv::new();
    let path = env.work_path().join("evolving");

    env.br()
        .args([
            "init",
            "evolving",
            "--type",
            "cli",
            "--path",
            path.to_str().unwrap(),
        ])
        .assert()
        .success();
    env.br()
        .args([
            "init",
            "evolving",
            "--type",
            "web",
            "--path",
            path.to_str().unwrap(),
        ])
        .assert()
        .success();

    env.br()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracked projects: 1"))
        .stdout(predicate::str::contains("evolving (web)"));
}

#[test]
fn test_reinit_does_not_clobber_edited_files() {
    let env = TestEnv::new();
    let path = env.init_project("careful", "cli");
    fs::write(path.join("main.py"), "# edited by hand\n").unwrap();

    env.br()
        .args([
            "init",
            "careful",
            "--type",
            "cli",
            "--path",
            path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let main = fs::read_to_string(path.join("main.py")).unwrap();
    assert_eq!(main, "# edited by hand\n");
}
