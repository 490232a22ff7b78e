//! CLI contract tests: argument validation, exit codes, and an offline run
//! that is satisfied entirely from the cache.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn rolo() -> Command {
    let mut cmd = Command::cargo_bin("rolo").expect("binary builds");
    cmd.env_remove("ROLO_API_KEY");
    cmd.env_remove("ROLO_API_URL");
    cmd.env_remove("ROLO_API_TIMEOUT");
    cmd
}

#[test]
fn missing_args_is_usage_error() {
    rolo()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--key"));
}

#[test]
fn missing_input_file_is_fatal() {
    let dir = tempdir().unwrap();
    rolo()
        .current_dir(dir.path())
        .args(["--key", "test-key", "--csv", "does-not-exist.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal"));
}

#[test]
fn malformed_input_is_fatal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("contacts.csv");
    fs::write(&input, "firstname;lastname\nJane;Doe\n").unwrap();

    rolo()
        .current_dir(dir.path())
        .args(["--key", "test-key", "--csv", "contacts.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing required column"));
}

#[test]
fn cached_rows_enrich_without_network() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("contacts.csv"),
        "firstname;lastname;company;domain\nJane;Doe;Acme;\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("cache.csv"),
        "firstname;lastname;company;domain;emails;phones\nJane;Doe;Acme;;cached@acme.com;+1999\n",
    )
    .unwrap();

    rolo()
        .current_dir(dir.path())
        .args(["--key", "test-key", "--csv", "contacts.csv"])
        .assert()
        .success();

    let out = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(
        out.lines().nth(1).unwrap(),
        "Jane,Doe,Acme,,cached@acme.com,+1999"
    );
}

#[test]
fn rows_without_search_fields_still_produce_output() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("contacts.csv"),
        "firstname;lastname;company;domain\nJane;Doe;;\n",
    )
    .unwrap();

    rolo()
        .current_dir(dir.path())
        .args(["--key", "test-key", "--csv", "contacts.csv"])
        .assert()
        .success();

    let out = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(out.lines().nth(1).unwrap(), "Jane,Doe,,,,");
    // No resolved rows, so nothing was cached.
    assert!(!dir.path().join("cache.csv").exists());
}
