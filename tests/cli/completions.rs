//! Tests for `kmscreds completions` command.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_completions_bash() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kmscreds"))
        .stdout(predicate::str::contains("rotate-kms-key"));
}

#[test]
fn test_completions_unknown_shell() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tcsh"));
}

#[test]
fn test_completions_ignore_broken_settings() {
    let t = Test::new();
    std::fs::write(t.home.path().join("config.toml"), "not toml [").unwrap();

    t.cmd().args(["completions", "zsh"]).assert().success();
}
