//! Tests for error reporting on broken inputs.

use crate::support::*;

#[test]
fn test_not_json() {
    let t = Test::new();
    std::fs::write(t.credentials_path(), "{ not json").unwrap();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "unable to decode store");
}

#[test]
fn test_unsupported_version() {
    let t = Test::init();
    let mut doc = t.document();
    doc["version"] = serde_json::json!(2);
    t.write_document(&doc);

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "unsupported version 2");
}

#[test]
fn test_bad_ciphertext_tag() {
    let t = Test::with_credentials(&[("api_key", "value")]);
    let mut doc = t.document();
    let ciphertext = doc["credentials"][0]["ciphertext"].as_str().unwrap().to_string();
    doc["credentials"][0]["ciphertext"] =
        serde_json::json!(ciphertext.replacen("EJK1]", "EJK2]", 1));
    t.write_document(&doc);

    let output = t.export("dotenv");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid format for encoded string");
}

#[test]
fn test_broken_settings_file() {
    let t = Test::init();
    std::fs::write(t.home.path().join("config.toml"), "path = [").unwrap();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "unable to parse settings");
}

#[test]
fn test_settings_default_path() {
    let t = Test::new();
    std::fs::write(t.home.path().join("config.toml"), "path = \"team.json\"\n").unwrap();

    let output = t.init_cmd(KEY_ID, &[]);
    assert_success(&output);
    assert!(t.dir.path().join("team.json").exists());
    assert!(!t.credentials_path().exists());
}

#[test]
fn test_unknown_command() {
    let t = Test::new();

    let output = t.cmd().arg("frobnicate").output().unwrap();
    assert_failure(&output);
}
