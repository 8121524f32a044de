//! Tests for `kmscreds rotate` command.

use crate::support::*;

#[test]
fn test_rotate_replaces_value() {
    let t = Test::init();
    let output = t
        .cmd()
        .args(["add", "api_key", "--description", "Payments API"])
        .write_stdin("old_value\n")
        .output()
        .unwrap();
    assert_success(&output);
    let before = t.credential("api_key");

    let output = t.rotate("api_key", "new_value");
    assert_success(&output);
    assert_stdout_contains(&output, "✓ rotated api_key");

    let after = t.credential("api_key");
    assert_ne!(after["ciphertext"], before["ciphertext"]);
    assert_eq!(after["added_at"], before["added_at"]);
    assert_eq!(after["description"], "Payments API");
    assert!(after["rotated_at"].is_string());
    assert!(after["rotated_at"].as_str() >= after["added_at"].as_str());

    assert_exports(&t, &[("api_key", "new_value")]);
}

#[test]
fn test_rotate_keeps_position() {
    let t = Test::with_credentials(STANDARD_CREDENTIALS);

    assert_success(&t.rotate("database_url", "postgres://db/next"));

    let names: Vec<String> = t.document()["credentials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["database_url", "api_key", "jwt_secret"]);
}

#[test]
fn test_rotate_unknown_fails() {
    let t = Test::init();

    let output = t.cmd().args(["rotate", "missing"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "credential not found: missing");
}

#[test]
fn test_rotate_empty_value_fails() {
    let t = Test::with_credentials(&[("api_key", "old_value")]);

    let output = assert_untouched(&t, || {
        t.cmd()
            .args(["rotate", "api_key"])
            .write_stdin("")
            .output()
            .unwrap()
    });
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot be empty");
}
