//! Tests for `kmscreds add` command.

use crate::support::*;

#[test]
fn test_add_via_stdin() {
    let t = Test::init();

    let output = t.add("api_key", "sk-test-12345");
    assert_success(&output);
    assert_stdout_contains(&output, "stub-kms: encrypting api_key... ok");
    assert_stdout_contains(&output, "✓ added api_key");
    assert_stdout_excludes(&output, "sk-test-12345");

    let cred = t.credential("api_key");
    assert_eq!(cred["description"], "");
    assert!(cred["added_at"].is_string());
    assert!(cred["rotated_at"].is_null());

    assert_exports(&t, &[("api_key", "sk-test-12345")]);
}

#[test]
fn test_add_stores_encoded_ciphertext() {
    let t = Test::with_credentials(&[("api_key", "sk-test-12345")]);

    let ciphertext = t.credential("api_key")["ciphertext"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(ciphertext.starts_with(VERSION_TAG));
    assert_eq!(ciphertext.split(';').count(), 3);
    assert!(!ciphertext.contains("sk-test-12345"));
}

#[test]
fn test_add_with_description() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["add", "db_password", "--description", "Primary database"])
        .write_stdin("hunter2\n")
        .output()
        .unwrap();
    assert_success(&output);

    assert_eq!(t.credential("db_password")["description"], "Primary database");
}

#[test]
fn test_add_same_value_twice_differs() {
    let t = Test::with_credentials(&[("first", "same"), ("second", "same")]);

    assert_ne!(
        t.credential("first")["ciphertext"],
        t.credential("second")["ciphertext"]
    );
    assert_exports(&t, &[("first", "same"), ("second", "same")]);
}

#[test]
fn test_add_keeps_multiline_value() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["add", "tls_key"])
        .write_stdin("-----BEGIN KEY-----\nabc\n-----END KEY-----\n")
        .output()
        .unwrap();
    assert_success(&output);

    assert_exports(&t, &[("tls_key", "-----BEGIN KEY-----\nabc\n-----END KEY-----")]);
}

#[test]
fn test_add_duplicate_name_fails() {
    let t = Test::with_credentials(&[("api_key", "first")]);

    let output = assert_untouched(&t, || t.cmd().args(["add", "api_key"]).output().unwrap());
    assert_failure(&output);
    assert_stderr_contains(&output, "a credential named 'api_key' already exists");
    assert_stderr_contains(&output, "kmscreds rotate api_key");
}

#[test]
fn test_add_invalid_name_fails() {
    let t = Test::init();

    for name in ["API_KEY", "api-key", "2fa"] {
        let output = t.cmd().args(["add", name]).output().unwrap();
        assert_failure(&output);
        assert_stderr_contains(&output, "invalid credential name");
    }
    assert_eq!(t.document()["credentials"], serde_json::json!([]));
}

#[test]
fn test_add_empty_value_fails() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["add", "api_key"])
        .write_stdin("\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "value for 'api_key' cannot be empty");
    assert_eq!(t.document()["credentials"], serde_json::json!([]));
}

#[test]
fn test_add_without_file_fails() {
    let t = Test::new();

    let output = t.cmd().args(["add", "api_key"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "unable to read file");
    assert_stderr_contains(&output, "kmscreds init");
    assert!(!t.credentials_path().exists());
}
