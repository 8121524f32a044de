//! Tests for `kmscreds init` command.

use crate::support::*;

#[test]
fn test_init_creates_empty_file() {
    let t = Test::new();

    let output = t.init_cmd(KEY_ID, &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "✓ initialized .credentials.json");

    let doc = t.document();
    assert_eq!(doc["kms_key_id"], KEY_ID);
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["encryption_context"], serde_json::json!({}));
    assert_eq!(doc["credentials"], serde_json::json!([]));
}

#[test]
fn test_init_with_context() {
    let t = Test::new();

    let output = t.init_cmd(KEY_ID, &["app=billing", "FLAG", "url=a=b"]);
    assert_success(&output);

    assert_eq!(
        t.document()["encryption_context"],
        serde_json::json!({"FLAG": null, "app": "billing", "url": "a=b"})
    );
}

#[test]
fn test_init_refuses_existing_file() {
    let t = Test::init();

    let output = assert_untouched(&t, || t.init_cmd(OTHER_KEY_ID, &[]));
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_init_empty_key_id() {
    let t = Test::new();

    let output = t.init_cmd("", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "KMS key id cannot be empty");
    assert!(!t.credentials_path().exists());
}

#[test]
fn test_init_invalid_context() {
    let t = Test::new();

    let output = t.init_cmd(KEY_ID, &["=orphan"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid encryption context entry '=orphan'");
    assert!(!t.credentials_path().exists());
}

#[test]
fn test_init_custom_path() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--path", "prod.json", "init", "--kms-key-id", KEY_ID])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.dir.path().join("prod.json").exists());
    assert!(!t.credentials_path().exists());
}

#[test]
fn test_init_path_from_env() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("KMSCREDS_PATH", "staging.json")
        .args(["init", "--kms-key-id", KEY_ID])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.dir.path().join("staging.json").exists());
}

#[cfg(unix)]
#[test]
fn test_init_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::init();
    let mode = std::fs::metadata(t.credentials_path())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
