//! Tests for `kmscreds edit` command.

use crate::support::*;

#[test]
fn test_edit_description() {
    let t = Test::with_credentials(&[("api_key", "value")]);
    let before = t.credential("api_key");

    let output = t
        .cmd()
        .args(["edit", "api_key", "--description", "Rotated quarterly"])
        .output()
        .unwrap();
    assert_success(&output);

    let after = t.credential("api_key");
    assert_eq!(after["description"], "Rotated quarterly");
    assert_eq!(after["ciphertext"], before["ciphertext"]);
    assert_eq!(after["added_at"], before["added_at"]);
    assert!(after["rotated_at"].is_null());
}

#[test]
fn test_edit_unknown_fails() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["edit", "missing", "--description", "x"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "credential not found: missing");
}
