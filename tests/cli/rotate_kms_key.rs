//! Tests for `kmscreds rotate-kms-key` command.

use crate::support::*;

#[test]
fn test_rotate_kms_key() {
    let t = Test::with_credentials(STANDARD_CREDENTIALS);
    let before = t.document();

    let output = t
        .cmd()
        .args(["rotate-kms-key", OTHER_KEY_ID])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "re-encrypting 3 credential(s)... ok");

    let after = t.document();
    assert_eq!(after["kms_key_id"], OTHER_KEY_ID);
    for i in 0..STANDARD_CREDENTIALS.len() {
        let old = &before["credentials"][i];
        let new = &after["credentials"][i];
        assert_eq!(new["name"], old["name"]);
        assert_eq!(new["added_at"], old["added_at"]);
        assert_eq!(new["rotated_at"], old["rotated_at"]);
        assert_ne!(new["ciphertext"], old["ciphertext"]);
    }

    assert_exports(&t, STANDARD_CREDENTIALS);
}

#[test]
fn test_rotate_kms_key_empty_file() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["rotate-kms-key", OTHER_KEY_ID])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.document()["kms_key_id"], OTHER_KEY_ID);
}

#[test]
fn test_rotate_kms_key_same_key_warns() {
    let t = Test::with_credentials(&[("api_key", "value")]);

    let output = t.cmd().args(["rotate-kms-key", KEY_ID]).output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "already under");
    assert_exports(&t, &[("api_key", "value")]);
}

#[test]
fn test_rotate_kms_key_empty_id_fails() {
    let t = Test::init();

    let output = t.cmd().args(["rotate-kms-key", " "]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "KMS key id cannot be empty");
    assert_eq!(t.document()["kms_key_id"], KEY_ID);
}

#[test]
fn test_rotate_kms_key_failure_leaves_file_unchanged() {
    let t = Test::with_credentials(STANDARD_CREDENTIALS);

    let mut doc = t.document();
    doc["credentials"][1]["ciphertext"] = serde_json::json!("EJK1];AAAA;AAAA");
    t.write_document(&doc);

    let output = assert_untouched(&t, || {
        t.cmd()
            .args(["rotate-kms-key", OTHER_KEY_ID])
            .output()
            .unwrap()
    });
    assert_failure(&output);
    assert_stderr_contains(&output, "unable to decrypt credential 'api_key'");
}
