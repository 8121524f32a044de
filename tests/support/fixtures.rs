//! Test fixtures and constants.

/// KMS key id used by `Test::init`.
pub const KEY_ID: &str = "arn:aws:kms:us-east-1:123456789012:alias/kmscreds-test";

/// A second key for master key rotation tests.
pub const OTHER_KEY_ID: &str = "arn:aws:kms:us-east-1:123456789012:alias/kmscreds-next";

/// Version tag every stored ciphertext starts with.
pub const VERSION_TAG: &str = "EJK1];";

/// Standard test credentials used across multiple tests.
pub const STANDARD_CREDENTIALS: &[(&str, &str)] = &[
    ("database_url", "postgres://localhost/mydb"),
    ("api_key", "sk-test-12345"),
    ("jwt_secret", "super-secret-jwt-token"),
];
