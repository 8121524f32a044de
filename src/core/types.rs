//! Type aliases for domain concepts.

use std::collections::BTreeMap;

/// Non-secret key/value metadata bound into every key service call.
///
/// A `None` value is a key with no value. Ordered so documents serialize
/// identically on every save.
pub type EncryptionContext = BTreeMap<String, Option<String>>;

/// A credential name (e.g., `database_password`).
pub type CredentialName = String;

/// An encoded credential (`EJK1];<key>;<payload>`).
pub type EncodedCiphertext = String;
