//! Error types.
//!
//! Each concern has its own enum; `Error` wraps them so callers can use `?`
//! across layers and `main` can still match on the specific failure.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for every kmscreds operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Envelope cipher and key service failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("key service error: {0}")]
    RemoteKey(String),

    #[error("unable to generate nonce: {0}")]
    RandomSource(String),

    #[error("unable to seal plaintext: {0}")]
    Seal(String),

    #[error("invalid format for encoded string: {0}")]
    Format(String),

    #[error("invalid data key size: expected {expected}, got {actual}")]
    KeySize { expected: usize, actual: usize },

    #[error("unable to open ciphertext: authentication failed")]
    Authentication,

    #[error("decrypted payload is not valid text: {0}")]
    Decode(String),
}

/// Credential store document failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unable to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decode store {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("invalid store {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("credentials file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("a credential named '{0}' already exists")]
    DuplicateName(String),

    #[error("credential not found: {0}")]
    NotFound(String),

    #[error("unable to encrypt credential '{name}': {source}")]
    Encrypt {
        name: String,
        #[source]
        source: CipherError,
    },

    #[error("unable to decrypt credential '{name}': {source}")]
    Decrypt {
        name: String,
        #[source]
        source: CipherError,
    },
}

/// User input validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("credential name cannot be empty")]
    EmptyName,

    #[error("invalid credential name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("value for '{0}' cannot be empty")]
    EmptyValue(String),

    #[error("invalid encryption context entry '{0}': expected KEY or KEY=VALUE")]
    InvalidContext(String),

    #[error("KMS key id cannot be empty")]
    EmptyKeyId,
}

/// Settings file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
