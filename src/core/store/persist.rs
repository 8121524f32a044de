//! Credentials document persistence.
//!
//! Documents are pretty-printed JSON so they diff cleanly in version
//! control. Saving goes through a sibling temporary file and a rename, so a
//! failed save never truncates the existing document.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Store;
use crate::core::constants::STORE_VERSION;
use crate::core::validation::validate_name;
use crate::error::{Result, StoreError};

impl Store {
    /// Load and validate a credentials document.
    ///
    /// # Errors
    ///
    /// - `StoreError::Read` if the file cannot be read
    /// - `StoreError::Decode` if it is not a credentials document
    /// - `StoreError::Invalid` if it decodes but breaks a document invariant
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading credentials");

        let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store: Self = serde_json::from_str(&contents).map_err(|e| StoreError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        store.validate().map_err(|reason| StoreError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(credentials = store.credentials.len(), "credentials loaded");
        Ok(store)
    }

    /// Write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` on any I/O failure. The previous file, if
    /// any, is left untouched.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving credentials");

        let contents = self.to_document(path)?;
        write_atomic(path, contents.as_bytes()).map_err(|source| {
            StoreError::Write {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Write the document to `path`, which must not exist yet.
    ///
    /// The existence check and the create are one filesystem operation, so
    /// two concurrent calls cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if `path` exists, or
    /// `StoreError::Write` on any other I/O failure.
    pub fn create(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "creating credentials file");

        let contents = self.to_document(path)?;
        write_new(path, contents.as_bytes()).map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                StoreError::AlreadyExists(path.to_path_buf()).into()
            } else {
                StoreError::Write {
                    path: path.to_path_buf(),
                    source,
                }
                .into()
            }
        })
    }

    fn to_document(&self, path: &Path) -> Result<String> {
        let mut contents = serde_json::to_string_pretty(self).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        contents.push('\n');
        Ok(contents)
    }

    /// Check document invariants that the type system cannot.
    fn validate(&self) -> std::result::Result<(), String> {
        if self.kms_key_id.trim().is_empty() {
            return Err("kms_key_id cannot be empty".to_string());
        }
        if self.version != STORE_VERSION {
            return Err(format!(
                "unsupported version {} (expected {})",
                self.version, STORE_VERSION
            ));
        }

        let mut seen = HashSet::new();
        for (i, credential) in self.credentials.iter().enumerate() {
            if credential.name.is_empty() {
                return Err(format!("credential #{} has an empty name", i + 1));
            }
            // Names end up unescaped as variable names in `export` output.
            validate_name(&credential.name).map_err(|e| e.to_string())?;
            if !seen.insert(credential.name.as_str()) {
                return Err(format!("duplicate credential name '{}'", credential.name));
            }
            if credential.ciphertext.is_empty() {
                return Err(format!("credential '{}' has no ciphertext", credential.name));
            }
            if let Some(rotated_at) = credential.rotated_at {
                if rotated_at < credential.added_at {
                    return Err(format!(
                        "credential '{}' was rotated before it was added",
                        credential.name
                    ));
                }
            }
        }

        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "credentials".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn private_file() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = temp_path(path);

    let result = (|| -> std::io::Result<()> {
        let mut file = private_file().create(true).truncate(true).open(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = private_file().create_new(true).open(path)?;

    let result = file.write_all(bytes).and_then(|()| file.sync_all());
    if result.is_err() {
        drop(file);
        let _ = fs::remove_file(path);
    }
    result
}
