//! Credential store.
//!
//! A `Store` is the in-memory form of one credentials document: the KMS key
//! id and encryption context shared by every credential, plus the ordered
//! list of credentials. Each operation that touches secret values builds an
//! envelope [`Cipher`] bound to the store's own key id and context, so a
//! ciphertext is only ever valid inside the store that produced it.
//!
//! Operations either complete or leave the store untouched. Plaintext only
//! exists for the duration of a call.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::{Cipher, KeyService};
use crate::core::constants::STORE_VERSION;
use crate::core::types::{CredentialName, EncodedCiphertext, EncryptionContext};
use crate::error::{Result, StoreError};

mod persist;

/// One credentials document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Remote key used for every credential in this document
    pub kms_key_id: String,
    /// Document schema version
    pub version: u32,
    /// Context bound into every key service call
    #[serde(default)]
    pub encryption_context: EncryptionContext,
    /// Credentials in insertion order
    #[serde(default)]
    pub credentials: Vec<Credential>,
}

/// A named, encrypted secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub name: CredentialName,
    #[serde(default)]
    pub description: String,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub rotated_at: Option<DateTime<Utc>>,
    pub ciphertext: EncodedCiphertext,
}

/// A decrypted credential produced by [`Store::export_plaintext`].
pub struct PlaintextItem {
    pub name: CredentialName,
    pub plaintext: Zeroizing<String>,
}

impl std::fmt::Debug for PlaintextItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaintextItem")
            .field("name", &self.name)
            .field("plaintext", &"<redacted>")
            .finish()
    }
}

/// Current time truncated to whole seconds.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

impl Store {
    /// Create an empty store bound to a key id and context.
    ///
    /// Makes no remote calls.
    pub fn new(kms_key_id: &str, encryption_context: EncryptionContext) -> Self {
        Self {
            kms_key_id: kms_key_id.to_string(),
            version: STORE_VERSION,
            encryption_context,
            credentials: Vec::new(),
        }
    }

    /// Check whether a credential with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.credentials.iter().any(|c| c.name == name)
    }

    /// Number of credentials.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the store holds no credentials.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Envelope cipher bound to this store's key id and context.
    pub fn cipher<'a>(&self, kms: &'a dyn KeyService) -> Cipher<'a> {
        Cipher::new(kms, &self.kms_key_id, &self.encryption_context)
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.credentials
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()).into())
    }

    /// Encrypt a plaintext and append it as a new credential.
    ///
    /// Uniqueness is the caller's job: check [`Store::contains`] first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encrypt` wrapping the cipher failure. The store
    /// is unchanged on error.
    pub fn add(
        &mut self,
        kms: &dyn KeyService,
        plaintext: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let cipher = self.cipher(kms);
        self.add_with(&cipher, plaintext, name, description)
    }

    pub(crate) fn add_with(
        &mut self,
        cipher: &Cipher<'_>,
        plaintext: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        debug!(name = %name, "adding credential");

        let ciphertext = cipher
            .encrypt(plaintext)
            .map_err(|source| StoreError::Encrypt {
                name: name.to_string(),
                source,
            })?;

        self.credentials.push(Credential {
            name: name.to_string(),
            description: description.to_string(),
            added_at: now(),
            rotated_at: None,
            ciphertext,
        });

        Ok(())
    }

    /// Replace a credential's secret value in place.
    ///
    /// `name`, `description` and `added_at` are kept; `ciphertext` and
    /// `rotated_at` are updated.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no credential has this name, or
    /// `StoreError::Encrypt` if encryption fails. The store is unchanged on
    /// error.
    pub fn rotate(&mut self, kms: &dyn KeyService, name: &str, plaintext: &str) -> Result<()> {
        let cipher = self.cipher(kms);
        self.rotate_with(&cipher, name, plaintext)
    }

    pub(crate) fn rotate_with(
        &mut self,
        cipher: &Cipher<'_>,
        name: &str,
        plaintext: &str,
    ) -> Result<()> {
        debug!(name = %name, "rotating credential");

        let index = self.position(name)?;
        let ciphertext = cipher
            .encrypt(plaintext)
            .map_err(|source| StoreError::Encrypt {
                name: name.to_string(),
                source,
            })?;

        let credential = &mut self.credentials[index];
        credential.ciphertext = ciphertext;
        credential.rotated_at = Some(now().max(credential.added_at));

        Ok(())
    }

    /// Decrypt every credential in store order.
    ///
    /// All or nothing: the first failure aborts and every item decrypted so
    /// far is dropped (and zeroized) before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Decrypt` naming the credential that failed.
    pub fn export_plaintext(&self, kms: &dyn KeyService) -> Result<Vec<PlaintextItem>> {
        debug!(count = self.credentials.len(), "exporting plaintext");

        let cipher = self.cipher(kms);
        self.credentials
            .iter()
            .map(|credential| -> Result<PlaintextItem> {
                let plaintext =
                    cipher
                        .decrypt(&credential.ciphertext)
                        .map_err(|source| StoreError::Decrypt {
                            name: credential.name.clone(),
                            source,
                        })?;
                Ok(PlaintextItem {
                    name: credential.name.clone(),
                    plaintext,
                })
            })
            .collect()
    }

    /// Re-encrypt every credential under a different KMS key.
    ///
    /// Names, descriptions and timestamps are kept. The encryption context
    /// does not change.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Decrypt` or `StoreError::Encrypt` naming the
    /// credential that failed. The store is unchanged on error.
    pub fn rekey(&mut self, kms: &dyn KeyService, new_key_id: &str) -> Result<()> {
        let current = self.cipher(kms);
        let next = Cipher::new(kms, new_key_id, &self.encryption_context);
        self.rekey_with(&current, &next)
    }

    pub(crate) fn rekey_with(&mut self, current: &Cipher<'_>, next: &Cipher<'_>) -> Result<()> {
        debug!(
            from = %current.key_id(),
            to = %next.key_id(),
            count = self.credentials.len(),
            "re-encrypting credentials under new key"
        );

        let mut ciphertexts = Vec::with_capacity(self.credentials.len());
        for credential in &self.credentials {
            let plaintext =
                current
                    .decrypt(&credential.ciphertext)
                    .map_err(|source| StoreError::Decrypt {
                        name: credential.name.clone(),
                        source,
                    })?;
            let ciphertext = next
                .encrypt(&plaintext)
                .map_err(|source| StoreError::Encrypt {
                    name: credential.name.clone(),
                    source,
                })?;
            ciphertexts.push(ciphertext);
        }

        for (credential, ciphertext) in self.credentials.iter_mut().zip(ciphertexts) {
            credential.ciphertext = ciphertext;
        }
        self.kms_key_id = next.key_id().to_string();

        Ok(())
    }

    /// Remove a credential, returning it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no credential has this name.
    pub fn remove(&mut self, name: &str) -> Result<Credential> {
        let index = self.position(name)?;
        debug!(name = %name, "removing credential");
        Ok(self.credentials.remove(index))
    }

    /// Replace a credential's description.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no credential has this name.
    pub fn set_description(&mut self, name: &str, description: &str) -> Result<()> {
        let index = self.position(name)?;
        self.credentials[index].description = description.to_string();
        Ok(())
    }
}
