//! Envelope encryption of individual credentials.
//!
//! Every encrypt asks the key service for a fresh 256-bit data key, seals the
//! plaintext with it (XSalsa20-Poly1305 secret box, 192-bit random nonce) and
//! stores the wrapped data key next to the payload:
//!
//! ```text
//! EJK1];<base64(wrapped data key)>;<base64(nonce || sealed payload)>
//! ```
//!
//! The plaintext data key never leaves this module and is zeroized on drop.
//!
//! ## Adding a New Key Service
//!
//! 1. Implement the `KeyService` trait in a new file under `kms/`
//! 2. Feature-gate it if it pulls in a provider SDK
//! 3. Select it in `kms::default_service`

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::{Nonce, XSalsa20Poly1305};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::{FIELD_SEPARATOR, KEY_SIZE, NONCE_SIZE, VERSION_TAG};
use crate::core::types::{EncodedCiphertext, EncryptionContext};
use crate::error::CipherError;

pub mod entropy;
pub mod kms;

pub use entropy::{Entropy, OsEntropy};
pub use kms::{DataKey, KeyService};

type CipherResult<T> = std::result::Result<T, CipherError>;

/// Envelope cipher bound to one key service, key id and encryption context.
///
/// Holds no key material; safe to reuse for any number of calls.
pub struct Cipher<'a> {
    kms: &'a dyn KeyService,
    key_id: String,
    context: EncryptionContext,
    entropy: &'a dyn Entropy,
}

impl std::fmt::Debug for Cipher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher")
            .field("kms", &self.kms.name())
            .field("key_id", &self.key_id)
            .field("context", &self.context)
            .finish()
    }
}

impl<'a> Cipher<'a> {
    /// Create a cipher drawing nonces from the operating system.
    pub fn new(kms: &'a dyn KeyService, key_id: &str, context: &EncryptionContext) -> Self {
        Self::with_entropy(kms, key_id, context, &OsEntropy)
    }

    /// Create a cipher with an explicit random source.
    pub fn with_entropy(
        kms: &'a dyn KeyService,
        key_id: &str,
        context: &EncryptionContext,
        entropy: &'a dyn Entropy,
    ) -> Self {
        Self {
            kms,
            key_id: key_id.to_string(),
            context: context.clone(),
            entropy,
        }
    }

    /// Key id every data key is scoped to.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Encrypt a plaintext string into the versioned text encoding.
    ///
    /// # Errors
    ///
    /// - `CipherError::RemoteKey` if no data key could be generated
    /// - `CipherError::KeySize` if the service returned a key that is not 32 bytes
    /// - `CipherError::RandomSource` if no nonce could be generated
    /// - `CipherError::Seal` if the plaintext is beyond the stream cipher's
    ///   length limit
    pub fn encrypt(&self, plaintext: &str) -> CipherResult<EncodedCiphertext> {
        trace!(
            key_id = %self.key_id,
            plaintext_len = plaintext.len(),
            "encrypting"
        );

        let data_key = self.kms.generate_data_key(&self.key_id, &self.context)?;
        check_key_size(&data_key.plaintext)?;

        let mut nonce = [0u8; NONCE_SIZE];
        self.entropy.fill(&mut nonce)?;

        let sealed = secret_box(&data_key.plaintext)?
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| CipherError::Seal(format!("{} byte plaintext", plaintext.len())))?;

        let mut payload = Vec::with_capacity(NONCE_SIZE + sealed.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&sealed);

        let encoded = encode(&data_key.ciphertext, &payload);
        trace!(ciphertext_len = encoded.len(), "encrypted");
        Ok(encoded)
    }

    /// Decrypt a versioned text encoding back into plaintext.
    ///
    /// The text is parsed before the key service is contacted, so malformed
    /// input never costs a remote call.
    ///
    /// # Errors
    ///
    /// - `CipherError::Format` if the text does not match the wire grammar
    /// - `CipherError::RemoteKey` if the data key could not be unwrapped
    /// - `CipherError::KeySize` if the unwrapped key is not 32 bytes
    /// - `CipherError::Authentication` if the payload was tampered with or
    ///   belongs to another key
    /// - `CipherError::Decode` if the opened payload is not UTF-8
    pub fn decrypt(&self, encoded: &str) -> CipherResult<Zeroizing<String>> {
        trace!(ciphertext_len = encoded.len(), "decrypting");

        let Encoded {
            key_ciphertext,
            payload,
        } = decode(encoded)?;

        let key = self
            .kms
            .decrypt(&self.key_id, &key_ciphertext, &self.context)?;
        check_key_size(&key)?;

        let (nonce, sealed) = payload.split_at(NONCE_SIZE);
        let opened = Zeroizing::new(
            secret_box(&key)?
                .decrypt(Nonce::from_slice(nonce), sealed)
                .map_err(|_| CipherError::Authentication)?,
        );

        let text = std::str::from_utf8(&opened).map_err(|e| CipherError::Decode(e.to_string()))?;
        Ok(Zeroizing::new(text.to_string()))
    }
}

/// Decoded fields of the wire format.
#[derive(Debug)]
struct Encoded {
    key_ciphertext: Vec<u8>,
    payload: Vec<u8>,
}

fn check_key_size(key: &[u8]) -> CipherResult<()> {
    if key.len() != KEY_SIZE {
        return Err(CipherError::KeySize {
            expected: KEY_SIZE,
            actual: key.len(),
        });
    }
    Ok(())
}

fn secret_box(key: &[u8]) -> CipherResult<XSalsa20Poly1305> {
    XSalsa20Poly1305::new_from_slice(key).map_err(|_| CipherError::KeySize {
        expected: KEY_SIZE,
        actual: key.len(),
    })
}

fn encode(key_ciphertext: &[u8], payload: &[u8]) -> EncodedCiphertext {
    format!(
        "{}{}{}{}",
        VERSION_TAG,
        STANDARD.encode(key_ciphertext),
        FIELD_SEPARATOR,
        STANDARD.encode(payload)
    )
}

fn decode(encoded: &str) -> CipherResult<Encoded> {
    let body = encoded
        .strip_prefix(VERSION_TAG)
        .ok_or_else(|| CipherError::Format("missing version tag".to_string()))?;

    let mut fields = body.split(FIELD_SEPARATOR);
    let (key_field, payload_field) = match (fields.next(), fields.next(), fields.next()) {
        (Some(key), Some(payload), None) => (key, payload),
        _ => {
            return Err(CipherError::Format(
                "expected exactly two ';'-separated fields".to_string(),
            ))
        }
    };

    let key_ciphertext = STANDARD
        .decode(key_field)
        .map_err(|e| CipherError::Format(format!("invalid base64 in data key: {}", e)))?;
    let payload = STANDARD
        .decode(payload_field)
        .map_err(|e| CipherError::Format(format!("invalid base64 in payload: {}", e)))?;

    if key_ciphertext.is_empty() {
        return Err(CipherError::Format("empty data key".to_string()));
    }
    if payload.len() < NONCE_SIZE {
        return Err(CipherError::Format(format!(
            "payload is {} bytes, shorter than the {}-byte nonce",
            payload.len(),
            NONCE_SIZE
        )));
    }

    Ok(Encoded {
        key_ciphertext,
        payload,
    })
}
