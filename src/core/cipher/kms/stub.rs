//! Local key service for integration tests.
//!
//! "Wraps" a data key by writing it in hex next to the key id and context
//! it was generated for. NOT cryptographically secure; it only exercises
//! the plumbing without network access. Selected automatically in
//! `test-kms` builds.

use rand::RngCore;
use zeroize::Zeroizing;

use super::{DataKey, KeyService};
use crate::core::constants::KEY_SIZE;
use crate::core::types::EncryptionContext;
use crate::error::CipherError;

const STUB_PREFIX: &str = "stub-kms|";

/// Stub key service.
#[derive(Debug, Default)]
pub struct StubKms;

fn binding(key_id: &str, context: &EncryptionContext) -> Result<String, CipherError> {
    let context = serde_json::to_string(context)
        .map_err(|e| CipherError::RemoteKey(format!("invalid context: {}", e)))?;
    Ok(format!("{}{}|{}", STUB_PREFIX, key_id, context))
}

impl KeyService for StubKms {
    fn generate_data_key(
        &self,
        key_id: &str,
        context: &EncryptionContext,
    ) -> Result<DataKey, CipherError> {
        if key_id.is_empty() {
            return Err(CipherError::RemoteKey("key id cannot be empty".to_string()));
        }

        let mut key = Zeroizing::new(vec![0u8; KEY_SIZE]);
        rand::rngs::OsRng
            .try_fill_bytes(&mut key)
            .map_err(|e| CipherError::RemoteKey(format!("stub key generation failed: {}", e)))?;

        let hex: String = key.iter().map(|b| format!("{:02x}", b)).collect();
        let wrapped = format!("{}|{}", binding(key_id, context)?, hex);

        Ok(DataKey {
            ciphertext: wrapped.into_bytes(),
            plaintext: key,
        })
    }

    fn decrypt(
        &self,
        key_id: &str,
        key_ciphertext: &[u8],
        context: &EncryptionContext,
    ) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        let wrapped = std::str::from_utf8(key_ciphertext)
            .map_err(|_| CipherError::RemoteKey("not a stub-kms ciphertext".to_string()))?;
        let (bound, hex) = wrapped
            .rsplit_once('|')
            .ok_or_else(|| CipherError::RemoteKey("not a stub-kms ciphertext".to_string()))?;

        if !bound.starts_with(STUB_PREFIX) {
            return Err(CipherError::RemoteKey("not a stub-kms ciphertext".to_string()));
        }
        if bound != binding(key_id, context)? {
            return Err(CipherError::RemoteKey(
                "key id or encryption context does not match".to_string(),
            ));
        }
        if hex.len() % 2 != 0 || !hex.is_ascii() {
            return Err(CipherError::RemoteKey("invalid hex".to_string()));
        }

        let bytes: Result<Vec<u8>, _> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect();
        let bytes = bytes.map_err(|e| CipherError::RemoteKey(format!("invalid hex: {}", e)))?;
        Ok(Zeroizing::new(bytes))
    }

    fn name(&self) -> &'static str {
        "stub-kms"
    }
}
