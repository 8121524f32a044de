//! Key service backends.
//!
//! The envelope cipher never sees a master key. It asks a [`KeyService`] for
//! a fresh data key on encrypt and for the unwrapped data key on decrypt.
//!
//! - `aws`: AWS KMS (feature-gated, on by default)
//! - `stub`: local stand-in for CLI integration tests (`test-kms`)

use zeroize::Zeroizing;

use crate::core::config::Settings;
use crate::core::types::EncryptionContext;
use crate::error::{CipherError, Result};

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(any(test, feature = "test-kms"))]
pub mod stub;


/// A data key as returned by `generate_data_key`.
pub struct DataKey {
    /// The data key wrapped under the remote master key. Opaque.
    pub ciphertext: Vec<u8>,
    /// The raw data key. Used once, then dropped and zeroized.
    pub plaintext: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataKey")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("plaintext", &"<redacted>")
            .finish()
    }
}

/// Remote key management primitives.
///
/// Implemented by real providers and by stubs for testing. Calls block
/// until the service answers or fails; timeouts belong to the implementation.
pub trait KeyService: std::fmt::Debug {
    /// Generate a fresh data key scoped to `key_id` and `context`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::RemoteKey` on any service-side problem.
    fn generate_data_key(
        &self,
        key_id: &str,
        context: &EncryptionContext,
    ) -> std::result::Result<DataKey, CipherError>;

    /// Unwrap a data key previously produced by `generate_data_key`.
    ///
    /// The returned length is not trusted; the cipher checks it.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::RemoteKey` on any service-side problem,
    /// including a key id or context that does not match the wrapped key.
    fn decrypt(
        &self,
        key_id: &str,
        key_ciphertext: &[u8],
        context: &EncryptionContext,
    ) -> std::result::Result<Zeroizing<Vec<u8>>, CipherError>;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}

/// Build the key service for this build.
///
/// `test-kms` builds always get the local stub so integration tests never
/// reach a real provider. Otherwise AWS KMS is used when compiled in.
///
/// # Errors
///
/// Returns `CipherError::RemoteKey` if no backend is available or the
/// client cannot be initialized.
pub fn default_service(settings: &Settings) -> Result<Box<dyn KeyService>> {
    #[cfg(feature = "test-kms")]
    {
        let _ = settings;
        tracing::debug!("using stub key service");
        Ok(Box::new(stub::StubKms))
    }

    #[cfg(all(not(feature = "test-kms"), feature = "aws"))]
    {
        tracing::debug!("using AWS KMS key service");
        Ok(Box::new(aws::AwsKms::new(&settings.aws)?))
    }

    #[cfg(all(not(feature = "test-kms"), not(feature = "aws")))]
    {
        let _ = settings;
        Err(CipherError::RemoteKey(
            "no key service compiled in. Rebuild with: cargo install kmscreds --features aws"
                .to_string(),
        )
        .into())
    }
}
