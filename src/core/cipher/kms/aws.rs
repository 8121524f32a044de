//! AWS KMS key service.
//!
//! Enable with `--features aws` (on by default).
//!
//! Credentials come from the environment (AWS_ACCESS_KEY_ID, etc.) or the
//! default provider chain. Region and profile can be pinned in the settings
//! file:
//!
//! ```toml
//! [aws]
//! region = "us-east-1"
//! profile = "production"
//! ```

use std::collections::HashMap;

use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::types::DataKeySpec;
use tracing::trace;
use zeroize::Zeroizing;

use super::{DataKey, KeyService};
use crate::core::config::AwsSettings;
use crate::core::types::EncryptionContext;
use crate::error::CipherError;

/// AWS KMS client driven from a private single-threaded runtime.
pub struct AwsKms {
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_kms::Client,
}

impl std::fmt::Debug for AwsKms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsKms").finish_non_exhaustive()
    }
}

impl AwsKms {
    /// Load AWS configuration and create a KMS client.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::RemoteKey` if the runtime cannot be created.
    pub fn new(settings: &AwsSettings) -> Result<Self, CipherError> {
        // The SDK is async; everything else in kmscreds is not.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CipherError::RemoteKey(format!("failed to create runtime: {}", e)))?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        let config = runtime.block_on(loader.load());
        let client = aws_sdk_kms::Client::new(&config);

        Ok(Self { runtime, client })
    }
}

/// KMS takes string values only; keys without a value are not sent.
fn aws_context(context: &EncryptionContext) -> Option<HashMap<String, String>> {
    let map: HashMap<String, String> = context
        .iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
        .collect();
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

impl KeyService for AwsKms {
    fn generate_data_key(
        &self,
        key_id: &str,
        context: &EncryptionContext,
    ) -> Result<DataKey, CipherError> {
        trace!(key_id = %key_id, "generating data key with AWS KMS");

        let output = self
            .runtime
            .block_on(
                self.client
                    .generate_data_key()
                    .key_id(key_id)
                    .key_spec(DataKeySpec::Aes256)
                    .set_encryption_context(aws_context(context))
                    .send(),
            )
            .map_err(|e| {
                CipherError::RemoteKey(format!("unable to generate data key: {}", e))
            })?;

        let ciphertext = output
            .ciphertext_blob()
            .ok_or_else(|| CipherError::RemoteKey("no ciphertext blob returned".into()))?
            .as_ref()
            .to_vec();
        let plaintext = output
            .plaintext()
            .ok_or_else(|| CipherError::RemoteKey("no plaintext key returned".into()))?
            .as_ref()
            .to_vec();

        trace!(key_ciphertext_len = ciphertext.len(), "generated data key");
        Ok(DataKey {
            ciphertext,
            plaintext: Zeroizing::new(plaintext),
        })
    }

    fn decrypt(
        &self,
        key_id: &str,
        key_ciphertext: &[u8],
        context: &EncryptionContext,
    ) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        trace!(
            key_id = %key_id,
            key_ciphertext_len = key_ciphertext.len(),
            "decrypting data key with AWS KMS"
        );

        let output = self
            .runtime
            .block_on(
                self.client
                    .decrypt()
                    .key_id(key_id)
                    .ciphertext_blob(Blob::new(key_ciphertext))
                    .set_encryption_context(aws_context(context))
                    .send(),
            )
            .map_err(|e| CipherError::RemoteKey(format!("unable to decrypt data key: {}", e)))?;

        let plaintext = output
            .plaintext()
            .ok_or_else(|| CipherError::RemoteKey("no plaintext key returned".into()))?;

        Ok(Zeroizing::new(plaintext.as_ref().to_vec()))
    }

    fn name(&self) -> &'static str {
        "aws-kms"
    }
}
