//! Rotate KMS key command.
//!
//! Re-encrypts every credential under a new master key and records the new
//! key id in the file.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::cipher::kms;
use crate::core::config::Settings;
use crate::core::store::Store;
use crate::core::validation::validate_key_id;
use crate::error::Result;

/// Move the credentials file at `path` to `new_kms_key_id`.
pub fn execute(settings: &Settings, path: &Path, new_kms_key_id: &str) -> Result<()> {
    validate_key_id(new_kms_key_id)?;

    let mut store = Store::load(path)?;
    if store.kms_key_id == new_kms_key_id {
        output::warn(&format!(
            "credentials are already under {}, re-encrypting anyway",
            new_kms_key_id
        ));
    }

    let kms = kms::default_service(settings)?;
    info!(
        from = %store.kms_key_id,
        to = new_kms_key_id,
        count = store.len(),
        "rotating kms key"
    );

    output::progress(&format!(
        "{}: re-encrypting {} credential(s)",
        kms.name(),
        store.len()
    ));
    let result = store.rekey(kms.as_ref(), new_kms_key_id);
    output::progress_done(result.is_ok());
    result?;

    store.save(path)?;
    output::success(&format!(
        "credentials now encrypted under {}",
        output::key(new_kms_key_id)
    ));

    Ok(())
}
