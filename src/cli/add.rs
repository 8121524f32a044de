//! Add command.
//!
//! Encrypts a new secret value under the file's KMS key.

use std::path::Path;

use tracing::info;

use crate::cli::{input, output};
use crate::core::cipher::kms;
use crate::core::config::Settings;
use crate::core::store::Store;
use crate::core::validation::validate_name;
use crate::error::{Result, StoreError};

/// Add a credential named `name`, reading its value from stdin.
pub fn execute(settings: &Settings, path: &Path, name: &str, description: &str) -> Result<()> {
    validate_name(name)?;

    let mut store = Store::load(path)?;
    if store.contains(name) {
        return Err(StoreError::DuplicateName(name.to_string()).into());
    }

    let plaintext = input::read_secret(name)?;
    let kms = kms::default_service(settings)?;

    info!(name, backend = kms.name(), "adding credential");
    output::progress(&format!("{}: encrypting {}", kms.name(), name));
    let result = store.add(kms.as_ref(), &plaintext, name, description);
    output::progress_done(result.is_ok());
    result?;

    store.save(path)?;
    output::success(&format!("added {}", output::key(name)));

    Ok(())
}
