//! Rotate command.
//!
//! Replaces a credential's value, keeping its name and description.

use std::path::Path;

use tracing::info;

use crate::cli::{input, output};
use crate::core::cipher::kms;
use crate::core::config::Settings;
use crate::core::store::Store;
use crate::error::{Result, StoreError};

/// Rotate credential `name`, reading the new value from stdin.
pub fn execute(settings: &Settings, path: &Path, name: &str) -> Result<()> {
    let mut store = Store::load(path)?;
    if !store.contains(name) {
        return Err(StoreError::NotFound(name.to_string()).into());
    }

    let plaintext = input::read_secret(name)?;
    let kms = kms::default_service(settings)?;

    info!(name, backend = kms.name(), "rotating credential");
    output::progress(&format!("{}: encrypting {}", kms.name(), name));
    let result = store.rotate(kms.as_ref(), name, &plaintext);
    output::progress_done(result.is_ok());
    result?;

    store.save(path)?;
    output::success(&format!("rotated {}", output::key(name)));

    Ok(())
}
