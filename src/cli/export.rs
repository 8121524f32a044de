//! Export command.
//!
//! Prints every decrypted credential to stdout. Nothing is printed unless
//! every credential decrypts.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::cipher::kms;
use crate::core::config::Settings;
use crate::core::export::{render, ExportFormat};
use crate::core::store::Store;
use crate::error::Result;

/// Decrypt the credentials file and print it in `format`.
pub fn execute(settings: &Settings, path: &Path, format: ExportFormat) -> Result<()> {
    let store = Store::load(path)?;
    let kms = kms::default_service(settings)?;

    info!(count = store.len(), backend = kms.name(), ?format, "exporting credentials");
    let items = store.export_plaintext(kms.as_ref())?;
    let rendered = render(&items, format);

    output::raw(&rendered)?;
    Ok(())
}
