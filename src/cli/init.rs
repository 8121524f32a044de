//! Init command.
//!
//! Creates an empty credentials file bound to one KMS key and context.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::store::Store;
use crate::core::validation::{parse_context, validate_key_id};
use crate::error::Result;

/// Create a new credentials file at `path`.
pub fn execute(path: &Path, kms_key_id: &str, context: &[String]) -> Result<()> {
    validate_key_id(kms_key_id)?;
    let context = parse_context(context)?;

    info!(path = %path.display(), kms_key_id, "initializing credentials file");
    let store = Store::new(kms_key_id, context);
    store.create(path)?;

    output::success(&format!(
        "initialized {}",
        output::path(&path.display().to_string())
    ));
    output::kv("kms key:", &store.kms_key_id);
    for (key, value) in &store.encryption_context {
        output::kv("context:", format_context_entry(key, value.as_deref()));
    }
    output::hint(&format!(
        "add a credential: {}",
        output::cmd("kmscreds add <NAME>")
    ));

    Ok(())
}

fn format_context_entry(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{}={}", key, value),
        None => key.to_string(),
    }
}
