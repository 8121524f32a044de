//! Delete command.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::store::Store;
use crate::error::Result;

/// Remove credential `name`.
pub fn execute(path: &Path, name: &str) -> Result<()> {
    let mut store = Store::load(path)?;
    store.remove(name)?;
    store.save(path)?;

    info!(name, "deleted credential");
    output::success(&format!("deleted {}", output::key(name)));
    Ok(())
}
