//! Edit command.
//!
//! Only the description is editable. Values change through `rotate`.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::store::Store;
use crate::error::Result;

/// Set the description of credential `name`.
pub fn execute(path: &Path, name: &str, description: &str) -> Result<()> {
    let mut store = Store::load(path)?;
    store.set_description(name, description)?;
    store.save(path)?;

    info!(name, "updated description");
    output::success(&format!("updated {}", output::key(name)));
    Ok(())
}
