//! List command.
//!
//! Shows credential metadata. Never touches the key service.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::output;
use crate::core::store::{Credential, Store};
use crate::error::Result;

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    description: &'a str,
    added_at: DateTime<Utc>,
    rotated_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Credential> for Entry<'a> {
    fn from(credential: &'a Credential) -> Self {
        Self {
            name: &credential.name,
            description: &credential.description,
            added_at: credential.added_at,
            rotated_at: credential.rotated_at,
        }
    }
}

/// List the credentials in the file at `path`.
pub fn execute(path: &Path, json: bool) -> Result<()> {
    let store = Store::load(path)?;

    if json {
        let entries: Vec<Entry<'_>> = store.credentials.iter().map(Entry::from).collect();
        let mut out = serde_json::to_string_pretty(&entries).map_err(std::io::Error::from)?;
        out.push('\n');
        output::raw(&out)?;
        return Ok(());
    }

    output::kv("file:", path.display());
    output::kv("kms key:", &store.kms_key_id);

    if store.is_empty() {
        println!();
        output::dimmed("no credentials stored");
        return Ok(());
    }

    output::section(&format!("Credentials ({})", store.len()));
    for credential in &store.credentials {
        output::list_item(&describe(credential));
    }

    Ok(())
}

fn describe(credential: &Credential) -> String {
    let mut line = output::key(&credential.name);
    if !credential.description.is_empty() {
        line.push_str("  ");
        line.push_str(&credential.description);
    }

    let stamp = match credential.rotated_at {
        Some(rotated_at) => format!("rotated {}", rotated_at.format("%Y-%m-%d")),
        None => format!("added {}", credential.added_at.format("%Y-%m-%d")),
    };
    line.push_str("  ");
    line.push_str(&output::dim(&stamp));
    line
}
