//! Command-line interface.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod init;
pub mod input;
pub mod list;
pub mod output;
pub mod rotate;
pub mod rotate_kms_key;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Settings;
use crate::core::export::ExportFormat;

/// kmscreds - Credentials files with per-secret KMS envelope encryption.
#[derive(Parser)]
#[command(
    name = "kmscreds",
    about = "Credentials files with per-secret KMS envelope encryption",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the credentials file [default: ./.credentials.json]
    #[arg(long, global = true, env = "KMSCREDS_PATH")]
    pub path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a new, empty credentials file
    Init {
        /// KMS key id, ARN or alias used for every credential in the file
        #[arg(long)]
        kms_key_id: String,
        /// Encryption context entry, repeatable
        #[arg(long = "context", value_name = "KEY=VALUE")]
        context: Vec<String>,
    },

    /// Add a credential, reading its value from stdin
    Add {
        /// Credential name (e.g., db_password)
        name: String,
        /// Description of the credential
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Replace a credential's value, reading the new value from stdin
    Rotate {
        /// Credential name
        name: String,
    },

    /// Remove a credential
    Delete {
        /// Credential name
        name: String,
    },

    /// Change a credential's description
    Edit {
        /// Credential name
        name: String,
        /// New description
        #[arg(long)]
        description: String,
    },

    /// List credentials (names only, no values)
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decrypt every credential and print it
    Export {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Dotenv)]
        format: Format,
    },

    /// Re-encrypt every credential under a different KMS key
    RotateKmsKey {
        /// The new KMS key id, ARN or alias
        new_kms_key_id: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Export formats.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Dotenv,
    Bash,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Dotenv => ExportFormat::Dotenv,
            Format::Bash => ExportFormat::Bash,
            Format::Json => ExportFormat::Json,
        }
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, path: Option<PathBuf>) -> crate::error::Result<()> {
    use Command::*;

    if let Completions { shell } = command {
        return completions::execute(shell);
    }

    let settings = Settings::load()?;
    let path = settings.credentials_path(path);

    match command {
        Init {
            kms_key_id,
            context,
        } => init::execute(&path, &kms_key_id, &context),
        Add { name, description } => add::execute(&settings, &path, &name, &description),
        Rotate { name } => rotate::execute(&settings, &path, &name),
        Delete { name } => delete::execute(&path, &name),
        Edit { name, description } => edit::execute(&path, &name, &description),
        List { json } => list::execute(&path, json),
        Export { format } => export::execute(&settings, &path, format.into()),
        RotateKmsKey { new_kms_key_id } => {
            rotate_kms_key::execute(&settings, &path, &new_kms_key_id)
        }
        Completions { shell } => completions::execute(shell),
    }
}
