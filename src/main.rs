//! kmscreds - Credentials files with per-secret KMS envelope encryption.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kmscreds::cli::output;
use kmscreds::cli::{execute, Cli};
use kmscreds::error::{Error, StoreError};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `export` output stays clean
    let filter = EnvFilter::try_from_env("KMSCREDS_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("kmscreds=debug")
        } else {
            EnvFilter::new("kmscreds=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.path) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Store(StoreError::Read { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Some("run: kmscreds init --kms-key-id <KEY>".to_string())
        }
        Error::Store(StoreError::AlreadyExists(_)) => {
            Some("pass --path to create a file elsewhere".to_string())
        }
        Error::Store(StoreError::DuplicateName(name)) => {
            Some(format!("run: kmscreds rotate {}", name))
        }
        Error::Store(StoreError::NotFound(_)) => Some("run: kmscreds list".to_string()),
        _ => None,
    }
}
