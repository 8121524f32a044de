//! Secret value input.
//!
//! Piped stdin is read to the end; a terminal gets a hidden prompt.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::validation::validate_value;
use crate::error::Result;

/// Read the value for credential `name`.
///
/// # Errors
///
/// Fails on I/O or prompt errors, and with `ValidationError::EmptyValue`
/// when nothing was entered.
pub fn read_secret(name: &str) -> Result<Zeroizing<String>> {
    let value = if !io::stdin().is_terminal() {
        read_from(io::stdin().lock())?
    } else {
        Zeroizing::new(
            Password::new()
                .with_prompt(format!("Value for {}", output::key(name)))
                .interact()?,
        )
    };

    validate_value(name, &value)?;
    Ok(value)
}

/// Read all of `reader`, dropping a single trailing newline.
fn read_from(mut reader: impl Read) -> io::Result<Zeroizing<String>> {
    let mut input = Zeroizing::new(String::new());
    reader.read_to_string(&mut input)?;

    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}
