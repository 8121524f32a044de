//! Input validation for kmscreds operations.
//!
//! Validates credential names, values and `init` arguments before any key
//! service call is made.

use crate::core::types::EncryptionContext;
use crate::error::{Result, ValidationError};

/// Validate a credential name.
///
/// Credential names must be lowercase snake case so every export format can
/// use them as a variable name:
/// - Only a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() && ch != '_' {
            return Err(ValidationError::InvalidName {
                name: name.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only a-z, 0-9, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Validate a secret value.
///
/// # Errors
///
/// Returns `ValidationError::EmptyValue` if the value is empty.
pub fn validate_value(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue(name.to_string()).into());
    }
    Ok(())
}

/// Validate a KMS key id.
///
/// # Errors
///
/// Returns `ValidationError::EmptyKeyId` for an empty or blank id.
pub fn validate_key_id(key_id: &str) -> Result<()> {
    if key_id.trim().is_empty() {
        return Err(ValidationError::EmptyKeyId.into());
    }
    Ok(())
}

/// Parse `KEY=VALUE` / `KEY` arguments into an encryption context.
///
/// `KEY` alone maps to `None`. Later duplicates overwrite earlier ones.
///
/// # Errors
///
/// Returns `ValidationError::InvalidContext` for an empty key.
pub fn parse_context(entries: &[String]) -> Result<EncryptionContext> {
    let mut context = EncryptionContext::new();
    for entry in entries {
        let (key, value) = match entry.split_once('=') {
            Some((key, value)) => (key, Some(value.to_string())),
            None => (entry.as_str(), None),
        };
        if key.trim().is_empty() {
            return Err(ValidationError::InvalidContext(entry.clone()).into());
        }
        context.insert(key.to_string(), value);
    }
    Ok(context)
}
