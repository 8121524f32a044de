//! Randomness capability for nonce generation.
//!
//! The cipher takes its random source as a value instead of reaching for a
//! process-wide generator, so tests can pin the nonce.

use rand::RngCore;

use crate::error::CipherError;

/// A source of cryptographically secure random bytes.
pub trait Entropy: std::fmt::Debug {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::RandomSource` if the source fails.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CipherError>;
}

/// Operating system randomness (`getrandom` via `rand::rngs::OsRng`).
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CipherError> {
        rand::rngs::OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CipherError::RandomSource(e.to_string()))
    }
}

/// Repeats a fixed byte pattern.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ConstEntropy(pub Vec<u8>);

#[cfg(test)]
impl Entropy for ConstEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CipherError> {
        for (b, src) in dest.iter_mut().zip(self.0.iter().cycle()) {
            *b = *src;
        }
        Ok(())
    }
}

/// Always fails with the given message.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FailingEntropy(pub &'static str);

#[cfg(test)]
impl Entropy for FailingEntropy {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), CipherError> {
        Err(CipherError::RandomSource(self.0.to_string()))
    }
}
