//! kmscreds - Credentials files with per-secret KMS envelope encryption.
//!
//! Every secret gets its own data key from a remote key service. The data
//! key seals the secret with XSalsa20-Poly1305 and is stored, wrapped by the
//! service, next to the sealed secret in a single printable string. The
//! credentials file itself is plain JSON and safe to commit.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Create a credentials file
//! │   ├── add, rotate   # Encrypt values read from stdin
//! │   ├── delete, edit  # Metadata-only changes
//! │   ├── list          # Show names and timestamps
//! │   ├── export        # Decrypt everything (dotenv, bash, json)
//! │   ├── rotate_kms_key# Re-encrypt under a new master key
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── cipher/       # Envelope cipher and the "EJK1];" encoding
//!     │   ├── entropy   # Nonce source
//!     │   └── kms/      # Key service trait, AWS KMS and stub backends
//!     ├── store/        # Credentials document and persistence
//!     ├── export        # Plaintext renderers
//!     ├── validation    # Name, value and context checks
//!     └── config        # Optional user settings (config.toml)
//! ```

pub mod cli;
pub mod core;
pub mod error;
