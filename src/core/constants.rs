//! Constants used throughout kmscreds.
//!
//! Centralizes wire-format markers and default locations.

/// Version marker prefixed to every encoded credential.
pub const VERSION_TAG: &str = "EJK1];";

/// Separator between the wrapped data key and the payload.
pub const FIELD_SEPARATOR: char = ';';

/// Data key length in bytes (256-bit secret-box key).
pub const KEY_SIZE: usize = 32;

/// Nonce length in bytes (192-bit secret-box nonce).
pub const NONCE_SIZE: usize = 24;

/// Current credentials document schema version.
pub const STORE_VERSION: u32 = 1;

/// Default credentials file path.
pub const DEFAULT_PATH: &str = ".credentials.json";

/// Directory name under the platform config dir holding `config.toml`.
pub const SETTINGS_DIR: &str = "kmscreds";

/// Settings file name.
pub const SETTINGS_FILE: &str = "config.toml";

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "KMSCREDS_CONFIG";
