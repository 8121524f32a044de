//! User settings.
//!
//! Optional `config.toml` holding defaults that would otherwise have to be
//! passed on every invocation. Looked up at `$KMSCREDS_CONFIG`, then
//! `<config dir>/kmscreds/config.toml`:
//!
//! ```toml
//! path = "secrets/.credentials.json"
//!
//! [aws]
//! region = "eu-west-1"
//! profile = "production"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Settings loaded from `config.toml`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default credentials file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// AWS client overrides
    #[serde(default)]
    pub aws: AwsSettings,
}

/// AWS client overrides.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsSettings {
    /// Region, instead of the provider chain's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Named profile from `~/.aws/config`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Settings {
    /// Default settings file location, if one can be determined.
    pub fn settings_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(constants::SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| {
            dir.join(constants::SETTINGS_DIR)
                .join(constants::SETTINGS_FILE)
        })
    }

    /// Load settings from the default location.
    ///
    /// A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match Self::settings_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::Parse`.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading settings");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(settings)
    }

    /// Resolve the credentials file path.
    ///
    /// An explicit path (flag or `KMSCREDS_PATH`) wins over the settings
    /// file, which wins over `./.credentials.json`.
    pub fn credentials_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.path.clone())
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_PATH))
    }
}
