//! Configuration for Bulwark.
//!
//! ```toml
//! [boundary]
//! log_failures = true
//! quiet_panics = false
//! ```
//!
//! The file lives at `$BULWARK_CONFIG` when that is set, otherwise at
//! `~/.bulwark/config.toml`. A missing file is not an error.

use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use toml::de;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "BULWARK_CONFIG";

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct BulwarkConfig {
    pub boundary: Option<BoundaryConfig>,
}

/// Settings for boundary adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoundaryConfig {
    /// Emit a `tracing` event for every absorbed failure. Default: true.
    #[serde(default = "default_true")]
    pub log_failures: bool,
    /// Keep the process panic hook from printing panics absorbed by an adapter.
    /// Default: false.
    #[serde(default)]
    pub quiet_panics: bool,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            log_failures: true,
            quiet_panics: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl BulwarkConfig {
    /// Load from the default location. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, source);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    pub fn path() -> Option<PathBuf> {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::home_dir().map(|home| home.join(".bulwark").join("config.toml")),
        }
    }

    /// Boundary settings, with defaults filled in when the section is absent.
    #[must_use]
    pub fn boundary(&self) -> BoundaryConfig {
        self.boundary.unwrap_or_default()
    }
}
