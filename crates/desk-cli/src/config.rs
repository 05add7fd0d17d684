//! Client configuration file

use desk_cache::CacheConfig;
use desk_form::FormConfig;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Errors reading the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of the TOML configuration file
///
/// ```toml
/// [cache]
/// metadata_capacity = 200
///
/// [form]
/// link_page_length = 20
/// validate_on_change = true
/// load_link_options = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub cache: CacheConfig,
    pub form: FormConfig,
}

impl ClientConfig {
    /// Parse TOML text; absent tables and keys keep their defaults
    ///
    /// # Errors
    /// The TOML parse error
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read a config file; no path or a missing file gives the defaults
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file exists but cannot be read
    /// - `ConfigError::Parse` if it is not valid configuration
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
