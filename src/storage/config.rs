use super::Result;
use crate::api::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{ConfigError, StorageError};
use crate::utils::validation::validate_url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "artwork-table";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub use_colors: Option<bool>,
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("{}: {}", config_path.display(), e),
        })
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn effective_timeout(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn effective_colors(&self) -> bool {
        self.use_colors.unwrap_or(true)
    }

    /// Validate and set one field by its file key
    pub fn set_field(&mut self, key: &str, value: &str) -> std::result::Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match key {
            "base_url" => {
                validate_url(value).map_err(|e| invalid(&e.to_string()))?;
                self.base_url = Some(value.trim_end_matches('/').to_string());
            }
            "timeout_seconds" => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| invalid("must be a positive number of seconds"))?;
                self.timeout_seconds = Some(secs);
            }
            "use_colors" => {
                let enabled = value
                    .parse::<bool>()
                    .map_err(|_| invalid("must be true or false"))?;
                self.use_colors = Some(enabled);
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
