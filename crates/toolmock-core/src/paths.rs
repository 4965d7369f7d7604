//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the toolmock base directory (~/.toolmock).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".toolmock"))
}

/// Get the main config file path (~/.toolmock/toolmock.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("toolmock.json5"))
}

/// Get the dataset override directory (~/.toolmock/datasets).
pub fn datasets_dir() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("datasets"))
}
