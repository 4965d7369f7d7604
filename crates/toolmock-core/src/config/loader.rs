//! Configuration loading and persistence.

use super::{Config, ToolSettings};
use crate::error::ConfigError;
use crate::paths;
use crate::types::names;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Load from the given path, or the default path, falling back to
    /// defaults when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let result = match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        };
        match result {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Save configuration to the default path.
    pub fn save_default(&self) -> Result<(), ConfigError> {
        let path = paths::config_file()?;
        self.save(&path)
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // 1. Output limits
        if self.engine.default_output_limit == 0 {
            errors.push("Engine default_output_limit must be greater than 0".to_string());
        }
        if self.engine.default_output_limit > self.engine.max_output_limit {
            errors.push(format!(
                "Engine default_output_limit ({}) exceeds max_output_limit ({})",
                self.engine.default_output_limit, self.engine.max_output_limit
            ));
        }

        // 2. Dataset directory must exist when set
        if let Some(dir) = &self.datasets_dir {
            if !dir.is_dir() {
                errors.push(format!("datasets_dir {:?} is not a directory", dir));
            }
        }

        // 3. Per-tool settings
        let mut tool_names: Vec<&String> = self.tools.keys().collect();
        tool_names.sort();
        for name in tool_names {
            let settings = &self.tools[name];
            if !names::is_known(name) {
                errors.push(format!("Unknown tool '{}'", name));
            }
            if let Some(threshold) = settings.threshold {
                if !(0.0..=1.0).contains(&threshold) {
                    errors.push(format!(
                        "Tool '{}': threshold must be 0.0-1.0, got {}",
                        name, threshold
                    ));
                }
            }
            if let Some(dataset) = &settings.dataset {
                if !dataset.exists() {
                    errors.push(format!(
                        "Tool '{}': dataset file {:?} not found",
                        name, dataset
                    ));
                }
            }
        }

        // Return collected errors
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Settings for a tool, defaults when unconfigured.
    pub fn tool(&self, name: &str) -> ToolSettings {
        self.tools.get(name).cloned().unwrap_or_default()
    }

    /// Dataset file overriding a tool's embedded dataset, if any.
    ///
    /// An explicit per-tool `dataset` wins over `datasets_dir/<tool>.json`.
    pub fn dataset_override(&self, name: &str) -> Option<PathBuf> {
        if let Some(path) = self.tools.get(name).and_then(|t| t.dataset.clone()) {
            return Some(path);
        }
        self.datasets_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", name)))
            .filter(|path| path.exists())
    }
}

/// Builder for creating configurations programmatically.
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum match score for a tool.
    pub fn threshold(mut self, tool: &str, threshold: f64) -> Self {
        self.config.tools.entry(tool.to_string()).or_default().threshold = Some(threshold);
        self
    }

    /// Replace a tool's dataset with a file.
    pub fn dataset(mut self, tool: &str, path: impl Into<PathBuf>) -> Self {
        self.config.tools.entry(tool.to_string()).or_default().dataset = Some(path.into());
        self
    }

    /// Disable a tool.
    pub fn disable(mut self, tool: &str) -> Self {
        self.config.tools.entry(tool.to_string()).or_default().enabled = false;
        self
    }

    /// Set the dataset override directory.
    pub fn datasets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.datasets_dir = Some(dir.into());
        self
    }

    /// Set the default list length.
    pub fn default_output_limit(mut self, limit: usize) -> Self {
        self.config.engine.default_output_limit = limit;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}
