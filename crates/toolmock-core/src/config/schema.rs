//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main toolmock configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Resolution engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Directory scanned for `<tool>.json` dataset overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets_dir: Option<PathBuf>,

    /// Per-tool settings, keyed by tool name.
    #[serde(default)]
    pub tools: HashMap<String, ToolSettings>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Resolution engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// List length used when a caller passes no `limit`.
    #[serde(default = "default_output_limit")]
    pub default_output_limit: usize,

    /// Upper bound applied to caller-supplied `limit` values.
    #[serde(default = "default_max_output_limit")]
    pub max_output_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_output_limit: default_output_limit(),
            max_output_limit: default_max_output_limit(),
        }
    }
}

fn default_output_limit() -> usize {
    10
}

fn default_max_output_limit() -> usize {
    100
}

/// Settings for one mock tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Whether the tool is registered.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Override for the minimum match score used when no task is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Dataset file replacing the embedded dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: None,
            dataset: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing` filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}
