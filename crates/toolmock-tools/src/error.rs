//! Tool error types.

use thiserror::Error;
use toolmock_core::error::DatasetError;

/// Errors that can occur while resolving a mock tool call.
///
/// Only [`ToolError::MissingParameter`] is ever shown to a caller; the engine
/// turns every other variant into an exception-fallback payload.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Required parameter missing or empty.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Tool not found.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Dataset could not be loaded.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::ToolNotFound(_) => "TOOL_NOT_FOUND",
            Self::Dataset(_) => "DATASET_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ToolError::MissingParameter("domain".into()).error_code(),
            "MISSING_PARAMETER"
        );
        assert_eq!(ToolError::internal("boom").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = ToolError::MissingParameter("symbol".into());
        assert_eq!(err.to_string(), "Missing required parameter: symbol");
    }
}
