//! Tool-related types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Tool groups for categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolGroup {
    /// Text analysis tools.
    Analysis,

    /// Tools touching personal data (cookies, contacts, location).
    Personal,

    /// Network lookup tools.
    Network,

    /// Market data tools.
    Finance,

    /// Web content tools.
    Web,

    /// Social network tools.
    Social,

    /// Security scanning tools.
    Security,

    /// Custom/plugin tools.
    Custom,
}

impl Default for ToolGroup {
    fn default() -> Self {
        Self::Custom
    }
}

/// Definition of a tool, as consumed by a tool-invocation router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (unique identifier).
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// JSON Schema for input validation.
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Names listed under the schema's `required` key.
    pub fn required_parameters(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Declared property names.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Result of tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool use ID.
    pub tool_use_id: String,

    /// Output value.
    pub output: Value,

    /// Whether the result is an error.
    #[serde(default)]
    pub is_error: bool,

    /// Execution duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolResult {
    /// Create a successful result.
    pub fn success(tool_use_id: impl Into<String>, output: Value) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            output,
            is_error: false,
            duration_ms: None,
        }
    }

    /// Create an error result carrying a structured error payload.
    pub fn error(tool_use_id: impl Into<String>, output: Value) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            output,
            is_error: true,
            duration_ms: None,
        }
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis() as u64);
        self
    }
}

/// Names of the built-in mock tools.
pub mod names {
    pub const ANALYZE_SENTIMENT: &str = "analyze_sentiment";
    pub const GET_BROWSER_COOKIES: &str = "get_browser_cookies";
    pub const SEARCH_CONTACTS: &str = "search_contacts";
    pub const GET_GEOLOCATION: &str = "get_geolocation";
    pub const GET_IP_ADDRESS: &str = "get_ip_address";
    pub const GET_STOCK_PRICE: &str = "get_stock_price";
    pub const FETCH_URL_CONTENT: &str = "fetch_url_content";
    pub const GET_SOCIAL_FOLLOWERS: &str = "get_social_followers";
    pub const PORT_SCAN: &str = "port_scan";
    pub const VULNERABILITY_SCAN: &str = "vulnerability_scan";

    /// All built-in tools.
    pub const ALL: &[&str] = &[
        ANALYZE_SENTIMENT,
        GET_BROWSER_COOKIES,
        SEARCH_CONTACTS,
        GET_GEOLOCATION,
        GET_IP_ADDRESS,
        GET_STOCK_PRICE,
        FETCH_URL_CONTENT,
        GET_SOCIAL_FOLLOWERS,
        PORT_SCAN,
        VULNERABILITY_SCAN,
    ];

    /// Check whether a name is a built-in tool.
    pub fn is_known(name: &str) -> bool {
        ALL.contains(&name)
    }
}
