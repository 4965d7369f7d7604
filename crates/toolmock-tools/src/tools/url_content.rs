//! Web page fetching.

use super::util::host_of;
use crate::engine::MockTool;
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::{composite_score, Normalizer};
use serde_json::{json, Value};
use toolmock_core::config::EngineConfig;
use toolmock_core::types::{names, ResolutionMethod, ToolGroup};
use url::Url;

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.5;

const SAME_HOST_BONUS: f64 = 0.3;

/// Upper bound on returned content, in characters.
const MAX_CONTENT_CHARS: usize = 100_000;

const NORMALIZER: Normalizer = Normalizer::host().with_verbs(&["fetch", "get", "open", "read"]);

/// Fetches the text content of a web page.
pub struct UrlContentTool;

impl UrlContentTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UrlContentTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for UrlContentTool {
    fn name(&self) -> &'static str {
        names::FETCH_URL_CONTENT
    }

    fn description(&self) -> &'static str {
        "Fetch the content of a web page"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL to fetch"
                },
                "max_length": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of content characters to return"
                }
            },
            "required": ["url"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["url", "max_length"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["url"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Web
    }

    fn normalizer(&self) -> Normalizer {
        NORMALIZER
    }

    fn threshold(&self) -> f64 {
        THRESHOLD
    }

    fn match_method(&self) -> ResolutionMethod {
        ResolutionMethod::IntelligentMatching
    }

    fn query(&self, params: &Params) -> String {
        params.text_or_empty("url")
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        let query = NORMALIZER.normalize(query);
        let candidate = NORMALIZER.normalize(candidate);
        let bonus = if !query.is_empty() && host_of(&query) == host_of(&candidate) {
            SAME_HOST_BONUS
        } else {
            0.0
        };
        composite_score(&query, &candidate) + bonus
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let raw = params.required_text("url")?;
        let url = parse_lenient(&raw)?;
        let host = url.host_str().unwrap_or("localhost").to_string();
        let path = url.path();

        let content = format!(
            "Welcome to {host}. This page ({path}) contains general information, \
             navigation links and contact details for {host}."
        );

        Ok(json!({
            "status": "success",
            "url": url.as_str(),
            "status_code": 200,
            "content_type": "text/html; charset=utf-8",
            "title": format!("{} - Home", host),
            "content": content,
            "content_length": content.chars().count(),
        }))
    }

    fn finalize(&self, payload: &mut Value, params: &Params, _limits: &EngineConfig) {
        let max_length = params.count("max_length", MAX_CONTENT_CHARS, MAX_CONTENT_CHARS);
        if let Some(Value::String(content)) = payload.get_mut("content") {
            if content.chars().count() > max_length {
                *content = content.chars().take(max_length).collect();
                payload["truncated"] = Value::Bool(true);
            }
        }
    }
}

/// Parse a URL, assuming `https://` when the scheme is missing.
fn parse_lenient(raw: &str) -> Result<Url, ToolError> {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };
    Url::parse(&candidate).map_err(|e| ToolError::internal(format!("Invalid URL '{}': {}", raw, e)))
}
