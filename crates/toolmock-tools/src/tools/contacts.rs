//! Address book search.

use super::util::truncate_list;
use crate::engine::MockTool;
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::Normalizer;
use serde_json::{json, Value};
use toolmock_core::config::EngineConfig;
use toolmock_core::types::{names, ResolutionMethod, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.5;

/// Searches the user's contacts.
pub struct SearchContactsTool;

impl SearchContactsTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchContactsTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for SearchContactsTool {
    fn name(&self) -> &'static str {
        names::SEARCH_CONTACTS
    }

    fn description(&self) -> &'static str {
        "Search the address book by name, email, company or team"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Name, email or other search terms"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of contacts to return"
                }
            },
            "required": ["query"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["query", "limit"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["query"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Personal
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::text()
            .with_punctuation()
            .with_verbs(&["find", "search", "lookup", "get", "show"])
    }

    fn threshold(&self) -> f64 {
        THRESHOLD
    }

    fn match_method(&self) -> ResolutionMethod {
        ResolutionMethod::IntelligentMatching
    }

    fn query(&self, params: &Params) -> String {
        params.text_or_empty("query")
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let query = params.required_text("query")?;
        Ok(json!({
            "status": "success",
            "query": query,
            "contacts": [],
            "total": 0,
            "message": format!("No contacts found matching '{}'", query),
        }))
    }

    fn finalize(&self, payload: &mut Value, params: &Params, limits: &EngineConfig) {
        let limit = params.count("limit", limits.default_output_limit, limits.max_output_limit);
        truncate_list(payload, "contacts", limit);
    }
}
