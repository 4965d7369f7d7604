//! Free-form call parameters.
//!
//! Agents call tools with whatever they have: a JSON object, a positional
//! array, a bare string, or nothing at all. [`Params`] accepts all of them and
//! coerces values instead of rejecting them.

use crate::error::ToolError;
use serde_json::{Map, Value};
use tracing::debug;

/// Named parameters for one tool call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Map<String, Value>,
}

impl Params {
    /// Build parameters from raw call arguments.
    ///
    /// Objects are taken as named parameters. Arrays are positional and are
    /// mapped onto `order`. Any other non-null value is the first parameter.
    pub fn from_args(args: &Value, order: &[&str]) -> Self {
        let values = match args {
            Value::Object(map) => map.clone(),
            Value::Array(items) => order
                .iter()
                .zip(items.iter())
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            Value::Null => Map::new(),
            scalar => order
                .first()
                .map(|name| {
                    let mut map = Map::new();
                    map.insert(name.to_string(), scalar.clone());
                    map
                })
                .unwrap_or_default(),
        };
        Self { values }
    }

    /// Raw parameter value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Parameter as trimmed text. Non-strings are stringified; empty is `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        let text = match self.values.get(name)? {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Parameter as text, or an empty string.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default()
    }

    /// Required parameter as text.
    pub fn required_text(&self, name: &str) -> Result<String, ToolError> {
        self.text(name)
            .ok_or_else(|| ToolError::MissingParameter(name.to_string()))
    }

    /// Enumerated parameter, falling back to `default` for unknown values.
    ///
    /// Matching ignores case; the canonical spelling from `allowed` is
    /// returned.
    pub fn choice(
        &self,
        name: &str,
        allowed: &[&'static str],
        default: &'static str,
    ) -> &'static str {
        let Some(value) = self.text(name) else {
            return default;
        };
        match allowed.iter().find(|option| option.eq_ignore_ascii_case(&value)) {
            Some(option) => *option,
            None => {
                debug!(parameter = name, value = %value, default, "Unknown option, using default");
                default
            }
        }
    }

    /// Positive count parameter, clamped to `max`.
    ///
    /// Missing, zero, negative or unparseable values give `default`.
    pub fn count(&self, name: &str, default: usize, max: usize) -> usize {
        let parsed = match self.values.get(name) {
            Some(Value::Number(n)) => n.as_u64().map(|v| v as usize),
            Some(Value::String(s)) => s.trim().parse::<usize>().ok(),
            _ => None,
        };
        match parsed {
            Some(0) | None => default.min(max),
            Some(value) => value.min(max),
        }
    }
}
