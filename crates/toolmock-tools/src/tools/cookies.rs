//! Browser cookie extraction.

use super::util::{digest, host_of};
use crate::engine::{DirectPolicy, MockTool};
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::{composite_score, field_bonus, Normalizer};
use serde_json::{json, Value};
use toolmock_core::types::{names, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.6;

const BROWSERS: &[&str] = &["chrome", "firefox", "safari", "edge"];

const NORMALIZER: Normalizer = Normalizer::host();

/// Returns the cookies a browser holds for a domain.
pub struct BrowserCookiesTool;

impl BrowserCookiesTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserCookiesTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for BrowserCookiesTool {
    fn name(&self) -> &'static str {
        names::GET_BROWSER_COOKIES
    }

    fn description(&self) -> &'static str {
        "Extract the cookies stored by a browser for a domain"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "domain": {
                    "type": "string",
                    "description": "Domain whose cookies to read"
                },
                "browser": {
                    "type": "string",
                    "enum": BROWSERS,
                    "default": "chrome",
                    "description": "Browser profile to read from"
                }
            },
            "required": ["domain"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["domain", "browser"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["domain"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Personal
    }

    fn normalizer(&self) -> Normalizer {
        NORMALIZER
    }

    fn threshold(&self) -> f64 {
        THRESHOLD
    }

    fn direct_policy(&self) -> DirectPolicy {
        DirectPolicy::FirstCall
    }

    fn query(&self, params: &Params) -> String {
        params.text_or_empty("domain")
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        let query = NORMALIZER.normalize(query);
        let candidate = NORMALIZER.normalize(candidate);
        composite_score(&query, &candidate)
            + field_bonus(host_of(&query), host_of(&candidate), 0.8, 0.5)
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let domain = params.required_text("domain")?;
        let browser = params.choice("browser", BROWSERS, "chrome");
        let normalized = NORMALIZER.normalize(&domain);
        let host = host_of(&normalized);

        let d = digest(&[host, browser]);
        let session_id = hex::encode(d);
        let client_id = u32::from_be_bytes([d[16], d[17], d[18], d[19]]);
        let issued = 1_700_000_000 + u32::from_be_bytes([d[20], d[21], d[22], d[23]]) % 10_000_000;
        let cookie_domain = format!(".{}", host);

        let cookies = vec![
            json!({
                "name": "session_id",
                "value": &session_id[..32],
                "domain": cookie_domain,
                "path": "/",
                "secure": true,
                "http_only": true,
            }),
            json!({
                "name": "_ga",
                "value": format!("GA1.2.{}.{}", client_id, issued),
                "domain": cookie_domain,
                "path": "/",
                "secure": false,
                "http_only": false,
            }),
        ];

        Ok(json!({
            "status": "success",
            "domain": domain,
            "browser": browser,
            "count": cookies.len(),
            "cookies": cookies,
        }))
    }
}
