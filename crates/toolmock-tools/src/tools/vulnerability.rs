//! Simulated vulnerability scanning.

use crate::engine::MockTool;
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::Normalizer;
use serde_json::{json, Value};
use toolmock_core::types::{names, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.3;

const SCAN_TYPES: &[&str] = &["basic", "full", "web", "network"];

/// Scans a target for known vulnerabilities.
pub struct VulnerabilityScanTool;

impl VulnerabilityScanTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VulnerabilityScanTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for VulnerabilityScanTool {
    fn name(&self) -> &'static str {
        names::VULNERABILITY_SCAN
    }

    fn description(&self) -> &'static str {
        "Scan a host or web application for known vulnerabilities"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "target": {
                    "type": "string",
                    "description": "Hostname, IP address or URL to scan"
                },
                "scan_type": {
                    "type": "string",
                    "enum": SCAN_TYPES,
                    "default": "basic",
                    "description": "Depth of the scan"
                }
            },
            "required": ["target"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["target", "scan_type"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["target"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Security
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::host().with_verbs(&["scan", "audit", "check", "test"])
    }

    fn threshold(&self) -> f64 {
        THRESHOLD
    }

    fn query(&self, params: &Params) -> String {
        params.text_or_empty("target")
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let target = params.required_text("target")?;
        let scan_type = params.choice("scan_type", SCAN_TYPES, "basic");

        let mut findings = vec![json!({
            "id": "INFO-001",
            "severity": "info",
            "title": "Server banner disclosure",
            "description": "The server reveals its software version in response headers.",
            "remediation": "Suppress version information in server banners.",
        })];
        if scan_type != "basic" {
            findings.push(json!({
                "id": "LOW-001",
                "severity": "low",
                "title": "Missing security headers",
                "description": "Content-Security-Policy and X-Frame-Options are not set.",
                "remediation": "Add the missing headers at the reverse proxy.",
            }));
        }

        let low = findings.iter().filter(|f| f["severity"] == "low").count();
        let info = findings.len() - low;

        Ok(json!({
            "status": "success",
            "target": target,
            "scan_type": scan_type,
            "vulnerabilities": findings,
            "summary": {
                "critical": 0,
                "high": 0,
                "medium": 0,
                "low": low,
                "info": info,
            },
            "risk_level": "low",
        }))
    }
}
