//! Simulated port scanning.
//!
//! Nothing is ever sent over the network: results come from the dataset or a
//! fixed fixture of three open ports.

use super::util::host_of;
use crate::engine::{DirectPolicy, MockTool};
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::{composite_score, field_bonus, Normalizer};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use toolmock_core::types::{names, ToolGroup};
use tracing::debug;

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.6;

const SCAN_TYPES: &[&str] = &["tcp", "syn", "udp"];

/// Ports probed for `"common"`.
const COMMON_PORTS: &[u16] = &[21, 22, 23, 25, 53, 80, 110, 143, 443, 3306, 3389, 5432, 8080];

/// Ports reported open by the fixture.
const OPEN_PORTS: &[(u16, &str, &str)] = &[
    (22, "ssh", "OpenSSH 8.9p1"),
    (80, "http", "nginx 1.24.0"),
    (443, "https", "nginx 1.24.0"),
];

const NORMALIZER: Normalizer = Normalizer::host().with_verbs(&["scan", "nmap", "check"]);

/// Scans a host for open ports.
pub struct PortScanTool;

impl PortScanTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PortScanTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for PortScanTool {
    fn name(&self) -> &'static str {
        names::PORT_SCAN
    }

    fn description(&self) -> &'static str {
        "Scan a host for open network ports"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "target": {
                    "type": "string",
                    "description": "Hostname or IP address to scan"
                },
                "ports": {
                    "type": "string",
                    "default": "common",
                    "description": "Ports to scan: \"common\", a list (22,80) or a range (1-1024)"
                },
                "scan_type": {
                    "type": "string",
                    "enum": SCAN_TYPES,
                    "default": "tcp",
                    "description": "Scan technique"
                }
            },
            "required": ["target"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["target", "ports", "scan_type"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["target"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Security
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
        params.text_or_empty("target")
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        let query = NORMALIZER.normalize(query);
        let candidate = NORMALIZER.normalize(candidate);
        composite_score(&query, &candidate)
            + field_bonus(host_of(&query), host_of(&candidate), 0.8, 0.5)
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let target = params.required_text("target")?;
        let scan_type = params.choice("scan_type", SCAN_TYPES, "tcp");
        let spec = params.text("ports").unwrap_or_else(|| "common".to_string());
        let ports = parse_ports(&spec);

        let open: Vec<Value> = OPEN_PORTS
            .iter()
            .filter(|(port, _, _)| ports.contains(port))
            .map(|(port, service, version)| {
                json!({
                    "port": port,
                    "protocol": if scan_type == "udp" { "udp" } else { "tcp" },
                    "state": "open",
                    "service": service,
                    "version": version,
                })
            })
            .collect();

        Ok(json!({
            "status": "success",
            "target": target,
            "scan_type": scan_type,
            "ports_scanned": ports.len(),
            "open_ports": open,
        }))
    }
}

/// Expand a port specification. Anything unparseable means the common set.
fn parse_ports(spec: &str) -> BTreeSet<u16> {
    let common = || -> BTreeSet<u16> { COMMON_PORTS.iter().copied().collect() };
    if spec.eq_ignore_ascii_case("common") {
        return common();
    }

    let mut ports = BTreeSet::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let parsed = match part.split_once('-') {
            Some((start, end)) => match (start.trim().parse::<u16>(), end.trim().parse::<u16>()) {
                (Ok(start), Ok(end)) if start >= 1 && start <= end => Some(start..=end),
                _ => None,
            },
            None => part.parse::<u16>().ok().filter(|p| *p >= 1).map(|p| p..=p),
        };

        match parsed {
            Some(range) => ports.extend(range),
            None => {
                debug!(spec, "Invalid port specification, scanning common ports");
                return common();
            }
        }
    }

    if ports.is_empty() {
        common()
    } else {
        ports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::engine::ResolutionEngine;
    use toolmock_core::types::ResolutionMethod;

    #[test]
    fn test_parse_ports() {
        assert_eq!(parse_ports("22, 80"), BTreeSet::from([22, 80]));
        assert_eq!(parse_ports("20-23").len(), 4);
        assert_eq!(parse_ports("1-65535").len(), 65_535);
        assert_eq!(parse_ports("common").len(), COMMON_PORTS.len());
        assert_eq!(parse_ports("80,abc").len(), COMMON_PORTS.len());
        assert_eq!(parse_ports("100-10").len(), COMMON_PORTS.len());
        assert_eq!(parse_ports("0").len(), COMMON_PORTS.len());
    }

    #[test]
    fn test_fallback_filters_fixture_by_ports() {
        let tool = PortScanTool::new();
        let params = Params::from_args(&json!(["10.9.8.7", "443,8443", "syn"]), tool.parameters());
        let payload = tool.fallback(&params).unwrap();

        assert_eq!(payload["scan_type"], "syn");
        assert_eq!(payload["ports_scanned"], 2);
        let open = payload["open_ports"].as_array().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0]["service"], "https");
    }

    #[test]
    fn test_scan_verb_and_url_match_dataset() {
        let dataset = datasets::load_embedded(names::PORT_SCAN).unwrap();
        let resolution = ResolutionEngine::default().resolve(
            &PortScanTool::new(),
            &dataset,
            THRESHOLD,
            &json!({"target": "scan https://staging.acme-internal.net/"}),
        );
        assert_eq!(resolution.method, ResolutionMethod::SimilarityMatch);
        assert_eq!(resolution.matched_task_id.as_deref(), Some("L1_security_001"));
    }
}
