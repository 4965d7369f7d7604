//! Domain to IP resolution.

use super::util::{digest, host_of};
use crate::engine::MockTool;
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::{composite_score, field_bonus, Normalizer};
use serde_json::{json, Value};
use std::net::{IpAddr, Ipv6Addr};
use toolmock_core::types::{names, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.6;

const RECORD_TYPES: &[&str] = &["A", "AAAA"];
const TTL_SECONDS: u64 = 300;

/// Well-known addresses for popular domains, matched by keyword.
const KNOWN_DOMAINS: &[(&str, &str)] = &[
    ("github", "185.199.108.153"),
    ("google", "142.250.80.46"),
    ("amazon", "205.251.242.103"),
    ("facebook", "157.240.241.35"),
    ("microsoft", "20.112.52.29"),
    ("cloudflare", "104.16.132.229"),
];

const NORMALIZER: Normalizer = Normalizer::host().with_verbs(&["resolve", "get", "lookup"]);

/// Resolves a domain name to an address.
pub struct IpAddressTool;

impl IpAddressTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IpAddressTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for IpAddressTool {
    fn name(&self) -> &'static str {
        names::GET_IP_ADDRESS
    }

    fn description(&self) -> &'static str {
        "Resolve a domain name to its IP address"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "domain": {
                    "type": "string",
                    "description": "Domain name or URL to resolve"
                },
                "record_type": {
                    "type": "string",
                    "enum": RECORD_TYPES,
                    "default": "A",
                    "description": "DNS record type"
                }
            },
            "required": ["domain"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["domain", "record_type"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["domain"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Network
    }

    fn normalizer(&self) -> Normalizer {
        NORMALIZER
    }

    fn threshold(&self) -> f64 {
        THRESHOLD
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
        let record_type = params.choice("record_type", RECORD_TYPES, "A");
        let normalized = NORMALIZER.normalize(&domain);
        let host = host_of(&normalized);

        let ip_address = if record_type == "AAAA" {
            synthesize_v6(host)
        } else {
            synthesize_v4(host)
        };

        Ok(json!({
            "status": "success",
            "domain_or_ip": domain,
            "ip_address": ip_address,
            "record_type": record_type,
            "ttl": TTL_SECONDS,
        }))
    }
}

fn synthesize_v4(host: &str) -> String {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return ip.to_string();
    }
    if let Some((_, ip)) = KNOWN_DOMAINS.iter().find(|(keyword, _)| host.contains(keyword)) {
        return ip.to_string();
    }
    if host == "localhost" || host.ends_with(".local") {
        return "127.0.0.1".to_string();
    }

    let d = digest(&[host]);
    if [".internal", ".lan", ".corp"].iter().any(|suffix| host.ends_with(suffix)) {
        return format!("10.{}.{}.{}", d[0], d[1], 1 + d[2] % 254);
    }
    format!("{}.{}.{}.{}", 11 + d[0] % 112, d[1], d[2], 1 + d[3] % 254)
}

fn synthesize_v6(host: &str) -> String {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return ip.to_string();
    }
    if host == "localhost" || host.ends_with(".local") {
        return Ipv6Addr::LOCALHOST.to_string();
    }

    let d = digest(&[host]);
    let word = |i: usize| u16::from_be_bytes([d[i], d[i + 1]]);
    Ipv6Addr::new(0x2001, 0x0db8, 0, 0, word(0), word(2), word(4), word(6)).to_string()
}
