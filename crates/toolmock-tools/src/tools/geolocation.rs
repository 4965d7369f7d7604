//! IP geolocation.

use super::util::{digest, host_of};
use crate::engine::{DirectPolicy, MockTool};
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::{composite_score, Normalizer};
use serde_json::{json, Value};
use std::net::IpAddr;
use toolmock_core::types::{names, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.8;

const EXACT_IP_BONUS: f64 = 0.8;
const SAME_SUBNET_BONUS: f64 = 0.3;

const NORMALIZER: Normalizer = Normalizer::host();

struct City {
    city: &'static str,
    region: &'static str,
    country: &'static str,
    country_code: &'static str,
    latitude: f64,
    longitude: f64,
    timezone: &'static str,
    isp: &'static str,
}

const CITIES: &[City] = &[
    City {
        city: "Ashburn",
        region: "Virginia",
        country: "United States",
        country_code: "US",
        latitude: 39.0438,
        longitude: -77.4874,
        timezone: "America/New_York",
        isp: "Amazon.com, Inc.",
    },
    City {
        city: "Frankfurt am Main",
        region: "Hesse",
        country: "Germany",
        country_code: "DE",
        latitude: 50.1109,
        longitude: 8.6821,
        timezone: "Europe/Berlin",
        isp: "Hetzner Online GmbH",
    },
    City {
        city: "Singapore",
        region: "Central Singapore",
        country: "Singapore",
        country_code: "SG",
        latitude: 1.3521,
        longitude: 103.8198,
        timezone: "Asia/Singapore",
        isp: "DigitalOcean, LLC",
    },
    City {
        city: "São Paulo",
        region: "São Paulo",
        country: "Brazil",
        country_code: "BR",
        latitude: -23.5505,
        longitude: -46.6333,
        timezone: "America/Sao_Paulo",
        isp: "Claro S.A.",
    },
    City {
        city: "Sydney",
        region: "New South Wales",
        country: "Australia",
        country_code: "AU",
        latitude: -33.8688,
        longitude: 151.2093,
        timezone: "Australia/Sydney",
        isp: "Telstra Corporation",
    },
    City {
        city: "Toronto",
        region: "Ontario",
        country: "Canada",
        country_code: "CA",
        latitude: 43.6532,
        longitude: -79.3832,
        timezone: "America/Toronto",
        isp: "Rogers Communications",
    },
];

/// Locates an IP address.
pub struct GeolocationTool;

impl GeolocationTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GeolocationTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for GeolocationTool {
    fn name(&self) -> &'static str {
        names::GET_GEOLOCATION
    }

    fn description(&self) -> &'static str {
        "Get the approximate physical location of an IP address"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ip_address": {
                    "type": "string",
                    "description": "IPv4 or IPv6 address"
                }
            },
            "required": ["ip_address"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["ip_address"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["ip_address"]
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
        params.text_or_empty("ip_address")
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        let query = NORMALIZER.normalize(query);
        let candidate = NORMALIZER.normalize(candidate);
        let base = composite_score(&query, &candidate);

        let bonus = if query.is_empty() || candidate.is_empty() {
            0.0
        } else if query == candidate {
            EXACT_IP_BONUS
        } else if same_subnet(&query, &candidate) {
            SAME_SUBNET_BONUS
        } else {
            0.0
        };
        base + bonus
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let raw = params.required_text("ip_address")?;
        let normalized = NORMALIZER.normalize(&raw);
        let host = host_of(&normalized);

        let parsed = host.parse::<IpAddr>().ok();
        if parsed.map_or(false, is_local) {
            return Ok(json!({
                "status": "success",
                "ip_address": raw,
                "city": "Local Network",
                "region": "Private",
                "country": "N/A",
                "country_code": "",
                "latitude": 0.0,
                "longitude": 0.0,
                "timezone": "UTC",
                "isp": "Private network",
                "is_private": true,
            }));
        }

        let bucket = digest(&[host])[0] as usize % CITIES.len();
        let city = &CITIES[bucket];
        Ok(json!({
            "status": "success",
            "ip_address": raw,
            "city": city.city,
            "region": city.region,
            "country": city.country,
            "country_code": city.country_code,
            "latitude": city.latitude,
            "longitude": city.longitude,
            "timezone": city.timezone,
            "isp": city.isp,
            "is_private": false,
        }))
    }
}

fn is_local(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        // Unique local (fc00::/7) addresses are private as well.
        IpAddr::V6(v6) => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

/// Whether two dotted IPv4 strings share the first three octets.
fn same_subnet(a: &str, b: &str) -> bool {
    let prefix = |s: &str| -> Option<String> {
        let octets: Vec<&str> = s.split('.').collect();
        (octets.len() == 4).then(|| octets[..3].join("."))
    };
    match (prefix(a), prefix(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
