//! Helpers shared by the fallback synthesizers.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 over the given parts, separated so `("ab", "c")` != `("a", "bc")`.
pub(crate) fn digest(parts: &[&str]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.finalize().into()
}

/// Stable 64-bit seed derived from the given parts.
pub(crate) fn seed(parts: &[&str]) -> u64 {
    let bytes = digest(parts);
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(buf)
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Truncate the array stored under `key` to at most `limit` items.
pub(crate) fn truncate_list(payload: &mut Value, key: &str, limit: usize) {
    if let Some(Value::Array(items)) = payload.get_mut(key) {
        items.truncate(limit);
    }
}

/// Host part of a normalized host/URL string: no path, no port.
pub(crate) fn host_of(normalized: &str) -> &str {
    let host = normalized.split('/').next().unwrap_or(normalized);
    // Bare IPv6 literals contain colons; only strip a port from names and IPv4.
    if host.matches(':').count() == 1 {
        host.split(':').next().unwrap_or(host)
    } else {
        host
    }
}
