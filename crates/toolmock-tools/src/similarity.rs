//! Query normalization and similarity scoring.
//!
//! All scorers work on already-normalized strings. A tool must run the query
//! and every candidate through the same [`Normalizer`]; comparing a
//! normalized query against a raw candidate silently breaks matching.

use once_cell::sync::Lazy;
use regex::Regex;
use similar::TextDiff;
use std::collections::HashSet;

/// Score returned for identical normalized strings.
pub const EXACT_MATCH_SCORE: f64 = 1.0;

/// Highest score a non-identical pair can reach. Stays below
/// [`EXACT_MATCH_SCORE`] so an exact match always outranks a near match.
pub const NEAR_MATCH_CEILING: f64 = 0.99;

/// Multiplier applied when one string contains the other.
pub const CONTAINMENT_MULTIPLIER: f64 = 1.2;

const SEQUENCE_WEIGHT: f64 = 0.4;
const TOKEN_WEIGHT: f64 = 0.4;
const SUBSTRING_WEIGHT: f64 = 0.2;

static PROTOCOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z][a-z0-9+.\-]*://").expect("invalid regex"));
static WWW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\s)www\.").expect("invalid regex"));

/// Tool-specific normalization rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    /// Remove `scheme://` prefixes.
    pub strip_protocol: bool,

    /// Remove a leading `www.` from hosts.
    pub strip_www: bool,

    /// Remove trailing slashes and dots.
    pub strip_trailing: bool,

    /// Replace punctuation with whitespace.
    pub strip_punctuation: bool,

    /// Command verbs dropped from the front of a query ("get", "scan", ...).
    pub verb_prefixes: &'static [&'static str],
}

impl Normalizer {
    /// Lowercase and collapse whitespace only.
    pub const fn text() -> Self {
        Self {
            strip_protocol: false,
            strip_www: false,
            strip_trailing: false,
            strip_punctuation: false,
            verb_prefixes: &[],
        }
    }

    /// Rules for hostnames, URLs and IP addresses.
    pub const fn host() -> Self {
        Self {
            strip_protocol: true,
            strip_www: true,
            strip_trailing: true,
            strip_punctuation: false,
            verb_prefixes: &[],
        }
    }

    /// Also replace punctuation with whitespace.
    pub const fn with_punctuation(mut self) -> Self {
        self.strip_punctuation = true;
        self
    }

    /// Also drop a leading command verb.
    pub const fn with_verbs(mut self, verbs: &'static [&'static str]) -> Self {
        self.verb_prefixes = verbs;
        self
    }

    /// Normalize a query or candidate string.
    pub fn normalize(&self, input: &str) -> String {
        let mut text = collapse_whitespace(&input.to_lowercase());

        if let Some((first, rest)) = text.split_once(' ') {
            if self.verb_prefixes.contains(&first) {
                text = rest.to_string();
            }
        }

        if self.strip_protocol {
            text = PROTOCOL.replace_all(&text, "").into_owned();
        }
        if self.strip_www {
            text = WWW.replace_all(&text, "$1").into_owned();
        }
        if self.strip_trailing {
            text = text.trim_end_matches(['/', '.']).to_string();
        }
        if self.strip_punctuation {
            text = text
                .chars()
                .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
                .collect();
        }

        collapse_whitespace(&text)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character-level matching-blocks ratio in `[0, 1]`.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// Jaccard similarity of whitespace token sets. Zero if either side is empty.
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let left: HashSet<&str> = a.split_whitespace().collect();
    let right: HashSet<&str> = b.split_whitespace().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(&right).count();
    let union = left.union(&right).count();
    shared as f64 / union as f64
}

/// `len(shorter) / len(longer)` when the shorter string occurs in the longer.
pub fn substring_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if longer.contains(shorter) {
        shorter.chars().count() as f64 / longer.chars().count() as f64
    } else {
        0.0
    }
}

/// Whether either string contains the other.
pub fn contains_either(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Weighted blend of sequence, token and substring similarity.
///
/// Identical inputs short-circuit to [`EXACT_MATCH_SCORE`]; containment
/// earns the [`CONTAINMENT_MULTIPLIER`]. Everything else is capped at
/// [`NEAR_MATCH_CEILING`].
pub fn composite_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return EXACT_MATCH_SCORE;
    }

    let weighted = SEQUENCE_WEIGHT * sequence_ratio(a, b)
        + TOKEN_WEIGHT * token_overlap(a, b)
        + SUBSTRING_WEIGHT * substring_score(a, b);

    let boosted = if contains_either(a, b) {
        weighted * CONTAINMENT_MULTIPLIER
    } else {
        weighted
    };
    boosted.min(NEAR_MATCH_CEILING)
}

/// Flat bonus for identifier fields (domains, IPs, usernames).
///
/// Equality earns `exact`, containment earns `partial`.
pub fn field_bonus(a: &str, b: &str, exact: f64, partial: f64) -> f64 {
    if a.is_empty() || b.is_empty() {
        0.0
    } else if a == b {
        exact
    } else if contains_either(a, b) {
        partial
    } else {
        0.0
    }
}
