//! Social media follower lookup.

use super::util::{seed, truncate_list};
use crate::engine::MockTool;
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::{composite_score, Normalizer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use toolmock_core::config::EngineConfig;
use toolmock_core::types::{names, ResolutionMethod, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.5;

const USERNAME_BONUS: f64 = 0.8;
const PLATFORM_BONUS: f64 = 0.3;

const PLATFORMS: &[&str] = &["twitter", "instagram", "tiktok", "linkedin", "facebook", "youtube"];

/// Words that refer to each platform.
const PLATFORM_ALIASES: &[(&str, &[&str])] = &[
    ("twitter", &["twitter", "x", "tweet", "tweets"]),
    ("instagram", &["instagram", "ig", "insta"]),
    ("tiktok", &["tiktok", "tt"]),
    ("linkedin", &["linkedin", "li"]),
    ("facebook", &["facebook", "fb"]),
    ("youtube", &["youtube", "yt"]),
];

const FIRST_NAMES: &[&str] = &[
    "alex", "sam", "jordan", "taylor", "morgan", "casey", "riley", "jamie", "avery", "quinn",
];
const SUFFIXES: &[&str] = &["dev", "writes", "codes", "travels", "_official", "42", "hq", "daily"];

const NORMALIZER: Normalizer = Normalizer::text().with_punctuation();

/// Lists an account's followers on a social platform.
pub struct SocialFollowersTool;

impl SocialFollowersTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SocialFollowersTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for SocialFollowersTool {
    fn name(&self) -> &'static str {
        names::GET_SOCIAL_FOLLOWERS
    }

    fn description(&self) -> &'static str {
        "List the followers of a social media account"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "Account handle, with or without '@'"
                },
                "platform": {
                    "type": "string",
                    "enum": PLATFORMS,
                    "default": "twitter",
                    "description": "Social platform"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of followers to return"
                }
            },
            "required": ["username"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["username", "platform", "limit"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["username"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Social
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
        let username = username(params);
        let platform = params.choice("platform", PLATFORMS, "twitter");
        format!("{} {}", username, platform)
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        let query = NORMALIZER.normalize(query);
        let candidate = NORMALIZER.normalize(candidate);
        let mut score = composite_score(&query, &candidate);

        let mut query_tokens = query.split_whitespace();
        let (Some(handle), Some(platform)) = (query_tokens.next(), query_tokens.last()) else {
            return score;
        };

        let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();
        if candidate_tokens.contains(&handle) {
            score += USERNAME_BONUS;
        }
        let aliases = PLATFORM_ALIASES
            .iter()
            .find(|(name, _)| *name == platform)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[]);
        if candidate_tokens.iter().any(|token| aliases.contains(token)) {
            score += PLATFORM_BONUS;
        }
        score
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let username = username(params);
        let platform = params.choice("platform", PLATFORMS, "twitter");
        let mut rng = StdRng::seed_from_u64(seed(&[username.as_str(), platform]));

        let count = rng.gen_range(3..=25);
        let followers: Vec<Value> = (0..count)
            .map(|_| {
                let name = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
                let suffix = SUFFIXES[rng.gen_range(0..SUFFIXES.len())];
                json!({
                    "username": format!("{}{}", name, suffix),
                    "followers": rng.gen_range(10..50_000),
                    "verified": rng.gen_bool(0.1),
                })
            })
            .collect();
        let total_followers = count as u64 + rng.gen_range(0..100_000u64);

        Ok(json!({
            "status": "success",
            "username": username,
            "platform": platform,
            "total_followers": total_followers,
            "followers": followers,
        }))
    }

    fn finalize(&self, payload: &mut Value, params: &Params, limits: &EngineConfig) {
        let limit = params.count("limit", limits.default_output_limit, limits.max_output_limit);
        truncate_list(payload, "followers", limit);
    }
}

/// Handle without a leading '@'.
fn username(params: &Params) -> String {
    params.text_or_empty("username").trim_start_matches('@').to_string()
}
