//! Sentiment analysis.

use super::util::round2;
use crate::engine::{MockTool, OutputShape};
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::Normalizer;
use serde_json::{json, Value};
use toolmock_core::types::{names, ResolutionMethod, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.6;

const POSITIVE: &[&str] = &[
    "good", "great", "excellent", "love", "loved", "amazing", "happy", "wonderful", "fantastic",
    "best", "like", "awesome", "nice", "perfect", "enjoy", "enjoyed", "recommend", "fast",
];

const NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "hate", "hated", "worst", "poor", "horrible", "sad", "angry",
    "disappointing", "disappointed", "broken", "slow", "useless", "refund", "never",
];

/// Scores below this magnitude are neutral.
const NEUTRAL_BAND: f64 = 0.1;

const NORMALIZER: Normalizer = Normalizer::text().with_punctuation();

/// Classifies the sentiment of a piece of text.
pub struct SentimentTool;

impl SentimentTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SentimentTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for SentimentTool {
    fn name(&self) -> &'static str {
        names::ANALYZE_SENTIMENT
    }

    fn description(&self) -> &'static str {
        "Analyze the sentiment of a piece of text"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text to analyze"
                }
            },
            "required": ["text"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["text"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["text"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Analysis
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

    fn output_shape(&self) -> OutputShape {
        OutputShape::Flat
    }

    fn query(&self, params: &Params) -> String {
        params.text_or_empty("text")
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let text = params.required_text("text")?;
        let normalized = NORMALIZER.normalize(&text);

        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for word in normalized.split_whitespace() {
            if POSITIVE.contains(&word) {
                positive.push(word);
            } else if NEGATIVE.contains(&word) {
                negative.push(word);
            }
        }

        let hits = positive.len() + negative.len();
        let score = if hits == 0 {
            0.0
        } else {
            (positive.len() as f64 - negative.len() as f64) / hits as f64
        };

        let sentiment = if score > NEUTRAL_BAND {
            "positive"
        } else if score < -NEUTRAL_BAND {
            "negative"
        } else {
            "neutral"
        };
        let confidence = if hits == 0 { 0.5 } else { 0.5 + 0.5 * score.abs() };

        Ok(json!({
            "status": "success",
            "sentiment": sentiment,
            "score": round2(score),
            "confidence": round2(confidence),
            "positive_terms": positive,
            "negative_terms": negative,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::engine::ResolutionEngine;

    fn fallback(text: &str) -> Value {
        let params = Params::from_args(&json!({ "text": text }), &["text"]);
        SentimentTool::new().fallback(&params).unwrap()
    }

    #[test]
    fn test_lexicon_labels() {
        assert_eq!(fallback("I love it, great build!")["sentiment"], "positive");
        assert_eq!(fallback("Terrible. Slow and broken.")["sentiment"], "negative");
        assert_eq!(fallback("The box is blue.")["sentiment"], "neutral");
        assert_eq!(fallback("good but slow")["sentiment"], "neutral");
    }

    #[test]
    fn test_confidence_tracks_polarity() {
        let strong = fallback("great great amazing");
        assert_eq!(strong["score"], 1.0);
        assert_eq!(strong["confidence"], 1.0);
        assert_eq!(fallback("nothing here")["confidence"], 0.5);
    }

    #[test]
    fn test_dataset_match_is_intelligent_matching() {
        let dataset = datasets::load_embedded(names::ANALYZE_SENTIMENT).unwrap();
        let resolution = ResolutionEngine::default().resolve(
            &SentimentTool::new(),
            &dataset,
            THRESHOLD,
            &json!({"text": "This product is amazing! Best purchase I've made all year."}),
        );
        assert_eq!(resolution.method, ResolutionMethod::IntelligentMatching);
        assert_eq!(resolution.payload["sentiment"], "positive");
    }
}
