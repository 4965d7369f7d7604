//! Stock quotes.

use super::util::{round2, seed};
use crate::engine::{DirectPolicy, MockTool};
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::Normalizer;
use serde_json::{json, Value};
use toolmock_core::types::{names, ToolGroup};

/// Minimum match score when no task is running.
pub const THRESHOLD: f64 = 0.8;

/// Looks up the current price of a ticker symbol.
///
/// Multi-call tasks rotate: each call under the same task returns the next
/// recorded quote.
pub struct StockPriceTool;

impl StockPriceTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StockPriceTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool for StockPriceTool {
    fn name(&self) -> &'static str {
        names::GET_STOCK_PRICE
    }

    fn description(&self) -> &'static str {
        "Get the current stock price for a ticker symbol"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Ticker symbol, e.g. AAPL"
                }
            },
            "required": ["symbol"]
        })
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["symbol"]
    }

    fn required(&self) -> &'static [&'static str] {
        &["symbol"]
    }

    fn group(&self) -> ToolGroup {
        ToolGroup::Finance
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::text().with_punctuation()
    }

    fn threshold(&self) -> f64 {
        THRESHOLD
    }

    fn direct_policy(&self) -> DirectPolicy {
        DirectPolicy::Rotate
    }

    fn query(&self, params: &Params) -> String {
        params.text_or_empty("symbol")
    }

    fn fallback(&self, params: &Params) -> Result<Value, ToolError> {
        let ticker = params.required_text("symbol")?.to_uppercase();
        let seed = seed(&[ticker.as_str()]);

        let price = round2(10.0 + (seed % 49_000) as f64 / 100.0);
        let change_percent = round2(((seed >> 20) % 1_000) as f64 / 100.0 - 5.0);
        let change = round2(price * change_percent / 100.0);

        Ok(json!({
            "status": "success",
            "ticker_symbol": ticker,
            "price": price,
            "currency": "USD",
            "change": change,
            "change_percent": change_percent,
            "market_status": "closed",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::engine::ResolutionEngine;
    use std::sync::Arc;
    use toolmock_core::context::SharedTaskContext;
    use toolmock_core::types::ResolutionMethod;

    #[test]
    fn test_known_symbol_matches_dataset() {
        let dataset = datasets::load_embedded(names::GET_STOCK_PRICE).unwrap();
        let resolution = ResolutionEngine::default().resolve(
            &StockPriceTool::new(),
            &dataset,
            THRESHOLD,
            &json!({"symbol": "AAPL"}),
        );

        assert_eq!(resolution.method, ResolutionMethod::SimilarityMatch);
        assert_eq!(resolution.matched_task_id.as_deref(), Some("L0_simple_014"));
        assert_eq!(resolution.payload["ticker_symbol"], "AAPL");
        assert_eq!(resolution.payload["price"], 175.5);
    }

    #[test]
    fn test_rotation_under_multi_call_task() {
        let context = Arc::new(SharedTaskContext::new());
        context.begin("L2_portfolio_021");
        let engine = ResolutionEngine::new(context);
        let dataset = datasets::load_embedded(names::GET_STOCK_PRICE).unwrap();
        let tool = StockPriceTool::new();

        let tickers: Vec<Value> = (0..4)
            .map(|_| {
                let args = json!({"symbol": "AAPL"});
                let resolution = engine.resolve(&tool, &dataset, THRESHOLD, &args);
                assert_eq!(resolution.method, ResolutionMethod::TaskContext);
                resolution.payload["ticker_symbol"].clone()
            })
            .collect();
        assert_eq!(tickers, vec![json!("MSFT"), json!("GOOGL"), json!("NVDA"), json!("MSFT")]);

        engine.counters().reset("L2_portfolio_021");
        let resolution = engine.resolve(&tool, &dataset, THRESHOLD, &json!({"symbol": "AAPL"}));
        assert_eq!(resolution.call_index, Some(0));
    }

    #[test]
    fn test_fallback_quote_is_deterministic() {
        let params = Params::from_args(&json!({"symbol": "zzzq"}), &["symbol"]);
        let tool = StockPriceTool::new();
        let first = tool.fallback(&params).unwrap();

        assert_eq!(first, tool.fallback(&params).unwrap());
        assert_eq!(first["ticker_symbol"], "ZZZQ");
        let price = first["price"].as_f64().unwrap();
        assert!((10.0..500.0).contains(&price));
    }

    #[test]
    fn test_near_miss_symbol_falls_back() {
        let dataset = datasets::load_embedded(names::GET_STOCK_PRICE).unwrap();
        let resolution = ResolutionEngine::default().resolve(
            &StockPriceTool::new(),
            &dataset,
            THRESHOLD,
            &json!({"symbol": "AAP"}),
        );
        assert_eq!(resolution.method, ResolutionMethod::Fallback);
        assert_eq!(resolution.payload["ticker_symbol"], "AAP");
    }
}
