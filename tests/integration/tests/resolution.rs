//! End-to-end resolution through the tool registry.
//!
//! These tests drive the tools the way an evaluation harness does: activate a
//! task, call tools through the executor, inspect the rendered output.

use serde_json::{json, Value};
use toolmock_core::config::ConfigBuilder;
use toolmock_core::types::names;
use toolmock_integration_tests::Harness;

#[tokio::test]
async fn test_github_ip_fallback() {
    let harness = Harness::new().await;
    let result = harness.call(names::GET_IP_ADDRESS, json!({"domain": "github.com"})).await;

    assert!(!result.is_error);
    assert_eq!(result.output["resolution"]["method"], "fallback");
    assert_eq!(result.output["result"]["ip_address"], "185.199.108.153");
    assert_eq!(result.output["result"]["status"], "success");
}

#[tokio::test]
async fn test_aapl_similarity_match() {
    let harness = Harness::new().await;
    let result = harness.call(names::GET_STOCK_PRICE, json!({"symbol": "AAPL"})).await;

    assert_eq!(result.output["resolution"]["method"], "similarity_match");
    assert_eq!(result.output["resolution"]["task_id"], "L0_simple_014");
    assert_eq!(result.output["result"]["ticker_symbol"], "AAPL");
    assert_eq!(result.output["result"]["price"], 175.5);
}

#[tokio::test]
async fn test_active_task_wins_over_better_match() {
    let harness = Harness::new().await;
    harness.context.begin("L1_finance_009");

    // "AAPL" matches another task exactly, but the running task has a record.
    let result = harness.call(names::GET_STOCK_PRICE, json!({"symbol": "AAPL"})).await;
    assert_eq!(result.output["resolution"]["method"], "task_context");
    assert_eq!(result.output["result"]["ticker_symbol"], "TSLA");

    harness.context.finish();
    let result = harness.call(names::GET_STOCK_PRICE, json!({"symbol": "AAPL"})).await;
    assert_eq!(result.output["resolution"]["method"], "similarity_match");
}

#[tokio::test]
async fn test_active_task_never_falls_through() {
    let harness = Harness::new().await;
    harness.context.begin("L1_security_001");

    for target in ["staging.acme-internal.net", "totally-unrelated.example", "127.0.0.1"] {
        let method = harness.method(names::PORT_SCAN, json!({ "target": target })).await;
        assert!(
            method.starts_with("task_context"),
            "target {} resolved via {}",
            target,
            method
        );
    }
}

#[tokio::test]
async fn test_stock_rotation_and_reset() {
    let harness = Harness::new().await;
    harness.context.begin("L2_portfolio_021");

    let mut tickers = Vec::new();
    for _ in 0..4 {
        let result = harness.call(names::GET_STOCK_PRICE, json!({"symbol": "anything"})).await;
        assert_eq!(result.output["resolution"]["multi_call"], true);
        tickers.push(result.output["result"]["ticker_symbol"].clone());
    }
    assert_eq!(tickers, vec![json!("MSFT"), json!("GOOGL"), json!("NVDA"), json!("MSFT")]);
    assert_eq!(harness.counters.count("L2_portfolio_021"), 4);

    harness.counters.reset_all();
    let result = harness.call(names::GET_STOCK_PRICE, json!({"symbol": "anything"})).await;
    assert_eq!(result.output["resolution"]["call_index"], 0);
}

#[tokio::test]
async fn test_unlisted_task_drops_threshold() {
    let harness = Harness::new().await;

    // Inactive: a weak query misses the threshold and falls back.
    let method = harness.method(names::GET_GEOLOCATION, json!({"ip_address": "203.0.113.5"})).await;
    assert_eq!(method, "fallback");

    // Active with a task the dataset doesn't know: best match wins regardless.
    harness.context.begin("L9_not_in_any_dataset");
    let method = harness.method(names::GET_GEOLOCATION, json!({"ip_address": "203.0.113.5"})).await;
    assert_eq!(method, "similarity_match");
}

#[tokio::test]
async fn test_follower_limit_does_not_leak_between_calls() {
    let harness = Harness::new().await;

    let limited = harness
        .call(names::GET_SOCIAL_FOLLOWERS, json!({"username": "techguru", "limit": 1}))
        .await;
    assert_eq!(limited.output["result"]["followers"].as_array().unwrap().len(), 1);

    let full = harness
        .call(names::GET_SOCIAL_FOLLOWERS, json!({"username": "techguru", "limit": 100}))
        .await;
    assert_eq!(full.output["result"]["followers"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_configured_output_limit() {
    let config = ConfigBuilder::new().default_output_limit(5).build();
    let harness = Harness::with_config(&config).await;

    let result = harness.call(names::GET_SOCIAL_FOLLOWERS, json!({"username": "techguru"})).await;
    assert_eq!(result.output["result"]["followers"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_never_throws_on_odd_input() {
    let harness = Harness::new().await;
    let inputs: Vec<Value> = vec![
        Value::Null,
        json!(42),
        json!(""),
        json!([]),
        json!([null]),
        json!({"domain": {"nested": true}}),
        json!({"unexpected": "field"}),
        json!(true),
    ];

    for name in names::ALL {
        for input in &inputs {
            let result = harness.call(name, input.clone()).await;
            assert!(result.output.is_object(), "{} returned non-object for {}", name, input);
            let method = result.output["resolution"]["method"].as_str().unwrap();
            if result.is_error {
                assert_eq!(method, "parameter_error");
                assert_eq!(result.output["error_code"], "MISSING_PARAMETER");
            }
        }
    }
}

#[tokio::test]
async fn test_positional_and_scalar_arguments() {
    let harness = Harness::new().await;

    let positional = harness.call(names::GET_IP_ADDRESS, json!(["github.com", "A"])).await;
    let scalar = harness.call(names::GET_IP_ADDRESS, json!("github.com")).await;
    assert_eq!(positional.output["result"]["ip_address"], "185.199.108.153");
    assert_eq!(scalar.output, positional.output);
}

#[tokio::test]
async fn test_idempotent_under_fixed_context() {
    let harness = Harness::new().await;
    harness.context.begin("L2_meeting_setup_015");

    for name in [names::SEARCH_CONTACTS, names::GET_IP_ADDRESS, names::ANALYZE_SENTIMENT] {
        let args = json!({"query": "Northwind legal", "domain": "x.example", "text": "fine"});
        let first = harness.call(name, args.clone()).await;
        let second = harness.call(name, args).await;
        assert_eq!(first.output, second.output, "{} is not idempotent", name);
    }
}

#[tokio::test]
async fn test_best_scoring_picks_matching_call() {
    let harness = Harness::new().await;
    harness.context.begin("L2_meeting_setup_015");

    let result = harness.call(names::SEARCH_CONTACTS, json!({"query": "Northwind legal"})).await;
    assert_eq!(result.output["resolution"]["method"], "task_context");
    assert_eq!(result.output["resolution"]["call_index"], 1);

    let result = harness.call(names::SEARCH_CONTACTS, json!({"query": "zzz"})).await;
    assert_eq!(result.output["resolution"]["call_index"], 0);
}

#[tokio::test]
async fn test_first_call_policy() {
    let harness = Harness::new().await;
    harness.context.begin("L2_pentest_018");

    let result = harness.call(names::PORT_SCAN, json!({"target": "db01.shop.example"})).await;
    assert_eq!(result.output["resolution"]["method"], "task_context_direct");
    assert_eq!(result.output["result"]["target"], "web01.shop.example");
}

#[tokio::test]
async fn test_sentiment_output_is_flat() {
    let harness = Harness::new().await;
    let result = harness
        .call(names::ANALYZE_SENTIMENT, json!({"text": "Terrible service, awful food."}))
        .await;

    assert!(result.output.get("result").is_none());
    assert_eq!(result.output["sentiment"], "negative");
    assert_eq!(result.output["resolution"]["method"], "fallback");
}
