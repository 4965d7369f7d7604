//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back, and that on-disk overrides reach the registered tools.

use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use toolmock_core::config::{Config, ConfigBuilder, LogLevel};
use toolmock_core::types::names;
use toolmock_integration_tests::Harness;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("toolmock.json5");

    let config = ConfigBuilder::new()
        .threshold(names::GET_STOCK_PRICE, 0.9)
        .disable(names::PORT_SCAN)
        .default_output_limit(25)
        .build();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.engine.default_output_limit, 25);
    assert_eq!(loaded.tool(names::GET_STOCK_PRICE).threshold, Some(0.9));
    assert!(!loaded.tool(names::PORT_SCAN).enabled);
    assert!(loaded.tool(names::VULNERABILITY_SCAN).enabled);
    assert_eq!(loaded.logging.level, LogLevel::Info);
}

#[test]
fn test_config_parse_json5() {
    let config = Config::parse(
        r#"{
            // comments and trailing commas are fine
            engine: { default_output_limit: 3, },
            logging: { level: "debug" },
        }"#,
    )
    .unwrap();
    assert_eq!(config.engine.default_output_limit, 3);
    assert_eq!(config.engine.max_output_limit, 100);
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/toolmock.json5"));
    assert!(result.is_err());

    let fallback = Config::load_or_default(Some(Path::new("/nonexistent/toolmock.json5"))).unwrap();
    assert_eq!(fallback.engine.default_output_limit, 10);
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}

#[test]
fn test_validate_collects_every_error() {
    let config = Config::parse(
        r#"{
            engine: { default_output_limit: 0 },
            tools: {
                bash: {},
                port_scan: { threshold: -1 },
            },
        }"#,
    )
    .unwrap();

    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("default_output_limit"));
    assert!(message.contains("Unknown tool 'bash'"));
    assert!(message.contains("port_scan"));
}

#[tokio::test]
async fn test_dataset_override_reaches_tool() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("get_ip_address.json"),
        r#"{
            "custom_dns_001": {
                "queries": ["github.com"],
                "result": {"status": "success", "ip_address": "192.0.2.10"}
            }
        }"#,
    )
    .unwrap();

    let config = ConfigBuilder::new().datasets_dir(dir.path()).build();
    let harness = Harness::with_config(&config).await;

    let result = harness.call(names::GET_IP_ADDRESS, json!({"domain": "github.com"})).await;
    assert_eq!(result.output["resolution"]["method"], "similarity_match");
    assert_eq!(result.output["resolution"]["task_id"], "custom_dns_001");
    assert_eq!(result.output["result"]["ip_address"], "192.0.2.10");
}

#[tokio::test]
async fn test_threshold_override_changes_outcome() {
    // "AAP" scores below the stock tool's own threshold against "AAPL".
    let harness = Harness::new().await;
    let method = harness.method(names::GET_STOCK_PRICE, json!({"symbol": "AAP"})).await;
    assert_eq!(method, "fallback");

    let config = ConfigBuilder::new().threshold(names::GET_STOCK_PRICE, 0.5).build();
    let harness = Harness::with_config(&config).await;
    let method = harness.method(names::GET_STOCK_PRICE, json!({"symbol": "AAP"})).await;
    assert_eq!(method, "similarity_match");
}
