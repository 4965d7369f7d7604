//! CLI routing integration tests.
//!
//! These tests parse full command lines and run them through the library
//! entry point, using a throwaway config file so the user's own config is
//! never read.

use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use toolmock_cli::{run, Cli, Commands};

fn config_in(dir: &TempDir) -> PathBuf {
    dir.path().join("toolmock.json5")
}

fn parse(args: &[&str], config: &Path) -> Cli {
    let mut argv = vec!["toolmock", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn test_version() {
    let cli = Cli::try_parse_from(["toolmock", "version"]).unwrap();
    assert!(matches!(cli.command, Commands::Version));
    run(cli).await.unwrap();
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["toolmock", "gateway"]).is_err());
}

#[tokio::test]
async fn test_list_and_schema() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    run(parse(&["list"], &config)).await.unwrap();
    run(parse(&["list", "--json"], &config)).await.unwrap();
    run(parse(&["schema", "get_geolocation"], &config)).await.unwrap();
    assert!(run(parse(&["schema", "bash"], &config)).await.is_err());
}

#[tokio::test]
async fn test_call_succeeds_and_reports_parameter_errors() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let ip_call = ["call", "get_ip_address", "--args", r#"{"domain":"github.com"}"#];
    run(parse(&ip_call, &config)).await.unwrap();

    let rotating_call = [
        "call",
        "get_stock_price",
        "--args",
        r#"{"symbol":"AAPL"}"#,
        "--task",
        "L2_portfolio_021",
        "--repeat",
        "3",
    ];
    run(parse(&rotating_call, &config)).await.unwrap();

    // An active task does not excuse a missing required parameter.
    let missing_symbol = ["call", "get_stock_price", "--task", "L2_portfolio_021"];
    assert!(run(parse(&missing_symbol, &config)).await.is_err());

    assert!(run(parse(&["call", "get_ip_address"], &config)).await.is_err());
    assert!(run(parse(&["call", "no_such_tool"], &config)).await.is_err());
}

#[tokio::test]
async fn test_tasks_command() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    run(parse(&["tasks", "get_stock_price"], &config)).await.unwrap();
    assert!(run(parse(&["tasks", "bash"], &config)).await.is_err());
}

#[tokio::test]
async fn test_config_init_and_validate() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    run(parse(&["config", "init"], &config)).await.unwrap();
    assert!(config.exists());
    run(parse(&["config", "validate"], &config)).await.unwrap();
    assert!(run(parse(&["config", "init"], &config)).await.is_err());
}
