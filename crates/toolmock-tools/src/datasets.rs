//! Embedded task datasets and on-disk overrides.

use crate::error::ToolError;
use std::path::Path;
use toolmock_core::config::Config;
use toolmock_core::dataset::TaskDataset;
use toolmock_core::types::names;
use tracing::{info, warn};

/// Dataset compiled into the binary for a built-in tool.
pub fn embedded(name: &str) -> Option<&'static str> {
    let content = match name {
        names::ANALYZE_SENTIMENT => include_str!("../data/analyze_sentiment.json"),
        names::GET_BROWSER_COOKIES => include_str!("../data/get_browser_cookies.json"),
        names::SEARCH_CONTACTS => include_str!("../data/search_contacts.json"),
        names::GET_GEOLOCATION => include_str!("../data/get_geolocation.json"),
        names::GET_IP_ADDRESS => include_str!("../data/get_ip_address.json"),
        names::GET_STOCK_PRICE => include_str!("../data/get_stock_price.json"),
        names::FETCH_URL_CONTENT => include_str!("../data/fetch_url_content.json"),
        names::GET_SOCIAL_FOLLOWERS => include_str!("../data/get_social_followers.json"),
        names::PORT_SCAN => include_str!("../data/port_scan.json"),
        names::VULNERABILITY_SCAN => include_str!("../data/vulnerability_scan.json"),
        _ => return None,
    };
    Some(content)
}

/// Parse the embedded dataset of a tool; empty for unknown tools.
pub fn load_embedded(name: &str) -> Result<TaskDataset, ToolError> {
    match embedded(name) {
        Some(content) => Ok(TaskDataset::from_json_str(content)?),
        None => Ok(TaskDataset::new()),
    }
}

/// Load the dataset a tool should replay.
///
/// A configured override file is preferred. If it cannot be read or parsed
/// the embedded dataset is used instead, so a broken override never takes a
/// tool offline.
pub fn load(name: &str, config: &Config) -> Result<TaskDataset, ToolError> {
    if let Some(path) = config.dataset_override(name) {
        match load_override(&path) {
            Ok(dataset) => {
                info!(
                    tool = name,
                    path = %path.display(),
                    tasks = dataset.len(),
                    "Loaded dataset override"
                );
                return Ok(dataset);
            }
            Err(e) => {
                warn!(tool = name, path = %path.display(), error = %e, "Ignoring dataset override");
            }
        }
    }

    load_embedded(name)
}

fn load_override(path: &Path) -> Result<TaskDataset, ToolError> {
    Ok(TaskDataset::load(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use toolmock_core::config::ConfigBuilder;
    use toolmock_core::dataset::TaskKind;

    #[test]
    fn test_every_builtin_dataset_parses() {
        for name in names::ALL {
            let dataset = load_embedded(name).unwrap();
            assert!(!dataset.is_empty(), "{} dataset is empty", name);
        }
    }

    #[test]
    fn test_unknown_tool_has_empty_dataset() {
        assert!(embedded("bash").is_none());
        assert!(load_embedded("bash").unwrap().is_empty());
    }

    #[test]
    fn test_stock_dataset_starts_with_simple_task() {
        let dataset = load_embedded(names::GET_STOCK_PRICE).unwrap();
        let first = dataset.iter().next().unwrap();
        assert_eq!(first.task_id, "L0_simple_014");
        match &first.kind {
            TaskKind::Single { result, queries } => {
                assert_eq!(queries, &vec!["AAPL".to_string()]);
                assert_eq!(result["price"], 175.5);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
        assert!(dataset.iter().any(|r| r.is_multi_call()));
    }

    #[test]
    fn test_ip_dataset_has_no_github_entries() {
        let content = embedded(names::GET_IP_ADDRESS).unwrap();
        assert!(!content.to_lowercase().contains("github"));
    }

    #[test]
    fn test_override_file_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"only_task": {"queries": ["x"], "result": {"ok": true}}}"#).unwrap();

        let config = ConfigBuilder::new().dataset(names::PORT_SCAN, &path).build();
        let dataset = load(names::PORT_SCAN, &config).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.get("only_task").is_some());
    }

    #[test]
    fn test_datasets_dir_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("port_scan.json"),
            r#"{"dir_task": {"queries": ["y"], "result": {}}}"#,
        )
        .unwrap();

        let config = ConfigBuilder::new().datasets_dir(dir.path()).build();
        let dataset = load(names::PORT_SCAN, &config).unwrap();
        assert!(dataset.get("dir_task").is_some());

        // Tools without a file in the directory keep their embedded data.
        let embedded = load(names::VULNERABILITY_SCAN, &config).unwrap();
        assert!(embedded.len() > 1);
    }

    #[test]
    fn test_broken_override_falls_back_to_embedded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let config = ConfigBuilder::new().dataset(names::PORT_SCAN, &path).build();
        let dataset = load(names::PORT_SCAN, &config).unwrap();
        assert_eq!(dataset.len(), load_embedded(names::PORT_SCAN).unwrap().len());
    }
}
