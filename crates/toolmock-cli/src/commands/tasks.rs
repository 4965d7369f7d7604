//! Dataset inspection.

use super::load_config;
use console::style;
use std::path::Path;
use toolmock_core::dataset::{TaskDataset, TaskKind};
use toolmock_core::types::names;
use toolmock_tools::datasets;

/// One line per task: id, shape and scenario.
pub fn describe(dataset: &TaskDataset) -> Vec<String> {
    dataset
        .iter()
        .map(|record| {
            let shape = match &record.kind {
                TaskKind::Single { queries, .. } => format!("single, {} queries", queries.len()),
                TaskKind::MultiCall { calls } => format!("{} calls", calls.len()),
            };
            match &record.scenario {
                Some(scenario) => format!("{} ({}) - {}", record.task_id, shape, scenario),
                None => format!("{} ({})", record.task_id, shape),
            }
        })
        .collect()
}

/// Run the tasks command.
pub fn run(tool: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    if !names::is_known(tool) {
        anyhow::bail!("Unknown tool: {}. Run 'toolmock list' to see available tools.", tool);
    }

    let config = load_config(config_path)?;
    let dataset = datasets::load(tool, &config)?;

    println!("{} {} tasks", style(tool).bold(), dataset.len());
    for line in describe(&dataset) {
        println!("  {}", line);
    }
    Ok(())
}
