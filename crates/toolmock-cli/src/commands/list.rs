//! Tool listing and schema commands.

use super::{build_registry, load_config};
use clap::Args;
use console::style;
use std::path::Path;
use std::sync::Arc;
use toolmock_core::context::NullTaskContext;

/// List command arguments.
#[derive(Args)]
pub struct ListArgs {
    /// Print full tool definitions as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the list command.
pub async fn run(args: ListArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config, Arc::new(NullTaskContext)).await?;
    let definitions = registry.definitions().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    for definition in definitions {
        println!("{} {}", style(format!("{:<22}", definition.name)).bold(), definition.description);
    }
    Ok(())
}

/// Print one tool's definition.
pub async fn schema(tool: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config, Arc::new(NullTaskContext)).await?;

    let Some(tool) = registry.get(tool).await else {
        anyhow::bail!("Unknown tool: {}. Run 'toolmock list' to see available tools.", tool);
    };
    println!("{}", serde_json::to_string_pretty(&tool.definition())?);
    Ok(())
}
