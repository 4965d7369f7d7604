//! One-shot tool invocation.

use super::{build_registry, load_config};
use clap::Args;
use console::style;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use toolmock_core::context::SharedTaskContext;
use toolmock_tools::{ToolContext, ToolExecutor};
use tracing::debug;

/// Call command arguments.
#[derive(Args)]
pub struct CallArgs {
    /// Tool name
    pub tool: String,

    /// Call arguments as JSON; anything that is not JSON is passed as a string
    #[arg(short, long)]
    pub args: Option<String>,

    /// Run the call while this task is active
    #[arg(short, long)]
    pub task: Option<String>,

    /// Number of times to call the tool
    #[arg(short, long, default_value_t = 1)]
    pub repeat: usize,

    /// Session id passed to the tool
    #[arg(long, default_value = "cli")]
    pub session: String,
}

/// Parse call arguments leniently.
pub fn parse_args(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Object(Default::default()),
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

/// Run the call command.
pub async fn run(args: CallArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let context = Arc::new(SharedTaskContext::new());
    let registry = build_registry(&config, context.clone()).await?;
    let executor =
        ToolExecutor::new(Arc::new(registry)).with_context(ToolContext::new(&args.session));

    if let Some(task_id) = &args.task {
        context.begin(task_id.clone());
    }

    let call_args = parse_args(args.args.as_deref());
    let mut failed = false;
    for _ in 0..args.repeat.max(1) {
        let tool_use_id = format!("toolu_{}", uuid::Uuid::new_v4().simple());
        let result = executor
            .execute(&tool_use_id, &args.tool, call_args.clone(), None)
            .await;

        match result {
            Ok(result) => {
                debug!(
                    tool_use_id = %result.tool_use_id,
                    duration_ms = ?result.duration_ms,
                    "Call finished"
                );
                println!("{}", serde_json::to_string_pretty(&result.output)?);
                failed |= result.is_error;
            }
            Err(e) => {
                context.finish();
                anyhow::bail!("{}", e);
            }
        }
    }

    context.finish();

    if failed {
        eprintln!("{} tool reported an error", style("error:").red().bold());
        anyhow::bail!("Call to '{}' failed", args.tool);
    }
    Ok(())
}
