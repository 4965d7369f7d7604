//! CLI command implementations.

pub mod call;
pub mod config;
pub mod list;
pub mod tasks;

use std::path::Path;
use std::sync::Arc;
use toolmock_core::config::Config;
use toolmock_core::context::TaskContext;
use toolmock_tools::{ResolutionEngine, ToolRegistry};

/// Load configuration from `path`, the default location, or defaults.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Ok(Config::load_or_default(path)?)
}

/// Build a registry of every enabled tool reading the given task context.
pub(crate) async fn build_registry(
    config: &Config,
    context: Arc<dyn TaskContext>,
) -> anyhow::Result<ToolRegistry> {
    let engine = ResolutionEngine::new(context).with_limits(config.engine.clone());
    Ok(ToolRegistry::with_defaults(Arc::new(engine), config).await?)
}
