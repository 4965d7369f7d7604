//! Shared fixtures for the integration tests.

use serde_json::Value;
use std::sync::Arc;
use toolmock_core::config::Config;
use toolmock_core::context::SharedTaskContext;
use toolmock_core::types::ToolResult;
use toolmock_tools::{CallCounters, ResolutionEngine, ToolExecutor, ToolRegistry};

/// A registry wired to a harness-owned task context.
pub struct Harness {
    pub context: SharedTaskContext,
    pub counters: Arc<CallCounters>,
    pub executor: ToolExecutor,
}

impl Harness {
    /// Build a harness over the embedded datasets.
    pub async fn new() -> Self {
        Self::with_config(&Config::default()).await
    }

    /// Build a harness using the given configuration.
    pub async fn with_config(config: &Config) -> Self {
        let context = SharedTaskContext::new();
        let counters = Arc::new(CallCounters::new());
        let engine = ResolutionEngine::new(Arc::new(context.clone()))
            .with_counters(counters.clone())
            .with_limits(config.engine.clone());
        let registry = ToolRegistry::with_defaults(Arc::new(engine), config)
            .await
            .expect("registry");

        Self {
            context,
            counters,
            executor: ToolExecutor::new(Arc::new(registry)),
        }
    }

    /// Call a tool, panicking on dispatch errors.
    pub async fn call(&self, tool: &str, args: Value) -> ToolResult {
        self.executor
            .execute("toolu_test", tool, args, None)
            .await
            .expect("tool dispatch")
    }

    /// Resolution method reported by a call.
    pub async fn method(&self, tool: &str, args: Value) -> String {
        let result = self.call(tool, args).await;
        result.output["resolution"]["method"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}
