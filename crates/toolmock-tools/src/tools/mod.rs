//! Tool execution framework and the built-in mock tools.
//!
//! This module provides:
//! - [`Tool`] trait for implementing tools
//! - [`ToolRegistry`] for managing available tools
//! - [`ToolExecutor`] for executing tools by name
//! - [`CannedTool`], which binds a [`MockTool`] to its dataset and the engine

mod contacts;
mod cookies;
mod geolocation;
mod ip_address;
mod port_scan;
mod sentiment;
mod social;
mod stock;
mod url_content;
mod util;
mod vulnerability;

pub use contacts::SearchContactsTool;
pub use cookies::BrowserCookiesTool;
pub use geolocation::GeolocationTool;
pub use ip_address::IpAddressTool;
pub use port_scan::PortScanTool;
pub use sentiment::SentimentTool;
pub use social::SocialFollowersTool;
pub use stock::StockPriceTool;
pub use url_content::UrlContentTool;
pub use vulnerability::VulnerabilityScanTool;

use crate::datasets;
use crate::engine::{MockTool, OutputShape, ResolutionEngine};
use crate::error::ToolError;
use crate::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use toolmock_core::config::Config;
use toolmock_core::dataset::TaskDataset;
use toolmock_core::types::{Resolution, ToolDefinition, ToolGroup, ToolResult};
use tracing::{debug, info};

/// A tool that can be executed by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Get the tool definition for the model.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with given arguments.
    async fn execute(
        &self,
        tool_use_id: &str,
        args: Value,
        context: &ToolContext,
    ) -> Result<ToolResult>;

    /// Get the tool group.
    fn group(&self) -> ToolGroup {
        ToolGroup::Custom
    }
}

/// Context for tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Session ID of the calling agent.
    pub session_id: String,
}

impl ToolContext {
    /// Create a context for a session.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// A mock tool bound to its dataset and the shared resolution engine.
pub struct CannedTool {
    tool: Arc<dyn MockTool>,
    dataset: Arc<TaskDataset>,
    threshold: f64,
    engine: Arc<ResolutionEngine>,
}

impl CannedTool {
    /// Bind a mock tool using its own threshold.
    pub fn new(
        tool: Arc<dyn MockTool>,
        dataset: TaskDataset,
        engine: Arc<ResolutionEngine>,
    ) -> Self {
        let threshold = tool.threshold();
        Self {
            tool,
            dataset: Arc::new(dataset),
            threshold,
            engine,
        }
    }

    /// Override the minimum match score used when no task is running.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Threshold in effect.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Dataset the tool replays.
    pub fn dataset(&self) -> &TaskDataset {
        &self.dataset
    }

    /// Resolve a call without rendering it.
    pub fn resolve(&self, args: &Value) -> Resolution {
        self.engine
            .resolve(self.tool.as_ref(), &self.dataset, self.threshold, args)
    }

    /// Render a resolution in the tool's output layout.
    pub fn render(&self, resolution: &Resolution) -> Value {
        let provenance = resolution.provenance();
        let flatten = resolution.is_error() || self.tool.output_shape() == OutputShape::Flat;

        match (&resolution.payload, flatten) {
            (Value::Object(fields), true) => {
                let mut output = fields.clone();
                output.insert("resolution".to_string(), provenance);
                Value::Object(output)
            }
            (payload, _) => {
                let mut output = Map::new();
                output.insert("result".to_string(), payload.clone());
                output.insert("resolution".to_string(), provenance);
                Value::Object(output)
            }
        }
    }
}

#[async_trait]
impl Tool for CannedTool {
    fn name(&self) -> &str {
        self.tool.name()
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.tool.name().to_string(),
            description: self.tool.description().to_string(),
            input_schema: self.tool.input_schema(),
        }
    }

    async fn execute(
        &self,
        tool_use_id: &str,
        args: Value,
        _context: &ToolContext,
    ) -> Result<ToolResult> {
        let start = Instant::now();
        let resolution = self.resolve(&args);
        let output = self.render(&resolution);

        let result = if resolution.is_error() {
            ToolResult::error(tool_use_id, output)
        } else {
            ToolResult::success(tool_use_id, output)
        };
        Ok(result.with_duration(start.elapsed()))
    }

    fn group(&self) -> ToolGroup {
        self.tool.group()
    }
}

/// The ten built-in mock tools.
pub fn builtin_tools() -> Vec<Arc<dyn MockTool>> {
    vec![
        Arc::new(SentimentTool::new()),
        Arc::new(BrowserCookiesTool::new()),
        Arc::new(SearchContactsTool::new()),
        Arc::new(GeolocationTool::new()),
        Arc::new(IpAddressTool::new()),
        Arc::new(StockPriceTool::new()),
        Arc::new(UrlContentTool::new()),
        Arc::new(SocialFollowersTool::new()),
        Arc::new(PortScanTool::new()),
        Arc::new(VulnerabilityScanTool::new()),
    ]
}

/// Registry for available tools.
pub struct ToolRegistry {
    /// Registered tools by name.
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,

    /// Tool groups.
    groups: RwLock<HashMap<ToolGroup, Vec<String>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with every enabled built-in tool.
    ///
    /// Datasets and thresholds come from `config`; tools disabled there are
    /// skipped.
    pub async fn with_defaults(engine: Arc<ResolutionEngine>, config: &Config) -> Result<Self> {
        let registry = Self::new();

        for tool in builtin_tools() {
            let settings = config.tool(tool.name());
            if !settings.enabled {
                debug!(tool = tool.name(), "Tool disabled by configuration");
                continue;
            }

            let dataset = datasets::load(tool.name(), config)?;
            let mut canned = CannedTool::new(tool, dataset, engine.clone());
            if let Some(threshold) = settings.threshold {
                canned = canned.with_threshold(threshold);
            }
            registry.register(Arc::new(canned)).await;
        }

        info!(count = registry.len().await, "Registered mock tools");
        Ok(registry)
    }

    /// Register a tool.
    pub async fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        let group = tool.group();

        let mut tools = self.tools.write().await;
        tools.insert(name.clone(), tool);

        let mut groups = self.groups.write().await;
        groups.entry(group).or_default().push(name);
    }

    /// Unregister a tool.
    pub async fn unregister(&self, name: &str) {
        let mut tools = self.tools.write().await;
        if let Some(tool) = tools.remove(name) {
            let group = tool.group();
            let mut groups = self.groups.write().await;
            if let Some(group_tools) = groups.get_mut(&group) {
                group_tools.retain(|n| n != name);
            }
        }
    }

    /// Get a tool by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(name).cloned()
    }

    /// List all tool names, sorted.
    pub async fn list(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    pub async fn len(&self) -> usize {
        self.tools.read().await.len()
    }

    /// List tools in a group.
    pub async fn list_group(&self, group: ToolGroup) -> Vec<String> {
        let groups = self.groups.read().await;
        groups.get(&group).cloned().unwrap_or_default()
    }

    /// Execute a registered tool.
    pub async fn execute(
        &self,
        tool_use_id: &str,
        name: &str,
        args: Value,
        context: &ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .await
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        tool.execute(tool_use_id, args, context).await
    }

    /// Get all tool definitions, sorted by name.
    pub async fn definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().await;
        let mut definitions: Vec<ToolDefinition> = tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }
}

/// Executes registered tools by name.
pub struct ToolExecutor {
    /// Tool registry.
    registry: Arc<ToolRegistry>,

    /// Default execution context.
    default_context: ToolContext,
}

impl ToolExecutor {
    /// Create a new tool executor.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            default_context: ToolContext::default(),
        }
    }

    /// Set the default context.
    pub fn with_context(mut self, context: ToolContext) -> Self {
        self.default_context = context;
        self
    }

    /// Execute a tool by name.
    pub async fn execute(
        &self,
        tool_use_id: &str,
        name: &str,
        args: Value,
        context: Option<&ToolContext>,
    ) -> Result<ToolResult> {
        let ctx = context.unwrap_or(&self.default_context);

        debug!(session = %ctx.session_id, "Executing tool '{}' with args: {:?}", name, args);
        self.registry.execute(tool_use_id, name, args, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolmock_core::config::ConfigBuilder;
    use toolmock_core::context::SharedTaskContext;
    use toolmock_core::types::names;

    async fn default_registry() -> ToolRegistry {
        let engine = Arc::new(ResolutionEngine::default());
        ToolRegistry::with_defaults(engine, &Config::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_registry_with_defaults() {
        let registry = default_registry().await;
        let tools = registry.list().await;

        for name in names::ALL {
            assert!(tools.contains(&name.to_string()), "missing {}", name);
        }
        assert_eq!(tools.len(), 10);
    }

    #[tokio::test]
    async fn test_registry_groups() {
        let registry = default_registry().await;
        let security = registry.list_group(ToolGroup::Security).await;
        assert!(security.contains(&"port_scan".to_string()));
        assert!(security.contains(&"vulnerability_scan".to_string()));
        assert!(registry.list_group(ToolGroup::Custom).await.is_empty());
    }

    #[tokio::test]
    async fn test_registry_unregister() {
        let registry = default_registry().await;
        registry.unregister("port_scan").await;
        assert!(registry.get("port_scan").await.is_none());
        assert!(!registry.list_group(ToolGroup::Security).await.contains(&"port_scan".to_string()));
    }

    #[tokio::test]
    async fn test_disabled_tool_not_registered() {
        let engine = Arc::new(ResolutionEngine::default());
        let config = ConfigBuilder::new().disable("vulnerability_scan").build();
        let registry = ToolRegistry::with_defaults(engine, &config).await.unwrap();
        assert!(registry.get("vulnerability_scan").await.is_none());
        assert_eq!(registry.len().await, 9);
    }

    #[tokio::test]
    async fn test_definitions_declare_required_parameters() {
        let registry = default_registry().await;
        for definition in registry.definitions().await {
            assert!(!definition.description.is_empty());
            assert_eq!(definition.input_schema["type"], "object");
            for required in definition.required_parameters() {
                assert!(
                    definition.parameter_names().contains(&required),
                    "{} requires undeclared '{}'",
                    definition.name,
                    required
                );
            }
        }
    }

    #[tokio::test]
    async fn test_executor_unknown_tool() {
        let executor = ToolExecutor::new(Arc::new(default_registry().await));
        let result = executor.execute("tu_1", "bash", json!({}), None).await;
        assert!(matches!(result, Err(ToolError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_executor_parameter_error_is_error_result() {
        let executor = ToolExecutor::new(Arc::new(default_registry().await));
        let result = executor
            .execute("tu_2", "get_ip_address", json!({}), None)
            .await
            .unwrap();
        assert!(result.is_error);
        assert_eq!(result.output["status"], "error");
        assert_eq!(result.output["error_code"], "MISSING_PARAMETER");
        assert_eq!(result.output["resolution"]["method"], "parameter_error");
    }

    #[tokio::test]
    async fn test_nested_output_shape() {
        let executor = ToolExecutor::new(Arc::new(default_registry().await));
        let result = executor
            .execute("tu_3", "get_stock_price", json!({"symbol": "AAPL"}), None)
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.output["result"]["ticker_symbol"], "AAPL");
        assert_eq!(result.output["resolution"]["method"], "similarity_match");
        assert_eq!(result.output["resolution"]["task_id"], "L0_simple_014");
    }

    #[tokio::test]
    async fn test_flat_output_shape() {
        let executor = ToolExecutor::new(Arc::new(default_registry().await));
        let result = executor
            .execute("tu_4", "analyze_sentiment", json!({"text": "I love it"}), None)
            .await
            .unwrap();
        assert!(result.output.get("result").is_none());
        assert!(result.output["sentiment"].is_string());
        assert!(result.output["resolution"]["method"].is_string());
    }

    #[tokio::test]
    async fn test_threshold_override_from_config() {
        let context = SharedTaskContext::new();
        let engine = Arc::new(ResolutionEngine::new(Arc::new(context)));
        let config = ConfigBuilder::new().threshold("get_stock_price", 0.0).build();
        let registry = ToolRegistry::with_defaults(engine, &config).await.unwrap();

        let executor = ToolExecutor::new(Arc::new(registry));
        let result = executor
            .execute("tu_5", "get_stock_price", json!({"symbol": "ZZZZQ"}), None)
            .await
            .unwrap();
        // With a zero threshold any dataset entry beats the fallback.
        assert_ne!(result.output["resolution"]["method"], "fallback");
    }
}
