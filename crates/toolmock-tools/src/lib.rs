//! Mock tools for the agent-evaluation sandbox.
//!
//! Every tool replays canned results instead of touching the network or the
//! host. Results are chosen by the [`ResolutionEngine`]:
//! - the active task's own record, when the harness has a task running
//! - otherwise the best fuzzy match across the tool's dataset
//! - otherwise a deterministic fallback synthesized from the call parameters

pub mod counters;
pub mod datasets;
pub mod engine;
pub mod error;
pub mod params;
pub mod similarity;
pub mod tools;

pub use counters::CallCounters;
pub use engine::{DirectPolicy, MockTool, OutputShape, ResolutionEngine};
pub use error::ToolError;
pub use params::Params;
pub use similarity::Normalizer;
pub use tools::{CannedTool, Tool, ToolContext, ToolExecutor, ToolRegistry};

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
