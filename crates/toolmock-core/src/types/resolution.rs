//! Resolution outcomes returned by the mock tools.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Which resolution tier produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// Active task, first recorded call taken without scoring.
    TaskContextDirect,

    /// Active task, result chosen from that task's record.
    TaskContext,

    /// Best dataset match (tools tagging matches as "intelligent").
    IntelligentMatching,

    /// Best dataset match (tools tagging matches as "similarity").
    SimilarityMatch,

    /// Synthesized default payload.
    Fallback,

    /// Internal failure replaced by a safe payload.
    ExceptionFallback,

    /// Required parameter missing or empty.
    ParameterError,
}

impl ResolutionMethod {
    /// Wire name of the method tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskContextDirect => "task_context_direct",
            Self::TaskContext => "task_context",
            Self::IntelligentMatching => "intelligent_matching",
            Self::SimilarityMatch => "similarity_match",
            Self::Fallback => "fallback",
            Self::ExceptionFallback => "exception_fallback",
            Self::ParameterError => "parameter_error",
        }
    }

    /// Whether the payload came from the active task's own record.
    pub fn is_task_context(&self) -> bool {
        matches!(self, Self::TaskContextDirect | Self::TaskContext)
    }

    /// Whether the payload came from a dataset match.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::IntelligentMatching | Self::SimilarityMatch)
    }
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Result object handed back to the caller.
    pub payload: Value,

    /// Tier that produced the payload.
    pub method: ResolutionMethod,

    /// Task whose record supplied the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_task_id: Option<String>,

    /// Call index within a multi-call record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_index: Option<usize>,

    /// Whether the matched record uses the multi-call shape.
    #[serde(default)]
    pub multi_call: bool,

    /// Match score, for matching tiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Error text for exception and parameter failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl Resolution {
    /// Create an outcome with no provenance.
    pub fn new(payload: Value, method: ResolutionMethod) -> Self {
        Self {
            payload,
            method,
            matched_task_id: None,
            call_index: None,
            multi_call: false,
            score: None,
            diagnostic: None,
        }
    }

    /// Record the matched task.
    pub fn with_task(
        mut self,
        task_id: impl Into<String>,
        call_index: Option<usize>,
        multi_call: bool,
    ) -> Self {
        self.matched_task_id = Some(task_id.into());
        self.call_index = call_index;
        self.multi_call = multi_call;
        self
    }

    /// Record the match score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Attach diagnostic text.
    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostic = Some(diagnostic.into());
        self
    }

    /// Whether the caller should see this as an error.
    pub fn is_error(&self) -> bool {
        self.method == ResolutionMethod::ParameterError
    }

    /// Provenance block attached to tool output.
    pub fn provenance(&self) -> Value {
        json!({
            "method": self.method,
            "task_id": self.matched_task_id,
            "call_index": self.call_index,
            "multi_call": self.multi_call,
        })
    }
}
