//! Task-aware response resolution.
//!
//! Every mock tool resolves a call through the same tiers, first hit wins:
//!
//! 1. **Task context**: a task is running and the tool's dataset has a record
//!    for it. The record's result is returned, whatever the call looked like.
//! 2. **Matching**: the call is scored against every query in the dataset and
//!    the best record wins if it clears the tool's threshold. While a task is
//!    running (but has no record) the threshold drops to zero.
//! 3. **Fallback**: the tool synthesizes a payload from the call itself.
//! 4. **Exception fallback**: anything that fails or panics in tiers 1-3 is
//!    replaced by the tool's safe payload.
//!
//! Missing required parameters are reported before any tier runs, and are the
//! only failure a caller ever sees.

use crate::counters::CallCounters;
use crate::error::ToolError;
use crate::params::Params;
use crate::similarity::{composite_score, Normalizer};
use serde_json::{json, Value};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use toolmock_core::config::EngineConfig;
use toolmock_core::context::{NullTaskContext, TaskContext, TaskSnapshot};
use toolmock_core::dataset::{CallRecord, TaskDataset, TaskKind, TaskRecord};
use toolmock_core::types::{Resolution, ResolutionMethod, ToolGroup};
use tracing::{debug, warn};

/// Score given to a wildcard (`"*"`) query.
pub const WILDCARD_SCORE: f64 = 0.5;

/// How a multi-call record is resolved when its task is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectPolicy {
    /// Always the first recorded call, without scoring.
    FirstCall,

    /// The call whose queries best match this invocation; call 0 on ties.
    BestScoring,

    /// Cycle through the calls, one per invocation, using [`CallCounters`].
    Rotate,
}

/// Layout of the JSON a tool hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// `{"result": payload, "resolution": {...}}`
    Nested,

    /// Payload fields at the top level, plus `"resolution"`.
    Flat,
}

/// Per-tool configuration of the resolution engine.
pub trait MockTool: Send + Sync {
    /// Tool name.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's parameters.
    fn input_schema(&self) -> Value;

    /// Parameter names in positional order.
    fn parameters(&self) -> &'static [&'static str];

    /// Parameters that must be present and non-empty.
    fn required(&self) -> &'static [&'static str];

    /// Tool group.
    fn group(&self) -> ToolGroup {
        ToolGroup::Custom
    }

    /// Normalization applied to queries and candidates alike.
    fn normalizer(&self) -> Normalizer {
        Normalizer::text()
    }

    /// Minimum match score when no task is running.
    fn threshold(&self) -> f64;

    /// Multi-call policy for the task-context tier.
    fn direct_policy(&self) -> DirectPolicy {
        DirectPolicy::BestScoring
    }

    /// Tag reported for dataset matches.
    fn match_method(&self) -> ResolutionMethod {
        ResolutionMethod::SimilarityMatch
    }

    /// Output layout.
    fn output_shape(&self) -> OutputShape {
        OutputShape::Nested
    }

    /// Query string matched against dataset queries.
    fn query(&self, params: &Params) -> String;

    /// Score a raw query against a raw candidate query.
    fn score(&self, query: &str, candidate: &str) -> f64 {
        let normalizer = self.normalizer();
        composite_score(&normalizer.normalize(query), &normalizer.normalize(candidate))
    }

    /// Synthesize a payload when nothing in the dataset applies.
    fn fallback(&self, params: &Params) -> Result<Value, ToolError>;

    /// Generic successful payload used when resolution fails internally.
    fn safe_payload(&self, _params: &Params) -> Value {
        json!({
            "status": "success",
            "message": "Request processed successfully",
        })
    }

    /// Post-process a resolved payload (copy) before it is returned.
    fn finalize(&self, _payload: &mut Value, _params: &Params, _limits: &EngineConfig) {}
}

#[derive(Debug, Clone, Copy)]
struct BestMatch<'a> {
    record: &'a TaskRecord,
    call_index: Option<usize>,
    result: &'a Value,
    score: f64,
}

/// Resolves mock tool calls against canned datasets.
pub struct ResolutionEngine {
    context: Arc<dyn TaskContext>,
    counters: Arc<CallCounters>,
    limits: EngineConfig,
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new(Arc::new(NullTaskContext))
    }
}

impl ResolutionEngine {
    /// Create an engine reading the given task context.
    pub fn new(context: Arc<dyn TaskContext>) -> Self {
        Self {
            context,
            counters: Arc::new(CallCounters::new()),
            limits: EngineConfig::default(),
        }
    }

    /// Use a caller-owned counter table.
    pub fn with_counters(mut self, counters: Arc<CallCounters>) -> Self {
        self.counters = counters;
        self
    }

    /// Set output limits.
    pub fn with_limits(mut self, limits: EngineConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Counter table used for rotating tools.
    pub fn counters(&self) -> &Arc<CallCounters> {
        &self.counters
    }

    /// Resolve one call. Never fails; errors become payloads.
    pub fn resolve(
        &self,
        tool: &dyn MockTool,
        dataset: &TaskDataset,
        threshold: f64,
        args: &Value,
    ) -> Resolution {
        let params = Params::from_args(args, tool.parameters());

        if let Err(e) = validate(tool, &params) {
            debug!(tool = tool.name(), error = %e, "Rejected call");
            return parameter_error(tool, &e);
        }

        let snapshot = self.context.snapshot();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_tiers(tool, dataset, threshold, &params, &snapshot)
        }));

        match outcome {
            Ok(Ok(resolution)) => resolution,
            Ok(Err(e)) => exception_fallback(tool, &params, e.to_string()),
            Err(panic) => exception_fallback(tool, &params, panic_message(panic.as_ref())),
        }
    }

    fn run_tiers(
        &self,
        tool: &dyn MockTool,
        dataset: &TaskDataset,
        threshold: f64,
        params: &Params,
        snapshot: &TaskSnapshot,
    ) -> Result<Resolution, ToolError> {
        let query = tool.query(params);

        let mut resolution = match self.resolve_task(tool, dataset, &query, snapshot) {
            Some(resolution) => resolution,
            None => match best_match(tool, dataset, &query, threshold, snapshot.active) {
                Some(resolution) => resolution,
                None => {
                    debug!(tool = tool.name(), query = %query, "No match, synthesizing fallback");
                    Resolution::new(tool.fallback(params)?, ResolutionMethod::Fallback)
                }
            },
        };

        tool.finalize(&mut resolution.payload, params, &self.limits);
        Ok(resolution)
    }

    fn resolve_task(
        &self,
        tool: &dyn MockTool,
        dataset: &TaskDataset,
        query: &str,
        snapshot: &TaskSnapshot,
    ) -> Option<Resolution> {
        let task_id = snapshot.active_task_id()?;
        let record = dataset.get(task_id)?;

        let (result, call_index, method) = match &record.kind {
            TaskKind::Single { result, .. } => (result, None, ResolutionMethod::TaskContext),
            TaskKind::MultiCall { calls } => {
                let (index, method) = match tool.direct_policy() {
                    DirectPolicy::FirstCall => (0, ResolutionMethod::TaskContextDirect),
                    DirectPolicy::BestScoring => {
                        (best_call(tool, calls, query), ResolutionMethod::TaskContext)
                    }
                    DirectPolicy::Rotate => (
                        self.counters.next(task_id, calls.len()),
                        ResolutionMethod::TaskContext,
                    ),
                };
                (&calls.get(index)?.result, Some(index), method)
            }
        };

        debug!(
            tool = tool.name(),
            task_id,
            call_index,
            scenario = record.scenario.as_deref().unwrap_or(""),
            "Resolved from task context"
        );

        Some(
            Resolution::new(result.clone(), method).with_task(
                task_id,
                call_index,
                record.is_multi_call(),
            ),
        )
    }
}

fn validate(tool: &dyn MockTool, params: &Params) -> Result<(), ToolError> {
    for name in tool.required() {
        params.required_text(name)?;
    }
    Ok(())
}

/// Highest-scoring query of a candidate; wildcards only as a last resort.
fn candidate_score(tool: &dyn MockTool, query: &str, queries: &[String]) -> f64 {
    queries.iter().fold(0.0_f64, |best, candidate| {
        let score = if candidate.trim() == "*" {
            WILDCARD_SCORE
        } else {
            tool.score(query, candidate)
        };
        best.max(score)
    })
}

/// Index of the call best matching the query, 0 when nothing scores.
fn best_call(tool: &dyn MockTool, calls: &[CallRecord], query: &str) -> usize {
    let mut best_index = 0;
    let mut best_score = 0.0;
    for (index, call) in calls.iter().enumerate() {
        let score = candidate_score(tool, query, &call.queries);
        if score > best_score {
            best_index = index;
            best_score = score;
        }
    }
    best_index
}

fn best_match(
    tool: &dyn MockTool,
    dataset: &TaskDataset,
    query: &str,
    threshold: f64,
    task_active: bool,
) -> Option<Resolution> {
    let mut best: Option<BestMatch<'_>> = None;

    for record in dataset.iter() {
        for candidate in record.candidates() {
            let score = candidate_score(tool, query, candidate.queries);
            if best.map_or(true, |b| score > b.score) {
                best = Some(BestMatch {
                    record,
                    call_index: candidate.call_index,
                    result: candidate.result,
                    score,
                });
            }
        }
    }

    let best = best?;
    let min_score = if task_active { 0.0 } else { threshold };
    if best.score < min_score {
        debug!(
            tool = tool.name(),
            best_task = %best.record.task_id,
            score = best.score,
            min_score,
            "Best match below threshold"
        );
        return None;
    }

    debug!(
        tool = tool.name(),
        task_id = %best.record.task_id,
        call_index = best.call_index,
        score = best.score,
        "Resolved by matching"
    );

    Some(
        Resolution::new(best.result.clone(), tool.match_method())
            .with_task(
                best.record.task_id.clone(),
                best.call_index,
                best.record.is_multi_call(),
            )
            .with_score(best.score),
    )
}

fn parameter_error(tool: &dyn MockTool, error: &ToolError) -> Resolution {
    let payload = json!({
        "status": "error",
        "message": error.to_string(),
        "error_code": error.error_code(),
        "tool": tool.name(),
    });
    Resolution::new(payload, ResolutionMethod::ParameterError).with_diagnostic(error.to_string())
}

fn exception_fallback(tool: &dyn MockTool, params: &Params, diagnostic: String) -> Resolution {
    warn!(tool = tool.name(), error = %diagnostic, "Resolution failed, returning safe payload");
    Resolution::new(tool.safe_payload(params), ResolutionMethod::ExceptionFallback)
        .with_diagnostic(diagnostic)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool panicked".to_string()
    }
}
