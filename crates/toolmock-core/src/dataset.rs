//! Canned task datasets.
//!
//! A dataset maps task identifiers to the results a mock tool replays for
//! that task. Two record shapes exist on disk: the legacy single-call shape
//! (`result` + `queries`) and the multi-call shape (`calls`). Both are
//! resolved into [`TaskKind`] once, when the dataset is loaded.
//!
//! ```json
//! {
//!   "L0_simple_014": { "queries": ["AAPL"], "result": { "price": 175.5 } },
//!   "L2_multi_002": {
//!     "scenario": "price check then comparison",
//!     "calls": [
//!       { "queries": ["MSFT"], "result": { "price": 410.2 } },
//!       { "queries": ["GOOGL"], "result": { "price": 141.8 } }
//!     ]
//!   }
//! }
//! ```

use crate::error::DatasetError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One recorded tool invocation inside a multi-call task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Trigger phrases/values that resolve to this call.
    #[serde(default)]
    pub queries: Vec<String>,

    /// Canned payload.
    pub result: Value,
}

/// Shape of a task record.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// Legacy shape: one result for the whole task.
    Single { result: Value, queries: Vec<String> },

    /// Ordered list of recorded calls.
    MultiCall { calls: Vec<CallRecord> },
}

/// A task and its canned results.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    /// Task identifier.
    pub task_id: String,

    /// Free-text scenario label, diagnostics only.
    pub scenario: Option<String>,

    /// Record shape.
    pub kind: TaskKind,
}

/// Borrowed view of one matchable entry of a task record.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Call index for multi-call records, `None` for single records.
    pub call_index: Option<usize>,

    /// Trigger queries.
    pub queries: &'a [String],

    /// Canned result.
    pub result: &'a Value,
}

impl TaskRecord {
    /// Whether this record uses the multi-call shape.
    pub fn is_multi_call(&self) -> bool {
        matches!(self.kind, TaskKind::MultiCall { .. })
    }

    /// Number of recorded calls (1 for single records).
    pub fn call_count(&self) -> usize {
        match &self.kind {
            TaskKind::Single { .. } => 1,
            TaskKind::MultiCall { calls } => calls.len(),
        }
    }

    /// Iterate the matchable entries in record order.
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        match &self.kind {
            TaskKind::Single { result, queries } => vec![Candidate {
                call_index: None,
                queries,
                result,
            }],
            TaskKind::MultiCall { calls } => calls
                .iter()
                .enumerate()
                .map(|(index, call)| Candidate {
                    call_index: Some(index),
                    queries: &call.queries,
                    result: &call.result,
                })
                .collect(),
        }
    }
}

/// On-disk record, before the shape is resolved.
#[derive(Debug, Deserialize)]
struct RawTaskRecord {
    #[serde(default)]
    scenario: Option<String>,
    #[serde(default)]
    calls: Option<Vec<CallRecord>>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    queries: Vec<String>,
}

impl RawTaskRecord {
    fn resolve(self, task_id: String) -> Result<TaskRecord, DatasetError> {
        let kind = match self.calls {
            Some(calls) if calls.is_empty() => {
                return Err(DatasetError::EmptyCalls { task_id });
            }
            Some(calls) => TaskKind::MultiCall { calls },
            None => TaskKind::Single {
                result: self.result.unwrap_or(Value::Null),
                queries: self.queries,
            },
        };

        Ok(TaskRecord {
            task_id,
            scenario: self.scenario,
            kind,
        })
    }
}

/// Insertion-ordered collection of task records for one tool.
#[derive(Debug, Clone, Default)]
pub struct TaskDataset {
    tasks: IndexMap<String, TaskRecord>,
}

impl TaskDataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dataset from JSON text. Key order is preserved.
    pub fn from_json_str(content: &str) -> Result<Self, DatasetError> {
        let raw: IndexMap<String, RawTaskRecord> = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Build a dataset from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, DatasetError> {
        let raw: IndexMap<String, RawTaskRecord> = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn from_raw(raw: IndexMap<String, RawTaskRecord>) -> Result<Self, DatasetError> {
        let mut tasks = IndexMap::with_capacity(raw.len());
        for (task_id, record) in raw {
            let record = record.resolve(task_id.clone())?;
            tasks.insert(task_id, record);
        }
        Ok(Self { tasks })
    }

    /// Add or replace a record, keeping the original position on replace.
    pub fn insert(&mut self, record: TaskRecord) {
        self.tasks.insert(record.task_id.clone(), record);
    }

    /// Look up a task record.
    pub fn get(&self, task_id: &str) -> Option<&TaskRecord> {
        self.tasks.get(task_id)
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.values()
    }

    /// Number of task records.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
