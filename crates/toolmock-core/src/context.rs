//! Evaluation task context.
//!
//! The harness marks a task as running before it hands control to the agent
//! and clears it afterwards. Mock tools only ever read this state, and always
//! through a single [`TaskSnapshot`] so that the `active` flag and the task id
//! cannot be observed from two different moments.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Point-in-time view of the task context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Whether an evaluation task is currently running.
    pub active: bool,

    /// Identifier of the running task. Only meaningful while `active`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl TaskSnapshot {
    /// Snapshot with no running task.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Snapshot of a running task.
    pub fn running(task_id: impl Into<String>) -> Self {
        Self {
            active: true,
            task_id: Some(task_id.into()),
        }
    }

    /// The task id, but only while the task is active.
    pub fn active_task_id(&self) -> Option<&str> {
        if self.active {
            self.task_id.as_deref()
        } else {
            None
        }
    }
}

/// Read-only access to the ambient task state.
pub trait TaskContext: Send + Sync {
    /// Read `active` and the task id together.
    fn snapshot(&self) -> TaskSnapshot;

    /// Check whether a task is running.
    fn is_task_active(&self) -> bool {
        self.snapshot().active
    }

    /// Get the running task id, if any.
    fn current_task_id(&self) -> Option<String> {
        let snapshot = self.snapshot();
        snapshot.active_task_id().map(str::to_string)
    }
}

/// Context used when no harness is wired in. Never reports a running task.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTaskContext;

impl TaskContext for NullTaskContext {
    fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot::inactive()
    }
}

/// Harness-owned task context.
///
/// Cloning yields another handle onto the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedTaskContext {
    state: Arc<RwLock<TaskSnapshot>>,
}

impl SharedTaskContext {
    /// Create a context with no running task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a task as running.
    pub fn begin(&self, task_id: impl Into<String>) {
        let task_id = task_id.into();
        tracing::debug!(task_id = %task_id, "Task context activated");
        *self.state.write() = TaskSnapshot::running(task_id);
    }

    /// Clear the running task.
    pub fn finish(&self) {
        let mut state = self.state.write();
        if let Some(task_id) = state.task_id.take() {
            tracing::debug!(task_id = %task_id, "Task context cleared");
        }
        state.active = false;
    }
}

impl TaskContext for SharedTaskContext {
    fn snapshot(&self) -> TaskSnapshot {
        self.state.read().clone()
    }
}
