//! Per-task call counters for rotating through recorded calls.

use parking_lot::Mutex;
use std::collections::HashMap;

/// Invocation counters keyed by task id.
///
/// Owned by whoever drives the evaluation and handed to the
/// [`ResolutionEngine`](crate::ResolutionEngine); tools that rotate through a
/// task's calls read and bump the counter on every call made under that task.
#[derive(Debug, Default)]
pub struct CallCounters {
    counts: Mutex<HashMap<String, u64>>,
}

impl CallCounters {
    /// Create an empty counter table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the call index for this invocation, then advance the counter.
    ///
    /// The counter itself is unbounded; the index is `count % total`.
    /// Returns 0 when `total` is 0.
    pub fn next(&self, task_id: &str, total: usize) -> usize {
        let mut counts = self.counts.lock();
        let count = counts.entry(task_id.to_string()).or_insert(0);
        let index = if total == 0 {
            0
        } else {
            (*count % total as u64) as usize
        };
        *count = count.wrapping_add(1);
        index
    }

    /// Number of invocations recorded for a task.
    pub fn count(&self, task_id: &str) -> u64 {
        self.counts.lock().get(task_id).copied().unwrap_or(0)
    }

    /// Forget one task's counter.
    pub fn reset(&self, task_id: &str) {
        self.counts.lock().remove(task_id);
    }

    /// Forget every counter.
    pub fn reset_all(&self) {
        self.counts.lock().clear();
    }
}
