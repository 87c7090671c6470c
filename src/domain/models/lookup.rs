//! Read-only id → task snapshot shared by every scoring call of a batch.

use std::collections::HashMap;

use super::task::{TaskId, TaskRecord};

/// Immutable id lookup built once per batch.
///
/// When a batch contains duplicate ids the last record wins.
#[derive(Debug, Clone, Default)]
pub struct TaskLookup<'a> {
    by_id: HashMap<&'a TaskId, &'a TaskRecord>,
}

impl<'a> TaskLookup<'a> {
    pub fn new(tasks: &'a [TaskRecord]) -> Self {
        Self {
            by_id: tasks.iter().map(|t| (&t.id, t)).collect(),
        }
    }

    pub fn get(&self, id: &TaskId) -> Option<&'a TaskRecord> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
