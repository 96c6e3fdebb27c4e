//! In-memory task collection with creation-order ids.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{NewTask, Task};
use crate::error::ValidationError;

/// The set of user-defined tasks.
///
/// Iteration order is creation order. Ids are never reused, even after
/// deletion, so the flexible packer's stable tie-break stays meaningful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
    #[serde(default)]
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new task, returning the stored record.
    pub fn add(&mut self, new_task: NewTask) -> Result<&Task, ValidationError> {
        new_task.validate()?;

        let id = self.allocate_id();
        self.tasks.push(Task {
            id,
            title: new_task.title.trim().to_string(),
            priority: new_task.priority,
            kind: new_task.kind,
            created_at: Utc::now(),
        });
        tracing::debug!("task {} added", id);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Remove a task by id.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Drop every task, returning how many were removed.
    ///
    /// The id counter keeps running so cleared ids are never handed out again.
    pub fn clear(&mut self) -> usize {
        let removed = self.tasks.len();
        if let Some(last) = self.tasks.iter().map(|t| t.id).max() {
            self.next_id = self.next_id.max(last + 1);
        }
        self.tasks.clear();
        tracing::debug!("cleared {} tasks", removed);
        removed
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All fixed tasks in creation order.
    pub fn fixed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_fixed()).collect()
    }

    /// All flexible tasks in creation order.
    pub fn flexible(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_flexible()).collect()
    }

    fn allocate_id(&mut self) -> u64 {
        // A snapshot written by hand may carry a stale counter.
        let floor = self.tasks.iter().map(|t| t.id + 1).max().unwrap_or(1);
        let id = self.next_id.max(floor);
        self.next_id = id + 1;
        id
    }
}
