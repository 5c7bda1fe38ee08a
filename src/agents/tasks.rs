use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::errors::{SyncError, SyncResult};
use crate::domain::task::{NewTask, Task, TaskEvent, TaskStatus};

/// Ordered collection of tasks with a derived completion percentage
///
/// `overall_completion` is recomputed after every mutation and on
/// deserialization, so a snapshot pushed by a backend can never carry a value
/// that disagrees with its task list. Snapshots are also checked task by task:
/// unnamed tasks and repeated ids are dropped, and each task's completion
/// fields are realigned with its status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RegistrySnapshot")]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    overall_completion: u8,
}

#[derive(Deserialize)]
struct RegistrySnapshot {
    #[serde(default)]
    tasks: Vec<Task>,
}

impl From<RegistrySnapshot> for TaskRegistry {
    fn from(snapshot: RegistrySnapshot) -> Self {
        Self::from_tasks(snapshot.tasks)
    }
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let now = Utc::now();
        let mut seen = HashSet::new();
        let tasks = tasks
            .into_iter()
            .filter_map(|mut task| {
                if task.name().trim().is_empty() {
                    tracing::warn!(task_id = task.id(), "Dropping task without a name");
                    return None;
                }
                if !seen.insert(task.id().to_string()) {
                    tracing::warn!(task_id = task.id(), "Dropping task with repeated id");
                    return None;
                }
                task.normalize(now);
                Some(task)
            })
            .collect();

        let mut registry = Self {
            tasks,
            overall_completion: 0,
        };
        registry.recompute();
        registry
    }

    /// Register a task, stamped with the current time
    pub fn add_task(&mut self, new_task: NewTask) -> SyncResult<TaskEvent> {
        if let Some(id) = new_task.id.as_deref() {
            if self.tasks.iter().any(|t| t.id() == id) {
                return Err(SyncError::DuplicateTask(id.to_string()));
            }
        }

        let task = Task::new(new_task).map_err(SyncError::InvalidTask)?;
        let event = TaskEvent::Added {
            task_id: task.id().to_string(),
            name: task.name().to_string(),
            assigned_to: task.assigned_to().to_string(),
        };

        tracing::debug!(task_id = task.id(), name = task.name(), "Task registered");
        self.tasks.push(task);
        self.recompute();

        Ok(event)
    }

    /// Move the first task called `name` to `status`
    ///
    /// Returns `Ok(None)` when no task has that name.
    pub fn update_task_status(
        &mut self,
        name: &str,
        status: TaskStatus,
    ) -> SyncResult<Option<TaskEvent>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.name() == name) else {
            tracing::debug!(name, "Ignoring status update for unknown task");
            return Ok(None);
        };

        if !task.status().can_transition_to(status) {
            return Err(SyncError::InvalidStateTransition {
                from: task.status().to_string(),
                to: status.to_string(),
            });
        }

        let task_id = task.id().to_string();
        let from = task.set_status(status, Utc::now());
        self.recompute();

        Ok(Some(TaskEvent::StatusChanged {
            task_id,
            from,
            to: status,
            overall_completion: self.overall_completion,
        }))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status().is_completed())
            .collect()
    }

    pub fn overall_completion(&self) -> u8 {
        self.overall_completion
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn recompute(&mut self) {
        let total = self.tasks.len();
        self.overall_completion = if total == 0 {
            0
        } else {
            let completed = self.tasks.iter().filter(|t| t.status().is_completed()).count();
            (completed as f64 / total as f64 * 100.0).round() as u8
        };
    }
}
