use serde::{Deserialize, Serialize};

use super::value_objects::TaskStatus;

/// Events emitted by the task registry
///
/// # Example
/// ```
/// use careerhq_api::domain::task::events::TaskEvent;
///
/// let event = TaskEvent::Added {
///     task_id: "task-1".to_string(),
///     name: "Parse Resume".to_string(),
///     assigned_to: "resume_agent".to_string(),
/// };
/// assert_eq!(event.task_id(), "task-1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskEvent {
    /// Fired when a task is registered
    Added {
        task_id: String,
        name: String,
        assigned_to: String,
    },
    /// Fired when a task changes status
    StatusChanged {
        task_id: String,
        from: TaskStatus,
        to: TaskStatus,
        /// Registry-wide completion after the change
        overall_completion: u8,
    },
}

impl TaskEvent {
    /// Returns the task_id for this event
    pub fn task_id(&self) -> &str {
        match self {
            TaskEvent::Added { task_id, .. } => task_id,
            TaskEvent::StatusChanged { task_id, .. } => task_id,
        }
    }
}
