use serde::{Deserialize, Serialize};

/// Represents the lifecycle status of a task
///
/// # Status Transitions
/// ```text
/// Pending -> InProgress -> Completed
///    |           |  \----> Blocked -> InProgress
///    |           \-------> Failed  -> Pending
///    \-------------------> Completed
/// Completed -> InProgress (reopen)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is registered but not started
    Pending,
    /// Task is being worked on
    InProgress,
    /// Task finished successfully
    Completed,
    /// Task is waiting on something outside the agent
    Blocked,
    /// Task failed
    Failed,
}

impl TaskStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Valid Transitions
    /// - Any status -> itself
    /// - Pending -> InProgress, Completed, Blocked, Failed
    /// - InProgress -> Completed, Blocked, Failed
    /// - Blocked -> Pending, InProgress, Failed
    /// - Failed -> Pending, InProgress
    /// - Completed -> InProgress
    ///
    /// # Example
    /// ```
    /// use careerhq_api::domain::task::value_objects::TaskStatus;
    ///
    /// assert!(TaskStatus::Pending.can_transition_to(TaskStatus::InProgress));
    /// assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Failed));
    /// ```
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Pending, InProgress)
                    | (Pending, Completed)
                    | (Pending, Blocked)
                    | (Pending, Failed)
                    | (InProgress, Completed)
                    | (InProgress, Blocked)
                    | (InProgress, Failed)
                    | (Blocked, Pending)
                    | (Blocked, InProgress)
                    | (Blocked, Failed)
                    | (Failed, Pending)
                    | (Failed, InProgress)
                    | (Completed, InProgress)
            )
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Blocked => write!(f, "blocked"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}
