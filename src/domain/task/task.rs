use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::TaskStatus;

/// Input for registering a task
///
/// `id` is generated when not supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl NewTask {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn assigned_to(mut self, agent: impl Into<String>) -> Self {
        self.assigned_to = agent.into();
        self
    }

    pub fn depends_on(mut self, ids: &[&str]) -> Self {
        self.depends_on = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// A unit of work assigned to an agent
///
/// # Invariants
/// - Name cannot be empty
/// - `completed_at` is set iff status is `Completed`
/// - `completion_percentage` is 100 when `Completed`, 0 otherwise
///
/// # Example
/// ```
/// use careerhq_api::domain::task::{NewTask, Task, TaskStatus};
///
/// let task = Task::new(NewTask::named("Parse Resume").assigned_to("resume_agent"))
///     .expect("valid task");
///
/// assert_eq!(task.status(), TaskStatus::Pending);
/// assert!(task.completed_at().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: String,
    name: String,
    status: TaskStatus,
    assigned_to: String,
    #[serde(default)]
    depends_on: Vec<String>,
    #[serde(default)]
    completion_percentage: u8,
    created_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Task {
    /// Creates a new task stamped with the current time
    ///
    /// # Returns
    /// * `Ok(Task)` - New task, `Pending` unless a status was given
    /// * `Err(String)` - If the name is empty
    pub fn new(new_task: NewTask) -> Result<Self, String> {
        if new_task.name.trim().is_empty() {
            return Err("Task name cannot be empty".to_string());
        }

        let now = Utc::now();
        let status = new_task.status.unwrap_or(TaskStatus::Pending);

        Ok(Self {
            id: new_task
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_task.name,
            status,
            assigned_to: new_task.assigned_to,
            depends_on: new_task.depends_on,
            completion_percentage: if status.is_completed() { 100 } else { 0 },
            created_at: now,
            completed_at: status.is_completed().then_some(now),
            description: new_task.description,
        })
    }

    /// Moves the task to `next` without consulting the transition table
    ///
    /// Stamps `completed_at` when `next` is `Completed` and clears it otherwise.
    /// Returns the previous status.
    pub(crate) fn set_status(&mut self, next: TaskStatus, at: DateTime<Utc>) -> TaskStatus {
        let previous = self.status;
        self.status = next;
        self.completed_at = next.is_completed().then_some(at);
        self.completion_percentage = if next.is_completed() { 100 } else { 0 };
        previous
    }

    /// Bring a deserialized task back in line with its status
    ///
    /// A completed task missing `completed_at` is stamped with `at`; an
    /// existing stamp is kept.
    pub(crate) fn normalize(&mut self, at: DateTime<Utc>) {
        if self.status.is_completed() {
            self.completed_at.get_or_insert(at);
            self.completion_percentage = 100;
        } else {
            self.completed_at = None;
            self.completion_percentage = 0;
        }
    }

    // ===== Getters =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    pub fn completion_percentage(&self) -> u8 {
        self.completion_percentage
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_task_with_generated_id() {
        let task = Task::new(NewTask::named("Analyze Content")).unwrap();

        assert!(Uuid::parse_str(task.id()).is_ok());
        assert_eq!(task.name(), "Analyze Content");
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.completion_percentage(), 0);
    }

    #[test]
    fn create_task_keeps_supplied_id_and_dependencies() {
        let task = Task::new(
            NewTask::named("Generate Improvements")
                .with_id("task-3")
                .assigned_to("resume_agent")
                .depends_on(&["task-2"]),
        )
        .unwrap();

        assert_eq!(task.id(), "task-3");
        assert_eq!(task.assigned_to(), "resume_agent");
        assert_eq!(task.depends_on(), &["task-2".to_string()]);
    }

    #[test]
    fn create_task_with_empty_name_fails() {
        let result = Task::new(NewTask::named("   "));

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Task name cannot be empty"));
    }

    #[test]
    fn create_completed_task_is_stamped() {
        let task = Task::new(NewTask::named("analyze_resume").with_status(TaskStatus::Completed))
            .unwrap();

        assert!(task.completed_at().is_some());
        assert_eq!(task.completion_percentage(), 100);
    }

    #[test]
    fn set_status_stamps_and_clears_completed_at() {
        let mut task = Task::new(NewTask::named("Parse Resume")).unwrap();
        let now = Utc::now();

        let previous = task.set_status(TaskStatus::Completed, now);
        assert_eq!(previous, TaskStatus::Pending);
        assert_eq!(task.completed_at(), Some(now));

        task.set_status(TaskStatus::InProgress, Utc::now());
        assert!(task.completed_at().is_none());
    }

    #[test]
    fn set_status_tracks_completion_percentage() {
        let mut task = Task::new(NewTask::named("Parse Resume")).unwrap();

        task.set_status(TaskStatus::Completed, Utc::now());
        assert_eq!(task.completion_percentage(), 100);

        task.set_status(TaskStatus::InProgress, Utc::now());
        assert_eq!(task.completion_percentage(), 0);
    }

    #[test]
    fn normalize_repairs_deserialized_fields() {
        let now = Utc::now();
        let mut completed: Task = serde_json::from_value(serde_json::json!({
            "id": "t",
            "name": "A",
            "status": "completed",
            "assigned_to": "x",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let mut pending: Task = serde_json::from_value(serde_json::json!({
            "id": "u",
            "name": "B",
            "status": "pending",
            "assigned_to": "x",
            "completion_percentage": 100,
            "created_at": "2024-01-01T00:00:00Z",
            "completed_at": "2024-01-02T00:00:00Z"
        }))
        .unwrap();

        completed.normalize(now);
        pending.normalize(now);

        assert_eq!(completed.completed_at(), Some(now));
        assert_eq!(completed.completion_percentage(), 100);
        assert!(pending.completed_at().is_none());
        assert_eq!(pending.completion_percentage(), 0);
    }

    #[test]
    fn task_round_trips_through_json() {
        let task = Task::new(NewTask::named("Parse Resume").with_id("task-1")).unwrap();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json["completed_at"].is_null());

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
