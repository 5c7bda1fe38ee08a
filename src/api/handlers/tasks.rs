use axum::{extract::State, Json};

use crate::agents::tasks::TaskRegistry;
use crate::api::state::AppState;

/// Get the task registry
///
/// GET /api/tasks
pub async fn get_tasks(State(state): State<AppState>) -> Json<TaskRegistry> {
    Json(state.store.task_registry())
}
