use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::parse_body;
use crate::agents::errors::SyncError;
use crate::agents::scripts::{JOB_SEARCH_AGENT, RESUME_AGENT};
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::agent::JobSearchCriteria;
use crate::domain::task::NewTask;

pub const RESUME_TASK_ID: &str = "task-1";
pub const JOB_SEARCH_TASK_ID: &str = "task-3";

/// Request body for starting a resume analysis
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub resume: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Request body for starting a job search
#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub criteria: JobSearchCriteria,
}

/// Response from starting an agent run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTaskResponse {
    pub task_id: String,
    pub message: String,
}

/// Start a resume analysis
///
/// POST /api/agents/resume
pub async fn start_resume_analysis(
    State(state): State<AppState>,
    payload: Result<Json<ResumeRequest>, JsonRejection>,
) -> Result<Json<AgentTaskResponse>, ApiError> {
    let req = parse_body(payload, "Failed to process resume")?;
    tracing::info!(
        resume_len = req.resume.len(),
        has_job_description = req.job_description.is_some(),
        "Resume analysis requested"
    );

    register(
        &state,
        NewTask::named("Analyze Resume")
            .with_id(RESUME_TASK_ID)
            .assigned_to(RESUME_AGENT),
    )?;

    Ok(Json(AgentTaskResponse {
        task_id: RESUME_TASK_ID.to_string(),
        message: "Resume upload successful. Analysis started.".to_string(),
    }))
}

/// Start a job search
///
/// POST /api/agents/job_search
pub async fn start_job_search(
    State(state): State<AppState>,
    payload: Result<Json<JobSearchRequest>, JsonRejection>,
) -> Result<Json<AgentTaskResponse>, ApiError> {
    let req = parse_body(payload, "Failed to initiate job search")?;
    tracing::info!(role = ?req.criteria.role, location = ?req.criteria.location, "Job search requested");

    register(
        &state,
        NewTask::named("Find Matching Jobs")
            .with_id(JOB_SEARCH_TASK_ID)
            .assigned_to(JOB_SEARCH_AGENT),
    )?;

    Ok(Json(AgentTaskResponse {
        task_id: JOB_SEARCH_TASK_ID.to_string(),
        message: "Job search initiated with provided criteria.".to_string(),
    }))
}

/// Track the run in the task registry; a repeated request keeps the existing task
fn register(state: &AppState, new_task: NewTask) -> Result<(), ApiError> {
    match state.store.add_task(new_task) {
        Ok(event) => {
            tracing::debug!(task_id = %event.task_id(), "Task registered");
            Ok(())
        }
        Err(SyncError::DuplicateTask(id)) => {
            tracing::debug!(task_id = %id, "Task already registered");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
