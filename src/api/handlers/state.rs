use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::agents::errors::SyncError;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::agent::{AgentState, AgentStatus};

/// Summary of an agent's record
#[derive(Debug, Serialize)]
pub struct AgentStateResponse {
    pub name: String,
    pub status: AgentStatus,
    pub completion_percentage: u8,
}

impl From<AgentState> for AgentStateResponse {
    fn from(state: AgentState) -> Self {
        Self {
            name: state.name,
            status: state.status,
            completion_percentage: state.completion_percentage,
        }
    }
}

/// Get an agent's state
///
/// GET /api/state/:agent_name
pub async fn get_agent_state(
    State(state): State<AppState>,
    Path(agent_name): Path<String>,
) -> Result<Json<AgentStateResponse>, ApiError> {
    if !state.config.is_known_agent(&agent_name) {
        return Err(SyncError::AgentNotFound(agent_name).into());
    }

    let record = state.store.get_agent_state(&agent_name);
    Ok(Json(AgentStateResponse::from(record)))
}
