use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{agents, approval, copilot, events, health_check, state, tasks};
use super::state::AppState;

/// Build the HTTP router with CORS open to every origin
pub fn router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Agent kick-off routes
        .route("/api/agents/resume", post(agents::start_resume_analysis))
        .route("/api/agents/job_search", post(agents::start_job_search))
        // Human-in-the-loop
        .route("/api/approval", post(approval::submit_approval))
        // State views
        .route("/api/state/:agent_name", get(state::get_agent_state))
        .route("/api/tasks", get(tasks::get_tasks))
        // Push channel
        .route("/api/sse", get(events::stream_events))
        // Copilot runtime
        .route("/api/copilotkit", post(copilot::copilot_runtime))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(app_state)
}
