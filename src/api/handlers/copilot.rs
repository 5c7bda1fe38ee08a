use axum::Json;
use serde_json::Value;

use crate::agents::scripts::library;

/// Copilot runtime endpoint
///
/// POST /api/copilotkit
///
/// Returns a fixed snapshot regardless of the request body.
pub async fn copilot_runtime() -> Json<Value> {
    tracing::debug!("Serving mock copilot runtime response");
    Json(library::copilot_payload())
}
