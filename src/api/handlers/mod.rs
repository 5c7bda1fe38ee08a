// HTTP handlers, one module per resource

pub mod agents;
pub mod approval;
pub mod copilot;
pub mod events;
pub mod state;
pub mod tasks;

use axum::{extract::rejection::JsonRejection, Json};

use crate::api::errors::ApiError;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Unwrap a JSON body, answering malformed input with a 500 and `failure`
pub(crate) fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    failure: &str,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "{}", failure);
            Err(ApiError::internal_server_error(failure))
        }
    }
}
