use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::header::{CACHE_CONTROL, CONNECTION, CONTENT_TYPE},
    response::Response,
};
use futures::StreamExt;

use crate::agents::mock_source::mock_stream;
use crate::api::errors::ApiError;
use crate::api::state::AppState;

/// Server-Sent Events stream of agent, task and approval updates
///
/// GET /api/sse
///
/// Opens with a `connection` frame, then replays the mock scripts for this
/// client. The response stays open after the scripts finish; disconnecting
/// stops the scripts.
pub async fn stream_events(State(state): State<AppState>) -> Result<Response, ApiError> {
    tracing::info!("SSE client connected");

    let frames = mock_stream(state.config.mock_timing()).filter_map(|event| async move {
        match event.to_frame() {
            Ok(frame) => Some(Ok::<_, Infallible>(frame.encode())),
            Err(e) => {
                tracing::error!(event = event.name(), error = %e, "Failed to encode SSE frame");
                None
            }
        }
    })
    .chain(futures::stream::pending());

    Response::builder()
        .header(CONTENT_TYPE, "text/event-stream")
        .header(CACHE_CONTROL, "no-cache, no-transform")
        .header(CONNECTION, "keep-alive")
        .header("x-accel-buffering", "no")
        .body(Body::from_stream(frames))
        .map_err(|e| ApiError::internal_server_error(format!("Failed to open event stream: {}", e)))
}
