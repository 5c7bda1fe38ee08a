use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::agents::channel::{EventChannel, EventStream};
use crate::agents::errors::{SyncError, SyncResult};
use crate::agents::events::StateEvent;
use crate::agents::messages::FrameDecoder;

/// Server-Sent Events implementation of EventChannel
///
/// Opens `GET {base_url}/api/sse` and decodes each frame into a
/// [`StateEvent`]. Frames with an unrecognised event name are skipped; frames
/// whose payload does not parse fail the stream.
pub struct SseChannel {
    client: Client,
    base_url: String,
}

impl SseChannel {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/sse", self.base_url)
    }
}

#[async_trait]
impl EventChannel for SseChannel {
    async fn open(&self) -> SyncResult<EventStream> {
        let url = self.endpoint();
        tracing::debug!(url = %url, "Opening SSE event channel");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| SyncError::Stream(format!("Failed to connect to {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Stream(format!(
                "SSE endpoint returned {}",
                status.as_u16()
            )));
        }

        let byte_stream = response.bytes_stream();

        let stream = async_stream::stream! {
            let mut decoder = FrameDecoder::new();
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(SyncError::Stream(e.to_string()));
                        break;
                    }
                };

                for frame in decoder.push(&chunk) {
                    match StateEvent::from_frame(&frame) {
                        Ok(event) => yield Ok(event),
                        Err(SyncError::Stream(reason)) => {
                            tracing::debug!(event = %frame.event, reason = %reason, "Skipping SSE frame");
                        }
                        Err(e) => yield Err(e),
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::events::ConnectionStatus;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sse"))
            .and(header("accept", "text/event-stream"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_decodes_known_frames_and_skips_unknown() {
        let server = serve(concat!(
            "event: connection\ndata: {\"status\":\"connected\"}\n\n",
            ": keep-alive\n\n",
            "event: heartbeat\ndata: {}\n\n",
            "event: approval_request\n",
            "data: {\"type\":\"resume_improvements\",\"improvements\":[],",
            "\"original_resume\":\"a\",\"improved_resume\":\"b\"}\n\n",
        ))
        .await;

        let events: Vec<_> = SseChannel::new(server.uri()).open().await.unwrap().collect().await;

        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].as_ref().unwrap(),
            &StateEvent::Connection(ConnectionStatus::connected())
        );
        assert!(matches!(events[1], Ok(StateEvent::ApprovalRequest(_))));
    }

    #[tokio::test]
    async fn test_malformed_payload_fails_the_stream() {
        let server = serve("event: task_update\ndata: {not json}\n\n").await;

        let events: Vec<_> = SseChannel::new(server.uri()).open().await.unwrap().collect().await;

        assert!(matches!(events.as_slice(), [Err(SyncError::JsonError(_))]));
    }

    #[tokio::test]
    async fn test_open_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = SseChannel::new(server.uri()).open().await;

        assert!(matches!(result, Err(SyncError::Stream(message)) if message.contains("503")));
    }
}
