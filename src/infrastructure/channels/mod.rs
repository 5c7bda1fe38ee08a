// Event channel implementations

pub mod sse_channel;

pub use sse_channel::SseChannel;

use std::sync::Arc;

use crate::agents::{AgentStore, ConnectionManager, EventChannel, MockChannel};
use crate::config::Config;

/// Connection manager feeding `store` from the configured backend
///
/// The primary channel is `CAREERHQ_API_URL`'s `/api/sse`, or the mock
/// scripts when `USE_MOCK` is set. The mock scripts are always the fallback.
/// `store` must not be the one a server built from the same config serves,
/// since the default URL is that server's own stream.
pub fn backend_connection(config: &Config, store: Arc<AgentStore>) -> ConnectionManager {
    let fallback: Arc<dyn EventChannel> = Arc::new(MockChannel::new(config.mock_timing()));
    let primary: Arc<dyn EventChannel> = if config.use_mock {
        tracing::info!("USE_MOCK set, following the mock scripts");
        fallback.clone()
    } else {
        tracing::info!(api_url = %config.api_url, "Following backend event stream");
        Arc::new(SseChannel::new(config.api_url.clone()))
    };

    ConnectionManager::new(store, primary, fallback).with_max_retries(config.max_reconnect_attempts)
}
