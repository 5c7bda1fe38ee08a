use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};

use super::errors::SyncResult;
use super::events::StateEvent;
use super::mock_source::{mock_stream, MockTiming};

/// Decoded events from one open connection; ends when the connection does
pub type EventStream = Pin<Box<dyn Stream<Item = SyncResult<StateEvent>> + Send>>;

/// A source of pushed state events
#[async_trait]
pub trait EventChannel: Send + Sync {
    /// Open a fresh connection
    async fn open(&self) -> SyncResult<EventStream>;
}

/// Event channel backed by the local mock scripts
#[derive(Debug, Clone, Default)]
pub struct MockChannel {
    timing: MockTiming,
}

impl MockChannel {
    pub fn new(timing: MockTiming) -> Self {
        Self { timing }
    }
}

#[async_trait]
impl EventChannel for MockChannel {
    async fn open(&self) -> SyncResult<EventStream> {
        tracing::debug!("Opening mock event channel");
        Ok(Box::pin(mock_stream(self.timing).map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_channel_yields_only_ok_events() {
        let channel = MockChannel::new(MockTiming::instant());

        let events: Vec<_> = channel.open().await.unwrap().collect().await;

        assert!(!events.is_empty());
        assert!(events.iter().all(Result::is_ok));
    }

    #[tokio::test]
    async fn each_open_replays_the_scripts() {
        let channel = MockChannel::new(MockTiming::instant());

        let first = channel.open().await.unwrap().count().await;
        let second = channel.open().await.unwrap().count().await;

        assert_eq!(first, second);
    }
}
