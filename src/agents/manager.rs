use std::sync::Arc;

use futures::StreamExt;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::channel::EventChannel;
use super::errors::SyncError;
use super::events::StateEvent;
use super::state::AgentStore;

pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Default)]
struct ConnectionState {
    attempts: u32,
    fallback: bool,
    last_error: Option<String>,
    supervisor: Option<CancellationToken>,
}

/// Keeps the store fed from an event channel
///
/// Failures of the primary channel are retried immediately up to
/// `max_retries` times. The next failure switches to the fallback channel for
/// good, until `network_restored` resets the counters. A `connection` event
/// from the primary proves the link healthy and clears the retry count.
#[derive(Clone)]
pub struct ConnectionManager {
    store: Arc<AgentStore>,
    primary: Arc<dyn EventChannel>,
    fallback: Arc<dyn EventChannel>,
    max_retries: u32,
    state: Arc<Mutex<ConnectionState>>,
}

impl ConnectionManager {
    pub fn new(
        store: Arc<AgentStore>,
        primary: Arc<dyn EventChannel>,
        fallback: Arc<dyn EventChannel>,
    ) -> Self {
        Self {
            store,
            primary,
            fallback,
            max_retries: DEFAULT_MAX_RETRIES,
            state: Arc::new(Mutex::new(ConnectionState::default())),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Start (or restart) the connection loop
    ///
    /// The returned handle finishes when the loop gives up, is closed, or the
    /// fallback stream runs out.
    pub fn connect(&self) -> JoinHandle<()> {
        let cancel = CancellationToken::new();
        if let Some(previous) = self.state.lock().supervisor.replace(cancel.clone()) {
            previous.cancel();
        }

        let manager = self.clone();
        tokio::spawn(async move { manager.supervise(cancel).await })
    }

    /// Forget past failures and reconnect to the primary channel
    pub fn network_restored(&self) -> JoinHandle<()> {
        {
            let mut state = self.state.lock();
            state.attempts = 0;
            state.fallback = false;
            state.last_error = None;
        }
        tracing::info!("Network restored, reconnecting to event channel");
        self.connect()
    }

    /// Switch to the fallback channel without waiting for failures
    pub fn activate_fallback(&self) -> JoinHandle<()> {
        self.state.lock().fallback = true;
        tracing::info!("Fallback mode activated");
        self.connect()
    }

    pub fn close(&self) {
        if let Some(supervisor) = self.state.lock().supervisor.take() {
            supervisor.cancel();
        }
        if let Err(e) = self.store.set_connected(false) {
            tracing::error!(error = %e, "Failed to record disconnect");
        }
        tracing::info!("Event channel closed");
    }

    pub fn attempts(&self) -> u32 {
        self.state.lock().attempts
    }

    pub fn is_fallback(&self) -> bool {
        self.state.lock().fallback
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    async fn supervise(self, cancel: CancellationToken) {
        loop {
            let fallback = self.state.lock().fallback;
            let channel = if fallback {
                self.fallback.clone()
            } else {
                self.primary.clone()
            };

            let failure = tokio::select! {
                _ = cancel.cancelled() => return,
                failure = self.pump(channel.as_ref()) => failure,
            };
            if cancel.is_cancelled() {
                return;
            }

            if fallback {
                match failure {
                    SyncError::ChannelClosed => tracing::info!("Fallback event stream finished"),
                    e => tracing::error!(error = %e, "Fallback event stream failed"),
                }
                return;
            }

            if let Err(e) = self.store.set_connected(false) {
                tracing::error!(error = %e, "Failed to record disconnect");
            }

            let mut state = self.state.lock();
            state.last_error = Some(failure.to_string());
            if state.attempts < self.max_retries {
                state.attempts += 1;
                tracing::warn!(
                    attempt = state.attempts,
                    max_retries = self.max_retries,
                    error = %failure,
                    "Event channel failed, reconnecting"
                );
            } else {
                state.fallback = true;
                tracing::warn!(
                    error = %failure,
                    "Event channel retries exhausted, switching to fallback"
                );
            }
        }
    }

    /// Apply events until the connection fails, returning the failure
    async fn pump(&self, channel: &dyn EventChannel) -> SyncError {
        let mut stream = match channel.open().await {
            Ok(stream) => stream,
            Err(e) => return e,
        };
        if let Err(e) = self.store.set_connected(true) {
            return e;
        }

        while let Some(item) = stream.next().await {
            if let Ok(StateEvent::Connection(status)) = &item {
                if status.is_connected() {
                    self.state.lock().attempts = 0;
                }
            }
            let applied = item.and_then(|event| self.store.apply_event(event));
            if let Err(e) = applied {
                return e;
            }
        }
        SyncError::ChannelClosed
    }
}
