use std::sync::Arc;

use super::errors::SyncResult;
use super::state::{AgentStore, StoreCommand};
use crate::domain::agent::{AgentProgress, ProgressOp};

/// Typed progress mutations for one agent
///
/// Holds no copy of the progress slice; every call is a command against the
/// shared store and every read goes back to it.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use careerhq_api::agents::{AgentProgressHandle, AgentStore};
///
/// let store = Arc::new(AgentStore::new());
/// let progress = AgentProgressHandle::new(store, "resume_agent");
///
/// progress.update_progress(25, "Parsed resume sections").unwrap();
/// assert_eq!(progress.progress().completion_status, 25);
/// ```
#[derive(Debug, Clone)]
pub struct AgentProgressHandle {
    store: Arc<AgentStore>,
    agent: String,
}

impl AgentProgressHandle {
    pub fn new(store: Arc<AgentStore>, agent: impl Into<String>) -> Self {
        Self {
            store,
            agent: agent.into(),
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Current progress slice
    pub fn progress(&self) -> AgentProgress {
        self.store.progress(&self.agent)
    }

    /// Record a new completion value and log the delta as a contribution
    pub fn update_progress(&self, completion: i32, description: impl Into<String>) -> SyncResult<()> {
        if !(0..=100).contains(&completion) {
            tracing::warn!(
                agent = %self.agent,
                completion,
                "Progress value outside 0-100 passed through"
            );
        }
        self.apply(ProgressOp::Update {
            completion,
            description: description.into(),
        })
    }

    pub fn update_thinking(&self, thinking: impl Into<String>) -> SyncResult<()> {
        self.apply(ProgressOp::Thinking(thinking.into()))
    }

    pub fn set_current_action(&self, action: impl Into<String>) -> SyncResult<()> {
        self.apply(ProgressOp::CurrentAction(action.into()))
    }

    /// Mark analysis as running and reset completion to 0
    pub fn start_analyzing(&self) -> SyncResult<()> {
        self.apply(ProgressOp::StartAnalyzing)
    }

    /// Mark analysis as finished and force completion to 100
    pub fn stop_analyzing(&self) -> SyncResult<()> {
        self.apply(ProgressOp::StopAnalyzing)
    }

    fn apply(&self, op: ProgressOp) -> SyncResult<()> {
        self.store
            .dispatch(StoreCommand::UpdateProgress {
                agent: self.agent.clone(),
                op,
            })
            .map(|_| ())
    }
}
