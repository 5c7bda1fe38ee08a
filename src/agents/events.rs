// Push updates flowing from a backend (or the mock source) into the store

use serde::{Deserialize, Serialize};

use super::errors::{SyncError, SyncResult};
use super::messages::StreamFrame;
use super::tasks::TaskRegistry;
use crate::domain::agent::AgentState;
use crate::domain::approval::ApprovalData;

/// Status payload of a `connection` frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: String,
}

impl ConnectionStatus {
    pub fn connected() -> Self {
        Self {
            status: "connected".to_string(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == "connected"
    }
}

/// A state delta pushed over the event channel
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    Connection(ConnectionStatus),
    AgentUpdate(AgentState),
    TaskUpdate(TaskRegistry),
    ApprovalRequest(ApprovalData),
}

impl StateEvent {
    pub const CONNECTION: &'static str = "connection";
    pub const AGENT_UPDATE: &'static str = "agent_update";
    pub const TASK_UPDATE: &'static str = "task_update";
    pub const APPROVAL_REQUEST: &'static str = "approval_request";

    /// SSE event name for this variant
    pub fn name(&self) -> &'static str {
        match self {
            StateEvent::Connection(_) => Self::CONNECTION,
            StateEvent::AgentUpdate(_) => Self::AGENT_UPDATE,
            StateEvent::TaskUpdate(_) => Self::TASK_UPDATE,
            StateEvent::ApprovalRequest(_) => Self::APPROVAL_REQUEST,
        }
    }

    pub fn to_frame(&self) -> SyncResult<StreamFrame> {
        let data = match self {
            StateEvent::Connection(status) => serde_json::to_string(status)?,
            StateEvent::AgentUpdate(state) => serde_json::to_string(state)?,
            StateEvent::TaskUpdate(registry) => serde_json::to_string(registry)?,
            StateEvent::ApprovalRequest(approval) => serde_json::to_string(approval)?,
        };
        Ok(StreamFrame::new(self.name(), data))
    }

    /// Decode a frame; unknown event names are reported as stream errors
    pub fn from_frame(frame: &StreamFrame) -> SyncResult<Self> {
        let data = frame.data.as_str();
        match frame.event.as_str() {
            Self::CONNECTION => Ok(StateEvent::Connection(serde_json::from_str(data)?)),
            Self::AGENT_UPDATE => Ok(StateEvent::AgentUpdate(serde_json::from_str(data)?)),
            Self::TASK_UPDATE => Ok(StateEvent::TaskUpdate(serde_json::from_str(data)?)),
            Self::APPROVAL_REQUEST => Ok(StateEvent::ApprovalRequest(serde_json::from_str(data)?)),
            other => Err(SyncError::Stream(format!("unknown event type: {other}"))),
        }
    }
}
